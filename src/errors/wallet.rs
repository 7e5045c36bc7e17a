use actix_web::error;

use crate::database::StoreError;

/// Business-rule failures of the wallet service. All of them are terminal and
/// map to 422; store failures pass through untranslated.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet with this id doesn't exist")]
    NotFound,

    #[error("wallet with this name already exists")]
    AlreadyExists,

    #[error("wallet with this id doesn't belong to user")]
    NotOwned,

    #[error("at least one field for updating wallet is required")]
    AtLeastOneFieldRequired,

    #[error("wallet name must be from 3 to 128 symbols long")]
    NameLength,

    #[error("wallet description must be less than 256 symbols long")]
    DescriptionLength,

    #[error("wallet currency must be 3 symbols long")]
    Currency,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl error::ResponseError for WalletError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            WalletError::Store(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}
