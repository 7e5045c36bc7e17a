pub mod auth;
pub mod wallet;

use actix_web::{
    HttpResponse,
    body::BoxBody,
    error::{self, JsonPayloadError},
    http::StatusCode,
};

use crate::errors::auth::AuthError;
use crate::errors::wallet::WalletError;
use crate::models::responses::{ApiError, ApiResponse, None};

#[derive(Debug, thiserror::Error)]
pub enum PortmonetkaError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    JsonPayload(#[from] JsonPayloadError),
}

impl error::ResponseError for PortmonetkaError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortmonetkaError::Wallet(e) => e.status_code(),
            PortmonetkaError::Auth(e) => e.status_code(),
            PortmonetkaError::JsonPayload(..) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let message = self.to_string();

        let error = ApiError {
            code: match self {
                PortmonetkaError::Wallet(WalletError::Store(..)) => "database_error",
                PortmonetkaError::Wallet(..) => "wallet_error",
                PortmonetkaError::Auth(..) => "authentication_error",
                PortmonetkaError::JsonPayload(..) => "validation_error",
            },
            message: &message,
        };

        let response: ApiResponse<'_, None> = ApiResponse {
            error: Some(error),
            ..Default::default()
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}
