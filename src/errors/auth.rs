use actix_web::error;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header is missing or malformed")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("token subject doesn't match the requested user")]
    UserMismatch,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }
}
