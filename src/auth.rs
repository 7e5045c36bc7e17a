//! Bearer-token authentication. The owner id handlers pass to the wallet
//! service always comes from the verified token, never from the request path
//! alone.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::AUTHORIZATION, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::errors::PortmonetkaError;
use crate::errors::auth::AuthError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id.
    pub sub: i64,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl AuthenticatedUser {
    /// Checks the token subject against the user id addressed by the request
    /// path and returns the id authorization is scoped to.
    pub fn authorize(&self, path_user_id: i64) -> Result<i64, AuthError> {
        if self.user_id != path_user_id {
            return Err(AuthError::UserMismatch);
        }
        Ok(self.user_id)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = PortmonetkaError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(PortmonetkaError::Auth))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::InvalidToken)?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = decode_token(
        token,
        &state.config.jwt_secret,
        state.config.jwt_issuer.as_deref(),
    )?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
    })
}

pub fn decode_token(
    token: &str,
    secret: &str,
    issuer: Option<&str>,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}
