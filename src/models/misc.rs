use std::fmt;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use uuid::Uuid;

pub const REQUEST_UUID_HEADER: &str = "X-Request-Id";

/// Per-request correlation id. Taken from the `X-Request-Id` header when the
/// caller supplies one, generated otherwise, and echoed back in every
/// success envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUuid(pub String);

impl RequestUuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RequestUuid {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let uuid = req
            .headers()
            .get(REQUEST_UUID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        ready(Ok(RequestUuid(uuid)))
    }
}

impl fmt::Display for RequestUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
