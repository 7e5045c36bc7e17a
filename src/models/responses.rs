use serde::Serialize;

/// Response envelope shared by every endpoint. Success responses carry
/// `message`, `data` and `requestUuid`; error responses carry `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<'a, T: Serialize> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError<'a>>,

    #[serde(
        rename = "requestUuid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_uuid: Option<&'a str>,
}

/// A struct with nothing, used as a default placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct None {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError<'a> {
    pub code: &'a str,
    pub message: &'a str,
}

impl<'a, T: Serialize> Default for ApiResponse<'a, T> {
    fn default() -> Self {
        Self {
            message: None,
            data: None,
            error: None,
            request_uuid: None,
        }
    }
}
