use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

use crate::client::ApiError;

/// Errors surfaced to the browser as `{"message": ...}`.
#[derive(Debug, Display)]
pub enum PortalError {
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    /// The HR API failed or rejected the call; `message` is what the user sees
    #[display(fmt = "{}", message)]
    Upstream { message: String, source: ApiError },
}

impl PortalError {
    /// Logs the upstream failure and keeps only `message` for the response.
    pub fn upstream(message: &str, source: ApiError) -> Self {
        tracing::error!(error = %source, "{}", message);
        PortalError::Upstream {
            message: message.to_string(),
            source,
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortalError::Upstream { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Conflict(_) => StatusCode::CONFLICT,
            PortalError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
