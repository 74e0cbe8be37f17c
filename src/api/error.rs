use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Categorized failures from the story service.
///
/// Every remote operation in the crate surfaces exactly this taxonomy, so
/// callers can match on the failure class without knowing which endpoint
/// produced it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure with no usable HTTP response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 5xx or any status the client does not categorize.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// 401/403, or a mutating call attempted without a session token.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// 400-class rejection of the request payload.
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// 404, e.g. a stale story id.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 409, e.g. signing up with a username that is already taken.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// A 2xx body that does not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Categorize a non-success HTTP response.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        match status.as_u16() {
            400 => Self::Validation { message },
            401 | 403 => Self::Auth { message },
            404 => Self::NotFound { message },
            409 => Self::Conflict { message },
            status => Self::Server { status, message },
        }
    }

    /// The local token gate: a mutating call was attempted with no token.
    pub(crate) fn missing_token() -> Self {
        Self::Auth {
            message: "no session token; re-authentication required".to_string(),
        }
    }
}

/// Error body shapes the service is known to produce.
///
/// Either `{"error": {"message": ...}}` or a bare `{"message": ...}`;
/// anything else degrades to the raw body text.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    title: Option<String>,
}

fn extract_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.error {
            if let Some(message) = detail.message.or(detail.title) {
                return message;
            }
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail".to_string()
    } else {
        trimmed.to_string()
    }
}
