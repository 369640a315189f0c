use serde::{Deserialize, Serialize};

/// Fallback shown when the backend rejects a request without a usable body.
pub const GENERIC_REMOTE_ERROR: &str = "requête rejetée par le serveur";

/// Error body the backend returns on non-success responses. Only the message
/// is consumed; it is surfaced to the user verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Extracts the user-facing message from a raw error response body: the
/// `message` field of a JSON body when present, the raw text when non-empty,
/// else the generic fallback.
pub fn remote_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if !parsed.message.trim().is_empty() {
            return parsed.message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        GENERIC_REMOTE_ERROR.to_string()
    } else {
        trimmed.to_string()
    }
}
