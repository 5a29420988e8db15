//! Error type for calls against the timeline backend

use thiserror::Error;

/// Everything that can go wrong with one API call.
///
/// `Status` carries the backend's own text, so it displays as just the
/// message the server sent (or its status line when the body was empty).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    MissingToken,
}

impl ApiError {
    /// Build the error for a non-success response.
    ///
    /// An empty or whitespace-only body falls back to the status line.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status.to_string()
        } else {
            body.to_string()
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 or 403
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_empty_body_uses_status_line() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "  ");
        assert_eq!(err.to_string(), "401 Unauthorized");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_body_text_is_the_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "username taken");
        assert_eq!(err.to_string(), "username taken");
        assert!(!err.is_unauthorized());
        assert!(ApiError::from_status(StatusCode::FORBIDDEN, "").is_unauthorized());
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        assert_eq!(ApiError::MissingToken.status(), None);
        assert!(!ApiError::Transport("refused".into()).is_unauthorized());
    }
}
