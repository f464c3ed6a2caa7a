//! Model invocation errors

use thiserror::Error;

/// Errors that can occur while calling the backing model
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("No credentials: {0}")]
    Credentials(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request blocked by the service: {0}")]
    Blocked(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl InvokeError {
    /// Check if the service rejected our credentials or project access
    pub fn is_auth(&self) -> bool {
        match self {
            InvokeError::Credentials(_) => true,
            InvokeError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Check if this is a quota failure
    pub fn is_quota(&self) -> bool {
        matches!(self, InvokeError::Api { status: 429, .. })
    }

    /// Short hint printed under the error for the common cases
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_auth() {
            Some(
                "Check your project ID, run `gcloud auth login`, and make sure the \
                 Vertex AI API is enabled for the project.",
            )
        } else if self.is_quota() {
            Some("The project's Vertex AI quota is exhausted; try again later.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth() {
        assert!(InvokeError::Credentials("none".to_string()).is_auth());
        assert!(
            InvokeError::Api {
                status: 403,
                message: "Permission denied".to_string()
            }
            .is_auth()
        );
        assert!(
            !InvokeError::Api {
                status: 500,
                message: "Internal".to_string()
            }
            .is_auth()
        );
        assert!(!InvokeError::Blocked("SAFETY".to_string()).is_auth());
    }

    #[test]
    fn test_is_quota() {
        let err = InvokeError::Api {
            status: 429,
            message: "Resource exhausted".to_string(),
        };
        assert!(err.is_quota());
        assert!(err.hint().unwrap().contains("quota"));
        assert!(!InvokeError::InvalidResponse("bad".to_string()).is_quota());
    }

    #[test]
    fn test_display() {
        let err = InvokeError::Api {
            status: 404,
            message: "Model not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: Model not found");
        assert!(err.hint().is_none());
    }
}
