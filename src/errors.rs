use thiserror::Error;

/// Every failure the client can observe. All variants carry enough context
/// for a log line; views only ever show a short generic notice.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Backend responses ────────────────────────────────────────────────────
    #[error("Authentication rejected by {endpoint} (status {status})")]
    Auth { endpoint: String, status: u16 },

    #[error("Request to {endpoint} failed with status {status}")]
    Request { endpoint: String, status: u16 },

    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Live socket ──────────────────────────────────────────────────────────
    #[error("Malformed live frame: {0}")]
    Socket(String),

    #[error("Could not open socket to {url}: {message}")]
    Connect { url: String, message: String },

    // ── Local state ──────────────────────────────────────────────────────────
    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Invalid backend URL '{url}': {reason}")]
    Config { url: String, reason: String },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },
}

impl ClientError {
    pub fn empty_field(field_name: impl Into<String>) -> Self {
        ClientError::EmptyField { field_name: field_name.into() }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth { .. })
    }

    /// Any failed REST exchange that is not an authentication rejection.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            ClientError::Request { .. } | ClientError::Decode { .. } | ClientError::Network(_)
        )
    }

    pub fn is_socket(&self) -> bool {
        matches!(self, ClientError::Socket(_) | ClientError::Connect { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::EmptyField { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let auth = ClientError::Auth { endpoint: "/auth/login".into(), status: 401 };
        assert!(auth.is_auth());
        assert!(!auth.is_request());

        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        let decode = ClientError::Decode { endpoint: "/chats/1".into(), source: decode };
        assert!(decode.is_request());
        assert!(ClientError::Network("offline".into()).is_request());

        assert!(ClientError::Socket("bad".into()).is_socket());
        assert!(ClientError::empty_field("email").is_validation());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ClientError::Request { endpoint: "/messages/5".into(), status: 500 };
        assert_eq!(err.to_string(), "Request to /messages/5 failed with status 500");
        assert_eq!(
            ClientError::empty_field("password").to_string(),
            "Field 'password' cannot be empty"
        );
    }
}
