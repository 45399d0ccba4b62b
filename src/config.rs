use url::Url;

use crate::errors::ClientError;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Where the backend lives. REST calls go to `api_base`, live sockets to the
/// same host under the matching `ws`/`wss` scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
    socket_base: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::Config {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        let socket_scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        };

        let api_base = url.as_str().trim_end_matches('/').to_string();
        url.set_scheme(socket_scheme)
            .map_err(|()| invalid(format!("cannot derive {socket_scheme} URL")))?;
        let socket_base = url.as_str().trim_end_matches('/').to_string();

        Ok(Self { api_base, socket_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn socket_base(&self) -> &str {
        &self.socket_base
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BACKEND_URL.to_string(),
            socket_base: DEFAULT_BACKEND_URL.replacen("http", "ws", 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_base() {
        let config = ClientConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(config.api_base(), "http://localhost:8000");
        assert_eq!(config.socket_base(), "ws://localhost:8000");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_https_base_with_prefix() {
        let config = ClientConfig::new("https://chat.example.com/api").unwrap();
        assert_eq!(config.api_base(), "https://chat.example.com/api");
        assert_eq!(config.socket_base(), "wss://chat.example.com/api");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ClientError::Config { .. })
        ));
        assert!(ClientConfig::new("not a url").is_err());
    }
}
