use url::Url;

use crate::error::{Error, Result};

/// Where the Vidispine server lives and how to authenticate against it.
///
/// Built once by the caller and shared read-only (behind an `Arc`) by every
/// [`Transport`](crate::Transport).
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub token: Option<String>,
}

/// Resolved authentication for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth<'a> {
    /// `Authorization: token <token>`
    Token(&'a str),
    /// HTTP basic credentials.
    Basic { user: &'a str, password: &'a str },
}

impl ConnectionConfig {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            user: String::new(),
            password: String::new(),
            token: None,
        }
    }

    /// Build a config from a base URL such as `https://vs.example.com:8080`.
    ///
    /// The port falls back to the scheme default when the URL has none.
    pub fn from_url(base: &str) -> Result<Self> {
        let url = Url::parse(base).map_err(|e| Error::InvalidConfig(format!("'{base}': {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "'{base}': scheme must be http or https"
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidConfig(format!("'{base}': no host")))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| Error::InvalidConfig(format!("'{base}': no port")))?;

        Ok(Self::new(url.scheme(), host, port))
    }

    #[must_use]
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Set the API token. An empty token is treated as no token.
    #[must_use]
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// The token wins whenever one is configured; otherwise basic credentials
    /// are sent, even when empty.
    pub fn auth(&self) -> Auth<'_> {
        match self.token.as_deref() {
            Some(token) => Auth::Token(token),
            None => Auth::Basic {
                user: &self.user,
                password: &self.password,
            },
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_explicit_port() {
        let config = ConnectionConfig::from_url("https://vs.example.com:8443").unwrap();
        assert_eq!(config.scheme, "https");
        assert_eq!(config.host, "vs.example.com");
        assert_eq!(config.port, 8443);
    }

    #[test]
    fn test_from_url_default_port() {
        let config = ConnectionConfig::from_url("http://localhost").unwrap();
        assert_eq!(config.port, 80);
    }

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let err = ConnectionConfig::from_url("ftp://localhost:21").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        assert!(ConnectionConfig::from_url("not a url").is_err());
    }

    #[test]
    fn test_token_takes_precedence() {
        let config = ConnectionConfig::new("http", "localhost", 8080)
            .basic_auth("admin", "secret")
            .token(Some("abc".into()));
        assert_eq!(config.auth(), Auth::Token("abc"));
    }

    #[test]
    fn test_empty_token_falls_back_to_basic() {
        let config = ConnectionConfig::new("http", "localhost", 8080)
            .basic_auth("admin", "secret")
            .token(Some(String::new()));
        assert_eq!(
            config.auth(),
            Auth::Basic {
                user: "admin",
                password: "secret"
            }
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ConnectionConfig::new("http", "localhost", 8080)
            .basic_auth("admin", "hunter2")
            .token(Some("tok".into()));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("tok\""));
    }
}
