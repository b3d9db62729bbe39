use bytes::Bytes;

use crate::data::Method;
use crate::error::Result;

/// A fully resolved request: absolute URL and final header set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Blocking HTTP client abstraction.
///
/// One call sends one request and returns whatever status the server
/// answered with. Status interpretation and retries happen above this trait,
/// in [`execute`](crate::execute).
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// # Errors
    ///
    /// [`Error::Transport`](crate::Error::Transport) when no response arrived,
    /// [`Error::NoResponse`](crate::Error::NoResponse) when the body could not
    /// be read.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_client {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::*;
    use crate::error::Error;

    /// Production HTTP client implementation using reqwest's blocking API.
    ///
    /// The inner client pools connections across requests.
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a client with reqwest's default timeout.
        pub fn new() -> Result<Self> {
            Self::with_timeout(None)
        }

        /// Create a client with a per-request timeout, or reqwest's default
        /// when `None`.
        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
            let mut builder = Client::builder()
                .user_agent(concat!("bundler-vidispine/", env!("CARGO_PKG_VERSION")));
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder.build().map_err(|e| Error::Transport(Box::new(e)))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().map_err(|e| Error::Transport(Box::new(e)))?;
            let status = response.status().as_u16();
            let body = response.bytes().map_err(|e| Error::NoResponse(Box::new(e)))?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;
