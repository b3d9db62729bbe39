use std::sync::Arc;
use std::thread;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::{debug, warn};

use super::client::{HttpClient, HttpRequest};
use crate::core::{Outcome, build_url, classify, url_host};
use crate::data::{ApiRequest, Auth, ConnectionConfig, RetryPolicy};
use crate::error::{Error, Result};

/// Send `request` until it gets a final answer.
///
/// Responses are classified with [`classify`]; 502 and 503 are retried
/// according to `policy`, sleeping the calling thread between attempts.
/// Connection failures are returned immediately.
pub fn execute<C: HttpClient + ?Sized>(
    client: &C,
    request: &HttpRequest,
    policy: &RetryPolicy,
) -> Result<Bytes> {
    let mut attempts: u32 = 0;

    loop {
        let response = client.execute(request)?;
        attempts = attempts.saturating_add(1);

        match classify(response.status, response.body) {
            Outcome::Success(body) => return Ok(body),
            Outcome::Failure(err) => return Err(err),
            Outcome::Retry { status, body } => {
                if !policy.should_retry(attempts) {
                    return Err(Error::TransientUnavailable {
                        status,
                        attempts,
                        body: String::from_utf8_lossy(&body).into_owned(),
                    });
                }

                let delay = policy.delay(attempts - 1);
                warn!(
                    status,
                    attempt = attempts,
                    url = %request.url,
                    "server unavailable, retrying in {delay:?}"
                );
                thread::sleep(delay);
            }
        }
    }
}

/// Authenticated access to one Vidispine server.
pub struct Transport<C> {
    config: Arc<ConnectionConfig>,
    client: C,
    policy: RetryPolicy,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(config: Arc<ConnectionConfig>, client: C) -> Self {
        Self {
            config,
            client,
            policy: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Resolve an API request into an absolute HTTP request.
    ///
    /// Authentication and `Host` come first; headers on `request` replace
    /// them (case-insensitively) when they share a name.
    pub fn prepare(&self, request: &ApiRequest) -> HttpRequest {
        let url = build_url(&self.config, &request.path, &request.matrix, &request.query);

        let authorization = match self.config.auth() {
            Auth::Token(token) => format!("token {token}"),
            Auth::Basic { user, password } => {
                format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
            }
        };

        let mut headers = vec![
            ("Authorization".to_string(), authorization),
            ("Host".to_string(), url_host(&self.config.host).into_owned()),
        ];
        for (key, value) in &request.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(key));
            headers.push((key.clone(), value.clone()));
        }

        HttpRequest {
            method: request.method,
            url,
            headers,
            body: request.body.clone(),
        }
    }

    /// Issue `request` and return the response body of a successful call.
    pub fn request(&self, request: &ApiRequest) -> Result<Bytes> {
        let http = self.prepare(request);
        debug!(method = %http.method, url = %http.url, "connecting");
        execute(&self.client, &http, &self.policy)
    }
}
