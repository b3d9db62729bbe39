//! Test doubles for [`HttpClient`].

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use bytes::Bytes;

use super::client::{HttpClient, HttpRequest, HttpResponse};
use crate::error::{Error, Result};

/// Replays canned responses in order and records every request.
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Option<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(self, status: u16, body: &'static str) -> Self {
        self.script.lock().unwrap().push_back(Some(HttpResponse {
            status,
            body: Bytes::from_static(body.as_bytes()),
        }));
        self
    }

    /// Next call fails as if the connection was refused.
    pub(crate) fn fail(self) -> Self {
        self.script.lock().unwrap().push_back(None);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(Error::Transport(Box::new(io::Error::from(
                io::ErrorKind::ConnectionRefused,
            )))),
            None => panic!("unexpected request to {}", request.url),
        }
    }
}

/// Serves `Range: Bytes=a-b` requests out of an in-memory file.
pub(crate) struct RangeServer {
    data: Vec<u8>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RangeServer {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `(start, end)` of every range requested so far, end inclusive.
    pub(crate) fn ranges(&self) -> Vec<(u64, u64)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| parse_range(r.header("Range").expect("missing Range header")))
            .collect()
    }
}

fn parse_range(value: &str) -> (u64, u64) {
    let range = value.strip_prefix("Bytes=").expect("range must use Bytes= unit");
    let (start, end) = range.split_once('-').expect("malformed range");
    (start.parse().unwrap(), end.parse().unwrap())
}

impl HttpClient for RangeServer {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let (start, end) = parse_range(request.header("Range").expect("missing Range header"));
        let end = (end as usize).min(self.data.len() - 1);
        Ok(HttpResponse {
            status: 206,
            body: Bytes::copy_from_slice(&self.data[start as usize..=end]),
        })
    }
}
