//! # Reporter Module
//!
//! Sends each computed hash to the backend API.
//!
//! One POST per record with a JSON body `{"id": ..., "phash": ...}`. When a
//! shared secret is configured it travels in the `X-WORKER-SECRET` header.
//! Any 2xx counts as accepted; the response body is never parsed.

use crate::error::{ConfigError, SubmitError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Header carrying the shared secret
pub const WORKER_SECRET_HEADER: &str = "X-WORKER-SECRET";

/// Body posted to the API for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashSubmission {
    pub id: String,
    pub phash: String,
}

impl HashSubmission {
    pub fn new(id: impl Into<String>, phash: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phash: phash.into(),
        }
    }
}

/// Destination for computed hashes
pub trait ResultReporter: Send + Sync {
    /// Submit one record's hash
    fn submit(&self, submission: &HashSubmission) -> Result<(), SubmitError>;
}

/// Posts submissions to an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpReporter {
    client: reqwest::blocking::Client,
    endpoint: Url,
    secret: Option<String>,
}

impl HttpReporter {
    /// Create a reporter with its own client
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self::with_client(
            crate::core::fetcher::build_client(timeout)?,
            endpoint,
        ))
    }

    /// Create a reporter sharing an existing client
    pub fn with_client(client: reqwest::blocking::Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            secret: None,
        }
    }

    /// Attach the shared secret to every submission
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret.filter(|s| !s.is_empty());
        self
    }
}

impl ResultReporter for HttpReporter {
    fn submit(&self, submission: &HashSubmission) -> Result<(), SubmitError> {
        let mut request = self.client.post(self.endpoint.clone()).json(submission);

        if let Some(secret) = &self.secret {
            request = request.header(WORKER_SECRET_HEADER, secret);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                SubmitError::Timeout {
                    id: submission.id.clone(),
                }
            } else {
                SubmitError::Request {
                    id: submission.id.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                id: submission.id.clone(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(id = %submission.id, status = status.as_u16(), "Submission accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn reporter(server: &mockito::Server) -> HttpReporter {
        let endpoint = Url::parse(&format!("{}/api/checkImage", server.url())).unwrap();
        HttpReporter::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn posts_json_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/checkImage")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"id": "a", "phash": "c3d2e1f000ff7a19"})))
            .with_status(200)
            .create();

        reporter(&server)
            .submit(&HashSubmission::new("a", "c3d2e1f000ff7a19"))
            .unwrap();

        mock.assert();
    }

    #[test]
    fn sends_secret_header_when_configured() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/checkImage")
            .match_header("x-worker-secret", "s3cret")
            .with_status(201)
            .create();

        reporter(&server)
            .with_secret(Some("s3cret".to_string()))
            .submit(&HashSubmission::new("a", "00"))
            .unwrap();

        mock.assert();
    }

    #[test]
    fn omits_secret_header_when_unset() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/checkImage")
            .match_header("x-worker-secret", Matcher::Missing)
            .with_status(204)
            .create();

        reporter(&server)
            .with_secret(Some(String::new()))
            .submit(&HashSubmission::new("a", "00"))
            .unwrap();

        mock.assert();
    }

    #[test]
    fn server_error_is_rejected() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/checkImage")
            .with_status(500)
            .with_body("boom")
            .create();

        let result = reporter(&server).submit(&HashSubmission::new("user-7", "00"));

        match result {
            Err(SubmitError::Rejected { id, status }) => {
                assert_eq!(id, "user-7");
                assert_eq!(status, 500);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn stalled_endpoint_is_a_timeout() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });
        let endpoint = Url::parse(&format!("http://{}/api/checkImage", addr)).unwrap();
        let reporter = HttpReporter::new(endpoint, Duration::from_secs(1)).unwrap();

        let result = reporter.submit(&HashSubmission::new("user-9", "00"));

        match result {
            Err(SubmitError::Timeout { id }) => assert_eq!(id, "user-9"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn unreachable_endpoint_is_a_request_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/api").unwrap();
        let reporter = HttpReporter::new(endpoint, Duration::from_secs(2)).unwrap();

        let result = reporter.submit(&HashSubmission::new("a", "00"));
        assert!(matches!(
            result,
            Err(SubmitError::Request { .. }) | Err(SubmitError::Timeout { .. })
        ));
    }
}
