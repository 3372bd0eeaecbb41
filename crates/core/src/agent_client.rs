//! Home Agent Client
//!
//! The outbound HTTP contract with the remote home agent: the two request
//! endpoints plus the hello probe the CLI runs at startup. Each operation is
//! a single call with no retries.

use crate::turn::{AgentResponse, Utterance};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// An error from one outbound call to the home agent.
///
/// Timeouts surface through [`AgentError::Transport`]; the HTTP client
/// applies a bounded timeout to every request.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("request to the home agent failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("home agent returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// The two logical operations the remote home agent exposes, plus the
/// startup health probe.
///
/// This abstraction keeps the router and the tool surface independent of the
/// transport, so a test double can stand in for the live server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Sends a simple request, such as controlling a small number of devices
    /// or a state query, to the home controller agent.
    async fn simple_request(&self, utterance: &Utterance) -> Result<AgentResponse, AgentError>;

    /// Sends a complex request, such as scene control or multi-step actions,
    /// to the home controller agent.
    async fn complex_request(&self, utterance: &Utterance) -> Result<AgentResponse, AgentError>;

    /// Probes the agent's hello endpoint.
    async fn check_health(&self) -> Result<(), AgentError>;
}

fn endpoint_urls(base_url: &str) -> (String, String, String) {
    let base = base_url.trim_end_matches('/');
    (
        format!("{base}/simple"),
        format!("{base}/complex"),
        format!("{base}/hello"),
    )
}

/// A reqwest-backed [`AgentBackend`] speaking the agent's JSON-over-HTTP
/// protocol: `POST /simple` and `POST /complex` with a `{"message": ...}`
/// body, `GET /hello` for the probe.
pub struct HttpAgentClient {
    http: reqwest::Client,
    simple_url: String,
    complex_url: String,
    hello_url: String,
}

impl HttpAgentClient {
    /// Creates a client for the agent at `base_url`, e.g. `http://127.0.0.1:8000`.
    ///
    /// Every request carries `timeout`; expiry surfaces as a transport error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let (simple_url, complex_url, hello_url) = endpoint_urls(base_url);
        Ok(Self {
            http,
            simple_url,
            complex_url,
            hello_url,
        })
    }

    async fn post_request(
        &self,
        url: &str,
        utterance: &Utterance,
    ) -> Result<AgentResponse, AgentError> {
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "message": utterance.as_str() }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!(reply = %body, "Home agent replied");
        Ok(AgentResponse::from_body(body))
    }
}

#[async_trait]
impl AgentBackend for HttpAgentClient {
    async fn simple_request(&self, utterance: &Utterance) -> Result<AgentResponse, AgentError> {
        info!(prompt = %utterance, "Sending simple request to the home agent");
        self.post_request(&self.simple_url, utterance).await
    }

    async fn complex_request(&self, utterance: &Utterance) -> Result<AgentResponse, AgentError> {
        info!(prompt = %utterance, "Sending complex request to the home agent");
        self.post_request(&self.complex_url, utterance).await
    }

    async fn check_health(&self) -> Result<(), AgentError> {
        let response = self.http.get(&self.hello_url).send().await?;
        let status = response.status();
        if status.as_u16() != 200 {
            warn!(status = status.as_u16(), "Hello endpoint returned a non-200 status");
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_are_derived_from_the_base() {
        let (simple, complex, hello) = endpoint_urls("http://127.0.0.1:8000");
        assert_eq!(simple, "http://127.0.0.1:8000/simple");
        assert_eq!(complex, "http://127.0.0.1:8000/complex");
        assert_eq!(hello, "http://127.0.0.1:8000/hello");
    }

    #[test]
    fn endpoint_urls_tolerate_a_trailing_slash() {
        let (simple, _, hello) = endpoint_urls("http://cosmo.local:9000/");
        assert_eq!(simple, "http://cosmo.local:9000/simple");
        assert_eq!(hello, "http://cosmo.local:9000/hello");
    }

    #[test]
    fn unexpected_status_formats_with_status_and_body() {
        let error = AgentError::UnexpectedStatus {
            status: 503,
            body: "agent offline".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "home agent returned status 503: agent offline"
        );
    }
}
