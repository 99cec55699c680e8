use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use shared::protocol::{OutboundCommand, MESSAGE_ENDPOINT_PATH};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to deliver {command}: {source}")]
    Request {
        command: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend rejected {command} with status {status}: {body}")]
    Status {
        command: &'static str,
        status: u16,
        body: String,
    },
}

/// Outcome of a delivered command. The body is whatever the backend echoed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub command: &'static str,
    pub status: u16,
    pub body: String,
}

/// Posts [`OutboundCommand`]s to the backend's message endpoint.
#[derive(Debug, Clone)]
pub struct MessageClient {
    http: Client,
    endpoint: Url,
}

impl MessageClient {
    pub fn new(backend_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), backend_url)
    }

    pub fn with_client(http: Client, backend_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            http,
            endpoint: message_endpoint(backend_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One POST, no retry. Non-2xx responses come back as [`TransportError::Status`].
    pub async fn send(&self, command: &OutboundCommand) -> Result<DeliveryReport, TransportError> {
        let name = command.name();
        tracing::debug!(command = name, endpoint = %self.endpoint, "posting command");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(command)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                command: name,
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                command: name,
                source,
            })?;
        if !status.is_success() {
            return Err(TransportError::Status {
                command: name,
                status: status.as_u16(),
                body,
            });
        }
        Ok(DeliveryReport {
            command: name,
            status: status.as_u16(),
            body,
        })
    }
}

/// `<backend_url>/api/message`, keeping any path prefix on the base url.
pub fn message_endpoint(backend_url: &str) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidEndpoint {
        url: backend_url.to_string(),
        reason,
    };
    let trimmed = backend_url.trim().trim_end_matches('/');
    let endpoint = Url::parse(&format!("{trimmed}{MESSAGE_ENDPOINT_PATH}"))
        .map_err(|err| invalid(err.to_string()))?;
    match endpoint.scheme() {
        "http" | "https" => Ok(endpoint),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Where the panel controller hands commands off. Implementations decide how
/// and when they reach the backend; callers never wait on delivery.
pub trait CommandSink {
    fn send(&mut self, command: OutboundCommand);
    fn send_after(&mut self, command: OutboundCommand, delay: Duration);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentCommand {
    pub command: OutboundCommand,
    pub delay: Option<Duration>,
}

/// Keeps every command in order instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Vec<SentCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[SentCommand] {
        &self.sent
    }

    pub fn commands(&self) -> Vec<OutboundCommand> {
        self.sent.iter().map(|sent| sent.command.clone()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.sent.iter().map(|sent| sent.command.name()).collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: OutboundCommand) {
        self.sent.push(SentCommand {
            command,
            delay: None,
        });
    }

    fn send_after(&mut self, command: OutboundCommand, delay: Duration) {
        self.sent.push(SentCommand {
            command,
            delay: Some(delay),
        });
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
