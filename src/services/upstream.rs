use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{config::Config, models::chat::UpstreamRequestBody};

/// What came back from the upstream: its status and its body parsed as JSON, untouched.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream answered {status} with a non-JSON body: {source}")]
    Parse {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err)
        } else {
            UpstreamError::Transport(err)
        }
    }
}

impl UpstreamError {
    /// Status the relay answers with when the upstream call fails.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Transport(_) | UpstreamError::Parse { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message for the caller. Transport details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "upstream timed out",
            UpstreamError::Transport(_) => "upstream unreachable",
            UpstreamError::Parse { .. } => "upstream returned invalid JSON",
        }
    }
}

pub fn build_http_client(cfg: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(cfg.upstream_insecure_tls);
    if let Some(timeout) = cfg.upstream_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Sends one chat message upstream. Never retries, and a non-2xx status is not an error here.
pub async fn send_chat(
    http: &reqwest::Client,
    cfg: &Config,
    body: &UpstreamRequestBody,
) -> Result<UpstreamReply, UpstreamError> {
    let token = cfg.api_key.as_deref().unwrap_or_default();

    let res = http
        .post(cfg.upstream_url.clone())
        .header(CONTENT_TYPE, "application/json")
        .bearer_auth(token)
        .json(body)
        .send()
        .await?;

    let status = res.status();
    let bytes = res.bytes().await?;
    debug!("upstream answered {} ({} bytes)", status, bytes.len());

    let body = serde_json::from_slice::<Value>(&bytes)
        .map_err(|source| UpstreamError::Parse { status, source })?;

    Ok(UpstreamReply { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_map_to_bad_gateway() {
        let source = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = UpstreamError::Parse {
            status: StatusCode::OK,
            source,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.public_message(), "upstream returned invalid JSON");
    }
}
