//! HTTP client for the OpenSearch Serverless management API
//!
//! Speaks the AWS JSON 1.0 protocol. Request signing is not done here: inject
//! a pre-authenticated `reqwest::Client` with [`HttpLifecyclePolicyClient::with_client`]
//! or configure a bearer token for gateways that accept one.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::client::{ClientError, LifecyclePolicyClient};
use super::types::{
    BatchGetLifecyclePolicyOutput, BatchGetLifecyclePolicyRequest, LifecyclePolicyIdentifier,
};
use crate::config::ClientConfig;
use crate::error::TransportError;

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.0";
const TARGET_HEADER: &str = "x-amz-target";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const BATCH_GET_TARGET: &str = "OpenSearchServerless.BatchGetLifecyclePolicy";

/// Default cap on a response body
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

pub struct HttpLifecyclePolicyClient {
    http: Client,
    endpoint: Url,
    max_response_bytes: usize,
}

impl HttpLifecyclePolicyClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let endpoint = config
            .endpoint()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| TransportError::Configuration(format!("bearer token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(http, endpoint))
    }

    /// Use a caller-built client; it owns auth, proxies and timeouts
    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    /// Reject response bodies larger than `limit` bytes
    pub fn with_max_response_bytes(mut self, limit: usize) -> Self {
        self.max_response_bytes = limit;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LifecyclePolicyClient for HttpLifecyclePolicyClient {
    async fn batch_get_lifecycle_policy(
        &self,
        identifiers: &[LifecyclePolicyIdentifier],
    ) -> Result<BatchGetLifecyclePolicyOutput, ClientError> {
        let body = serde_json::to_vec(&BatchGetLifecyclePolicyRequest { identifiers })
            .map_err(TransportError::Codec)?;

        debug!(
            endpoint = %self.endpoint,
            identifiers = identifiers.len(),
            "calling BatchGetLifecyclePolicy"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(TARGET_HEADER, BATCH_GET_TARGET)
            .body(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        let header_code = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = read_body(response, self.max_response_bytes).await?;

        if !status.is_success() {
            return Err(service_error(status, header_code.as_deref(), &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Codec(e).into())
    }
}

/// Collect the body chunk by chunk, giving up once it passes `limit`
async fn read_body(mut response: Response, limit: usize) -> Result<Vec<u8>, TransportError> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(TransportError::ResponseTooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(TransportError::ResponseTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[derive(Debug, Default, Deserialize)]
struct AwsErrorBody {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

/// Map a non-2xx response to `ClientError::Service`
fn service_error(status: StatusCode, header_code: Option<&str>, body: &[u8]) -> ClientError {
    let parsed: AwsErrorBody = serde_json::from_slice(body).unwrap_or_default();

    let code = header_code
        .or(parsed.error_type.as_deref())
        .map(error_code)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Http{}", status.as_u16()));

    let message = parsed.message.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body);
        if text.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            text.chars().take(200).collect()
        }
    });

    ClientError::Service { code, message }
}

/// `com.amazonaws.aoss#ResourceNotFoundException:http://...` -> `ResourceNotFoundException`
fn error_code(raw: &str) -> &str {
    let after_namespace = raw.rsplit('#').next().unwrap_or(raw);
    after_namespace
        .split(':')
        .next()
        .unwrap_or(after_namespace)
        .trim()
}
