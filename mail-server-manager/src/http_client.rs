//! Generic HTTP transport
//!
//! Managers build an [`ApiRequest`] (URL, headers, optional JSON body) and hand
//! it to an [`HttpTransport`]. The transport only moves bytes: it never retries
//! and never interprets the body, so each manager keeps full control over how
//! its platform's responses are classified.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, ServerError};
use crate::managers::common::create_http_client;
use crate::traits::HttpTransport;
use crate::utils::log_sanitizer::{redact_json, truncate_for_log};

/// 默认连接超时（秒）
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 25;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to be sent by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without headers or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Looks up a header value (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body as text.
    pub body: String,
}

/// Transport settings applied when building the underlying client.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    /// Overall request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Skip TLS certificate and hostname verification.
    pub accept_invalid_certs: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

/// [`HttpTransport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the given options.
    ///
    /// `server_type` only tags the error returned when the TLS backend cannot
    /// be initialised.
    pub fn new(options: TransportOptions, server_type: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client(options, server_type)?,
        })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest, server_type: &str) -> Result<ApiResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            log::debug!(
                "[{server_type}] Request Body: {}",
                truncate_for_log(&redact_json(body).to_string())
            );
            builder = builder.json(body);
        }

        log::debug!("[{server_type}] {} {}", request.method, request.url);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ServerError::Timeout {
                    server_type: server_type.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ServerError::NetworkError {
                    server_type: server_type.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{server_type}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ServerError::NetworkError {
                server_type: server_type.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{server_type}] Response Body: {}", truncate_for_log(&body));

        Ok(ApiResponse { status, body })
    }
}
