//! Mailcow Server Manager

mod http;
mod manager;
mod response;
mod types;

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::http_client::{ReqwestTransport, TransportOptions};
use crate::managers::common::normalize_host;
use crate::traits::HttpTransport;

/// Server type label used in errors and logs.
pub(crate) const MAILCOW_SERVER_TYPE: &str = "Mailcow";
/// Mailcow API path prefix, relative to the host root.
pub(crate) const MAILCOW_API_PREFIX: &str = "api/v1";
/// Prefix of every domain admin username created by this manager.
pub(crate) const DOMAIN_ADMIN_PREFIX: &str = "adm_";

/// Derives the domain admin username for a mail domain.
///
/// `"adm_"` followed by the domain with every `.` removed, so
/// `example.com` becomes `adm_examplecom`. Create, cancel and password change
/// all address the admin through this function.
pub fn admin_username(domain: &str) -> String {
    format!("{DOMAIN_ADMIN_PREFIX}{}", domain.replace('.', ""))
}

/// Mailcow server manager.
///
/// Provisions one Mailcow domain plus its domain admin per hosting account,
/// through the Mailcow REST API authenticated with an `X-API-Key` header.
///
/// # Construction
///
/// ```rust,no_run
/// use mail_server_manager::MailcowManager;
///
/// let manager = MailcowManager::builder("mail.example.com", "your-api-key")
///     .accept_invalid_certs(true)
///     .build()
///     .unwrap();
/// ```
pub struct MailcowManager {
    pub(crate) host: String,
    pub(crate) api_key: String,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for MailcowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailcowManager")
            .field("host", &self.host)
            .field("api_key", &"***")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish_non_exhaustive()
    }
}

/// Builder for [`MailcowManager`] with configurable transport behavior.
pub struct MailcowManagerBuilder {
    host: String,
    api_key: String,
    options: TransportOptions,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl MailcowManagerBuilder {
    fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            options: TransportOptions::default(),
            transport: None,
        }
    }

    /// Skip TLS certificate and hostname verification (default: `false`).
    ///
    /// Self-hosted Mailcow instances often run with self-signed certificates.
    /// Only enable this for hosts reached over a trusted network.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.options.accept_invalid_certs = accept;
        self
    }

    /// Set the overall request timeout (default: 25 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Use a host-provided transport instead of building a reqwest client.
    ///
    /// TLS and timeout settings on this builder are ignored when a transport is given.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the [`MailcowManager`] instance.
    pub fn build(self) -> Result<MailcowManager> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.options, MAILCOW_SERVER_TYPE)?),
        };

        Ok(MailcowManager {
            host: normalize_host(&self.host),
            api_key: self.api_key,
            accept_invalid_certs: self.options.accept_invalid_certs,
            transport,
        })
    }
}

impl MailcowManager {
    /// Creates a Mailcow manager with default settings (TLS verified, 25s timeout).
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::builder(host, api_key).build()
    }

    /// Returns a builder for customizing the manager configuration.
    pub fn builder(host: impl Into<String>, api_key: impl Into<String>) -> MailcowManagerBuilder {
        MailcowManagerBuilder::new(host, api_key)
    }

    /// Whether the built-in transport skips TLS verification for this host.
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}
