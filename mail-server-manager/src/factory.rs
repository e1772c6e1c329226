//! Server manager factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::ServerManager;
use crate::types::{ServerCredentials, ServerMetadata};

#[cfg(feature = "mailcow")]
use crate::managers::MailcowManager;

/// Creates a [`ServerManager`] instance from the given credentials.
///
/// The concrete manager type is determined by the [`ServerCredentials`]
/// variant. The manager's [`init`](ServerManager::init) check runs before it is
/// returned, so a malformed configuration never reaches the network.
///
/// # Examples
///
/// ```rust,no_run
/// use mail_server_manager::{create_server_manager, ServerCredentials};
///
/// let manager = create_server_manager(ServerCredentials::Mailcow {
///     host: "mail.example.com".to_string(),
///     api_key: "your-api-key".to_string(),
///     accept_invalid_certs: false,
/// }).unwrap();
/// ```
pub fn create_server_manager(credentials: ServerCredentials) -> Result<Arc<dyn ServerManager>> {
    let manager: Arc<dyn ServerManager> = match credentials {
        #[cfg(feature = "mailcow")]
        ServerCredentials::Mailcow { .. } => Arc::new(mailcow_from_credentials(credentials)?),
    };
    manager.init()?;
    Ok(manager)
}

#[cfg(feature = "mailcow")]
fn mailcow_from_credentials(credentials: ServerCredentials) -> Result<MailcowManager> {
    let ServerCredentials::Mailcow {
        host,
        api_key,
        accept_invalid_certs,
    } = credentials;
    MailcowManager::builder(host, api_key)
        .accept_invalid_certs(accept_invalid_certs)
        .build()
}

/// Returns metadata for all server managers enabled via feature flags.
///
/// The host uses this to render its server setup forms.
pub fn get_all_server_metadata() -> Vec<ServerMetadata> {
    vec![
        #[cfg(feature = "mailcow")]
        MailcowManager::metadata(),
    ]
}
