//! # mail-server-manager
//!
//! Server manager adapters that let a hosting billing system provision mail
//! accounts on external mail platforms.
//!
//! The billing system drives a fixed set of account lifecycle events (create,
//! suspend, unsuspend, cancel, change package, change password). Each adapter
//! implements [`ServerManager`] and turns those events into calls against its
//! platform's management API.
//!
//! ## Supported Servers
//!
//! | Server | Feature Flag | Auth Method |
//! |--------|-------------|-------------|
//! | [Mailcow](https://mailcow.email/) | `mailcow` | `X-API-Key` header |
//!
//! ## Feature Flags
//!
//! - **`all-managers`** *(default)* — Enable all managers listed above.
//! - **`mailcow`** — Enable only the Mailcow manager.
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mail_server_manager::{
//!     create_server_manager, Account, Package, ServerCredentials, ServerManager,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = create_server_manager(ServerCredentials::Mailcow {
//!         host: "mail.example.com".to_string(),
//!         api_key: "your-api-key".to_string(),
//!         accept_invalid_certs: false,
//!     })?;
//!
//!     manager.test_connection().await?;
//!
//!     let account = Account {
//!         domain: "example.com".to_string(),
//!         username: "client1".to_string(),
//!         password: "initial-password".to_string(),
//!         package: Package {
//!             name: "Mail S".to_string(),
//!             max_aliases: 20,
//!             quota_mb: 2048,
//!             max_mailboxes: 5,
//!         },
//!     };
//!     manager.create_account(&account).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ServerError>`](ServerError):
//!
//! - [`ServerError::AuthenticationFailed`] — the API key was rejected
//! - [`ServerError::ConnectionFailed`] — the connection check failed
//! - [`ServerError::OperationFailed`] — a step did not report success; names the step
//! - [`ServerError::Unsupported`] — the platform cannot perform the change
//!
//! Nothing is retried, and multi-step operations are not rolled back: when
//! `create_account` fails at the ACL step the domain and its admin stay on the
//! server.

mod error;
mod factory;
mod http_client;
mod managers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{Result, ServerError};

// Re-export factory functions
pub use factory::{create_server_manager, get_all_server_metadata};

// Re-export traits
pub use traits::{HttpTransport, ServerManager};

// Re-export transport types
pub use http_client::{ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, TransportOptions};

// Re-export types
pub use types::{
    Account, AccountAction, CredentialValidationError, FieldType, Package, ServerCredentialField,
    ServerCredentials, ServerMetadata, ServerType, UnsupportedAction,
};

// Re-export concrete managers (behind feature flags)
#[cfg(feature = "mailcow")]
pub use managers::{MailcowManager, MailcowManagerBuilder, admin_username};
