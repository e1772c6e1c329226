use async_trait::async_trait;

use crate::error::{Result, ServerError};
use crate::http_client::{ApiRequest, ApiResponse};
use crate::types::{Account, Package, ServerMetadata, UnsupportedAction};

/// HTTP 传输层 Trait
///
/// The host owns HTTP client construction; a manager only needs something that
/// sends one request and hands back the body. [`ReqwestTransport`](crate::ReqwestTransport)
/// is the default implementation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a single request and read the full response body.
    ///
    /// Implementations must not retry and must map transport failures to
    /// [`ServerError::NetworkError`] / [`ServerError::Timeout`] tagged with
    /// `server_type`.
    async fn send(&self, request: ApiRequest, server_type: &str) -> Result<ApiResponse>;
}

/// 服务器管理器 Trait
///
/// The lifecycle contract a hosting billing system drives: one call per
/// account event, answered with `Ok(true)` or a typed [`ServerError`].
///
/// The three rename operations default to [`ServerError::Unsupported`]; a
/// platform that can perform them overrides the default.
#[async_trait]
pub trait ServerManager: Send + Sync {
    /// 服务器类型标识符
    fn id(&self) -> &'static str;

    /// Human-readable server type used in error messages (e.g. `"Mailcow"`).
    fn server_type(&self) -> &'static str;

    /// 获取服务器元数据（类型级别）
    ///
    /// Returns the label and credential form the host renders for this server
    /// type. Callable before any instance exists.
    fn metadata() -> ServerMetadata
    where
        Self: Sized;

    /// Validate the injected configuration. Called right after construction.
    fn init(&self) -> Result<()>;

    /// Link to the account management page.
    fn login_url(&self, account: Option<&Account>) -> String;

    /// Link to the reseller management page.
    fn reseller_login_url(&self, account: Option<&Account>) -> String;

    /// 验证连接及凭证是否有效
    async fn test_connection(&self) -> Result<bool>;

    /// Return a copy of `account` refreshed from the server.
    async fn synchronize_account(&self, account: &Account) -> Result<Account>;

    /// Provision the account on the server.
    async fn create_account(&self, account: &Account) -> Result<bool>;

    /// Disable the account without deleting it.
    async fn suspend_account(&self, account: &Account) -> Result<bool>;

    /// Re-enable a suspended account.
    async fn unsuspend_account(&self, account: &Account) -> Result<bool>;

    /// Remove the account from the server.
    async fn cancel_account(&self, account: &Account) -> Result<bool>;

    /// Apply the limits of `package` to the account.
    async fn change_account_package(&self, account: &Account, package: &Package)
    -> Result<bool>;

    /// Set a new account password.
    async fn change_account_password(&self, account: &Account, new_password: &str)
    -> Result<bool>;

    /// Rename the account's username.
    async fn change_account_username(&self, _account: &Account, _new_username: &str)
    -> Result<bool> {
        Err(self.unsupported(UnsupportedAction::UsernameChange))
    }

    /// Move the account to another domain.
    async fn change_account_domain(&self, _account: &Account, _new_domain: &str)
    -> Result<bool> {
        Err(self.unsupported(UnsupportedAction::DomainChange))
    }

    /// Move the account to another IP address.
    async fn change_account_ip(&self, _account: &Account, _new_ip: &str) -> Result<bool> {
        Err(self.unsupported(UnsupportedAction::IpChange))
    }

    /// 快捷方法：不支持的操作
    fn unsupported(&self, action: UnsupportedAction) -> ServerError {
        log::warn!("[{}] Refusing unsupported operation: {action}", self.id());
        ServerError::Unsupported {
            server_type: self.server_type().to_string(),
            action,
        }
    }
}
