//! Mailcow ServerManager trait 实现

use async_trait::async_trait;

use crate::error::{Result, ServerError};
use crate::traits::ServerManager;
use crate::types::{
    Account, AccountAction, FieldType, Package, ServerCredentialField, ServerMetadata, ServerType,
};

use super::response::has_version;
use super::types::{
    AddDomainAdminRequest, AddDomainRequest, DOMAIN_ADMIN_ACL, DomainActiveAttr,
    DomainAdminAclAttr, DomainAdminPasswordAttr, DomainLimitsAttr, EditRequest,
};
use super::{MAILCOW_SERVER_TYPE, MailcowManager, admin_username};

impl MailcowManager {
    fn invalid_config(field: &str, detail: &str) -> ServerError {
        ServerError::InvalidConfig {
            server_type: MAILCOW_SERVER_TYPE.to_string(),
            field: field.to_string(),
            detail: detail.to_string(),
        }
    }

    /// 切换域名启用状态
    async fn set_domain_active(
        &self,
        account: &Account,
        active: bool,
        action: AccountAction,
    ) -> Result<bool> {
        let body = EditRequest {
            items: account.domain.as_str(),
            attr: DomainActiveAttr::new(active),
        };
        self.post_expecting_success("edit/domain", &body, action)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl ServerManager for MailcowManager {
    fn id(&self) -> &'static str {
        "mailcow"
    }

    fn server_type(&self) -> &'static str {
        MAILCOW_SERVER_TYPE
    }

    fn metadata() -> ServerMetadata {
        ServerMetadata {
            id: ServerType::Mailcow,
            label: ServerType::Mailcow.label().to_string(),
            credential_fields: vec![ServerCredentialField {
                key: "accesshash".to_string(),
                label: "API Key".to_string(),
                field_type: FieldType::Text,
                placeholder: Some("API Key to authenticate Mailcow service".to_string()),
                required: true,
            }],
        }
    }

    fn init(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Self::invalid_config("host", "must not be empty"));
        }
        if self.host.contains("://") || self.host.contains('/') {
            return Err(Self::invalid_config(
                "host",
                "must be a bare hostname without scheme or path",
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(Self::invalid_config("accesshash", "must not be empty"));
        }
        Ok(())
    }

    fn login_url(&self, _account: Option<&Account>) -> String {
        format!("https://{}/", self.host)
    }

    fn reseller_login_url(&self, _account: Option<&Account>) -> String {
        self.login_url(None)
    }

    async fn test_connection(&self) -> Result<bool> {
        let response = self.get("get/status/version").await?;
        if has_version(&response) {
            Ok(true)
        } else {
            log::error!("[{MAILCOW_SERVER_TYPE}] Status endpoint did not report a version");
            Err(ServerError::ConnectionFailed {
                server_type: MAILCOW_SERVER_TYPE.to_string(),
                raw_message: Some(response),
            })
        }
    }

    async fn synchronize_account(&self, account: &Account) -> Result<Account> {
        log::info!("Synchronizing account with server {}", account.username);
        Ok(account.clone())
    }

    async fn create_account(&self, account: &Account) -> Result<bool> {
        log::info!(
            "[{MAILCOW_SERVER_TYPE}] Creating domain {} with package {}",
            account.domain,
            account.package.name
        );

        self.post_expecting_success(
            "add/domain",
            &AddDomainRequest::for_account(account),
            AccountAction::CreateDomain,
        )
        .await?;

        self.post_expecting_success(
            "add/domain-admin",
            &AddDomainAdminRequest::for_account(account),
            AccountAction::CreateDomainAdmin,
        )
        .await?;

        // 此前创建的域名与管理员不会回滚
        let acl = EditRequest {
            items: [admin_username(&account.domain)],
            attr: DomainAdminAclAttr {
                da_acl: &DOMAIN_ADMIN_ACL,
            },
        };
        self.post_expecting_success("edit/da-acl", &acl, AccountAction::EditAcl)
            .await?;

        Ok(true)
    }

    async fn suspend_account(&self, account: &Account) -> Result<bool> {
        self.set_domain_active(account, false, AccountAction::Suspend)
            .await
    }

    async fn unsuspend_account(&self, account: &Account) -> Result<bool> {
        self.set_domain_active(account, true, AccountAction::Unsuspend)
            .await
    }

    async fn cancel_account(&self, account: &Account) -> Result<bool> {
        self.post_expecting_success(
            "delete/domain",
            &[account.domain.as_str()],
            AccountAction::DeleteDomain,
        )
        .await?;

        self.post_expecting_success(
            "delete/domain-admin",
            &[admin_username(&account.domain)],
            AccountAction::DeleteDomainAdmin,
        )
        .await?;

        Ok(true)
    }

    async fn change_account_package(
        &self,
        account: &Account,
        package: &Package,
    ) -> Result<bool> {
        log::info!(
            "[{MAILCOW_SERVER_TYPE}] Moving domain {} to package {}",
            account.domain,
            package.name
        );

        let body = EditRequest {
            items: account.domain.as_str(),
            attr: DomainLimitsAttr::from(package),
        };
        self.post_expecting_success("edit/domain", &body, AccountAction::ChangePackage)
            .await?;
        Ok(true)
    }

    async fn change_account_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<bool> {
        let body = EditRequest {
            items: [admin_username(&account.domain)],
            attr: DomainAdminPasswordAttr::new(new_password),
        };
        self.post_expecting_success("edit/domain-admin", &body, AccountAction::ChangePassword)
            .await?;
        Ok(true)
    }
}
