//! Mailcow API request bodies

use serde::Serialize;

use crate::types::{Account, Package};

use super::admin_username;

/// Hard per-domain quota ceiling (MiB) applied to every provisioned domain.
pub(crate) const DOMAIN_MAX_QUOTA_MB: &str = "10240";
/// Sending rate limit: messages per frame.
pub(crate) const RATE_LIMIT_VALUE: &str = "10";
/// Sending rate limit frame (`s` = per second).
pub(crate) const RATE_LIMIT_FRAME: &str = "s";
/// Passed through to Mailcow on domain creation.
pub(crate) const RESTART_SOGO: &str = "10";

/// Capabilities granted to every domain admin.
pub(crate) const DOMAIN_ADMIN_ACL: [&str; 9] = [
    "quarantine",
    "login_as",
    "sogo_access",
    "app_passwds",
    "bcc_maps",
    "filters",
    "spam_policy",
    "protocol_access",
    "smtp_ip_access",
];

/// Mailcow encodes booleans as `"0"` / `"1"` strings.
fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// `POST add/domain`
#[derive(Debug, Serialize)]
pub(crate) struct AddDomainRequest<'a> {
    pub active: &'static str,
    pub aliases: u32,
    pub backupmx: &'static str,
    pub gal: bool,
    pub defquota: u64,
    pub description: String,
    pub domain: &'a str,
    pub mailboxes: u32,
    pub maxquota: &'static str,
    pub quota: &'static str,
    pub relay_all_recipients: &'static str,
    pub rl_frame: &'static str,
    pub rl_value: &'static str,
    pub restart_sogo: &'static str,
}

impl<'a> AddDomainRequest<'a> {
    pub(crate) fn for_account(account: &'a Account) -> Self {
        let package = &account.package;
        Self {
            active: flag(true),
            aliases: package.max_aliases,
            backupmx: flag(false),
            gal: true,
            defquota: package.quota_mb,
            description: format!("{} domain", account.domain),
            domain: &account.domain,
            mailboxes: package.max_mailboxes,
            maxquota: DOMAIN_MAX_QUOTA_MB,
            quota: DOMAIN_MAX_QUOTA_MB,
            relay_all_recipients: flag(false),
            rl_frame: RATE_LIMIT_FRAME,
            rl_value: RATE_LIMIT_VALUE,
            restart_sogo: RESTART_SOGO,
        }
    }
}

/// `POST add/domain-admin`
#[derive(Debug, Serialize)]
pub(crate) struct AddDomainAdminRequest<'a> {
    pub active: &'static str,
    pub domains: &'a str,
    pub password: &'a str,
    pub password2: &'a str,
    pub username: String,
}

impl<'a> AddDomainAdminRequest<'a> {
    pub(crate) fn for_account(account: &'a Account) -> Self {
        Self {
            active: flag(true),
            domains: &account.domain,
            password: &account.password,
            password2: &account.password,
            username: admin_username(&account.domain),
        }
    }
}

/// Body shape shared by every `edit/*` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct EditRequest<I, A> {
    pub items: I,
    pub attr: A,
}

/// `attr` of `edit/da-acl`
#[derive(Debug, Serialize)]
pub(crate) struct DomainAdminAclAttr {
    pub da_acl: &'static [&'static str],
}

/// `attr` of `edit/domain` when toggling the domain
#[derive(Debug, Serialize)]
pub(crate) struct DomainActiveAttr {
    pub active: &'static str,
}

impl DomainActiveAttr {
    pub(crate) fn new(active: bool) -> Self {
        Self {
            active: flag(active),
        }
    }
}

/// `attr` of `edit/domain` when applying package limits
#[derive(Debug, Serialize)]
pub(crate) struct DomainLimitsAttr {
    pub aliases: u32,
    pub defquota: u64,
    pub mailboxes: u32,
}

impl From<&Package> for DomainLimitsAttr {
    fn from(package: &Package) -> Self {
        Self {
            aliases: package.max_aliases,
            defquota: package.quota_mb,
            mailboxes: package.max_mailboxes,
        }
    }
}

/// `attr` of `edit/domain-admin` when changing the password
#[derive(Debug, Serialize)]
pub(crate) struct DomainAdminPasswordAttr<'a> {
    pub password: &'a str,
    pub password2: &'a str,
}

impl<'a> DomainAdminPasswordAttr<'a> {
    pub(crate) fn new(password: &'a str) -> Self {
        Self {
            password,
            password2: password,
        }
    }
}
