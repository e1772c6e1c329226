use serde::{Deserialize, Serialize};

// ============ Server Type ============

/// Identifies which server manager implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Mailcow dockerized mail server. Requires feature `mailcow`.
    #[cfg(feature = "mailcow")]
    Mailcow,
}

impl ServerType {
    /// Human-readable platform name used in error messages and forms.
    pub fn label(self) -> &'static str {
        match self {
            #[cfg(feature = "mailcow")]
            Self::Mailcow => "Mailcow",
        }
    }
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "mailcow")]
            Self::Mailcow => write!(f, "mailcow"),
        }
    }
}

// ============ Account Types ============

/// Hosting package limits the mail domain is provisioned with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package name as shown in the billing system.
    pub name: String,
    /// Maximum number of aliases (the billing system's "max subdomains").
    pub max_aliases: u32,
    /// Default mailbox quota in MiB.
    pub quota_mb: u64,
    /// Maximum number of mailboxes (the billing system's "max POP accounts").
    pub max_mailboxes: u32,
}

/// A hosting account as handed over by the billing system.
///
/// Read-only from the manager's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Mail domain owned by the account (e.g. `example.com`).
    pub domain: String,
    /// Billing-side username.
    pub username: String,
    /// Password applied to the domain admin.
    pub password: String,
    /// Package the account is subscribed to.
    pub package: Package,
}

// ============ Actions ============

/// Remote steps that can fail during account lifecycle operations.
///
/// The [`Display`](std::fmt::Display) output is the action phrase used in
/// operator-facing error messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AccountAction {
    /// Creating the mail domain.
    CreateDomain,
    /// Creating the domain admin.
    CreateDomainAdmin,
    /// Granting the domain admin its ACL.
    EditAcl,
    /// Deactivating the mail domain.
    Suspend,
    /// Reactivating the mail domain.
    Unsuspend,
    /// Deleting the mail domain.
    DeleteDomain,
    /// Deleting the domain admin.
    DeleteDomainAdmin,
    /// Applying new package limits to the domain.
    ChangePackage,
    /// Changing the domain admin password.
    ChangePassword,
}

impl std::fmt::Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phrase = match self {
            Self::CreateDomain => "create domain",
            Self::CreateDomainAdmin => "create domain admin",
            Self::EditAcl => "edit ACL",
            Self::Suspend => "suspend account",
            Self::Unsuspend => "unsuspend account",
            Self::DeleteDomain => "delete domain",
            Self::DeleteDomainAdmin => "delete domain admin",
            Self::ChangePackage => "change account package",
            Self::ChangePassword => "change account password",
        };
        f.write_str(phrase)
    }
}

/// Account changes a server platform may refuse outright.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UnsupportedAction {
    /// Renaming the billing-side username.
    UsernameChange,
    /// Moving the account to another domain.
    DomainChange,
    /// Moving the account to another IP address.
    IpChange,
}

impl std::fmt::Display for UnsupportedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phrase = match self {
            Self::UsernameChange => "username changes",
            Self::DomainChange => "changing the account domain",
            Self::IpChange => "changing the account IP",
        };
        f.write_str(phrase)
    }
}

// ============ Server Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
}

/// Definition of a single credential field required by a server manager.
///
/// Used by the host to render its server setup form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerCredentialField {
    /// Machine-readable field key (e.g., `"accesshash"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the host must refuse to save the form without this field.
    pub required: bool,
}

/// Static metadata describing a server manager.
///
/// Obtain via [`ServerManager::metadata()`](crate::ServerManager::metadata) or
/// [`get_all_server_metadata()`](crate::get_all_server_metadata).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetadata {
    /// Server type identifier.
    pub id: ServerType,
    /// Label shown in the host's server type picker.
    pub label: String,
    /// Credential fields the host collects for this server type.
    pub credential_fields: Vec<ServerCredentialField>,
}

// ============ Credential Types ============

/// Validation error for server credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    #[error("Missing required field: {label}")]
    MissingField {
        /// Which server type the error relates to.
        server_type: ServerType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    #[error("Field must not be empty: {label}")]
    EmptyField {
        /// Which server type the error relates to.
        server_type: ServerType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

/// Type-safe connection settings for all supported server types.
///
/// Pass this to [`create_server_manager()`](crate::create_server_manager) to
/// instantiate a manager.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"server"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "server": "mailcow", "credentials": { "host": "mail.example.com", "api_key": "...", "accept_invalid_certs": false } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "server", content = "credentials")]
pub enum ServerCredentials {
    /// Mailcow credentials. Requires feature `mailcow`.
    #[cfg(feature = "mailcow")]
    #[serde(rename = "mailcow")]
    Mailcow {
        /// Hostname of the Mailcow instance, without scheme (e.g. `mail.example.com`).
        host: String,
        /// Mailcow read-write API key.
        api_key: String,
        /// Skip TLS certificate and hostname verification (self-signed instances).
        #[serde(default)]
        accept_invalid_certs: bool,
    },
}

/// Host's key for the server hostname.
const HOST_KEY: &str = "host";
/// Host's key for the API key (the billing system stores it as an access hash).
const API_KEY_KEY: &str = "accesshash";
/// Host's optional key for skipping TLS verification (`"1"`/`"true"` enables it).
const INSECURE_KEY: &str = "insecure";

impl ServerCredentials {
    /// Construct credentials from the host's flat key/value server settings.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        server_type: ServerType,
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match server_type {
            #[cfg(feature = "mailcow")]
            ServerType::Mailcow => Ok(Self::Mailcow {
                host: Self::get_required_field(server_type, map, HOST_KEY, "Hostname")?,
                api_key: Self::get_required_field(server_type, map, API_KEY_KEY, "API Key")?,
                accept_invalid_certs: Self::get_flag(map, INSECURE_KEY),
            }),
        }
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        server_type: ServerType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                server_type,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                server_type,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }

    /// Reads an optional boolean field; absent or unrecognised values are `false`.
    fn get_flag(map: &std::collections::HashMap<String, String>, key: &str) -> bool {
        map.get(key).is_some_and(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        })
    }

    /// Convert credentials back to the host's flat key/value form.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            #[cfg(feature = "mailcow")]
            Self::Mailcow {
                host,
                api_key,
                accept_invalid_certs,
            } => [
                (HOST_KEY.to_string(), host.clone()),
                (API_KEY_KEY.to_string(), api_key.clone()),
                (
                    INSECURE_KEY.to_string(),
                    if *accept_invalid_certs { "1" } else { "0" }.to_string(),
                ),
            ]
            .into(),
        }
    }

    /// Returns the [`ServerType`] corresponding to this credential variant.
    pub fn server_type(&self) -> ServerType {
        match self {
            #[cfg(feature = "mailcow")]
            Self::Mailcow { .. } => ServerType::Mailcow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn mailcow_map(host: &str, key: &str) -> HashMap<String, String> {
        [
            ("host".to_string(), host.to_string()),
            ("accesshash".to_string(), key.to_string()),
        ]
        .into()
    }

    #[test]
    fn credentials_mailcow_roundtrip() {
        let map = mailcow_map("mail.example.com", "secret-key");
        let creds = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap();
        assert_eq!(
            creds,
            ServerCredentials::Mailcow {
                host: "mail.example.com".to_string(),
                api_key: "secret-key".to_string(),
                accept_invalid_certs: false,
            }
        );

        let mut expected = map;
        expected.insert("insecure".to_string(), "0".to_string());
        assert_eq!(creds.to_map(), expected);
        assert_eq!(creds.server_type(), ServerType::Mailcow);
    }

    #[test]
    fn credentials_insecure_flag_read_and_written() {
        for value in ["1", "true", " TRUE "] {
            let mut map = mailcow_map("mail.example.com", "secret-key");
            map.insert("insecure".to_string(), value.to_string());
            let creds = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap();
            assert!(
                matches!(
                    creds,
                    ServerCredentials::Mailcow {
                        accept_invalid_certs: true,
                        ..
                    }
                ),
                "value {value:?} should enable the flag"
            );
            assert_eq!(creds.to_map()["insecure"], "1");
        }

        let mut map = mailcow_map("mail.example.com", "secret-key");
        map.insert("insecure".to_string(), "no".to_string());
        let creds = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap();
        assert!(matches!(
            creds,
            ServerCredentials::Mailcow {
                accept_invalid_certs: false,
                ..
            }
        ));
    }

    #[test]
    fn credentials_missing_api_key() {
        let map: HashMap<String, String> =
            [("host".to_string(), "mail.example.com".to_string())].into();
        let err = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap_err();
        assert!(matches!(
            &err,
            CredentialValidationError::MissingField { field, .. } if field == "accesshash"
        ));
        assert_eq!(err.to_string(), "Missing required field: API Key");
    }

    #[test]
    fn credentials_blank_host() {
        let map = mailcow_map("   ", "secret-key");
        let err = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap_err();
        assert!(matches!(
            &err,
            CredentialValidationError::EmptyField { field, .. } if field == "host"
        ));
        assert_eq!(err.to_string(), "Field must not be empty: Hostname");
    }

    #[test]
    fn credentials_values_are_trimmed() {
        let map = mailcow_map(" mail.example.com ", "key\n");
        let creds = ServerCredentials::from_map(ServerType::Mailcow, &map).unwrap();
        let map = creds.to_map();
        assert_eq!(map["host"], "mail.example.com");
        assert_eq!(map["accesshash"], "key");
    }

    #[test]
    fn credentials_serialize_tagged() {
        let creds = ServerCredentials::Mailcow {
            host: "mail.example.com".to_string(),
            api_key: "k".to_string(),
            accept_invalid_certs: true,
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["server"], "mailcow");
        assert_eq!(json["credentials"]["host"], "mail.example.com");
        assert_eq!(json["credentials"]["accept_invalid_certs"], true);
    }

    #[test]
    fn credentials_without_tls_flag_deserialize_verified() {
        let creds: ServerCredentials = serde_json::from_str(
            r#"{ "server": "mailcow", "credentials": { "host": "mail.example.com", "api_key": "k" } }"#,
        )
        .unwrap();
        assert!(matches!(
            creds,
            ServerCredentials::Mailcow {
                accept_invalid_certs: false,
                ..
            }
        ));
    }

    #[test]
    fn server_type_display_and_label() {
        assert_eq!(ServerType::Mailcow.to_string(), "mailcow");
        assert_eq!(ServerType::Mailcow.label(), "Mailcow");
    }

    #[test]
    fn account_action_phrases() {
        assert_eq!(AccountAction::CreateDomain.to_string(), "create domain");
        assert_eq!(AccountAction::EditAcl.to_string(), "edit ACL");
        assert_eq!(
            AccountAction::ChangePackage.to_string(),
            "change account package"
        );
    }

    #[test]
    fn unsupported_action_phrases() {
        assert_eq!(
            UnsupportedAction::DomainChange.to_string(),
            "changing the account domain"
        );
        assert_eq!(
            UnsupportedAction::IpChange.to_string(),
            "changing the account IP"
        );
    }

    #[test]
    fn account_deserializes_from_host_json() {
        let account: Account = serde_json::from_str(
            r#"{
                "domain": "example.com",
                "username": "client1",
                "password": "hunter2",
                "package": { "name": "Mail S", "maxAliases": 20, "quotaMb": 2048, "maxMailboxes": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(account.package.max_mailboxes, 5);
        assert_eq!(account.package.quota_mb, 2048);
    }
}
