//! Mailcow 响应分类
//!
//! Mailcow answers with loosely shaped JSON (`[{"type":"success","msg":[...]}]`,
//! `{"type":"error","msg":"authentication failed"}`, a bare version object, ...).
//! Outcomes are decided by substring search over the raw body text, not by
//! parsing. Every marker lives here so a structured parser only has to replace
//! this module.

/// Body marker of a rejected API key.
const AUTH_FAILED_MARKER: &str = "authentication failed";
/// Body marker of any reported error.
const ERROR_MARKER: &str = "error";
/// Body marker of a completed write operation.
const SUCCESS_MARKER: &str = "success";
/// Body marker of the status/version endpoint.
const VERSION_MARKER: &str = "version";

/// Transport-level verdict on a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseClass {
    /// The API key was rejected. Takes precedence over every other marker.
    AuthenticationFailed,
    /// The body mentions an error. Logged only; callers still look for success.
    Error,
    /// Nothing notable.
    Plain,
}

impl ResponseClass {
    /// Classifies a raw response body.
    pub(crate) fn classify(body: &str) -> Self {
        if body.contains(AUTH_FAILED_MARKER) {
            Self::AuthenticationFailed
        } else if body.contains(ERROR_MARKER) {
            Self::Error
        } else {
            Self::Plain
        }
    }
}

/// Whether a write operation reported success.
pub(crate) fn is_success(body: &str) -> bool {
    body.contains(SUCCESS_MARKER)
}

/// Whether the status endpoint reported a version.
pub(crate) fn has_version(body: &str) -> bool {
    body.contains(VERSION_MARKER)
}
