//! Mailcow HTTP 请求方法

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ServerError};
use crate::http_client::{ApiRequest, HttpMethod};
use crate::types::AccountAction;
use crate::utils::log_sanitizer::truncate_for_log;

use super::response::{ResponseClass, is_success};
use super::{MAILCOW_API_PREFIX, MAILCOW_SERVER_TYPE, MailcowManager};

impl MailcowManager {
    /// `https://{host}/api/v1/{path}`
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("https://{}/{MAILCOW_API_PREFIX}/{path}", self.host)
    }

    /// 执行请求并返回原始响应文本
    ///
    /// Fails only when the body reports an authentication failure; a body
    /// mentioning an error is logged and still returned to the caller.
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<String> {
        let mut request =
            ApiRequest::new(method, self.api_url(path)).header("X-API-Key", &self.api_key);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .json(body);
        }

        let response = self.transport.send(request, MAILCOW_SERVER_TYPE).await?;

        match ResponseClass::classify(&response.body) {
            ResponseClass::AuthenticationFailed => {
                log::warn!("[{MAILCOW_SERVER_TYPE}] Authentication failed for the {path} command");
                Err(ServerError::AuthenticationFailed {
                    server_type: MAILCOW_SERVER_TYPE.to_string(),
                    raw_message: Some(response.body),
                })
            }
            ResponseClass::Error => {
                log::warn!(
                    "[{MAILCOW_SERVER_TYPE}] Mailcow returned error {} for the {path} command",
                    truncate_for_log(&response.body)
                );
                Ok(response.body)
            }
            ResponseClass::Plain => Ok(response.body),
        }
    }

    /// 执行 GET 请求
    pub(crate) async fn get(&self, path: &str) -> Result<String> {
        self.execute(HttpMethod::Get, path, None).await
    }

    /// 执行 POST 请求
    pub(crate) async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let body = serde_json::to_value(body).map_err(|e| ServerError::SerializationError {
            server_type: MAILCOW_SERVER_TYPE.to_string(),
            detail: e.to_string(),
        })?;
        self.execute(HttpMethod::Post, path, Some(body)).await
    }

    /// 执行 POST 请求，响应中缺少 success 标记即视为 `action` 失败
    pub(crate) async fn post_expecting_success<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        action: AccountAction,
    ) -> Result<()> {
        let response = self.post(path, body).await?;
        if is_success(&response) {
            return Ok(());
        }

        log::error!(
            "[{MAILCOW_SERVER_TYPE}] Failed to {action}: {}",
            truncate_for_log(&response)
        );
        Err(ServerError::OperationFailed {
            server_type: MAILCOW_SERVER_TYPE.to_string(),
            action,
            raw_message: Some(response),
        })
    }
}
