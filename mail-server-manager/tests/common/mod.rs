//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mail_server_manager::{
    Account, ApiRequest, ApiResponse, HttpTransport, MailcowManager, Package, Result, ServerError,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

pub const TEST_HOST: &str = "mail.example.com";
pub const TEST_API_KEY: &str = "test-api-key";

/// Mailcow 写操作成功时的响应
pub const SUCCESS_BODY: &str = r#"[{"type":"success","log":["mailbox","edit","domain"],"msg":["domain_modified","example.com"]}]"#;
/// Mailcow 拒绝写操作时的响应
pub const DANGER_BODY: &str = r#"[{"type":"danger","log":["mailbox","add","domain"],"msg":"domain_exists"}]"#;
/// API Key 无效时的响应
pub const AUTH_FAILED_BODY: &str = "mailcow error: authentication failed";

// ===== MockTransport =====

/// 按顺序回放预设响应并记录所有请求的传输层
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// 依次返回给定响应体（HTTP 200）
    pub fn with_bodies(bodies: &[&str]) -> Arc<Self> {
        let responses = bodies
            .iter()
            .map(|body| {
                Ok(ApiResponse {
                    status: 200,
                    body: (*body).to_string(),
                })
            })
            .collect();
        Arc::new(Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub async fn push_error(&self, error: ServerError) {
        self.responses.lock().await.push_back(Err(error));
    }

    /// 已发出的请求（按发送顺序）
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    /// 已发出请求的 URL 路径（去掉 API 前缀）
    pub async fn paths(&self) -> Vec<String> {
        let prefix = format!("https://{TEST_HOST}/api/v1/");
        self.requests()
            .await
            .into_iter()
            .map(|r| r.url.trim_start_matches(&prefix).to_string())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest, _server_type: &str) -> Result<ApiResponse> {
        self.requests.lock().await.push(request);
        // 脚本耗尽时返回空响应体，等同于没有 success 标记
        self.responses.lock().await.pop_front().unwrap_or_else(|| {
            Ok(ApiResponse {
                status: 200,
                body: String::new(),
            })
        })
    }
}

/// 使用 mock 传输层创建 Mailcow 管理器
pub fn mailcow_with(transport: &Arc<MockTransport>) -> MailcowManager {
    let transport: Arc<dyn HttpTransport> = transport.clone();
    MailcowManager::builder(TEST_HOST, TEST_API_KEY)
        .transport(transport)
        .build()
        .expect("构建 Mailcow 管理器失败")
}

pub fn test_package() -> Package {
    Package {
        name: "Mail S".to_string(),
        max_aliases: 20,
        quota_mb: 2048,
        max_mailboxes: 5,
    }
}

pub fn test_account() -> Account {
    Account {
        domain: "example.com".to_string(),
        username: "client1".to_string(),
        password: "hunter2".to_string(),
        package: test_package(),
    }
}
