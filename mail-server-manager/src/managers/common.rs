//! Manager 公共工具函数

use reqwest::Client;

use crate::error::{Result, ServerError};
use crate::http_client::TransportOptions;

// ============ HTTP Client ============

/// 创建带超时与 TLS 校验配置的 HTTP Client
pub fn create_http_client(options: TransportOptions, server_type: &str) -> Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.timeout);

    if options.accept_invalid_certs {
        log::warn!("[{server_type}] TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
        #[cfg(feature = "native-tls")]
        {
            builder = builder.danger_accept_invalid_hostnames(true);
        }
    }

    builder.build().map_err(|e| ServerError::NetworkError {
        server_type: server_type.to_string(),
        detail: format!("Failed to create HTTP client: {e}"),
    })
}

// ============ 名称处理 ============

/// 去掉主机名两端空白及末尾的点
pub fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_string()
}
