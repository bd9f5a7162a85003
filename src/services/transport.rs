use std::time::Duration;

use async_trait::async_trait;

use crate::models::{HttpAuth, NetworkError};

/// JSON请求的Content-Type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP方法
///
/// 同步协议只用到POST(API调用)和GET(图标下载)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Get,
}

/// 一次传输请求
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// 目标地址
    pub url: String,

    /// HTTP方法
    pub method: HttpMethod,

    /// 请求体 (GET时为空)
    pub body: Vec<u8>,

    /// Content-Type (空字符串表示不设置)
    pub content_type: String,

    /// 单次请求超时
    pub timeout: Duration,

    /// 可选的HTTP Basic认证
    pub auth: Option<HttpAuth>,
}

impl TransportRequest {
    /// 构造JSON POST请求
    pub fn post_json(
        url: impl Into<String>,
        body: Vec<u8>,
        timeout: Duration,
        auth: Option<HttpAuth>,
    ) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            body,
            content_type: CONTENT_TYPE_JSON.to_string(),
            timeout,
            auth,
        }
    }

    /// 构造GET请求 (图标下载)
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            body: Vec::new(),
            content_type: String::new(),
            timeout,
            auth: None,
        }
    }
}

/// 一次传输的结果
///
/// 传输从不以Err形式失败: 错误码与已收到的字节一并返回,
/// 由上层决定如何处理。
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// 传输错误码,`NetworkError::NoError` 表示成功
    pub error: NetworkError,

    /// 响应体原始字节 (失败时可能为空)
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            error: NetworkError::NoError,
            body,
        }
    }

    pub fn failed(error: NetworkError) -> Self {
        Self {
            error,
            body: Vec::new(),
        }
    }
}

/// HTTP传输原语
///
/// 同步客户端唯一的对外网络出口。以trait形式存在,
/// 便于测试时用脚本化的假实现替换真实网络。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 执行单次HTTP请求
    async fn perform(&self, request: TransportRequest) -> TransportResponse;
}

/// 基于reqwest的传输实现
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 创建新的传输实例
    ///
    /// 连接池由内部的reqwest::Client管理,单个实例可被多个客户端共享。
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: TransportRequest) -> TransportResponse {
        let mut builder = match request.method {
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Get => self.client.get(&request.url),
        };

        builder = builder.timeout(request.timeout);

        if !request.content_type.is_empty() {
            builder = builder.header(reqwest::header::CONTENT_TYPE, &request.content_type);
        }

        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        if request.method == HttpMethod::Post {
            builder = builder.body(request.body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "HTTP request failed");
                return TransportResponse::failed(NetworkError::from(e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "Failed to read response body");
                return TransportResponse::failed(NetworkError::from(e));
            }
        };

        if status.is_success() {
            TransportResponse::ok(body)
        } else {
            tracing::warn!(
                url = %request.url,
                status = %status.as_u16(),
                "HTTP request returned error status"
            );
            TransportResponse {
                error: NetworkError::HttpError {
                    status: status.as_u16(),
                },
                body,
            }
        }
    }
}
