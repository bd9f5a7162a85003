use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 传输层错误码
///
/// 对应一次HTTP往返的结果。同步操作从不因网络失败而返回Err,
/// 而是把本枚举记录为客户端的"最近错误",由调用方在每次调用后查询。
///
/// `NoError` 表示传输成功(HTTP 2xx),是唯一的非错误值。
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum NetworkError {
    /// 传输成功
    #[error("无错误")]
    NoError,

    /// 请求超时
    ///
    /// 超过了账户配置的更新超时时间
    #[error("请求超时")]
    Timeout,

    /// 连接失败
    ///
    /// 可能原因:
    /// - 网络连接中断
    /// - 服务器不可达
    /// - DNS解析失败
    #[error("无法连接到服务器")]
    ConnectionFailed,

    /// HTTP状态码错误
    ///
    /// 服务器返回了非2xx状态码
    #[error("HTTP错误 {status}")]
    HttpError { status: u16 },

    /// 其他未分类的传输错误
    #[error("网络请求失败: {0}")]
    Unknown(String),
}

impl NetworkError {
    /// 是否表示传输成功
    pub fn is_ok(&self) -> bool {
        *self == NetworkError::NoError
    }
}

impl Default for NetworkError {
    fn default() -> Self {
        NetworkError::NoError
    }
}

/// 实现从reqwest::Error到NetworkError的转换
impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed
        } else if let Some(status) = err.status() {
            NetworkError::HttpError {
                status: status.as_u16(),
            }
        } else {
            NetworkError::Unknown(err.to_string())
        }
    }
}
