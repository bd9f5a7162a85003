use std::ops::Deref;

use serde_json::{Map, Value};

use crate::models::Message;

/// 服务端状态: 成功
pub const API_STATUS_OK: i64 = 0;

/// 服务端状态: 错误
pub const API_STATUS_ERR: i64 = 1;

/// 数值访问器在payload未加载时返回的哨兵值
pub const CONTENT_NOT_LOADED: i64 = -1;

/// 服务端的"未登录"错误码
pub const NOT_LOGGED_IN: &str = "NOT_LOGGED_IN";

/// subscribeToFeed响应缺失状态码时的哨兵值
pub const STF_UNKNOWN: i64 = -1;

/// TT-RSS响应的通用JSON视图
///
/// 包装一份已解析的顶层JSON对象。所有访问器都是只读且防御性的:
/// payload为空或字段缺失时返回哨兵/默认值,绝不失败。
/// 每次网络调用产生一个实例,消费后即丢弃。
#[derive(Debug, Clone, Default)]
pub struct RemoteResponse {
    raw: Map<String, Value>,
}

impl RemoteResponse {
    /// 从响应原始字节解析
    ///
    /// 解析失败或顶层不是JSON对象时得到空视图 (`is_loaded()` 为false)。
    pub fn from_bytes(raw: &[u8]) -> Self {
        let raw = match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { raw }
    }

    /// payload是否非空
    pub fn is_loaded(&self) -> bool {
        !self.raw.is_empty()
    }

    /// 顶层 `seq` 字段
    pub fn seq(&self) -> i64 {
        if !self.is_loaded() {
            CONTENT_NOT_LOADED
        } else {
            self.raw.get("seq").and_then(Value::as_i64).unwrap_or(0)
        }
    }

    /// 顶层 `status` 字段 (0=成功,非0=错误)
    pub fn status(&self) -> i64 {
        if !self.is_loaded() {
            CONTENT_NOT_LOADED
        } else {
            self.raw.get("status").and_then(Value::as_i64).unwrap_or(0)
        }
    }

    /// 嵌套content对象中的 `error` 字段,缺失时为空串
    pub fn error_code(&self) -> String {
        if !self.is_loaded() {
            String::new()
        } else {
            self.content_object()
                .and_then(|content| content.get("error"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        }
    }

    /// content对象是否含有 `error` 键
    pub fn has_error(&self) -> bool {
        if !self.is_loaded() {
            false
        } else {
            self.content_object()
                .map(|content| content.contains_key("error"))
                .unwrap_or(false)
        }
    }

    /// 会话是否已失效
    ///
    /// 三个条件缺一不可: status为错误值、content含error键、
    /// 且错误码恰为 `NOT_LOGGED_IN`。
    pub fn is_not_logged_in(&self) -> bool {
        self.status() == API_STATUS_ERR && self.has_error() && self.error_code() == NOT_LOGGED_IN
    }

    /// 重新序列化为紧凑JSON,用于诊断日志
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&Value::Object(self.raw.clone())).unwrap_or_default()
    }

    /// 顶层 `content` 作为对象 (content为数组或缺失时None)
    fn content_object(&self) -> Option<&Map<String, Value>> {
        self.raw.get("content").and_then(Value::as_object)
    }

    /// 顶层 `content` 字段的原始值
    pub fn content(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.raw.get("content").unwrap_or(&NULL)
    }
}

/// login操作的响应
#[derive(Debug, Clone, Default)]
pub struct LoginResponse {
    inner: RemoteResponse,
}

impl LoginResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// 服务端API级别,未加载时为哨兵值
    pub fn api_level(&self) -> i64 {
        if !self.is_loaded() {
            CONTENT_NOT_LOADED
        } else {
            self.content()["api_level"].as_i64().unwrap_or(0)
        }
    }

    /// 服务端颁发的session token,未加载或缺失时为空串
    pub fn session_id(&self) -> String {
        if !self.is_loaded() {
            String::new()
        } else {
            self.content()["session_id"]
                .as_str()
                .unwrap_or_default()
                .to_string()
        }
    }
}

impl Deref for LoginResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// getFeedTree操作的响应
///
/// 树的构建委托给树重建器,此处只暴露原始的分类条目。
#[derive(Debug, Clone, Default)]
pub struct FeedsCategoriesResponse {
    inner: RemoteResponse,
}

impl FeedsCategoriesResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// `content.categories.items` 数组,缺失时为空
    pub fn category_items(&self) -> Vec<Value> {
        self.content()["categories"]["items"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }
}

impl Deref for FeedsCategoriesResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// getHeadlines操作的响应
#[derive(Debug, Clone, Default)]
pub struct HeadlinesResponse {
    inner: RemoteResponse,
}

impl HeadlinesResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// 解析content数组中的全部headline
    ///
    /// 每个元素构造一条规范化消息,所有权移交调用方。
    pub fn messages(&self) -> Vec<Message> {
        self.content()
            .as_array()
            .map(|items| items.iter().map(Message::from_headline).collect())
            .unwrap_or_default()
    }
}

impl Deref for HeadlinesResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// updateArticle操作的响应
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleResponse {
    inner: RemoteResponse,
}

impl UpdateArticleResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// `content.status` 字符串,缺失时为空串
    pub fn update_status(&self) -> String {
        self.content()["status"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    /// 本次更新影响的文章数
    pub fn articles_updated(&self) -> i64 {
        self.content()["updated"].as_i64().unwrap_or(0)
    }
}

impl Deref for UpdateArticleResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// subscribeToFeed操作的响应
#[derive(Debug, Clone, Default)]
pub struct SubscribeToFeedResponse {
    inner: RemoteResponse,
}

impl SubscribeToFeedResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// `content.status.code` 状态码,缺失时为哨兵值
    pub fn code(&self) -> i64 {
        self.content()["status"]["code"]
            .as_i64()
            .unwrap_or(STF_UNKNOWN)
    }
}

impl Deref for SubscribeToFeedResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// unsubscribeFeed操作的响应
#[derive(Debug, Clone, Default)]
pub struct UnsubscribeFeedResponse {
    inner: RemoteResponse,
}

impl UnsubscribeFeedResponse {
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            inner: RemoteResponse::from_bytes(raw),
        }
    }

    /// 结果码字符串
    ///
    /// content同时含有 `error` 与 `status` 时,`error` 优先。
    pub fn code(&self) -> String {
        let content = self.content();
        if let Some(error) = content["error"].as_str() {
            error.to_string()
        } else if let Some(status) = content["status"].as_str() {
            status.to_string()
        } else {
            String::new()
        }
    }
}

impl Deref for UnsubscribeFeedResponse {
    type Target = RemoteResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
