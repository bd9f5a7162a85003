use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 消息附件
///
/// 对应headline中的 `attachments` 数组元素,保持服务端返回的顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// MIME类型 (来自 `content_type`)
    pub mime_type: String,

    /// 附件地址 (来自 `content_url`)
    pub url: String,
}

/// 规范化的文章消息
///
/// 由getHeadlines响应中的单个headline构造,构造后所有权立即移交
/// 持久化层。`custom_id` 保存服务端的数字id(字符串形式),
/// 与本地主键不同,用于后续对账。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// 作者
    pub author: String,

    /// 是否已读 (服务端 `unread` 取反)
    pub is_read: bool,

    /// 是否加星标 (服务端 `marked`)
    pub is_important: bool,

    /// 正文内容
    pub contents: String,

    /// 发布/更新时间
    pub created: Option<DateTime<Utc>>,

    /// 来自feed抓取 (恒为true,区别于本地导入)
    pub created_from_feed: bool,

    /// 服务端文章id的字符串形式
    pub custom_id: String,

    /// 所属feed的服务端id
    pub feed_id: String,

    /// 标题
    pub title: String,

    /// 原文链接
    pub url: String,

    /// 附件列表,保持服务端顺序
    pub enclosures: Vec<Enclosure>,
}

impl Message {
    /// 从headline JSON对象构造消息
    ///
    /// 所有字段缺失时降级为默认值,绝不失败。
    /// TT-RSS的 `updated` 字段是不含毫秒的Unix秒数。
    pub fn from_headline(item: &Value) -> Self {
        let mut message = Message {
            author: str_field(item, "author"),
            is_read: !item["unread"].as_bool().unwrap_or(false),
            is_important: item["marked"].as_bool().unwrap_or(false),
            contents: str_field(item, "content"),
            created: item["updated"]
                .as_i64()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            created_from_feed: true,
            custom_id: item["id"].as_i64().unwrap_or(0).to_string(),
            feed_id: id_field(item, "feed_id"),
            title: str_field(item, "title"),
            url: str_field(item, "link"),
            enclosures: Vec::new(),
        };

        if let Some(attachments) = item["attachments"].as_array() {
            for attachment in attachments {
                message.enclosures.push(Enclosure {
                    mime_type: str_field(attachment, "content_type"),
                    url: str_field(attachment, "content_url"),
                });
            }
        }

        message
    }
}

fn str_field(item: &Value, key: &str) -> String {
    item[key].as_str().unwrap_or_default().to_string()
}

/// 服务端在不同版本里把id字段返回为字符串或数字
fn id_field(item: &Value, key: &str) -> String {
    match &item[key] {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
