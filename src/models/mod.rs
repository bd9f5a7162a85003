//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (传输层错误码)
//! - account: 账户配置 (服务器地址、凭证、同步选项)
//! - session: 会话状态 (session token、最近登录时间、最近错误)
//! - message: 文章消息 (服务端headline的规范化形式)
//! - feed_tree: 订阅树领域模型 (分类/订阅源节点)
//!
//! # 设计原则
//!
//! 1. **存在即合理**: 每个字段都有明确目的,无冗余
//! 2. **优雅即简约**: 类型名自文档化,代码自我阐述
//! 3. **错误处理**: 解析失败降级为哨兵值,绝不panic
//! 4. **日志安全**: 敏感数据不记录到日志 (如密码、session token)

pub mod account;
pub mod errors;
pub mod feed_tree;
pub mod message;
pub mod session;

// 重导出常用类型,简化外部引用
pub use account::{HttpAuth, TtRssAccount};
pub use errors::NetworkError;
pub use feed_tree::{FeedStatus, FeedTreeKind, FeedTreeNode};
pub use message::{Enclosure, Message};
pub use session::Session;
