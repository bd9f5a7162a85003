//! TT-RSS远程同步客户端
//!
//! 桌面RSS聚合器的服务同步层: 通过JSON-over-HTTP调用Tiny Tiny RSS服务端API,
//! 管理会话生命周期,将远端的订阅树与文章同步到本地领域模型。
//!
//! # 模块划分
//!
//! - `models`: 数据模型 (账户配置、会话、消息、订阅树)
//! - `services`: 服务层 (HTTP传输、响应解析、会话管理、同步客户端、树重建)
//! - `utils`: 工具 (URL规范化、日志初始化)
//!
//! # 使用示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use ttrss_sync::models::TtRssAccount;
//! use ttrss_sync::services::{HttpTransport, TtRssClient};
//!
//! # async fn example() {
//! let account = TtRssAccount::new("https://rss.example.com", "admin", "secret");
//! let transport = Arc::new(HttpTransport::new());
//! let client = TtRssClient::new(account, transport);
//!
//! // 登录并拉取订阅树
//! let login = client.login().await;
//! if !login.session_id().is_empty() {
//!     let tree = client.get_feeds_categories().await;
//!     let _ = tree;
//! }
//! # }
//! ```

pub mod models;
pub mod services;
pub mod utils;
