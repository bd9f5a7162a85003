//! 服务层模块
//!
//! 包含同步协议的全部业务逻辑:
//! - `transport`: HTTP传输原语 (trait + reqwest实现)
//! - `response`: 响应解析器 (通用JSON视图 + 各操作的专用访问器)
//! - `session_manager`: 会话管理 (登录/登出、token持有、单飞重认证)
//! - `sync_client`: 远程同步客户端 (核心操作 + 未登录自动重试)
//! - `tree_reconciler`: 订阅树重建 (远端payload → 领域树模型)
//!
//! # 服务架构
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │            TtRssClient                 │
//! │  ┌───────────────┐  ┌───────────────┐  │
//! │  │SessionManager │  │TreeReconciler │  │
//! │  └───────┬───────┘  └───────┬───────┘  │
//! │          │    ┌─────────┐   │          │
//! │          └───►│Transport│◄──┘          │
//! │               └─────────┘              │
//! └────────────────────────────────────────┘
//!                    │
//!                    ▼
//!            TT-RSS服务端 (/api/)
//! ```

pub mod response;
pub mod session_manager;
pub mod sync_client;
pub mod transport;
pub mod tree_reconciler;

// 重导出常用类型,简化外部引用
pub use response::{
    FeedsCategoriesResponse, HeadlinesResponse, LoginResponse, RemoteResponse,
    SubscribeToFeedResponse, UnsubscribeFeedResponse, UpdateArticleResponse,
};
pub use session_manager::SessionManager;
pub use sync_client::{TtRssClient, UpdateField, UpdateMode};
pub use transport::{HttpMethod, HttpTransport, Transport, TransportRequest, TransportResponse};
