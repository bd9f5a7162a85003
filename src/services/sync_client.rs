use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::models::{FeedTreeNode, Message, NetworkError, TtRssAccount};
use crate::services::response::{
    FeedsCategoriesResponse, HeadlinesResponse, LoginResponse, RemoteResponse,
    SubscribeToFeedResponse, UnsubscribeFeedResponse, UpdateArticleResponse,
};
use crate::services::session_manager::SessionManager;
use crate::services::transport::{Transport, TransportRequest, TransportResponse};
use crate::services::tree_reconciler;

/// 分页拉取headline时的固定页大小
pub const MAX_MESSAGES_PER_PAGE: i64 = 100;

/// updateArticle操作的目标字段
///
/// 以整数形式传输。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    /// 星标
    Starred = 0,

    /// 已发布
    Published = 1,

    /// 未读
    Unread = 2,
}

/// updateArticle操作的模式
///
/// 以整数形式传输。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// 置为false
    SetToFalse = 0,

    /// 置为true
    SetToTrue = 1,

    /// 翻转
    Toggle = 2,
}

/// TT-RSS远程同步客户端
///
/// 组合会话管理器与传输原语,暴露每个远端能力对应的操作。
/// 每个操作遵循统一的"未登录自动重试"协议:
///
/// 1. 构建请求payload (op + sid + 操作字段)
/// 2. 经传输原语执行,超时取自账户配置
/// 3. 解析响应
/// 4. 响应报告"未登录"时: 执行一次login,改写payload中的sid,
///    原样重发一次并重新解析。第二次仍失败也不再重试,
///    第二次的结果原样返回
/// 5. 返回前把传输错误码记录为客户端的"最近错误" (覆盖旧值)
///
/// 同步操作永不返回Err: 失败通过响应谓词与 `last_error()` 暴露,
/// 调用方应在每次调用后检查。
pub struct TtRssClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
}

impl TtRssClient {
    /// 创建新的客户端
    ///
    /// 一个客户端实例对应一个账户,独占该账户的会话状态。
    pub fn new(account: TtRssAccount, transport: Arc<dyn Transport>) -> Self {
        tracing::info!(
            api_url = %account.api_url,
            username = %account.username,
            "TT-RSS client initialized"
        );
        let session = Arc::new(SessionManager::new(account, transport.clone()));
        Self { transport, session }
    }

    /// 账户配置
    pub fn account(&self) -> &TtRssAccount {
        self.session.account()
    }

    /// 最近一次传输的错误码
    pub async fn last_error(&self) -> NetworkError {
        self.session.last_error().await
    }

    /// 最近一次成功登录的时间
    pub async fn last_login_time(&self) -> Option<DateTime<Utc>> {
        self.session.last_login_time().await
    }

    /// 登录 (委托给会话管理器)
    pub async fn login(&self) -> LoginResponse {
        self.session.login().await
    }

    /// 登出 (委托给会话管理器)
    pub async fn logout(&self) -> RemoteResponse {
        self.session.logout().await
    }

    /// 拉取订阅树
    ///
    /// 操作 `getFeedTree`,请求 `include_empty=true`。
    /// 本方法不构建领域树,树的重建按需委托给 `feeds_categories_tree()`。
    pub async fn get_feeds_categories(&self) -> FeedsCategoriesResponse {
        let payload = json!({
            "op": "getFeedTree",
            "include_empty": true,
        });
        let (_, body) = self.execute_with_relogin(payload, "getFeedTree").await;
        FeedsCategoriesResponse::from_bytes(&body)
    }

    /// 拉取订阅树并重建为领域树模型
    ///
    /// 是否下载feed图标取自账户配置。
    pub async fn feeds_categories_tree(&self) -> FeedTreeNode {
        let response = self.get_feeds_categories().await;
        tree_reconciler::build_feed_tree(&response, self.account(), self.transport.as_ref()).await
    }

    /// 拉取headline (单页)
    ///
    /// 操作 `getHeadlines`,`limit`/`skip` 为分页字段。
    /// `force_update` 取自账户配置而非调用参数。
    /// 分页循环由调用方负责,见 `obtain_new_messages()`。
    pub async fn get_headlines(
        &self,
        feed_id: i64,
        limit: i64,
        skip: i64,
        show_content: bool,
        include_attachments: bool,
        sanitize: bool,
    ) -> HeadlinesResponse {
        let payload = json!({
            "op": "getHeadlines",
            "feed_id": feed_id,
            "force_update": self.account().force_server_side_update,
            "limit": limit,
            "skip": skip,
            "show_content": show_content,
            "include_attachments": include_attachments,
            "sanitize": sanitize,
        });
        let (_, body) = self.execute_with_relogin(payload, "getHeadlines").await;
        HeadlinesResponse::from_bytes(&body)
    }

    /// 拉取一个feed的全部新消息 (分页循环)
    ///
    /// 从skip=0开始,每页按上一页返回的消息数推进skip,
    /// 直到某页返回0条为止。
    ///
    /// 任何一页出现传输错误立即中止: 丢弃本轮已积累的全部消息,
    /// 把feed标记为网络错误状态并返回Err —— 部分结果绝不作为成功返回。
    pub async fn obtain_new_messages(
        &self,
        feed: &mut FeedTreeNode,
    ) -> Result<Vec<Message>, NetworkError> {
        let mut messages = Vec::new();
        let mut skip = 0i64;

        loop {
            let headlines = self
                .get_headlines(feed.custom_id, MAX_MESSAGES_PER_PAGE, skip, true, true, false)
                .await;

            let last_error = self.last_error().await;
            if !last_error.is_ok() {
                tracing::warn!(
                    feed_id = %feed.custom_id,
                    error = %last_error,
                    "Obtaining messages aborted, discarding partial results"
                );
                feed.mark_network_error();
                return Err(last_error);
            }

            let new_messages = headlines.messages();
            let newly_added = new_messages.len();
            messages.extend(new_messages);
            skip += newly_added as i64;

            tracing::debug!(
                feed_id = %feed.custom_id,
                page_count = %newly_added,
                total = %messages.len(),
                "Headlines page fetched"
            );

            if newly_added == 0 {
                break;
            }
        }

        Ok(messages)
    }

    /// 批量更新文章状态 (fire-and-forget)
    ///
    /// 操作 `updateArticle`,id列表以逗号拼接,`field`/`mode` 以整数传输。
    ///
    /// 唯一的非阻塞操作: 请求在独立任务中发出,调用方得不到确认
    /// 也得不到错误信号,失败只记录日志。任务内的"未登录"重试
    /// 同样只链式跟进一次。
    ///
    /// # 返回值
    /// 任务句柄,不携带任何结果;可以直接丢弃,也可在测试中等待完成。
    pub fn update_articles(
        &self,
        ids: &[String],
        field: UpdateField,
        mode: UpdateMode,
    ) -> JoinHandle<()> {
        let mut payload = json!({
            "op": "updateArticle",
            "article_ids": ids.join(","),
            "field": field as i64,
            "mode": mode as i64,
        });
        let transport = self.transport.clone();
        let session = self.session.clone();

        tokio::spawn(async move {
            // sid在请求构建时读取;期间发生的重登录不会被本次请求观察到
            payload["sid"] = json!(session.session_id().await);
            let reply = perform_payload(transport.as_ref(), session.account(), &payload).await;

            if !reply.error.is_ok() {
                tracing::warn!(error = %reply.error, "updateArticle failed");
            }

            let response = UpdateArticleResponse::from_bytes(&reply.body);

            if response.is_not_logged_in() {
                session.login().await;
                payload["sid"] = json!(session.session_id().await);
                let reply = perform_payload(transport.as_ref(), session.account(), &payload).await;

                if !reply.error.is_ok() {
                    tracing::warn!(error = %reply.error, "updateArticle retry failed");
                }
            } else {
                tracing::debug!(
                    status = %response.update_status(),
                    updated = %response.articles_updated(),
                    "updateArticle completed"
                );
            }
        })
    }

    /// 订阅新feed
    ///
    /// 操作 `subscribeToFeed`。`protected` 为true时才在payload中
    /// 附带feed自身的login/password字段,为false时绝不附带。
    pub async fn subscribe_to_feed(
        &self,
        url: &str,
        category_id: i64,
        protected: bool,
        username: &str,
        password: &str,
    ) -> SubscribeToFeedResponse {
        let mut payload = json!({
            "op": "subscribeToFeed",
            "feed_url": url,
            "category_id": category_id,
        });

        if protected {
            payload["login"] = json!(username);
            payload["password"] = json!(password);
        }

        let (_, body) = self.execute_with_relogin(payload, "subscribeToFeed").await;
        SubscribeToFeedResponse::from_bytes(&body)
    }

    /// 退订feed
    ///
    /// 操作 `unsubscribeFeed`。
    pub async fn unsubscribe_feed(&self, feed_id: i64) -> UnsubscribeFeedResponse {
        let payload = json!({
            "op": "unsubscribeFeed",
            "feed_id": feed_id,
        });
        let (_, body) = self.execute_with_relogin(payload, "unsubscribeFeed").await;
        let response = UnsubscribeFeedResponse::from_bytes(&body);

        if response.has_error() {
            tracing::warn!(
                feed_id = %feed_id,
                response = %response.to_json_string(),
                "Unsubscribing from feed failed"
            );
        }

        response
    }

    /// 统一的执行路径: 附加sid → 执行 → 未登录则重认证并重发一次
    ///
    /// 无论结果如何都把传输错误码记录为最近错误,并返回
    /// 最终一次尝试的原始字节。
    async fn execute_with_relogin(
        &self,
        mut payload: Value,
        op: &'static str,
    ) -> (NetworkError, Vec<u8>) {
        payload["sid"] = json!(self.session.session_id().await);
        let mut reply = perform_payload(self.transport.as_ref(), self.account(), &payload).await;

        if RemoteResponse::from_bytes(&reply.body).is_not_logged_in() {
            tracing::debug!(op = %op, "Session invalid, re-authenticating once");
            self.session.login().await;
            payload["sid"] = json!(self.session.session_id().await);
            reply = perform_payload(self.transport.as_ref(), self.account(), &payload).await;
        }

        if !reply.error.is_ok() {
            tracing::warn!(op = %op, error = %reply.error, "TT-RSS operation failed");
        }

        self.session.record_error(reply.error.clone()).await;
        (reply.error, reply.body)
    }
}

/// 把payload序列化并POST到账户的API端点
async fn perform_payload(
    transport: &dyn Transport,
    account: &TtRssAccount,
    payload: &Value,
) -> TransportResponse {
    transport
        .perform(TransportRequest::post_json(
            &account.api_url,
            serde_json::to_vec(payload).unwrap_or_default(),
            account.update_timeout,
            account.http_auth.clone(),
        ))
        .await
}
