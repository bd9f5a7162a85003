use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::Mutex;

use crate::models::{NetworkError, Session, TtRssAccount};
use crate::services::response::{LoginResponse, RemoteResponse};
use crate::services::transport::{Transport, TransportRequest};

/// 会话管理器
///
/// 持有账户凭证与当前session token,负责登录/登出。
/// token一经获得便附加到后续所有请求,直到登出或服务端宣告失效。
///
/// 状态由tokio互斥锁保护: 同一客户端实例内的重认证是单飞的,
/// 不会出现带着过期token的请求与重认证并发发出。
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    account: TtRssAccount,
    session: Mutex<Session>,
}

impl SessionManager {
    /// 创建新的会话管理器
    pub fn new(account: TtRssAccount, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            account,
            session: Mutex::new(Session::default()),
        }
    }

    /// 账户配置 (调用期间不可变)
    pub fn account(&self) -> &TtRssAccount {
        &self.account
    }

    /// 当前session token,未登录时为空串
    pub async fn session_id(&self) -> String {
        self.session.lock().await.session_id.clone()
    }

    /// 最近一次传输的错误码
    pub async fn last_error(&self) -> NetworkError {
        self.session.lock().await.last_error.clone()
    }

    /// 最近一次成功登录的时间
    pub async fn last_login_time(&self) -> Option<DateTime<Utc>> {
        self.session.lock().await.last_login_time
    }

    /// 记录传输错误码 (覆盖旧值)
    pub(crate) async fn record_error(&self, error: NetworkError) {
        self.session.lock().await.last_error = error;
    }

    /// 登录
    ///
    /// 已存在会话时先尽力登出(登出失败不阻止登录)。发送凭证,
    /// 传输成功则存储返回的token并记录当前时间;传输失败只记录错误码。
    ///
    /// 永不返回Err: 调用方通过 `session_id()` 为空或响应的
    /// `is_not_logged_in()` 判断登录失败。
    pub async fn login(&self) -> LoginResponse {
        if self.session.lock().await.is_authenticated() {
            tracing::debug!("Session ID is not empty before login, logging out first");
            self.logout().await;
        }

        let payload = json!({
            "op": "login",
            "user": self.account.username,
            "password": self.account.password,
        });
        let reply = self
            .transport
            .perform(TransportRequest::post_json(
                &self.account.api_url,
                serde_json::to_vec(&payload).unwrap_or_default(),
                self.account.update_timeout,
                self.account.http_auth.clone(),
            ))
            .await;

        let response = LoginResponse::from_bytes(&reply.body);
        let mut session = self.session.lock().await;

        if reply.error.is_ok() {
            session.mark_logged_in(response.session_id());
            tracing::info!(
                api_level = %response.api_level(),
                "TT-RSS login succeeded"
            );
        } else {
            tracing::warn!(error = %reply.error, "TT-RSS login failed");
        }

        session.last_error = reply.error;
        response
    }

    /// 登出
    ///
    /// 无活跃会话时为空操作,返回空响应且错误码为NoError。
    /// 否则发送logout请求: 传输成功才清除本地token,
    /// 失败只记录错误码、保留token,后续调用可安全重试。
    pub async fn logout(&self) -> RemoteResponse {
        let session_id = self.session_id().await;

        if session_id.is_empty() {
            tracing::warn!("Cannot logout because session ID is empty");
            self.record_error(NetworkError::NoError).await;
            return RemoteResponse::default();
        }

        let payload = json!({
            "op": "logout",
            "sid": session_id,
        });
        let reply = self
            .transport
            .perform(TransportRequest::post_json(
                &self.account.api_url,
                serde_json::to_vec(&payload).unwrap_or_default(),
                self.account.update_timeout,
                self.account.http_auth.clone(),
            ))
            .await;

        let mut session = self.session.lock().await;
        session.last_error = reply.error.clone();

        if reply.error.is_ok() {
            session.clear();
        } else {
            tracing::warn!(error = %reply.error, "TT-RSS logout failed");
        }

        RemoteResponse::from_bytes(&reply.body)
    }
}
