use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::NetworkError;

/// TT-RSS会话状态
///
/// 由同一账户的同步客户端独占持有。`session_id` 为空表示未登录;
/// 登录成功后写入token,登出或服务端报告"未登录"时清空。
///
/// `last_error` 记录最近一次传输的结果,每次同步操作都会覆盖它,
/// 调用方应在每次调用后查询。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// 服务端颁发的session token,空字符串表示未认证
    pub session_id: String,

    /// 最近一次成功登录的时间
    pub last_login_time: Option<DateTime<Utc>>,

    /// 最近一次传输的错误码
    pub last_error: NetworkError,
}

impl Session {
    /// 是否持有session token
    pub fn is_authenticated(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// 记录登录成功
    ///
    /// 写入服务端返回的token并记下当前时间。
    pub fn mark_logged_in(&mut self, session_id: String) {
        self.session_id = session_id;
        self.last_login_time = Some(Utc::now());
    }

    /// 清除session token
    ///
    /// 登出成功或服务端宣告会话失效时调用。登录时间保留用于诊断。
    pub fn clear(&mut self) {
        self.session_id.clear();
    }
}
