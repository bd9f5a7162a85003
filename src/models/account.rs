use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::url::normalize_api_url;

/// 默认的feed更新请求超时
const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_secs(30);

/// 默认的图标下载超时 (尽力而为的短超时)
const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP Basic认证凭证
///
/// 部分TT-RSS部署在API之前还套了一层HTTP Basic认证。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAuth {
    pub username: String,
    pub password: String,
}

/// TT-RSS账户配置
///
/// 一个账户对应一个远端TT-RSS实例。配置在单次调用期间不可变,
/// 由账户编辑界面(本crate范围之外)负责修改。
///
/// # 字段说明
/// - `server_url`: 用户填写的服务器地址,规范化为以 `/` 结尾
/// - `api_url`: 派生的API端点,始终以 `api/` 结尾
/// - `force_server_side_update`: getHeadlines时要求服务端先刷新feed
/// - `fetch_icons`: 重建订阅树时是否尽力下载feed图标
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtRssAccount {
    /// 服务器基础地址 (以 `/` 结尾)
    pub server_url: String,

    /// API端点地址 (以 `api/` 结尾)
    pub api_url: String,

    /// TT-RSS用户名
    pub username: String,

    /// TT-RSS密码
    pub password: String,

    /// 可选的HTTP Basic认证
    pub http_auth: Option<HttpAuth>,

    /// getHeadlines时是否强制服务端刷新
    pub force_server_side_update: bool,

    /// 是否下载feed图标
    pub fetch_icons: bool,

    /// feed更新请求超时
    #[serde(skip, default = "default_update_timeout")]
    pub update_timeout: Duration,

    /// 图标下载超时
    #[serde(skip, default = "default_download_timeout")]
    pub download_timeout: Duration,
}

fn default_update_timeout() -> Duration {
    DEFAULT_UPDATE_TIMEOUT
}

fn default_download_timeout() -> Duration {
    DEFAULT_DOWNLOAD_TIMEOUT
}

impl TtRssAccount {
    /// 创建新的账户配置
    ///
    /// # 参数
    /// - `server_url`: 服务器地址,无需以 `/` 或 `api/` 结尾
    /// - `username` / `password`: TT-RSS登录凭证
    ///
    /// # 示例
    /// ```
    /// use ttrss_sync::models::TtRssAccount;
    /// let account = TtRssAccount::new("https://rss.example.com", "admin", "secret");
    /// assert_eq!(account.api_url, "https://rss.example.com/api/");
    /// ```
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let (server_url, api_url) = normalize_api_url(&server_url.into());
        Self {
            server_url,
            api_url,
            username: username.into(),
            password: password.into(),
            http_auth: None,
            force_server_side_update: false,
            fetch_icons: true,
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    /// 更新服务器地址,重新派生API端点
    pub fn set_server_url(&mut self, server_url: &str) {
        let (server_url, api_url) = normalize_api_url(server_url);
        self.server_url = server_url;
        self.api_url = api_url;
    }

    /// 设置HTTP Basic认证
    pub fn with_http_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.http_auth = Some(HttpAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// 设置强制服务端刷新标志
    pub fn with_force_server_side_update(mut self, force: bool) -> Self {
        self.force_server_side_update = force;
        self
    }

    /// 设置是否下载feed图标
    pub fn with_fetch_icons(mut self, fetch: bool) -> Self {
        self.fetch_icons = fetch;
        self
    }

    /// 设置feed更新请求超时
    pub fn with_update_timeout(mut self, timeout: Duration) -> Self {
        self.update_timeout = timeout;
        self
    }
}
