/// 规范化服务器地址并派生API端点
///
/// 规则:
/// 1. 基础地址不以 `/` 结尾则补上
/// 2. 已以 `api/` 结尾则原样作为API端点,否则追加 `api/`
///
/// # 示例
/// ```
/// use ttrss_sync::utils::url::normalize_api_url;
/// assert_eq!(normalize_api_url("https://host").1, "https://host/api/");
/// assert_eq!(normalize_api_url("https://host/").1, "https://host/api/");
/// assert_eq!(normalize_api_url("https://host/api/").1, "https://host/api/");
/// ```
pub fn normalize_api_url(bare_url: &str) -> (String, String) {
    let mut bare = bare_url.to_string();
    if !bare.ends_with('/') {
        bare.push('/');
    }

    let api = if bare.ends_with("api/") {
        bare.clone()
    } else {
        format!("{bare}api/")
    };

    (bare, api)
}

/// 去掉API端点尾部的 `api/`,得到图标路径的基础地址
///
/// feed图标路径是相对于服务器根而不是API端点的。
pub fn strip_api_suffix(api_url: &str) -> String {
    api_url
        .strip_suffix("api/")
        .unwrap_or(api_url)
        .trim_end_matches('/')
        .to_string()
}
