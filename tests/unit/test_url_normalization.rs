use ttrss_sync::models::TtRssAccount;
use ttrss_sync::utils::url::{normalize_api_url, strip_api_suffix};

// ============================================================================
// API端点派生
// ============================================================================

#[test]
fn test_无尾斜杠地址_补斜杠并追加api() {
    let (bare, api) = normalize_api_url("https://host");
    assert_eq!(bare, "https://host/");
    assert_eq!(api, "https://host/api/");
}

#[test]
fn test_有尾斜杠地址_直接追加api() {
    let (bare, api) = normalize_api_url("https://host/");
    assert_eq!(bare, "https://host/");
    assert_eq!(api, "https://host/api/");
}

#[test]
fn test_已含api后缀_保持不变() {
    let (_, api) = normalize_api_url("https://host/api/");
    assert_eq!(api, "https://host/api/");

    // 无尾斜杠的api后缀先补斜杠
    let (_, api) = normalize_api_url("https://host/api");
    assert_eq!(api, "https://host/api/");
}

#[test]
fn test_子路径部署() {
    let (_, api) = normalize_api_url("https://host/tt-rss");
    assert_eq!(api, "https://host/tt-rss/api/");
}

#[test]
fn test_账户配置使用同一规则() {
    for url in ["https://host", "https://host/", "https://host/api/"] {
        let account = TtRssAccount::new(url, "u", "p");
        assert_eq!(account.api_url, "https://host/api/", "输入: {url}");
    }
}

// ============================================================================
// 图标基础地址
// ============================================================================

#[test]
fn test_去掉api后缀() {
    assert_eq!(strip_api_suffix("https://host/api/"), "https://host");
    assert_eq!(strip_api_suffix("https://host/tt-rss/api/"), "https://host/tt-rss");
}
