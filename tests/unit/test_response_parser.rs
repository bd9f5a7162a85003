use ttrss_sync::services::{
    HeadlinesResponse, LoginResponse, RemoteResponse, SubscribeToFeedResponse,
    UnsubscribeFeedResponse, UpdateArticleResponse,
};

// ============================================================================
// 通用视图: 未加载时的哨兵值
// ============================================================================

#[test]
fn test_空payload_全部访问器返回哨兵值() {
    for raw in [&b""[..], &b"null"[..], &b"{}"[..], &b"[1,2]"[..], &b"not json"[..]] {
        let response = RemoteResponse::from_bytes(raw);
        assert!(!response.is_loaded(), "payload: {raw:?}");
        assert_eq!(response.seq(), -1);
        assert_eq!(response.status(), -1);
        assert!(response.error_code().is_empty());
        assert!(!response.has_error());
        assert!(!response.is_not_logged_in());
    }
}

#[test]
fn test_专用访问器在未加载时同样降级() {
    let login = LoginResponse::from_bytes(b"");
    assert!(login.session_id().is_empty());
    assert_eq!(login.api_level(), -1);

    let headlines = HeadlinesResponse::from_bytes(b"garbage");
    assert!(headlines.messages().is_empty());

    let update = UpdateArticleResponse::from_bytes(b"");
    assert!(update.update_status().is_empty());
    assert_eq!(update.articles_updated(), 0);

    let subscribe = SubscribeToFeedResponse::from_bytes(b"");
    assert_eq!(subscribe.code(), -1);

    let unsubscribe = UnsubscribeFeedResponse::from_bytes(b"");
    assert!(unsubscribe.code().is_empty());
}

// ============================================================================
// is_not_logged_in 三条件谓词
// ============================================================================

#[test]
fn test_未登录判定_三条件齐备才成立() {
    let cases: [(&[u8], bool); 5] = [
        // 全部满足
        (br#"{"status":1,"content":{"error":"NOT_LOGGED_IN"}}"#, true),
        // status是成功值
        (br#"{"status":0,"content":{"error":"NOT_LOGGED_IN"}}"#, false),
        // 错误码不同
        (br#"{"status":1,"content":{"error":"INCORRECT_USAGE"}}"#, false),
        // content无error键
        (br#"{"status":1,"content":{"message":"NOT_LOGGED_IN"}}"#, false),
        // 正常成功响应
        (br#"{"status":0,"content":{"session_id":"x"}}"#, false),
    ];

    for (raw, expected) in cases {
        let response = RemoteResponse::from_bytes(raw);
        assert_eq!(response.is_not_logged_in(), expected, "payload: {raw:?}");
    }
}

// ============================================================================
// 各操作的专用访问器
// ============================================================================

#[test]
fn test_login响应字段() {
    let raw = br#"{"seq":3,"status":0,"content":{"session_id":"s-1","api_level":15}}"#;
    let response = LoginResponse::from_bytes(raw);
    assert_eq!(response.seq(), 3);
    assert_eq!(response.session_id(), "s-1");
    assert_eq!(response.api_level(), 15);
}

#[test]
fn test_headlines响应解析消息() {
    let raw = serde_json::json!({
        "seq": 0,
        "status": 0,
        "content": [
            {
                "id": 100,
                "unread": false,
                "marked": true,
                "author": "作者",
                "content": "正文",
                "updated": 1700000000,
                "feed_id": "3",
                "title": "标题",
                "link": "https://example.com/100",
                "attachments": [
                    {"content_type": "audio/mpeg", "content_url": "https://example.com/pod.mp3"}
                ]
            },
            {"id": 101, "unread": true, "feed_id": "3", "title": "第二篇"}
        ]
    });

    let response = HeadlinesResponse::from_bytes(raw.to_string().as_bytes());
    let messages = response.messages();
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0].custom_id, "100");
    assert!(messages[0].is_read);
    assert!(messages[0].is_important);
    assert!(messages[0].created_from_feed);
    assert_eq!(messages[0].enclosures.len(), 1);
    assert_eq!(messages[0].enclosures[0].mime_type, "audio/mpeg");

    assert_eq!(messages[1].custom_id, "101");
    assert!(!messages[1].is_read);
    assert!(messages[1].enclosures.is_empty());
}

#[test]
fn test_update响应状态与计数() {
    let raw = br#"{"seq":0,"status":0,"content":{"status":"OK","updated":5}}"#;
    let response = UpdateArticleResponse::from_bytes(raw);
    assert_eq!(response.update_status(), "OK");
    assert_eq!(response.articles_updated(), 5);
}

#[test]
fn test_subscribe响应状态码() {
    let raw = br#"{"seq":0,"status":0,"content":{"status":{"code":1}}}"#;
    assert_eq!(SubscribeToFeedResponse::from_bytes(raw).code(), 1);

    // content缺失status.code时回落为哨兵
    let raw = br#"{"seq":0,"status":0,"content":{}}"#;
    assert_eq!(SubscribeToFeedResponse::from_bytes(raw).code(), -1);
}

#[test]
fn test_unsubscribe响应_error优先于status() {
    let raw = br#"{"seq":0,"status":0,"content":{"error":"FEED_NOT_FOUND","status":"OK"}}"#;
    assert_eq!(UnsubscribeFeedResponse::from_bytes(raw).code(), "FEED_NOT_FOUND");

    let raw = br#"{"seq":0,"status":0,"content":{"status":"OK"}}"#;
    assert_eq!(UnsubscribeFeedResponse::from_bytes(raw).code(), "OK");
}
