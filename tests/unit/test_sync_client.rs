mod support;

use std::sync::Arc;

use support::{headlines_page, login_ok, not_logged_in, MockTransport};
use ttrss_sync::models::{FeedStatus, FeedTreeNode, NetworkError, TtRssAccount};
use ttrss_sync::services::{TransportResponse, TtRssClient, UpdateField, UpdateMode};

fn account() -> TtRssAccount {
    TtRssAccount::new("https://host", "admin", "secret").with_fetch_icons(false)
}

// ============================================================================
// 未登录自动重试协议
// ============================================================================

#[tokio::test]
async fn test_未登录响应触发恰好一次重登录与一次重发() {
    let tree_ok = TransportResponse::ok(
        br#"{"seq":0,"status":0,"content":{"categories":{"items":[]}}}"#.to_vec(),
    );
    let transport = Arc::new(MockTransport::new(vec![
        not_logged_in(),
        login_ok("sid-9"),
        tree_ok,
    ]));
    let client = TtRssClient::new(account(), transport.clone());

    let response = client.get_feeds_categories().await;

    assert!(!response.is_not_logged_in());
    assert_eq!(
        transport.sent_ops(),
        vec!["getFeedTree", "login", "getFeedTree"]
    );

    let payloads = transport.sent_payloads();
    // 重发时sid已改写为新token
    assert_eq!(payloads[2]["sid"], "sid-9");
    assert_eq!(payloads[2]["include_empty"], true);
    // 所有请求都打到API端点
    assert!(transport.sent_urls().iter().all(|u| u == "https://host/api/"));
}

#[tokio::test]
async fn test_重试后仍未登录_第二次结果原样返回不再重试() {
    let transport = Arc::new(MockTransport::new(vec![
        not_logged_in(),
        login_ok("sid-9"),
        not_logged_in(),
    ]));
    let client = TtRssClient::new(account(), transport.clone());

    let response = client.get_feeds_categories().await;

    // 第二次失败原样返回,总共恰好3个请求 (op + login + op)
    assert!(response.is_not_logged_in());
    assert_eq!(transport.request_count(), 3);
    // 传输本身成功,最近错误保持NoError
    assert!(client.last_error().await.is_ok());
}

#[tokio::test]
async fn test_传输错误记录为最近错误() {
    let transport = Arc::new(MockTransport::new(vec![TransportResponse::failed(
        NetworkError::Timeout,
    )]));
    let client = TtRssClient::new(account(), transport);

    let response = client.get_feeds_categories().await;
    assert!(!response.is_loaded());
    assert_eq!(client.last_error().await, NetworkError::Timeout);
}

// ============================================================================
// getHeadlines与分页循环
// ============================================================================

#[tokio::test]
async fn test_force_update取自账户配置() {
    let transport = Arc::new(MockTransport::new(vec![headlines_page(&[])]));
    let client = TtRssClient::new(
        account().with_force_server_side_update(true),
        transport.clone(),
    );

    client.get_headlines(7, 100, 0, true, true, false).await;

    let payloads = transport.sent_payloads();
    assert_eq!(payloads[0]["op"], "getHeadlines");
    assert_eq!(payloads[0]["feed_id"], 7);
    assert_eq!(payloads[0]["force_update"], true);
    assert_eq!(payloads[0]["show_content"], true);
    assert_eq!(payloads[0]["include_attachments"], true);
    assert_eq!(payloads[0]["sanitize"], false);
}

#[tokio::test]
async fn test_分页循环_拼接非空页并在空页停止() {
    let transport = Arc::new(MockTransport::new(vec![
        headlines_page(&[1, 2, 3]),
        headlines_page(&[4, 5]),
        headlines_page(&[]),
    ]));
    let client = TtRssClient::new(account(), transport.clone());
    let mut feed = FeedTreeNode::feed("feed", 7);

    let messages = client.obtain_new_messages(&mut feed).await.unwrap();

    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].custom_id, "1");
    assert_eq!(messages[4].custom_id, "5");
    assert_eq!(feed.status, FeedStatus::Normal);

    // skip按上一页返回的条数推进: 0 → 3 → 5
    let payloads = transport.sent_payloads();
    assert_eq!(payloads.len(), 3);
    assert_eq!(payloads[0]["skip"], 0);
    assert_eq!(payloads[1]["skip"], 3);
    assert_eq!(payloads[2]["skip"], 5);
}

#[tokio::test]
async fn test_分页中途传输错误_丢弃部分结果并标记feed() {
    let transport = Arc::new(MockTransport::new(vec![
        headlines_page(&[1, 2]),
        TransportResponse::failed(NetworkError::Timeout),
    ]));
    let client = TtRssClient::new(account(), transport.clone());
    let mut feed = FeedTreeNode::feed("feed", 7);

    let result = client.obtain_new_messages(&mut feed).await;

    // 部分结果绝不作为成功返回
    assert_eq!(result.unwrap_err(), NetworkError::Timeout);
    assert_eq!(feed.status, FeedStatus::NetworkError);
    assert_eq!(transport.request_count(), 2);
}

// ============================================================================
// subscribeToFeed / unsubscribeFeed
// ============================================================================

#[tokio::test]
async fn test_subscribe_protected为false时不附带凭证字段() {
    let ok = TransportResponse::ok(
        br#"{"seq":0,"status":0,"content":{"status":{"code":1}}}"#.to_vec(),
    );
    let transport = Arc::new(MockTransport::new(vec![ok]));
    let client = TtRssClient::new(account(), transport.clone());

    let response = client
        .subscribe_to_feed("https://example.com/rss.xml", 3, false, "u", "p")
        .await;

    assert_eq!(response.code(), 1);
    let payload = &transport.sent_payloads()[0];
    assert_eq!(payload["op"], "subscribeToFeed");
    assert_eq!(payload["feed_url"], "https://example.com/rss.xml");
    assert_eq!(payload["category_id"], 3);
    assert!(payload.get("login").is_none());
    assert!(payload.get("password").is_none());
}

#[tokio::test]
async fn test_subscribe_protected为true时总是附带凭证字段() {
    let ok = TransportResponse::ok(
        br#"{"seq":0,"status":0,"content":{"status":{"code":0}}}"#.to_vec(),
    );
    let transport = Arc::new(MockTransport::new(vec![ok]));
    let client = TtRssClient::new(account(), transport.clone());

    client
        .subscribe_to_feed("https://example.com/rss.xml", 0, true, "feed用户", "feed密码")
        .await;

    let payload = &transport.sent_payloads()[0];
    assert_eq!(payload["login"], "feed用户");
    assert_eq!(payload["password"], "feed密码");
}

#[tokio::test]
async fn test_unsubscribe_返回结果码() {
    let ok = TransportResponse::ok(br#"{"seq":0,"status":0,"content":{"status":"OK"}}"#.to_vec());
    let transport = Arc::new(MockTransport::new(vec![ok]));
    let client = TtRssClient::new(account(), transport.clone());

    let response = client.unsubscribe_feed(11).await;
    assert_eq!(response.code(), "OK");
    assert_eq!(transport.sent_payloads()[0]["feed_id"], 11);
}

// ============================================================================
// updateArticles (fire-and-forget)
// ============================================================================

#[tokio::test]
async fn test_update_articles_payload字段以整数传输() {
    let ok = TransportResponse::ok(
        br#"{"seq":0,"status":0,"content":{"status":"OK","updated":2}}"#.to_vec(),
    );
    let transport = Arc::new(MockTransport::new(vec![ok]));
    let client = TtRssClient::new(account(), transport.clone());

    let handle = client.update_articles(
        &["10".to_string(), "11".to_string()],
        UpdateField::Unread,
        UpdateMode::SetToFalse,
    );
    handle.await.unwrap();

    let payload = &transport.sent_payloads()[0];
    assert_eq!(payload["op"], "updateArticle");
    assert_eq!(payload["article_ids"], "10,11");
    assert_eq!(payload["field"], 2);
    assert_eq!(payload["mode"], 0);
}

#[tokio::test]
async fn test_update_articles_未登录时链式重试一次() {
    let ok = TransportResponse::ok(
        br#"{"seq":0,"status":0,"content":{"status":"OK","updated":1}}"#.to_vec(),
    );
    let transport = Arc::new(MockTransport::new(vec![
        not_logged_in(),
        login_ok("sid-2"),
        ok,
    ]));
    let client = TtRssClient::new(account(), transport.clone());

    let handle = client.update_articles(
        &["7".to_string()],
        UpdateField::Starred,
        UpdateMode::Toggle,
    );
    handle.await.unwrap();

    assert_eq!(
        transport.sent_ops(),
        vec!["updateArticle", "login", "updateArticle"]
    );
    assert_eq!(transport.sent_payloads()[2]["sid"], "sid-2");
    // fire-and-forget: 调用方不收到任何错误信号
    assert!(client.last_error().await.is_ok());
}
