use std::collections::VecDeque;

use serde_json::Value;

use crate::models::{FeedTreeNode, TtRssAccount};
use crate::services::response::{FeedsCategoriesResponse, API_STATUS_OK};
use crate::services::transport::{Transport, TransportRequest};
use crate::utils::url::strip_api_suffix;

/// getFeedTree payload中标识分类的type值
const ITEM_TYPE_CATEGORY: &str = "category";

/// 把getFeedTree响应重建为领域订阅树
///
/// 广度优先遍历: 显式工作队列存放(父节点槽位, 原始JSON节点)对,
/// 以顶层分类列表作为种子。对每个出队的节点:
///
/// - bare_id为负: 跳过 (畸形/哨兵节点)
/// - bare_id为0的分类 ("Uncategorized"桶): 不创建节点,
///   其子节点改挂到根下 (拍平这一层)
/// - 其余分类: 创建分类节点挂到当前父节点,子节点入队
/// - feed: 创建订阅源节点;启用图标下载时尽力拉取图标,
///   失败不算错误,feed保持无图标
///
/// 返回的树根是瞬态节点,本身不会写入存储;bare id存入
/// `custom_id` 字段供持久化层对账。
pub async fn build_feed_tree(
    response: &FeedsCategoriesResponse,
    account: &TtRssAccount,
    transport: &dyn Transport,
) -> FeedTreeNode {
    // 图标路径相对于服务器根,去掉API端点的"api/"后缀
    let icon_base = strip_api_suffix(&account.api_url);

    // 槽位0为根;父节点先于子节点建槽,parent索引恒小于子索引
    let mut slots: Vec<(usize, Option<FeedTreeNode>)> = vec![(0, Some(FeedTreeNode::root()))];

    if response.status() == API_STATUS_OK {
        let mut queue: VecDeque<(usize, Value)> = response
            .category_items()
            .into_iter()
            .map(|item| (0usize, item))
            .collect();

        while let Some((parent_slot, item)) = queue.pop_front() {
            let bare_id = item["bare_id"].as_i64().unwrap_or(0);
            let is_category = item["type"].as_str() == Some(ITEM_TYPE_CATEGORY);

            if bare_id < 0 {
                continue;
            }

            if is_category {
                if bare_id == 0 {
                    // "Uncategorized"分类: 其feed直接归属顶层根
                    enqueue_children(&mut queue, &item, 0);
                } else {
                    let category = FeedTreeNode::category(
                        item["name"].as_str().unwrap_or_default(),
                        bare_id,
                    );
                    slots.push((parent_slot, Some(category)));
                    let slot = slots.len() - 1;
                    enqueue_children(&mut queue, &item, slot);
                }
            } else {
                let mut feed =
                    FeedTreeNode::feed(item["name"].as_str().unwrap_or_default(), bare_id);

                if account.fetch_icons {
                    feed.icon = fetch_icon(&item, &icon_base, account, transport).await;
                }

                slots.push((parent_slot, Some(feed)));
            }
        }
    }

    assemble(slots)
}

/// 把节点的items数组入队到指定父槽位
fn enqueue_children(queue: &mut VecDeque<(usize, Value)>, item: &Value, parent_slot: usize) {
    if let Some(children) = item["items"].as_array() {
        for child in children {
            queue.push_back((parent_slot, child.clone()));
        }
    }
}

/// 尽力下载feed图标
///
/// 图标地址 = 服务器根 + "/" + 节点icon路径。
/// 拉取失败或响应为空都只是"无图标",不是错误。
async fn fetch_icon(
    item: &Value,
    icon_base: &str,
    account: &TtRssAccount,
    transport: &dyn Transport,
) -> Option<Vec<u8>> {
    let icon_path = item["icon"].as_str().unwrap_or_default();
    if icon_path.is_empty() {
        return None;
    }

    let icon_url = format!("{icon_base}/{icon_path}");
    let reply = transport
        .perform(TransportRequest::get(&icon_url, account.download_timeout))
        .await;

    if reply.error.is_ok() && !reply.body.is_empty() {
        Some(reply.body)
    } else {
        tracing::debug!(url = %icon_url, "Feed icon not fetched");
        None
    }
}

/// 把槽位数组装配成属主树
///
/// 子槽位索引恒大于父槽位,从高到低把节点搬进各自的父节点;
/// 逆序搬运会颠倒兄弟顺序,最后整树翻转恢复服务端顺序。
fn assemble(mut slots: Vec<(usize, Option<FeedTreeNode>)>) -> FeedTreeNode {
    for i in (1..slots.len()).rev() {
        let parent_slot = slots[i].0;
        if let Some(node) = slots[i].1.take() {
            if let Some(parent) = slots[parent_slot].1.as_mut() {
                parent.children.push(node);
            }
        }
    }

    let mut root = slots[0].1.take().unwrap_or_else(FeedTreeNode::root);
    restore_child_order(&mut root);
    root
}

fn restore_child_order(node: &mut FeedTreeNode) {
    node.children.reverse();
    for child in &mut node.children {
        restore_child_order(child);
    }
}
