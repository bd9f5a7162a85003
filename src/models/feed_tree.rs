use serde::{Deserialize, Serialize};

/// 树节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedTreeKind {
    /// 瞬态根节点,不会写入存储
    Root,

    /// 分类
    Category,

    /// 订阅源
    Feed,
}

/// 订阅源状态
///
/// `NetworkError` 是用户可见的标记: 拉取消息过程中出现传输错误时,
/// 所属feed翻转为此状态并在列表界面中显示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    /// 正常
    Normal,

    /// 最近一次同步出现网络错误
    NetworkError,
}

/// 订阅树节点
///
/// 分类与订阅源的统一领域模型。`custom_id` 保存服务端分配的bare id,
/// 与本地存储主键不同,由持久化层在保存时对账。
///
/// 根节点由树重建器临时创建,本身不会插入存储。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedTreeNode {
    /// 节点类型
    pub kind: FeedTreeKind,

    /// 标题 (根节点为空)
    pub title: String,

    /// 服务端bare id (根节点为0)
    pub custom_id: i64,

    /// feed图标原始字节 (未下载或下载失败时为None)
    pub icon: Option<Vec<u8>>,

    /// 订阅源状态 (分类与根节点恒为Normal)
    pub status: FeedStatus,

    /// 子节点
    pub children: Vec<FeedTreeNode>,
}

impl FeedTreeNode {
    /// 创建瞬态根节点
    pub fn root() -> Self {
        Self {
            kind: FeedTreeKind::Root,
            title: String::new(),
            custom_id: 0,
            icon: None,
            status: FeedStatus::Normal,
            children: Vec::new(),
        }
    }

    /// 创建分类节点
    pub fn category(title: impl Into<String>, custom_id: i64) -> Self {
        Self {
            kind: FeedTreeKind::Category,
            title: title.into(),
            custom_id,
            icon: None,
            status: FeedStatus::Normal,
            children: Vec::new(),
        }
    }

    /// 创建订阅源节点
    pub fn feed(title: impl Into<String>, custom_id: i64) -> Self {
        Self {
            kind: FeedTreeKind::Feed,
            title: title.into(),
            custom_id,
            icon: None,
            status: FeedStatus::Normal,
            children: Vec::new(),
        }
    }

    /// 挂接子节点
    pub fn append_child(&mut self, child: FeedTreeNode) {
        self.children.push(child);
    }

    /// 是否为订阅源
    pub fn is_feed(&self) -> bool {
        self.kind == FeedTreeKind::Feed
    }

    /// 先序遍历收集所有订阅源节点
    pub fn feeds(&self) -> Vec<&FeedTreeNode> {
        let mut result = Vec::new();
        self.collect_feeds(&mut result);
        result
    }

    fn collect_feeds<'a>(&'a self, out: &mut Vec<&'a FeedTreeNode>) {
        if self.is_feed() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_feeds(out);
        }
    }

    /// 标记网络错误状态
    pub fn mark_network_error(&mut self) {
        self.status = FeedStatus::NetworkError;
    }
}
