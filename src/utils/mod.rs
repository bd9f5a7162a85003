//! 工具模块
//!
//! - `url`: 服务器地址规范化 (派生API端点、图标基础地址)
//! - `logger`: 结构化日志初始化

pub mod logger;
pub mod url;
