//! # Extlinks Library
//!
//! 为HTML片段中的外部链接添加属性（例如 `rel="nofollow"`、`target="_blank"`）。
//!
//! 不以 `http` 开头的链接和匹配排除项的链接保持不变；作者已设置为非空值的
//! 属性不会被覆盖。
//!
//! ## 模块组织
//!
//! - `core` - 编译后的重写器和错误类型
//! - `config` - `extlinks` 配置段
//! - `filter` - 模板过滤器入口
//! - `parsers` - HTML解析、序列化和链接重写

pub mod config;
pub mod core;
pub mod filter;
pub mod parsers;

// Re-export commonly used items for convenience
pub use config::{Attributes, ExtLinksConfig, SiteConfig};
pub use crate::core::*;
pub use filter::{extlinks, ConfigRegistry};
