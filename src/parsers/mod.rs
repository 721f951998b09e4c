//! # 解析器模块
//!
//! - `html` - HTML片段解析、DOM操作和序列化
//! - `link_rewriter` - 外部链接分类和属性重写

pub mod html;
pub mod link_rewriter;

// Re-export commonly used items for convenience
pub use html::{html_to_fragment, serialize_fragment};
pub use link_rewriter::{
    classify_link, is_local_link, rewrite_anchor, rewrite_links_in_dom, AnchorRules, Exclusions,
    LinkKind,
};
