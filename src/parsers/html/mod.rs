//! HTML解析和处理模块
//!
//! 基于 `html5ever` 和 `markup5ever_rcdom` 的薄封装：
//!
//! - `dom`: 片段解析、元素查找和属性读写
//! - `serializer`: 片段序列化

pub mod dom;
pub mod serializer;

pub use dom::{
    find_nodes, get_fragment_root, get_node_attr, get_node_name, html_to_fragment, set_node_attr,
};
pub use serializer::serialize_fragment;
