use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::dom::get_fragment_root;

/// 序列化片段
///
/// 只输出片段根节点的子节点，使结果与传给 [`super::html_to_fragment`] 的
/// 标记结构一致。与解析时一样关闭脚本模式，`<noscript>` 中的文本会被转义。
/// 没有根节点或序列化失败时返回 `None`。
pub fn serialize_fragment(dom: &RcDom) -> Option<String> {
    let root = get_fragment_root(dom)?;
    let mut buf: Vec<u8> = Vec::new();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        scripting_enabled: false,
        ..Default::default()
    };
    serialize(&mut buf, &FragmentNode(root), opts).ok()?;

    String::from_utf8(buf).ok()
}

/// `SerializableHandle` 不输出 `<template>` 的内容，这里一并写出
struct FragmentNode(Handle);

impl Serialize for FragmentNode {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(&self.0, serializer),
            TraversalScope::ChildrenOnly(_) => write_children(&self.0, serializer),
        }
    }
}

fn write_children<S: Serializer>(node: &Handle, serializer: &mut S) -> io::Result<()> {
    for child_node in node.children.borrow().iter() {
        write_node(child_node, serializer)?;
    }

    Ok(())
}

fn write_node<S: Serializer>(node: &Handle, serializer: &mut S) -> io::Result<()> {
    match node.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ref template_contents,
            ..
        } => {
            serializer.start_elem(
                name.clone(),
                attrs
                    .borrow()
                    .iter()
                    .map(|attr| (&attr.name, &attr.value[..])),
            )?;

            if let Some(contents) = template_contents.borrow().as_ref() {
                write_children(contents, serializer)?;
            }
            write_children(node, serializer)?;

            serializer.end_elem(name.clone())
        }
        NodeData::Doctype { ref name, .. } => serializer.write_doctype(name),
        NodeData::Text { ref contents } => serializer.write_text(&contents.borrow()),
        NodeData::Comment { ref contents } => serializer.write_comment(contents),
        NodeData::ProcessingInstruction {
            ref target,
            ref contents,
        } => serializer.write_processing_instruction(target, contents),
        NodeData::Document => write_children(node, serializer),
    }
}
