use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{local_name, namespace_url, ns, parse_fragment, LocalName, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 将 HTML 片段解析为 DOM
///
/// 片段在 `<body>` 上下文中解析，不会补全 `<html>`、`<head>` 或 `<body>`。
/// 关闭脚本模式，使 `<noscript>` 的内容被解析为元素而不是原始文本。
/// 解析器无法读取输入时返回 `None`。
pub fn html_to_fragment(content: &str) -> Option<RcDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_fragment(
        RcDom::default(),
        opts,
        QualName::new(None, ns!(html), local_name!("body")),
        vec![],
    )
    .from_utf8()
    .read_from(&mut content.as_bytes())
    .ok()
}

/// 获取片段的根节点
///
/// 片段解析器把所有节点放在文档节点下唯一的 `<html>` 元素中。
pub fn get_fragment_root(dom: &RcDom) -> Option<Handle> {
    dom.document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
}

/// 按文档顺序查找指定名称的所有元素
///
/// `<template>` 的内容保存在单独的文档片段中，同样会被遍历。
pub fn find_nodes(node: &Handle, node_name: &str) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    if let NodeData::Element {
        ref name,
        ref template_contents,
        ..
    } = node.data
    {
        if &*name.local == node_name {
            found_nodes.push(node.clone());
        }

        if let Some(contents) = template_contents.borrow().as_ref() {
            found_nodes.append(&mut find_nodes(contents, node_name));
        }
    }

    for child_node in node.children.borrow().iter() {
        found_nodes.append(&mut find_nodes(child_node, node_name));
    }

    found_nodes
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取节点属性值
///
/// 设置 `ignore_case` 时按 ASCII 忽略大小写比较属性名，返回第一个匹配项。
pub fn get_node_attr(node: &Handle, attr_name: &str, ignore_case: bool) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr_name_matches(&attr.name.local, attr_name, ignore_case))
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 设置节点属性
///
/// 覆盖所有同名属性的值；没有同名属性时追加到现有属性之后。不会删除属性。
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: &str, ignore_case: bool) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut found_existing_attr: bool = false;

        for attr in attrs_mut
            .iter_mut()
            .filter(|attr| attr_name_matches(&attr.name.local, attr_name, ignore_case))
        {
            found_existing_attr = true;
            attr.value.clear();
            attr.value.push_slice(attr_value);
        }

        if !found_existing_attr {
            // 添加新属性（目标节点原本没有该属性）
            attrs_mut.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: format_tendril!("{}", attr_value),
            });
        }
    };
}

fn attr_name_matches(existing: &str, wanted: &str, ignore_case: bool) -> bool {
    if ignore_case {
        existing.eq_ignore_ascii_case(wanted)
    } else {
        existing == wanted
    }
}
