//! 链接属性重写模块
//!
//! 判断哪些锚点属于外部链接，并为其添加配置的属性，不改动作者已设置的值。

use markup5ever_rcdom::{Handle, RcDom};
use regex::Regex;

use crate::config::Attributes;
use crate::core::{ExtLinksError, ExtLinksResult};
use crate::parsers::html::{find_nodes, get_fragment_root, get_node_attr, set_node_attr};

/// How a link is treated by the rewriter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// No href, or an href that doesn't start with `http`
    Local,
    /// External, but matched by an exclusion entry
    Excluded,
    /// External and eligible for rewriting
    External,
}

/// Compiled exclusion entries
///
/// Literal entries and patterns are joined into one alternation, so a URL is
/// excluded as soon as any entry matches anywhere in it.
#[derive(Clone, Debug, Default)]
pub struct Exclusions {
    matcher: Option<Regex>,
}

impl Exclusions {
    pub fn new(literals: &[String], patterns: &[String]) -> ExtLinksResult<Self> {
        let mut alternatives: Vec<String> = literals
            .iter()
            .filter(|literal| !literal.is_empty())
            .map(|literal| regex::escape(literal))
            .collect();

        for pattern in patterns {
            Regex::new(pattern).map_err(|source| ExtLinksError::InvalidExclusion {
                pattern: pattern.clone(),
                source,
            })?;
            alternatives.push(format!("(?:{})", pattern));
        }

        if alternatives.is_empty() {
            return Ok(Exclusions::default());
        }

        let union = alternatives.join("|");
        let matcher = Regex::new(&union).map_err(|source| ExtLinksError::InvalidExclusion {
            pattern: union.clone(),
            source,
        })?;

        Ok(Exclusions {
            matcher: Some(matcher),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn matches(&self, url: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(url))
    }
}

/// Everything needed to rewrite the anchors of one document
#[derive(Clone, Debug, Default)]
pub struct AnchorRules {
    pub attributes: Attributes,
    pub exclusions: Exclusions,
    pub ignore_case: bool,
}

/// Counters collected while rewriting a document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub anchors: usize,
    pub local: usize,
    pub excluded: usize,
    pub rewritten: usize,
    pub attributes_set: usize,
}

impl RewriteReport {
    pub fn is_unchanged(&self) -> bool {
        self.attributes_set == 0
    }
}

/// 判断链接是否为本地链接
///
/// 只检查 `http` 前缀（忽略 ASCII 大小写）：`https:` 链接属于外部链接，
/// `//host/path`、`mailto:` 和相对路径都属于本地链接。
pub fn is_local_link(href: Option<&str>) -> bool {
    match href {
        Some(href) => !href
            .as_bytes()
            .get(..4)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(b"http")),
        None => true,
    }
}

/// 对链接进行分类
pub fn classify_link(href: Option<&str>, exclusions: &Exclusions) -> LinkKind {
    match href {
        _ if is_local_link(href) => LinkKind::Local,
        Some(url) if exclusions.matches(url) => LinkKind::Excluded,
        _ => LinkKind::External,
    }
}

/// 为单个锚点添加属性
///
/// 先按调用前的元素状态检查每个配置属性，再写入缺失的属性。返回设置的属性数量。
pub fn rewrite_anchor(node: &Handle, attributes: &Attributes, ignore_case: bool) -> usize {
    let pending: Vec<(&str, &str)> = attributes
        .iter()
        .filter(|(name, _)| {
            get_node_attr(node, name, ignore_case).map_or(true, |current| current.is_empty())
        })
        .collect();

    for (name, value) in &pending {
        set_node_attr(node, name, value, ignore_case);
    }

    pending.len()
}

/// 重写DOM中的所有外部链接
pub fn rewrite_links_in_dom(dom: &RcDom, rules: &AnchorRules) -> RewriteReport {
    let mut report = RewriteReport::default();

    let root = match get_fragment_root(dom) {
        Some(root) => root,
        None => return report,
    };

    for anchor in find_nodes(&root, "a") {
        report.anchors += 1;

        let href = get_node_attr(&anchor, "href", false);
        match classify_link(href.as_deref(), &rules.exclusions) {
            LinkKind::Local => {
                report.local += 1;
            }
            LinkKind::Excluded => {
                tracing::trace!("Skipping excluded link {:?}", href);
                report.excluded += 1;
            }
            LinkKind::External => {
                let set = rewrite_anchor(&anchor, &rules.attributes, rules.ignore_case);
                tracing::trace!("Set {} attribute(s) on {:?}", set, href);
                if set > 0 {
                    report.rewritten += 1;
                    report.attributes_set += set;
                }
            }
        }
    }

    report
}
