use anyhow::Context as _;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;

use crate::style::InlineStyle;

const FRAGMENT_ID: &str = "__fragment_root";

#[derive(Clone)]
pub struct Page {
    document: NodeRef,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    pub fn body(&self) -> Option<NodeRef> {
        self.select_first("body")
    }

    pub fn head(&self) -> Option<NodeRef> {
        self.select_first("head")
    }

    pub fn select_all(&self, selector: &str) -> Vec<NodeRef> {
        select_within(&self.document, selector)
    }

    pub fn select_first(&self, selector: &str) -> Option<NodeRef> {
        self.document
            .select_first(selector)
            .ok()
            .map(|n| n.as_node().clone())
    }

    // Compares values directly so caller-supplied ids never need escaping.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeRef> {
        self.select_all(&format!("[{}]", name))
            .into_iter()
            .find(|n| attr(n, name).as_deref() == Some(value))
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize document")?;
        String::from_utf8(out).context("document html not utf-8")
    }
}

pub fn select_within(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match root.select(selector) {
        Ok(nodes) => nodes.map(|n| n.as_node().clone()).collect(),
        Err(()) => {
            tracing::debug!(selector, "invalid selector; matching nothing");
            Vec::new()
        }
    }
}

pub fn first_within(root: &NodeRef, selector: &str) -> Option<NodeRef> {
    root.select_first(selector)
        .ok()
        .map(|n| n.as_node().clone())
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    let el = node.as_element()?;
    el.attributes.borrow().get(name).map(|s| s.to_string())
}

pub fn set_attr(node: &NodeRef, name: &str, value: impl Into<String>) {
    if let Some(el) = node.as_element() {
        el.attributes.borrow_mut().insert(name, value.into());
    }
}

pub fn remove_attr(node: &NodeRef, name: &str) {
    if let Some(el) = node.as_element() {
        el.attributes.borrow_mut().remove(name);
    }
}

pub fn has_attr(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .map(|el| el.attributes.borrow().contains(name))
        .unwrap_or(false)
}

pub fn classes(node: &NodeRef) -> Vec<String> {
    attr(node, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    classes(node).iter().any(|c| c == class)
}

pub fn add_class(node: &NodeRef, class: &str) {
    let mut list = classes(node);
    if list.iter().any(|c| c == class) {
        return;
    }
    list.push(class.to_string());
    set_attr(node, "class", list.join(" "));
}

pub fn remove_class(node: &NodeRef, class: &str) {
    let list = classes(node);
    if !list.iter().any(|c| c == class) {
        return;
    }
    let kept: Vec<String> = list.into_iter().filter(|c| c != class).collect();
    set_attr(node, "class", kept.join(" "));
}

pub fn toggle_class(node: &NodeRef, class: &str) -> bool {
    if has_class(node, class) {
        remove_class(node, class);
        false
    } else {
        add_class(node, class);
        true
    }
}

pub fn style(node: &NodeRef, property: &str) -> Option<String> {
    let raw = attr(node, "style")?;
    InlineStyle::parse(&raw).get(property).map(str::to_string)
}

pub fn set_style(node: &NodeRef, property: &str, value: &str) {
    set_styles(node, &[(property, value)]);
}

pub fn set_styles(node: &NodeRef, decls: &[(&str, &str)]) {
    if node.as_element().is_none() {
        return;
    }
    let mut inline = InlineStyle::parse(&attr(node, "style").unwrap_or_default());
    for (name, value) in decls {
        inline.set(name, value);
    }
    set_attr(node, "style", inline.to_string());
}

pub fn is_attached(node: &NodeRef) -> bool {
    node.parent().is_some()
}

pub fn inner_html(node: &NodeRef) -> anyhow::Result<String> {
    let mut out = Vec::new();
    for child in node.children() {
        child.serialize(&mut out).context("serialize child")?;
    }
    String::from_utf8(out).context("inner html not utf-8")
}

pub fn set_inner_html(node: &NodeRef, html: &str) {
    let old: Vec<NodeRef> = node.children().collect();
    for child in old {
        child.detach();
    }
    for child in parse_fragment(html) {
        node.append(child);
    }
}

pub fn parse_fragment(html: &str) -> Vec<NodeRef> {
    // The wrapper keeps head-only tags such as <style> in the fragment.
    let doc = kuchiki::parse_html().one(format!("<div id=\"{FRAGMENT_ID}\">{html}</div>"));
    let Some(wrapper) = first_within(&doc, &format!("#{FRAGMENT_ID}")) else {
        return Vec::new();
    };
    let nodes: Vec<NodeRef> = wrapper.children().collect();
    for node in &nodes {
        node.detach();
    }
    nodes
}
