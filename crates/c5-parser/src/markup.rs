//! Markup tree capability and its ast-grep adapter.

use std::ops::Range;

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_core::{Doc, Node};
use ast_grep_language::SupportLang;

/// The concrete tree type returned by [`parse_markup`].
pub type MarkupTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// An HTML attribute: `(name, optional_value)`.
pub type HtmlAttr = (String, Option<String>);

/// Node kinds the traversals dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Comment,
    Other,
}

/// What the region and marker traversals need from a parsed markup node.
pub trait MarkupNode: Sized {
    fn node_kind(&self) -> NodeKind;

    /// Tag name as written in the source, for elements.
    fn tag_name(&self) -> Option<String>;

    /// Attributes of the element's start tag, in source order.
    fn attributes(&self) -> Vec<HtmlAttr>;

    /// Comment text without the `<!--` / `-->` delimiters.
    fn comment_data(&self) -> Option<String>;

    fn child_nodes(&self) -> Vec<Self>;

    /// Byte range of the node in the source it was parsed from.
    fn byte_range(&self) -> Range<usize>;
}

/// Parse an HTML string into an ast-grep tree.
#[must_use]
pub fn parse_markup(source: &str) -> MarkupTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Html.ast_grep(source)
}

impl<D: Doc> MarkupNode for Node<'_, D> {
    fn node_kind(&self) -> NodeKind {
        match self.kind().as_ref() {
            "element" | "script_element" | "style_element" => NodeKind::Element,
            "comment" => NodeKind::Comment,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<String> {
        let tag = start_tag(self)?;
        tag.children()
            .find(|c| c.kind().as_ref() == "tag_name")
            .map(|name| name.text().to_string())
    }

    fn attributes(&self) -> Vec<HtmlAttr> {
        start_tag(self)
            .map(|tag| extract_attrs_from_tag(&tag))
            .unwrap_or_default()
    }

    fn comment_data(&self) -> Option<String> {
        if self.node_kind() != NodeKind::Comment {
            return None;
        }
        let text = self.text();
        let raw: &str = &text;
        let inner = raw.strip_prefix("<!--").unwrap_or(raw);
        let inner = inner.strip_suffix("-->").unwrap_or(inner);
        Some(inner.to_string())
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children().collect()
    }

    fn byte_range(&self) -> Range<usize> {
        self.range()
    }
}

/// The `start_tag` (or `self_closing_tag`) child of an element.
fn start_tag<'r, D: Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    node.children()
        .find(|c| matches!(c.kind().as_ref(), "start_tag" | "self_closing_tag"))
}

/// Extract all attributes from a tag node. Quoted and unquoted values are
/// both accepted; `name=""` yields an empty value. Character references in
/// values are decoded.
fn extract_attrs_from_tag<D: Doc>(tag_node: &Node<D>) -> Vec<HtmlAttr> {
    tag_node
        .children()
        .filter(|c| c.kind().as_ref() == "attribute")
        .filter_map(|attr| {
            let name = attr
                .children()
                .find(|c| c.kind().as_ref() == "attribute_name")?;
            let value = attr.children().find_map(|c| match c.kind().as_ref() {
                "attribute_value" => Some(decode_value(&c.text())),
                "quoted_attribute_value" => Some(
                    c.children()
                        .find(|v| v.kind().as_ref() == "attribute_value")
                        .map(|v| decode_value(&v.text()))
                        .unwrap_or_default(),
                ),
                _ => None,
            });
            Some((name.text().to_string(), value))
        })
        .collect()
}

fn decode_value(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}
