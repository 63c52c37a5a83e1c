//! Parsed introspection documents.

use super::{InterfaceName, MalformedDocumentError};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::BTreeSet;

/// Interfaces and child node names reported by one introspect call.
///
/// Child entries are single path segments relative to the introspected
/// object, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntrospectionResult {
    interfaces: BTreeSet<String>,
    children: Vec<String>,
}

impl IntrospectionResult {
    /// Parses a raw introspection document.
    ///
    /// Interfaces are read from the `<interface>` elements directly under the
    /// root `<node>`, and child segments from its direct `<node>` children.
    /// Unnamed interfaces and child nodes are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDocumentError`] when the document is not well-formed
    /// XML or its root element is not `<node>`.
    pub fn parse(xml: &str) -> Result<Self, MalformedDocumentError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let document = Document::parse_with_options(xml, options)
            .map_err(|err| MalformedDocumentError(err.to_string()))?;
        let root = document.root_element();
        if root.tag_name().name() != "node" {
            return Err(MalformedDocumentError(format!(
                "expected root element <node>, found <{}>",
                root.tag_name().name()
            )));
        }

        let interfaces = named_children(root, "interface").collect();
        let children = named_children(root, "node").collect();
        Ok(Self {
            interfaces,
            children,
        })
    }

    /// Returns `true` when the object exposes `interface` directly.
    #[must_use]
    pub fn has_interface(&self, interface: &InterfaceName) -> bool {
        self.interfaces.contains(interface.as_str())
    }

    /// Interface names exposed by the object, sorted.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.interfaces.iter().map(String::as_str)
    }

    /// Child node segments in document order.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Returns `true` when the object has no child nodes.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn named_children<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = String> + 'a {
    parent
        .children()
        .filter(move |child| child.is_element() && child.tag_name().name() == tag)
        .filter_map(|child| child.attribute("name").map(str::to_owned))
}
