//! HTML serialization for [`Document`] subtrees via html5ever's serializer.

use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{LocalName, Namespace, QualName};
use log::warn;

use super::document::{Document, NodeId, NodeKind};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn element_name(tag: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(name))
}

fn start_element<S: Serializer>(serializer: &mut S, tag: &str, attrs: &[(String, String)]) -> io::Result<()> {
    let names: Vec<QualName> = attrs.iter().map(|(name, _)| attribute_name(name)).collect();
    let values = attrs.iter().map(|(_, value)| value.as_str());
    serializer.start_elem(element_name(tag), names.iter().zip(values))
}

enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

/// A node of a [`Document`] as seen by the html5ever serializer.
struct Subtree<'a> {
    doc: &'a Document,
    id: NodeId,
    start_tag_only: bool,
}

impl Serialize for Subtree<'_> {
    fn serialize<S: Serializer>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()> {
        let doc = self.doc;
        if self.start_tag_only {
            if let Some(el) = doc.element(self.id) {
                start_element(serializer, &el.tag_name, &el.attrs)?;
            }
            return Ok(());
        }

        let mut stack: Vec<Step<'_>> = match traversal_scope {
            TraversalScope::IncludeNode => vec![Step::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => doc
                .children(self.id)
                .iter()
                .rev()
                .map(|c| Step::Open(*c))
                .collect(),
        };
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Close(tag) => {
                    serializer.end_elem(element_name(tag))?;
                    continue;
                }
                Step::Open(id) => id,
            };
            match doc.kind(id) {
                Some(NodeKind::Text(text)) => serializer.write_text(text)?,
                Some(NodeKind::Element(el)) => {
                    start_element(serializer, &el.tag_name, &el.attrs)?;
                    stack.push(Step::Close(&el.tag_name));
                }
                Some(NodeKind::Document) => {}
                None => continue,
            }
            stack.extend(doc.children(id).iter().rev().map(|c| Step::Open(*c)));
        }
        Ok(())
    }
}

impl Document {
    fn render(&self, id: NodeId, traversal_scope: TraversalScope, start_tag_only: bool) -> String {
        let node = Subtree {
            doc: self,
            id,
            start_tag_only,
        };
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };
        let mut out: Vec<u8> = Vec::new();
        if let Err(err) = serialize(&mut out, &node, opts) {
            warn!("serializing node {} failed: {}", id.index(), err);
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// The start tag of an element, e.g. `<p class="x">`. Empty for other nodes.
    pub fn opening_tag(&self, id: NodeId) -> String {
        self.render(id, TraversalScope::IncludeNode, true)
    }

    /// Serializes the node and its subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.render(id, TraversalScope::IncludeNode, false)
    }

    /// Serializes the children of the node.
    pub fn inner_html(&self, id: NodeId) -> String {
        self.render(id, TraversalScope::ChildrenOnly(None), false)
    }

    /// Serializes the whole document, doctype included.
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.inner_html(self.root()))
    }
}
