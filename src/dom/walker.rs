//! Eligible-text-node traversal used by text transforms.
//!
//! A walk is a plain function of (document, root, filter): it borrows the
//! document immutably, is finite, and can be restarted at will. Callers
//! collect the ids before mutating.

use std::collections::HashSet;

use crate::types::errors::SelectorError;

use super::document::{Document, NodeId};
use super::selector::SelectorList;

/// Which text nodes a transform may touch.
#[derive(Debug, Clone)]
pub struct TextFilter {
    excluded_tags: HashSet<String>,
    excluded_ancestors: Vec<SelectorList>,
}

impl TextFilter {
    pub fn new(excluded_tags: &[String], excluded_ancestor_selectors: &[String]) -> Result<Self, SelectorError> {
        let excluded_ancestors = excluded_ancestor_selectors
            .iter()
            .map(|s| SelectorList::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            excluded_tags: excluded_tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
            excluded_ancestors,
        })
    }

    /// A text node is eligible when it has non-whitespace content and no
    /// ancestor is an excluded tag or matches an excluded selector.
    pub fn accepts(&self, doc: &Document, node: NodeId) -> bool {
        let text = match doc.text(node) {
            Some(t) => t,
            None => return false,
        };
        if text.trim().is_empty() {
            return false;
        }
        !doc.ancestors(node).any(|a| {
            doc.tag_name(a)
                .map(|tag| self.excluded_tags.contains(tag))
                .unwrap_or(false)
                || self.excluded_ancestors.iter().any(|s| s.matches(doc, a))
        })
    }
}

/// Lazily yields the eligible text nodes under `root`, in document order.
pub fn eligible_text_nodes<'a>(
    doc: &'a Document,
    root: NodeId,
    filter: &'a TextFilter,
) -> impl Iterator<Item = NodeId> + 'a {
    doc.descendants(root).filter(move |n| filter.accepts(doc, *n))
}
