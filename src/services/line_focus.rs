//! Line focus reading aid.
//!
//! While enabled, a standing subscription to pointer and focus events keeps
//! exactly one block of text highlighted: the nearest block-level ancestor
//! of the event target that actually holds text. The highlight reference is
//! owned by the subscription and dropped with it.

use log::debug;

use crate::dom::{Document, ListenerId, NodeId};
use crate::types::command::PageEventKind;
use crate::types::errors::DomError;

pub const HIGHLIGHT_CLASS: &str = "line-focus-highlight";

const BLOCK_TAGS: &[&str] = &[
    "p", "li", "dd", "dt", "blockquote", "pre", "td", "th", "caption", "figcaption", "h1", "h2",
    "h3", "h4", "h5", "h6", "div", "section", "article", "main", "aside", "header", "footer",
    "nav",
];

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Nearest inclusive ancestor of `target` that is a block element with
/// non-whitespace text. Never resolves to `<body>` or above.
pub fn resolve_block(doc: &Document, target: NodeId) -> Option<NodeId> {
    std::iter::once(target)
        .chain(doc.ancestors(target))
        .take_while(|n| !matches!(doc.tag_name(*n), Some("body") | Some("html")) && *n != doc.root())
        .filter(|n| doc.tag_name(*n).map(is_block_tag).unwrap_or(false))
        .find(|n| !doc.text_content(*n).trim().is_empty())
}

struct Subscription {
    listeners: Vec<ListenerId>,
    highlighted: Option<NodeId>,
}

/// Trait defining the line focus tracker.
pub trait LineFocusTrait {
    fn enable(&mut self, doc: &mut Document) -> Result<(), DomError>;
    fn disable(&mut self, doc: &mut Document) -> Result<(), DomError>;
    fn is_enabled(&self) -> bool;
    fn highlighted(&self) -> Option<NodeId>;
    /// Feeds one input event. Returns the highlighted element afterwards.
    fn handle_event(
        &mut self,
        doc: &mut Document,
        kind: PageEventKind,
        target: NodeId,
    ) -> Result<Option<NodeId>, DomError>;
}

pub struct LineFocus {
    subscription: Option<Subscription>,
}

impl LineFocus {
    pub fn new() -> Self {
        Self { subscription: None }
    }

    fn clear_highlights(doc: &mut Document) -> Result<(), DomError> {
        let marked: Vec<NodeId> = doc
            .descendants(doc.root())
            .filter(|n| doc.has_class(*n, HIGHLIGHT_CLASS))
            .collect();
        for node in marked {
            doc.remove_class(node, HIGHLIGHT_CLASS)?;
        }
        Ok(())
    }
}

impl Default for LineFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFocusTrait for LineFocus {
    fn enable(&mut self, doc: &mut Document) -> Result<(), DomError> {
        self.disable(doc)?;
        let listeners = vec![
            doc.add_event_listener(PageEventKind::PointerMove),
            doc.add_event_listener(PageEventKind::FocusIn),
        ];
        self.subscription = Some(Subscription {
            listeners,
            highlighted: None,
        });
        debug!("line focus enabled");
        Ok(())
    }

    fn disable(&mut self, doc: &mut Document) -> Result<(), DomError> {
        if let Some(sub) = self.subscription.take() {
            for listener in sub.listeners {
                doc.remove_event_listener(listener);
            }
            debug!("line focus disabled");
        }
        Self::clear_highlights(doc)
    }

    fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    fn highlighted(&self) -> Option<NodeId> {
        self.subscription.as_ref().and_then(|s| s.highlighted)
    }

    fn handle_event(
        &mut self,
        doc: &mut Document,
        kind: PageEventKind,
        target: NodeId,
    ) -> Result<Option<NodeId>, DomError> {
        let sub = match self.subscription.as_mut() {
            Some(sub) => sub,
            None => return Ok(None),
        };
        if !doc.has_listener(kind) {
            return Ok(sub.highlighted);
        }
        let block = match resolve_block(doc, target) {
            Some(block) => block,
            None => return Ok(sub.highlighted),
        };
        if sub.highlighted == Some(block) {
            return Ok(Some(block));
        }
        // The previous block may have been removed from the page since.
        if let Some(previous) = sub.highlighted.take().filter(|id| doc.contains(*id)) {
            doc.remove_class(previous, HIGHLIGHT_CLASS)?;
        }
        doc.add_class(block, HIGHLIGHT_CLASS)?;
        sub.highlighted = Some(block);
        Ok(Some(block))
    }
}
