//! Generational arena document tree.
//!
//! Removing a node frees its whole subtree: the slots go on a free list and
//! their generation is bumped, so a stale `NodeId` (e.g. a line-focus
//! highlight whose block was removed) stops resolving instead of aliasing
//! whatever reuses the slot.

use crate::types::command::PageEventKind;
use crate::types::errors::{DomError, SelectorError};

use super::selector::SelectorList;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Element payload: lowercase tag name and ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag_name: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Handle to a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    kind: PageEventKind,
}

/// An in-memory HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Document {
    /// Creates an empty document with no children.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    parent: None,
                    children: Vec::new(),
                    kind: NodeKind::Document,
                }),
            }],
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
            listeners: Vec::new(),
            next_listener: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::InvalidNode(id.index))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::InvalidNode(id.index))
    }

    /// True while `id` refers to a live node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, the document node included.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of allocated slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id.index)),
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag_name.as_str())
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Text(_)))
    }

    /// Text of a text node; `None` for other node kinds.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true when the node is attached under the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    // ─── Construction ───

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            kind,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId { index, generation: slot.generation };
        }
        self.slots.push(Slot { generation: 0, node: Some(node) });
        NodeId { index: self.slots.len() - 1, generation: 0 }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData::new(tag_name)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if let NodeKind::Text(_) = self.node(parent)?.kind {
            return Err(DomError::CannotHaveChildren(parent.index));
        }
        self.node(child)?;
        if child == self.root {
            return Err(DomError::HierarchyCycle(child.index));
        }
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(DomError::HierarchyCycle(child.index));
            }
            cursor = self.parent(node);
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.parent(child) {
            if let Some(p) = self.get_mut(old_parent) {
                p.children.retain(|id| *id != child);
            }
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
        }
    }

    /// Frees `id` and its subtree. The node must already be detached.
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = match self.slots.get_mut(current.index) {
                Some(slot) if slot.generation == current.generation => slot,
                _ => continue,
            };
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> Result<(), DomError> {
        self.node_mut(child)?.parent = Some(parent);
        let children = &mut self.node_mut(parent)?.children;
        match index {
            Some(i) => children.insert(i, child),
            None => children.push(child),
        }
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertion(parent, child)?;
        self.detach(child);
        self.attach(parent, child, None)
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        if child == reference {
            return Ok(());
        }
        self.check_insertion(parent, child)?;
        if self.parent(reference) != Some(parent) {
            return Err(DomError::InvalidNode(reference.index));
        }
        self.detach(child);
        let index = self
            .children(parent)
            .iter()
            .position(|id| *id == reference)
            .ok_or(DomError::InvalidNode(reference.index))?;
        self.attach(parent, child, Some(index))
    }

    /// Removes a node and frees its subtree. Ids into the subtree stop
    /// resolving afterwards.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.node(id)?;
        if id == self.root {
            return Err(DomError::HierarchyCycle(id.index));
        }
        self.detach(id);
        self.release(id);
        Ok(())
    }

    /// Replaces `target` in its parent with `replacements`, in order, and
    /// frees `target` unless it is one of the replacements.
    pub fn replace_with(&mut self, target: NodeId, replacements: &[NodeId]) -> Result<(), DomError> {
        let parent = match self.parent(target) {
            Some(p) => p,
            None => return Ok(()),
        };
        for &node in replacements {
            self.insert_before(parent, node, target)?;
        }
        if replacements.contains(&target) {
            return Ok(());
        }
        self.remove(target)
    }

    /// Merges adjacent text children and drops empty ones. Merged-away
    /// nodes are freed.
    pub fn normalize(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = self.node(id)?.children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        let mut dropped: Vec<NodeId> = Vec::new();
        for child in children {
            let text = self.text(child).map(str::to_string);
            match text {
                Some(t) if t.is_empty() => dropped.push(child),
                Some(t) => {
                    let prev_text = kept.last().copied().filter(|p| self.is_text(*p));
                    match prev_text {
                        Some(prev) => {
                            if let NodeKind::Text(existing) = &mut self.node_mut(prev)?.kind {
                                existing.push_str(&t);
                            }
                            dropped.push(child);
                        }
                        None => kept.push(child),
                    }
                }
                None => kept.push(child),
            }
        }
        self.node_mut(id)?.children = kept;
        for node in dropped {
            if let Some(n) = self.get_mut(node) {
                n.parent = None;
            }
            self.release(node);
        }
        Ok(())
    }

    // ─── Attributes, classes, inline style ───

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).map(|el| el.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if el.has_class(class) {
            return Ok(());
        }
        let mut classes: Vec<String> = el.classes().map(str::to_string).collect();
        classes.push(class.to_string());
        el.set_attr("class", &classes.join(" "));
        Ok(())
    }

    /// Removes every occurrence of `class`. Returns whether it was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let el = self.element_mut(id)?;
        if !el.has_class(class) {
            return Ok(false);
        }
        let classes: Vec<String> = el
            .classes()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if classes.is_empty() {
            el.remove_attr("class");
        } else {
            el.set_attr("class", &classes.join(" "));
        }
        Ok(true)
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        if self.remove_class(id, class)? {
            Ok(false)
        } else {
            self.add_class(id, class)?;
            Ok(true)
        }
    }

    fn style_declarations(&self, id: NodeId) -> Vec<(String, String)> {
        self.attr(id, "style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim().to_ascii_lowercase();
                if prop.is_empty() {
                    return None;
                }
                Some((prop, value.trim().to_string()))
            })
            .collect()
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.style_declarations(id)
            .into_iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, v)| v)
    }

    /// Sets an inline style property. An empty value removes it, mirroring
    /// `element.style.prop = ''`.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let property = property.to_ascii_lowercase();
        let mut decls: Vec<(String, String)> = self
            .style_declarations(id)
            .into_iter()
            .filter(|(p, _)| *p != property)
            .collect();
        if !value.is_empty() {
            decls.push((property, value.to_string()));
        }
        let el = self.element_mut(id)?;
        if decls.is_empty() {
            el.remove_attr("style");
        } else {
            let css: Vec<String> = decls.iter().map(|(p, v)| format!("{}: {};", p, v)).collect();
            el.set_attr("style", &css.join(" "));
        }
        Ok(())
    }

    // ─── Traversal and lookup ───

    /// Pre-order iterator over `id` and everything beneath it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(t) = self.text(node) {
                out.push_str(t);
            }
        }
        out
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|c| self.tag_name(*c) == Some("html"))
    }

    fn html_child(&self, tag: &str) -> Result<NodeId, DomError> {
        self.document_element()
            .and_then(|html| {
                self.children(html)
                    .iter()
                    .copied()
                    .find(|c| self.tag_name(*c) == Some(tag))
            })
            .ok_or_else(|| DomError::MissingElement(tag.to_string()))
    }

    pub fn head(&self) -> Result<NodeId, DomError> {
        self.html_child("head")
    }

    pub fn body(&self) -> Result<NodeId, DomError> {
        self.html_child("body")
    }

    /// First connected element with the given id, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|n| self.element(*n).and_then(|el| el.id()) == Some(id))
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select_all(&list))
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.descendants(self.root).find(|n| list.matches(self, *n)))
    }

    /// Every connected element matching an already parsed selector list.
    pub fn select_all(&self, list: &SelectorList) -> Vec<NodeId> {
        self.descendants(self.root)
            .filter(|n| list.matches(self, *n))
            .collect()
    }

    /// Nearest inclusive ancestor matching `list`.
    pub fn closest(&self, id: NodeId, list: &SelectorList) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| list.matches(self, *n))
    }

    // ─── Event listeners ───

    pub fn add_event_listener(&mut self, kind: PageEventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, kind });
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn has_listener(&self, kind: PageEventKind) -> bool {
        self.listeners.iter().any(|l| l.kind == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
