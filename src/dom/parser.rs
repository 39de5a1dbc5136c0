//! HTML parsing through html5ever.
//!
//! The page is tree-built by `html5ever` into an `RcDom`, then copied into
//! the arena [`Document`]. Comments, doctypes and processing instructions
//! are dropped; `<template>` contents become ordinary children.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document as parse_html, ParseOpts, QualName};
use log::trace;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::types::errors::DomError;

use super::document::{Document, NodeId};

fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

/// Parses a full page. The tree builder always yields `html`, `head` and
/// `body`, and character references are decoded into the text nodes.
pub fn parse_document(html: &str) -> Result<Document, DomError> {
    let dom = parse_html(RcDom::default(), ParseOpts::default()).one(html);

    let mut doc = Document::new();
    let mut pending: Vec<(Handle, NodeId)> = vec![(dom.document.clone(), doc.root())];
    while let Some((handle, parent)) = pending.pop() {
        for child in handle.children.borrow().iter() {
            match child.data {
                NodeData::Element {
                    ref name,
                    ref attrs,
                    ref template_contents,
                    ..
                } => {
                    let id = doc.create_element(&name.local);
                    for attr in attrs.borrow().iter() {
                        doc.set_attr(id, &attribute_name(&attr.name), &attr.value)?;
                    }
                    doc.append_child(parent, id)?;
                    pending.push((child.clone(), id));
                    if let Some(contents) = template_contents.borrow().as_ref() {
                        pending.push((contents.clone(), id));
                    }
                }
                NodeData::Text { ref contents } => {
                    let id = doc.create_text(&contents.borrow());
                    doc.append_child(parent, id)?;
                }
                _ => {}
            }
        }
    }
    trace!("parsed page into {} nodes", doc.node_count());
    Ok(doc)
}
