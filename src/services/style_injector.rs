//! `<style>` element injection keyed by a stable element id.
//!
//! Every insert first removes whatever currently carries the id, so the
//! document itself records whether an effect is active.

use crate::dom::{Document, NodeId};
use crate::types::errors::DomError;

/// Removes every element carrying `id`. Returns how many were removed.
pub fn remove_by_id(doc: &mut Document, id: &str) -> Result<usize, DomError> {
    let mut removed = 0;
    while let Some(node) = doc.get_element_by_id(id) {
        doc.remove(node)?;
        removed += 1;
    }
    Ok(removed)
}

/// Replaces the style element `id` with one holding `css`, appended to `<head>`.
pub fn inject_style(doc: &mut Document, id: &str, css: &str) -> Result<NodeId, DomError> {
    remove_by_id(doc, id)?;
    let head = doc.head()?;
    let style = doc.create_element("style");
    doc.set_attr(style, "id", id)?;
    let text = doc.create_text(css);
    doc.append_child(style, text)?;
    doc.append_child(head, style)?;
    Ok(style)
}

/// Text of the style element `id`, if present.
pub fn style_text(doc: &Document, id: &str) -> Option<String> {
    doc.get_element_by_id(id).map(|node| doc.text_content(node))
}

/// Formats a CSS number with at most four decimals and no trailing zeros.
pub fn css_number(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
