//! Readable-content extraction for speech.
//!
//! Collects the eligible text of the page's content regions (the same text
//! the dyslexia transform touches) and flattens it into one string.

use std::collections::HashSet;

use crate::dom::{eligible_text_nodes, Document, NodeId, TextFilter};
use crate::types::errors::{EnhancerError, SpeechError};
use crate::types::reader::ReadableContent;
use crate::types::settings::SiteProfile;

use super::line_focus::is_block_tag;

/// Trait defining readable-content extraction.
pub trait ReaderModeTrait {
    fn extract(&self, doc: &Document) -> Result<ReadableContent, EnhancerError>;
}

pub struct ReaderMode {
    content_region_ids: Vec<String>,
    filter: TextFilter,
}

impl ReaderMode {
    pub fn new(profile: &SiteProfile) -> Result<Self, EnhancerError> {
        Ok(Self {
            content_region_ids: profile.content_region_ids.clone(),
            filter: TextFilter::new(&profile.excluded_tags, &profile.excluded_ancestor_selectors)?,
        })
    }

    /// Estimates reading time at ~200 words per minute, at least one minute.
    pub fn estimate_read_time(word_count: usize) -> u32 {
        ((word_count as f64) / 200.0).ceil().max(1.0) as u32
    }

    fn regions(&self, doc: &Document) -> Result<Vec<NodeId>, EnhancerError> {
        let found: Vec<NodeId> = self
            .content_region_ids
            .iter()
            .filter_map(|id| doc.get_element_by_id(id))
            .collect();
        if found.is_empty() {
            return Ok(vec![doc.body()?]);
        }
        Ok(found)
    }

    fn title(doc: &Document) -> String {
        ["title", "h1"]
            .iter()
            .filter_map(|sel| doc.query_selector(sel).ok().flatten())
            .map(|n| collapse_whitespace(&doc.text_content(n)))
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

fn nearest_block(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.ancestors(node)
        .find(|n| doc.tag_name(*n).map(is_block_tag).unwrap_or(false))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ReaderModeTrait for ReaderMode {
    fn extract(&self, doc: &Document) -> Result<ReadableContent, EnhancerError> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut raw = String::new();
        let mut last_block: Option<Option<NodeId>> = None;
        for region in self.regions(doc)? {
            for node in eligible_text_nodes(doc, region, &self.filter) {
                if !seen.insert(node) {
                    continue;
                }
                let block = nearest_block(doc, node);
                if last_block.is_some() && last_block != Some(block) {
                    raw.push(' ');
                }
                last_block = Some(block);
                raw.push_str(doc.text(node).unwrap_or(""));
            }
        }
        let text = collapse_whitespace(&raw);
        if text.is_empty() {
            return Err(SpeechError::NothingToRead.into());
        }
        let word_count = text.split(' ').count();
        Ok(ReadableContent {
            title: Self::title(doc),
            text,
            word_count,
            estimated_read_time_minutes: Self::estimate_read_time(word_count),
        })
    }
}
