//! Dyslexia reading aid: emphasizes the first half of every word.
//!
//! Each non-whitespace run is split at `ceil(chars / 2)`. The first half goes
//! into an emphasis span, the second half stays plain text, and whitespace
//! runs pass through untouched, so removing the spans and concatenating the
//! text reproduces the source text exactly.

use std::collections::HashSet;

use log::{debug, warn};

use crate::dom::{eligible_text_nodes, Document, NodeId, TextFilter};
use crate::types::errors::{DomError, EnhancerError};
use crate::types::settings::SiteProfile;

pub const EMPHASIS_CLASS: &str = "first-half-text";
pub const DYSLEXIA_BODY_CLASS: &str = "dyslexia-mode";

/// A maximal run of whitespace or non-whitespace characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
}

/// Splits text into alternating word and whitespace runs.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(make_token(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(space) = in_space {
        tokens.push(make_token(&text[start..], space));
    }
    tokens
}

fn make_token(run: &str, space: bool) -> Token<'_> {
    if space {
        Token::Space(run)
    } else {
        Token::Word(run)
    }
}

/// Splits a word at `ceil(chars / 2)`; a one-character word is all first half.
pub fn split_word(word: &str) -> (&str, &str) {
    let count = word.chars().count();
    let half = (count + 1) / 2;
    let at = word
        .char_indices()
        .nth(half)
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    word.split_at(at)
}

/// Trait defining the dyslexia transform.
pub trait DyslexiaModeTrait {
    /// Strips any previous emphasis, then transforms every eligible text
    /// node once. Returns the number of text nodes transformed.
    fn apply(&self, doc: &mut Document) -> Result<usize, EnhancerError>;
    /// Unwraps every emphasis span in the document. Returns how many were removed.
    fn strip(&self, doc: &mut Document) -> Result<usize, DomError>;
    fn emphasis_count(&self, doc: &Document) -> usize;
}

/// Transform configured from the site profile.
pub struct DyslexiaMode {
    content_region_ids: Vec<String>,
    filter: TextFilter,
}

impl DyslexiaMode {
    pub fn new(profile: &SiteProfile) -> Result<Self, EnhancerError> {
        let filter = TextFilter::new(&profile.excluded_tags, &profile.excluded_ancestor_selectors)?;
        Ok(Self {
            content_region_ids: profile.content_region_ids.clone(),
            filter,
        })
    }

    /// Content regions present on the page, or `<body>` when none are.
    pub fn content_regions(&self, doc: &Document) -> Result<Vec<NodeId>, DomError> {
        let regions: Vec<NodeId> = self
            .content_region_ids
            .iter()
            .filter_map(|id| doc.get_element_by_id(id))
            .collect();
        if regions.is_empty() {
            if !self.content_region_ids.is_empty() {
                warn!("content regions {:?} not found, falling back to body", self.content_region_ids);
            }
            return Ok(vec![doc.body()?]);
        }
        Ok(regions)
    }

    fn emphasis_spans(&self, doc: &Document) -> Vec<NodeId> {
        doc.descendants(doc.root())
            .filter(|n| doc.tag_name(*n) == Some("span") && doc.has_class(*n, EMPHASIS_CLASS))
            .collect()
    }

    /// Replaces one text node with its emphasized form and returns the text
    /// nodes created, so an overlapping region cannot transform them again.
    fn transform_node(&self, doc: &mut Document, node: NodeId) -> Result<Vec<NodeId>, DomError> {
        let text = match doc.text(node) {
            Some(t) => t.to_string(),
            None => return Ok(Vec::new()),
        };
        let mut replacement = Vec::new();
        let mut created = Vec::new();
        for token in tokenize(&text) {
            match token {
                Token::Space(space) => {
                    let node = doc.create_text(space);
                    replacement.push(node);
                    created.push(node);
                }
                Token::Word(word) => {
                    let (first, second) = split_word(word);
                    let span = doc.create_element("span");
                    doc.set_attr(span, "class", EMPHASIS_CLASS)?;
                    let inner = doc.create_text(first);
                    doc.append_child(span, inner)?;
                    replacement.push(span);
                    created.push(inner);
                    if !second.is_empty() {
                        let rest = doc.create_text(second);
                        replacement.push(rest);
                        created.push(rest);
                    }
                }
            }
        }
        doc.replace_with(node, &replacement)?;
        Ok(created)
    }
}

impl DyslexiaModeTrait for DyslexiaMode {
    fn apply(&self, doc: &mut Document) -> Result<usize, EnhancerError> {
        self.strip(doc)?;

        let mut processed: HashSet<NodeId> = HashSet::new();
        let mut transformed = 0;
        for region in self.content_regions(doc)? {
            let nodes: Vec<NodeId> = eligible_text_nodes(doc, region, &self.filter)
                .filter(|n| !processed.contains(n))
                .collect();
            for node in nodes {
                if !processed.insert(node) {
                    continue;
                }
                processed.extend(self.transform_node(doc, node)?);
                transformed += 1;
            }
        }
        debug!("emphasized {} text nodes", transformed);
        Ok(transformed)
    }

    fn strip(&self, doc: &mut Document) -> Result<usize, DomError> {
        let spans = self.emphasis_spans(doc);
        let mut parents: Vec<NodeId> = Vec::new();
        for span in &spans {
            let parent = match doc.parent(*span) {
                Some(p) => p,
                None => continue,
            };
            let text = doc.text_content(*span);
            let node = doc.create_text(&text);
            doc.replace_with(*span, &[node])?;
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
        for parent in parents {
            doc.normalize(parent)?;
        }

        let leftover = self.emphasis_spans(doc);
        if !leftover.is_empty() {
            warn!("found {} remaining emphasis spans after cleanup", leftover.len());
            for span in leftover {
                if doc.contains(span) {
                    doc.remove(span)?;
                }
            }
        }
        Ok(spans.len())
    }

    fn emphasis_count(&self, doc: &Document) -> usize {
        self.emphasis_spans(doc).len()
    }
}
