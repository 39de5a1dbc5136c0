//! Minimal CSS selector matcher.
//!
//! Supports selector lists (`a, b`), descendant combinators, and compound
//! selectors built from type, `*`, `#id`, `.class`, `[attr]` and
//! `[attr="value"]`. That covers the site-profile selectors; anything else
//! is rejected at parse time rather than silently mismatched.

use crate::types::errors::SelectorError;

use super::document::{Document, NodeId};

#[derive(Debug, Clone, PartialEq)]
struct AttrSelector {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

impl CompoundSelector {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let el = match doc.element(node) {
            Some(el) => el,
            None => return false,
        };
        if let Some(tag) = &self.tag {
            if el.tag_name != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, el.attr(&a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// Compounds joined by descendant combinators; the last one is the subject.
#[derive(Debug, Clone, PartialEq)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
}

impl ComplexSelector {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let (subject, rest) = match self.compounds.split_last() {
            Some(parts) => parts,
            None => return false,
        };
        if !subject.matches(doc, node) {
            return false;
        }
        let mut ancestors = doc.ancestors(node);
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(doc, a)))
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let selectors = split_top_level(source, |c| c == ',')
            .into_iter()
            .map(|part| parse_complex(part.trim(), input))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, node))
    }
}

/// Splits on `sep` outside of `[...]` and quotes.
fn split_top_level(source: &str, sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && sep(c) => {
                parts.push(&source[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

fn parse_complex(source: &str, whole: &str) -> Result<ComplexSelector, SelectorError> {
    if source.is_empty() {
        return Err(SelectorError::Empty);
    }
    let compounds = split_top_level(source, char::is_whitespace)
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| parse_compound(p, whole))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ComplexSelector { compounds })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(source: &str, whole: &str) -> Result<CompoundSelector, SelectorError> {
    let unsupported = || SelectorError::Unsupported(whole.to_string());
    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;
    let mut compound = CompoundSelector::default();

    if pos < chars.len() && chars[pos] == '*' {
        pos += 1;
    } else if pos < chars.len() && is_ident_char(chars[pos]) {
        compound.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                let id = take_ident(&chars, &mut pos);
                if id.is_empty() {
                    return Err(unsupported());
                }
                compound.id = Some(id);
            }
            '.' => {
                pos += 1;
                let class = take_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(unsupported());
                }
                compound.classes.push(class);
            }
            '[' => {
                pos += 1;
                let name = take_ident(&chars, &mut pos).to_ascii_lowercase();
                if name.is_empty() {
                    return Err(unsupported());
                }
                let value = match chars.get(pos) {
                    Some(']') => None,
                    Some('=') => {
                        pos += 1;
                        Some(take_attr_value(&chars, &mut pos).ok_or_else(unsupported)?)
                    }
                    _ => return Err(unsupported()),
                };
                if chars.get(pos) != Some(&']') {
                    return Err(unsupported());
                }
                pos += 1;
                compound.attrs.push(AttrSelector { name, value });
            }
            _ => return Err(unsupported()),
        }
    }
    Ok(compound)
}

fn take_attr_value(chars: &[char], pos: &mut usize) -> Option<String> {
    match chars.get(*pos) {
        Some(&q) if q == '"' || q == '\'' => {
            let start = *pos + 1;
            let end = start + chars[start..].iter().position(|c| *c == q)?;
            *pos = end + 1;
            Some(chars[start..end].iter().collect())
        }
        Some(_) => {
            let value = take_ident(chars, pos);
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
        None => None,
    }
}
