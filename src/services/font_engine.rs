//! Font scaling applier.
//!
//! Emits a single style block scaling body text by percentage and the
//! heading hierarchy by em multipliers, so heading proportions survive
//! scaling.

use crate::dom::Document;
use crate::types::errors::DomError;
use crate::types::page::FontScale;

use super::style_injector::{css_number, inject_style, remove_by_id};

pub const FONT_STYLE_ID: &str = "accessibility-text-size";

/// Heading multipliers relative to the base scale, h1 first.
pub const HEADING_MULTIPLIERS: [f64; 6] = [2.5, 2.0, 1.75, 1.5, 1.25, 1.1];

/// Trait defining the font scaling applier.
pub trait FontEngineTrait {
    fn apply(&self, doc: &mut Document, scale: FontScale) -> Result<(), DomError>;
    fn reset(&self, doc: &mut Document) -> Result<(), DomError>;
    fn stylesheet(&self, scale: FontScale) -> String;
}

pub struct FontEngine;

impl FontEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FontEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FontEngineTrait for FontEngine {
    fn apply(&self, doc: &mut Document, scale: FontScale) -> Result<(), DomError> {
        inject_style(doc, FONT_STYLE_ID, &self.stylesheet(scale))?;
        Ok(())
    }

    fn reset(&self, doc: &mut Document) -> Result<(), DomError> {
        remove_by_id(doc, FONT_STYLE_ID)?;
        Ok(())
    }

    fn stylesheet(&self, scale: FontScale) -> String {
        let mut css = format!(
            "body, body *:not(script):not(style):not(svg):not(code) {{ font-size: {}% !important; }}\n",
            scale.percent()
        );
        for (level, multiplier) in HEADING_MULTIPLIERS.iter().enumerate() {
            css.push_str(&format!(
                "h{} {{ font-size: {}em !important; }}\n",
                level + 1,
                css_number(scale.ratio() * multiplier)
            ));
        }
        css
    }
}
