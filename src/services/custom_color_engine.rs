//! Custom text/background color applier.

use crate::dom::Document;
use crate::types::errors::{DomError, EnhancerError};
use crate::types::page::CustomColors;

use super::style_injector::{inject_style, remove_by_id};

pub const CUSTOM_COLORS_STYLE_ID: &str = "accessibility-custom-colors";

/// Validates a hex color string (e.g. "#2ea44f" or "#fff").
fn is_valid_hex_color(color: &str) -> bool {
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    matches!(hex.len(), 3 | 6)
        && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Accepts hex colors and bare CSS color keywords; nothing that could
/// break out of the declaration.
pub fn is_valid_color(color: &str) -> bool {
    is_valid_hex_color(color)
        || (!color.is_empty() && color.len() <= 32 && color.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Trait defining the custom color applier.
pub trait CustomColorEngineTrait {
    fn apply(&self, doc: &mut Document, colors: &CustomColors) -> Result<(), EnhancerError>;
    fn reset(&self, doc: &mut Document) -> Result<(), DomError>;
    fn stylesheet(&self, colors: &CustomColors) -> String;
}

pub struct CustomColorEngine;

impl CustomColorEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomColorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomColorEngineTrait for CustomColorEngine {
    fn apply(&self, doc: &mut Document, colors: &CustomColors) -> Result<(), EnhancerError> {
        for color in [&colors.text_color, &colors.background_color] {
            if !is_valid_color(color) {
                return Err(EnhancerError::InvalidInput(format!("invalid color: {}", color)));
            }
        }
        inject_style(doc, CUSTOM_COLORS_STYLE_ID, &self.stylesheet(colors))?;
        Ok(())
    }

    fn reset(&self, doc: &mut Document) -> Result<(), DomError> {
        remove_by_id(doc, CUSTOM_COLORS_STYLE_ID)?;
        Ok(())
    }

    fn stylesheet(&self, colors: &CustomColors) -> String {
        format!(
            "html, body, body * {{ color: {} !important; background-color: {} !important; }}\n",
            colors.text_color, colors.background_color
        )
    }
}
