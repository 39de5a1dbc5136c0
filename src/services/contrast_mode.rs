//! High-contrast applier: one body class, styled by the base stylesheet.

use crate::dom::Document;
use crate::types::errors::DomError;

pub const CONTRAST_CLASS: &str = "high-contrast";

pub struct ContrastMode;

impl ContrastMode {
    pub fn new() -> Self {
        Self
    }

    /// Sets the class to match `enabled`.
    pub fn apply(&self, doc: &mut Document, enabled: bool) -> Result<(), DomError> {
        let body = doc.body()?;
        if enabled {
            doc.add_class(body, CONTRAST_CLASS)
        } else {
            doc.remove_class(body, CONTRAST_CLASS).map(|_| ())
        }
    }

    pub fn reset(&self, doc: &mut Document) -> Result<(), DomError> {
        self.apply(doc, false)
    }

    pub fn is_active(&self, doc: &Document) -> bool {
        doc.body()
            .map(|body| doc.has_class(body, CONTRAST_CLASS))
            .unwrap_or(false)
    }
}

impl Default for ContrastMode {
    fn default() -> Self {
        Self::new()
    }
}
