//! Color-blindness simulation applier.
//!
//! At most one simulation class sits on `<body>`; the recoloring itself is
//! an SVG `feColorMatrix` referenced from the base stylesheet.

use crate::dom::Document;
use crate::types::errors::DomError;
use crate::types::page::ColorFilter;

/// Row-major 4x5 `feColorMatrix` values for a simulation.
///
/// Protanopia and deuteranopia follow Viénot et al.; tritanopia follows
/// Machado et al. at full severity.
pub fn filter_matrix(filter: ColorFilter) -> Option<[f32; 20]> {
    match filter {
        ColorFilter::None => None,
        ColorFilter::Protanopia => Some([
            0.567, 0.433, 0.0, 0.0, 0.0,
            0.558, 0.442, 0.0, 0.0, 0.0,
            0.0, 0.242, 0.758, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]),
        ColorFilter::Deuteranopia => Some([
            0.625, 0.375, 0.0, 0.0, 0.0,
            0.7, 0.3, 0.0, 0.0, 0.0,
            0.0, 0.3, 0.7, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]),
        ColorFilter::Tritanopia => Some([
            1.256, -0.077, -0.179, 0.0, 0.0,
            -0.078, 0.931, 0.148, 0.0, 0.0,
            0.005, 0.691, 0.304, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]),
    }
}

/// Trait defining the color filter applier.
pub trait ColorFilterEngineTrait {
    fn apply(&self, doc: &mut Document, filter: ColorFilter) -> Result<(), DomError>;
    fn reset(&self, doc: &mut Document) -> Result<(), DomError>;
    /// Reads the active filter back from the document.
    fn active(&self, doc: &Document) -> ColorFilter;
}

pub struct ColorFilterEngine;

impl ColorFilterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColorFilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorFilterEngineTrait for ColorFilterEngine {
    fn apply(&self, doc: &mut Document, filter: ColorFilter) -> Result<(), DomError> {
        self.reset(doc)?;
        if let Some(class) = filter.class_name() {
            let body = doc.body()?;
            doc.add_class(body, class)?;
        }
        Ok(())
    }

    fn reset(&self, doc: &mut Document) -> Result<(), DomError> {
        let body = doc.body()?;
        for sim in ColorFilter::SIMULATIONS {
            if let Some(class) = sim.class_name() {
                doc.remove_class(body, class)?;
            }
        }
        Ok(())
    }

    fn active(&self, doc: &Document) -> ColorFilter {
        let body = match doc.body() {
            Ok(body) => body,
            Err(_) => return ColorFilter::None,
        };
        ColorFilter::SIMULATIONS
            .into_iter()
            .find(|f| f.class_name().map(|c| doc.has_class(body, c)).unwrap_or(false))
            .unwrap_or(ColorFilter::None)
    }
}
