//! Static base stylesheet backing the class-driven effects.
//!
//! Injected once when the page loads. The appliers only toggle classes and
//! inline styles; every visual rule for those classes lives here.

use crate::dom::{Document, NodeId};
use crate::types::errors::DomError;
use crate::types::page::ColorFilter;

use super::color_filter_engine::filter_matrix;
use super::contrast_mode::CONTRAST_CLASS;
use super::dyslexia_mode::{DYSLEXIA_BODY_CLASS, EMPHASIS_CLASS};
use super::line_focus::HIGHLIGHT_CLASS;
use super::style_injector::{css_number, inject_style};

pub const BASE_STYLE_ID: &str = "accessibility-base-styles";

/// `filter:` value recoloring through an inline SVG color matrix.
pub fn filter_url(filter: ColorFilter) -> Option<String> {
    let matrix = filter_matrix(filter)?;
    let values: Vec<String> = matrix.iter().map(|v| css_number(f64::from(*v))).collect();
    Some(format!(
        "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg'><filter id='{}'><feColorMatrix type='matrix' values='{}'/></filter></svg>#{}\")",
        filter.name(),
        values.join(" "),
        filter.name()
    ))
}

pub fn base_css() -> String {
    let mut css = String::new();
    css.push_str(&format!(
        "body.{c}, body.{c} * {{ background-color: #000 !important; color: #fff !important; }}\n\
         body.{c} a, body.{c} a * {{ color: #ff0 !important; }}\n",
        c = CONTRAST_CLASS
    ));
    css.push_str(&format!(
        "body.{} {{ letter-spacing: 0.05em; word-spacing: 0.1em; line-height: 1.6; }}\n",
        DYSLEXIA_BODY_CLASS
    ));
    css.push_str(&format!(".{} {{ font-weight: bold; }}\n", EMPHASIS_CLASS));
    for sim in ColorFilter::SIMULATIONS {
        if let (Some(class), Some(url)) = (sim.class_name(), filter_url(sim)) {
            css.push_str(&format!("body.{} {{ filter: {}; }}\n", class, url));
        }
    }
    css.push_str(&format!(
        ".{} {{ background-color: rgba(255, 255, 0, 0.25) !important; outline: 2px solid #fc0; }}\n",
        HIGHLIGHT_CLASS
    ));
    css
}

/// Installs the base stylesheet, replacing an earlier copy.
pub fn inject(doc: &mut Document) -> Result<NodeId, DomError> {
    inject_style(doc, BASE_STYLE_ID, &base_css())
}
