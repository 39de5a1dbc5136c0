//! Site chrome visibility: hides a configured group of layout regions.

use log::debug;

use crate::dom::{Document, SelectorList};
use crate::types::errors::{DomError, SelectorError};

pub struct SiteChrome {
    regions: Vec<SelectorList>,
}

impl SiteChrome {
    pub fn new(selectors: &[String]) -> Result<Self, SelectorError> {
        let regions = selectors
            .iter()
            .map(|s| SelectorList::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { regions })
    }

    /// Shows or hides every configured region present on the page.
    /// Absent regions are skipped. Returns the number of elements touched.
    pub fn apply(&self, doc: &mut Document, hidden: bool) -> Result<usize, DomError> {
        let display = if hidden { "none" } else { "" };
        let mut touched = 0;
        for region in &self.regions {
            for node in doc.select_all(region) {
                doc.set_style_property(node, "display", display)?;
                touched += 1;
            }
        }
        debug!("site chrome hidden={} on {} elements", hidden, touched);
        Ok(touched)
    }

    /// True when at least one configured region is present and all present
    /// regions are hidden.
    pub fn is_hidden(&self, doc: &Document) -> bool {
        let nodes: Vec<_> = self.regions.iter().flat_map(|r| doc.select_all(r)).collect();
        !nodes.is_empty()
            && nodes
                .iter()
                .all(|n| doc.style_property(*n, "display").as_deref() == Some("none"))
    }
}
