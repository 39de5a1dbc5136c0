use serde::{Deserialize, Serialize};

/// Top-level enhancer settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancerSettings {
    pub site: SiteProfile,
    pub storage: StorageKeys,
    pub speech: SpeechSettings,
}

impl Default for EnhancerSettings {
    fn default() -> Self {
        Self {
            site: SiteProfile::default(),
            storage: StorageKeys::default(),
            speech: SpeechSettings::default(),
        }
    }
}

/// Site-specific layout knowledge. Pure data; no logic depends on the
/// particular values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteProfile {
    pub name: String,
    /// Ids of the regions holding prose. The whole body is used when none exist.
    pub content_region_ids: Vec<String>,
    /// Tags whose direct text is never transformed.
    pub excluded_tags: Vec<String>,
    /// Text under an element matching one of these is never transformed.
    pub excluded_ancestor_selectors: Vec<String>,
    /// Regions hidden as a group by the focus-mode toggle.
    pub chrome_region_selectors: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::wikipedia()
    }
}

impl SiteProfile {
    /// Wikipedia article pages rendered with the Vector skin.
    pub fn wikipedia() -> Self {
        Self {
            name: "wikipedia".to_string(),
            content_region_ids: vec!["firstHeading".to_string(), "mw-content-text".to_string()],
            excluded_tags: ["script", "style", "noscript", "code", "pre"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            excluded_ancestor_selectors: vec![".mw-editsection".to_string()],
            chrome_region_selectors: vec![
                ".vector-pinnable-header[data-feature-name=\"appearance-pinned\"]".to_string(),
                "#vector-appearance-pinned-container, #vector-appearance-unpinned-container".to_string(),
                ".vector-pinnable-header.vector-toc-pinnable-header[data-feature-name=\"toc-pinned\"][data-pinnable-element-id=\"vector-toc\"]".to_string(),
                "#mw-panel-toc-list".to_string(),
                ".vector-header-container".to_string(),
            ],
        }
    }

    /// A profile with no site knowledge: whole-body content, no chrome regions.
    pub fn generic() -> Self {
        Self {
            name: "generic".to_string(),
            content_region_ids: Vec::new(),
            excluded_tags: ["script", "style", "noscript", "code", "pre"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            excluded_ancestor_selectors: Vec::new(),
            chrome_region_selectors: Vec::new(),
        }
    }
}

/// Keys used in the page's key-value preference storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageKeys {
    pub chrome_hidden: String,
    #[serde(default)]
    pub legacy_chrome_hidden: Option<String>,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            chrome_hidden: "tamWikiHideControls".to_string(),
            legacy_chrome_hidden: Some("tamWikiHideAppearance".to_string()),
        }
    }
}

/// Voice parameters handed to the speech capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeechSettings {
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}
