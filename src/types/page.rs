use serde::{Deserialize, Serialize};

/// Text scale applied to the page, kept as whole percent so repeated
/// stepping never accumulates float error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontScale {
    percent: u32,
}

impl FontScale {
    pub const MIN_PERCENT: u32 = 50;
    pub const MAX_PERCENT: u32 = 200;
    pub const STEP_PERCENT: u32 = 5;
    pub const DEFAULT_PERCENT: u32 = 100;

    pub fn new() -> Self {
        Self { percent: Self::DEFAULT_PERCENT }
    }

    /// Builds a scale from a percentage, clamped to the allowed range.
    pub fn from_percent(percent: u32) -> Self {
        Self {
            percent: percent.clamp(Self::MIN_PERCENT, Self::MAX_PERCENT),
        }
    }

    pub fn increase(&mut self) {
        self.percent = (self.percent + Self::STEP_PERCENT).min(Self::MAX_PERCENT);
    }

    pub fn decrease(&mut self) {
        self.percent = self
            .percent
            .saturating_sub(Self::STEP_PERCENT)
            .max(Self::MIN_PERCENT);
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// The scale as a ratio, 1.0 meaning unscaled.
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    pub fn is_default(&self) -> bool {
        self.percent == Self::DEFAULT_PERCENT
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Color-blindness simulation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFilter {
    None,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl ColorFilter {
    /// Every mode that leaves a class on the page.
    pub const SIMULATIONS: [ColorFilter; 3] = [
        ColorFilter::Protanopia,
        ColorFilter::Deuteranopia,
        ColorFilter::Tritanopia,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Some(ColorFilter::None),
            "protanopia" => Some(ColorFilter::Protanopia),
            "deuteranopia" => Some(ColorFilter::Deuteranopia),
            "tritanopia" => Some(ColorFilter::Tritanopia),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorFilter::None => "none",
            ColorFilter::Protanopia => "protanopia",
            ColorFilter::Deuteranopia => "deuteranopia",
            ColorFilter::Tritanopia => "tritanopia",
        }
    }

    /// Body class carrying the filter, `None` for the unfiltered mode.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            ColorFilter::None => None,
            ColorFilter::Protanopia => Some("cb-protanopia"),
            ColorFilter::Deuteranopia => Some("cb-deuteranopia"),
            ColorFilter::Tritanopia => Some("cb-tritanopia"),
        }
    }
}

impl Default for ColorFilter {
    fn default() -> Self {
        ColorFilter::None
    }
}

/// User-chosen text and background colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomColors {
    pub text_color: String,
    pub background_color: String,
}

/// Discrete toggle state owned by the dispatcher for one page lifetime.
///
/// Line focus is not stored here: its state lives with the tracker's
/// subscription so the highlight reference cannot outlive it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub font_scale: FontScale,
    pub contrast: bool,
    pub dyslexia: bool,
    pub color_filter: ColorFilter,
    pub custom_colors: Option<CustomColors>,
    pub chrome_hidden: bool,
}
