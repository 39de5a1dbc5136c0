use serde::{Deserialize, Serialize};

/// Prose extracted from the page's content regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadableContent {
    pub title: String,
    /// Whitespace-collapsed text, blocks separated by single spaces.
    pub text: String,
    pub word_count: usize,
    pub estimated_read_time_minutes: u32,
}
