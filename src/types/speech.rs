use serde::{Deserialize, Serialize};

/// A single request to the speech synthesis capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Playback state as last driven by this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechStatus {
    Idle,
    Speaking,
    Paused,
}

impl Default for SpeechStatus {
    fn default() -> Self {
        SpeechStatus::Idle
    }
}
