//! Text-to-speech control.
//!
//! The synthesizer itself is an opaque capability; this engine only maps
//! commands onto its speak/pause/resume/cancel primitives and remembers the
//! playback state it last drove. Nothing is buffered or queued here.

use log::{debug, info};

use crate::types::errors::SpeechError;
use crate::types::settings::SpeechSettings;
use crate::types::speech::{SpeechStatus, Utterance};

/// The platform speech capability.
pub trait SpeechSynthesizer: Send {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
    fn pause(&mut self) -> Result<(), SpeechError>;
    fn resume(&mut self) -> Result<(), SpeechError>;
    fn cancel(&mut self) -> Result<(), SpeechError>;
}

/// Synthesizer for hosts without an audio backend: logs each primitive.
#[derive(Debug, Default)]
pub struct LoggingSynthesizer;

impl SpeechSynthesizer for LoggingSynthesizer {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        info!(
            "speak {} chars lang={} rate={} pitch={}",
            utterance.text.chars().count(),
            utterance.lang,
            utterance.rate,
            utterance.pitch
        );
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SpeechError> {
        info!("speech paused");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        info!("speech resumed");
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        info!("speech cancelled");
        Ok(())
    }
}

pub struct SpeechEngine {
    synthesizer: Box<dyn SpeechSynthesizer>,
    settings: SpeechSettings,
    status: SpeechStatus,
    last_utterance: Option<Utterance>,
}

impl SpeechEngine {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>, settings: SpeechSettings) -> Self {
        Self {
            synthesizer,
            settings,
            status: SpeechStatus::Idle,
            last_utterance: None,
        }
    }

    pub fn status(&self) -> SpeechStatus {
        self.status
    }

    pub fn last_utterance(&self) -> Option<&Utterance> {
        self.last_utterance.as_ref()
    }

    /// Cancels whatever is playing, then speaks `text` with the configured
    /// voice. Returns the number of characters handed to the synthesizer.
    pub fn read(&mut self, text: &str) -> Result<usize, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::NothingToRead);
        }
        if self.status != SpeechStatus::Idle {
            self.synthesizer.cancel()?;
            self.status = SpeechStatus::Idle;
        }
        let utterance = Utterance {
            text: text.to_string(),
            lang: self.settings.lang.clone(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
        };
        self.synthesizer.speak(&utterance)?;
        let characters = utterance.text.chars().count();
        self.last_utterance = Some(utterance);
        self.status = SpeechStatus::Speaking;
        debug!("speaking {} characters", characters);
        Ok(characters)
    }

    pub fn pause(&mut self) -> Result<(), SpeechError> {
        self.synthesizer.pause()?;
        if self.status == SpeechStatus::Speaking {
            self.status = SpeechStatus::Paused;
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SpeechError> {
        self.synthesizer.resume()?;
        if self.status == SpeechStatus::Paused {
            self.status = SpeechStatus::Speaking;
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), SpeechError> {
        self.synthesizer.cancel()?;
        self.status = SpeechStatus::Idle;
        Ok(())
    }
}
