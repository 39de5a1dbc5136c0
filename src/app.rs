//! App core for ReadAssist.
//!
//! One `App` per loaded page: it owns the document, the session state and
//! every effect applier, and is the only place commands mutate either.

use log::{debug, info};

use crate::dom::{parse_document, Document, NodeId};
use crate::services::color_filter_engine::{ColorFilterEngine, ColorFilterEngineTrait};
use crate::services::contrast_mode::ContrastMode;
use crate::services::custom_color_engine::{CustomColorEngine, CustomColorEngineTrait};
use crate::services::dyslexia_mode::{DyslexiaMode, DyslexiaModeTrait, DYSLEXIA_BODY_CLASS};
use crate::services::font_engine::{FontEngine, FontEngineTrait};
use crate::services::line_focus::{LineFocus, LineFocusTrait};
use crate::services::preference_bridge::PreferenceBridge;
use crate::services::preference_store::PreferenceStore;
use crate::services::reader_mode::{ReaderMode, ReaderModeTrait};
use crate::services::site_chrome::SiteChrome;
use crate::services::speech_engine::{SpeechEngine, SpeechSynthesizer};
use crate::services::stylesheet;
use crate::types::command::{Command, CommandOutcome, PageEventKind};
use crate::types::errors::EnhancerError;
use crate::types::page::{ColorFilter, FontScale, SessionState};
use crate::types::settings::EnhancerSettings;

/// Per-page session: document, toggle state and the appliers acting on them.
pub struct App {
    document: Document,
    state: SessionState,
    settings: EnhancerSettings,
    store: Box<dyn PreferenceStore>,
    pub bridge: PreferenceBridge,
    pub font_engine: FontEngine,
    pub contrast_mode: ContrastMode,
    pub dyslexia_mode: DyslexiaMode,
    pub color_filter_engine: ColorFilterEngine,
    pub custom_color_engine: CustomColorEngine,
    pub line_focus: LineFocus,
    pub site_chrome: SiteChrome,
    pub reader_mode: ReaderMode,
    pub speech: SpeechEngine,
}

impl App {
    /// Builds the session for a freshly loaded page and runs the load-time
    /// startup sequence before returning.
    pub fn new(
        document: Document,
        settings: EnhancerSettings,
        store: Box<dyn PreferenceStore>,
        synthesizer: Box<dyn SpeechSynthesizer>,
    ) -> Result<Self, EnhancerError> {
        let mut app = Self {
            dyslexia_mode: DyslexiaMode::new(&settings.site)?,
            site_chrome: SiteChrome::new(&settings.site.chrome_region_selectors)?,
            reader_mode: ReaderMode::new(&settings.site)?,
            bridge: PreferenceBridge::new(settings.storage.clone()),
            speech: SpeechEngine::new(synthesizer, settings.speech.clone()),
            font_engine: FontEngine::new(),
            contrast_mode: ContrastMode::new(),
            color_filter_engine: ColorFilterEngine::new(),
            custom_color_engine: CustomColorEngine::new(),
            line_focus: LineFocus::new(),
            document,
            state: SessionState::default(),
            settings,
            store,
        };
        app.startup()?;
        Ok(app)
    }

    pub fn from_html(
        html: &str,
        settings: EnhancerSettings,
        store: Box<dyn PreferenceStore>,
        synthesizer: Box<dyn SpeechSynthesizer>,
    ) -> Result<Self, EnhancerError> {
        Self::new(parse_document(html)?, settings, store, synthesizer)
    }

    /// Startup sequence: install the base stylesheet, migrate the legacy
    /// preference key, then reconcile chrome visibility with the stored flag.
    fn startup(&mut self) -> Result<(), EnhancerError> {
        stylesheet::inject(&mut self.document)?;
        self.bridge.migrate_legacy(self.store.as_mut())?;
        let hidden = self.bridge.is_chrome_hidden(self.store.as_ref())?;
        if hidden {
            self.site_chrome.apply(&mut self.document, true)?;
        }
        self.state.chrome_hidden = hidden;
        info!("page session ready for site profile '{}' (chrome hidden: {})", self.settings.site.name, hidden);
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &EnhancerSettings {
        &self.settings
    }

    /// Raw persisted value for `key`.
    pub fn preference(&self, key: &str) -> Result<Option<String>, EnhancerError> {
        Ok(self.store.get(key)?)
    }

    /// Runs one command to completion.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, EnhancerError> {
        debug!("command {}", command.action());
        match command {
            Command::IncreaseTextSize => self.step_font(FontScale::increase),
            Command::DecreaseTextSize => self.step_font(FontScale::decrease),
            Command::ToggleContrast => {
                let enabled = !self.state.contrast;
                self.contrast_mode.apply(&mut self.document, enabled)?;
                self.state.contrast = enabled;
                Ok(CommandOutcome { contrast: Some(enabled), ..CommandOutcome::empty() })
            }
            Command::ToggleDyslexia => self.toggle_dyslexia(),
            Command::SetColorFilter(filter) => {
                self.color_filter_engine.apply(&mut self.document, filter)?;
                self.state.color_filter = filter;
                Ok(CommandOutcome::empty())
            }
            Command::ResetColorFilter => {
                self.color_filter_engine.reset(&mut self.document)?;
                self.state.color_filter = ColorFilter::None;
                Ok(CommandOutcome::empty())
            }
            Command::SetCustomColors(colors) => {
                self.custom_color_engine.apply(&mut self.document, &colors)?;
                self.state.custom_colors = Some(colors);
                Ok(CommandOutcome::empty())
            }
            Command::ResetCustomColors => {
                self.custom_color_engine.reset(&mut self.document)?;
                self.state.custom_colors = None;
                Ok(CommandOutcome::empty())
            }
            Command::EnableLineFocus => {
                self.line_focus.enable(&mut self.document)?;
                Ok(CommandOutcome::empty())
            }
            Command::DisableLineFocus => {
                self.line_focus.disable(&mut self.document)?;
                Ok(CommandOutcome::empty())
            }
            Command::ToggleWikiControls => self.toggle_chrome(),
            Command::ResetAll => self.reset_all(),
            Command::GetState => Ok(self.snapshot()),
            Command::ReadText => {
                let content = self.reader_mode.extract(&self.document)?;
                let characters = self.speech.read(&content.text)?;
                Ok(CommandOutcome { characters: Some(characters), ..CommandOutcome::empty() })
            }
            Command::PauseSpeech => {
                self.speech.pause()?;
                Ok(CommandOutcome::empty())
            }
            Command::ResumeSpeech => {
                self.speech.resume()?;
                Ok(CommandOutcome::empty())
            }
            Command::StopSpeech => {
                self.speech.stop()?;
                Ok(CommandOutcome::empty())
            }
            Command::Ping => Ok(CommandOutcome { pong: Some(true), ..CommandOutcome::empty() }),
        }
    }

    /// Feeds a pointer or focus event to the standing line-focus subscription.
    pub fn handle_event(
        &mut self,
        kind: PageEventKind,
        target: NodeId,
    ) -> Result<Option<NodeId>, EnhancerError> {
        Ok(self.line_focus.handle_event(&mut self.document, kind, target)?)
    }

    fn step_font(&mut self, step: fn(&mut FontScale)) -> Result<CommandOutcome, EnhancerError> {
        let mut scale = self.state.font_scale;
        step(&mut scale);
        self.font_engine.apply(&mut self.document, scale)?;
        self.state.font_scale = scale;
        Ok(CommandOutcome::with_size(scale.ratio()))
    }

    /// Always strips first, then reapplies only when turning on.
    fn toggle_dyslexia(&mut self) -> Result<CommandOutcome, EnhancerError> {
        let enabled = !self.state.dyslexia;
        self.dyslexia_mode.strip(&mut self.document)?;
        let body = self.document.body()?;
        if enabled {
            self.document.add_class(body, DYSLEXIA_BODY_CLASS)?;
            self.dyslexia_mode.apply(&mut self.document)?;
        } else {
            self.document.remove_class(body, DYSLEXIA_BODY_CLASS)?;
        }
        self.state.dyslexia = enabled;
        Ok(CommandOutcome { dyslexia: Some(enabled), ..CommandOutcome::empty() })
    }

    fn toggle_chrome(&mut self) -> Result<CommandOutcome, EnhancerError> {
        let hidden = !self.bridge.is_chrome_hidden(self.store.as_ref())?;
        self.bridge.set_chrome_hidden(self.store.as_mut(), hidden)?;
        self.site_chrome.apply(&mut self.document, hidden)?;
        self.state.chrome_hidden = hidden;
        Ok(CommandOutcome { is_hidden: Some(hidden), ..CommandOutcome::empty() })
    }

    /// Returns every flag to its default and removes every DOM side effect.
    /// Speech playback is left alone. Each flag is cleared as soon as its own
    /// effect is gone.
    pub fn reset_all(&mut self) -> Result<CommandOutcome, EnhancerError> {
        let doc = &mut self.document;
        self.font_engine.reset(doc)?;
        self.state.font_scale = FontScale::default();

        self.contrast_mode.reset(doc)?;
        self.state.contrast = false;

        self.dyslexia_mode.strip(doc)?;
        let body = doc.body()?;
        doc.remove_class(body, DYSLEXIA_BODY_CLASS)?;
        self.state.dyslexia = false;

        self.color_filter_engine.reset(doc)?;
        self.state.color_filter = ColorFilter::default();

        self.custom_color_engine.reset(doc)?;
        self.state.custom_colors = None;

        self.line_focus.disable(doc)?;

        self.bridge.clear(self.store.as_mut())?;
        self.site_chrome.apply(doc, false)?;
        self.state.chrome_hidden = false;

        info!("all enhancements reset");
        Ok(CommandOutcome::with_size(self.state.font_scale.ratio()))
    }

    pub fn snapshot(&self) -> CommandOutcome {
        CommandOutcome {
            size: Some(self.state.font_scale.ratio()),
            wiki_controls_hidden: Some(self.state.chrome_hidden),
            contrast: Some(self.state.contrast),
            dyslexia: Some(self.state.dyslexia),
            color_filter: Some(self.state.color_filter),
            custom_colors: self.state.custom_colors.clone(),
            line_focus: Some(self.line_focus.is_enabled()),
            speech: Some(self.speech.status()),
            ..CommandOutcome::empty()
        }
    }
}
