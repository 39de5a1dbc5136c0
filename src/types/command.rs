use serde::Serialize;
use serde_json::Value;

use super::errors::CommandError;
use super::page::{ColorFilter, CustomColors};
use super::speech::SpeechStatus;

/// A decoded popup command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    IncreaseTextSize,
    DecreaseTextSize,
    ToggleContrast,
    ToggleDyslexia,
    SetColorFilter(ColorFilter),
    ResetColorFilter,
    SetCustomColors(CustomColors),
    ResetCustomColors,
    EnableLineFocus,
    DisableLineFocus,
    ToggleWikiControls,
    ResetAll,
    GetState,
    ReadText,
    PauseSpeech,
    ResumeSpeech,
    StopSpeech,
    Ping,
}

impl Command {
    /// Decodes an action id and its parameters.
    ///
    /// Both the kebab-case ids and the camelCase ids sent by the shipped
    /// popup are accepted.
    pub fn parse(action: &str, params: &Value) -> Result<Self, CommandError> {
        let cmd = match action {
            "increase-text-size" | "increaseTextSize" => Command::IncreaseTextSize,
            "decrease-text-size" | "decreaseTextSize" => Command::DecreaseTextSize,
            "toggle-contrast" | "toggleContrast" => Command::ToggleContrast,
            "toggle-dyslexia" | "toggleDyslexia" => Command::ToggleDyslexia,
            "set-color-filter" | "setColorFilter" => {
                let name = str_param(params, "filter")?;
                let filter = ColorFilter::from_name(name).ok_or_else(|| {
                    CommandError::InvalidParam(format!("unknown color filter '{}'", name))
                })?;
                Command::SetColorFilter(filter)
            }
            "reset-color-filter" | "resetColorFilter" => Command::ResetColorFilter,
            "set-custom-colors" | "setCustomColors" => {
                let text_color = str_param(params, "textColor")?.to_string();
                let background_color = str_param(params, "backgroundColor")
                    .or_else(|_| str_param(params, "bgColor"))
                    .map_err(|_| CommandError::MissingParam("backgroundColor".to_string()))?
                    .to_string();
                Command::SetCustomColors(CustomColors { text_color, background_color })
            }
            "reset-custom-colors" | "resetCustomColors" => Command::ResetCustomColors,
            "enable-line-focus" | "enableLineFocus" => Command::EnableLineFocus,
            "disable-line-focus" | "disableLineFocus" => Command::DisableLineFocus,
            "toggle-wiki-controls" | "toggleWikiControls" => Command::ToggleWikiControls,
            "reset-all" | "resetAll" => Command::ResetAll,
            "get-state" | "getState" => Command::GetState,
            "read-text" | "readText" | "startTTS" => Command::ReadText,
            "pause-speech" | "pauseSpeech" | "pauseTTS" => Command::PauseSpeech,
            "resume-speech" | "resumeSpeech" | "resumeTTS" => Command::ResumeSpeech,
            "stop-speech" | "stopSpeech" | "stopTTS" => Command::StopSpeech,
            "ping" => Command::Ping,
            other => return Err(CommandError::UnknownAction(other.to_string())),
        };
        Ok(cmd)
    }

    /// Canonical action id.
    pub fn action(&self) -> &'static str {
        match self {
            Command::IncreaseTextSize => "increase-text-size",
            Command::DecreaseTextSize => "decrease-text-size",
            Command::ToggleContrast => "toggle-contrast",
            Command::ToggleDyslexia => "toggle-dyslexia",
            Command::SetColorFilter(_) => "set-color-filter",
            Command::ResetColorFilter => "reset-color-filter",
            Command::SetCustomColors(_) => "set-custom-colors",
            Command::ResetCustomColors => "reset-custom-colors",
            Command::EnableLineFocus => "enable-line-focus",
            Command::DisableLineFocus => "disable-line-focus",
            Command::ToggleWikiControls => "toggle-wiki-controls",
            Command::ResetAll => "reset-all",
            Command::GetState => "get-state",
            Command::ReadText => "read-text",
            Command::PauseSpeech => "pause-speech",
            Command::ResumeSpeech => "resume-speech",
            Command::StopSpeech => "stop-speech",
            Command::Ping => "ping",
        }
    }
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, CommandError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CommandError::MissingParam(name.to_string()))
}

/// Result fields of a successful command. Absent fields are omitted from
/// the response object.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_controls_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dyslexia: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_filter: Option<ColorFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<CustomColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_focus: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pong: Option<bool>,
}

impl CommandOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_size(size: f64) -> Self {
        Self { size: Some(size), ..Self::default() }
    }
}

/// Input events feeding standing subscriptions such as line focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    PointerMove,
    FocusIn,
}

impl PageEventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pointer-move" | "pointermove" | "mousemove" => Some(PageEventKind::PointerMove),
            "focus-in" | "focusin" | "focus" => Some(PageEventKind::FocusIn),
            _ => None,
        }
    }
}
