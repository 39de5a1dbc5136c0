// ReadAssist services
// One module per effect applier, plus preferences, speech, content extraction and settings.

pub mod color_filter_engine;
pub mod contrast_mode;
pub mod custom_color_engine;
pub mod dyslexia_mode;
pub mod font_engine;
pub mod line_focus;
pub mod preference_bridge;
pub mod preference_store;
pub mod reader_mode;
pub mod settings_engine;
pub mod site_chrome;
pub mod speech_engine;
pub mod style_injector;
pub mod stylesheet;
