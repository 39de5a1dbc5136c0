//! Popup-side messaging wrapper and display state.
//!
//! A send that finds no content script in the page triggers one injection
//! of the script and stylesheet, then the identical message is sent again,
//! exactly once. Every reply carries enough state to resynchronize the
//! display, so replies may be applied in any order.

use std::sync::Mutex;

use log::{debug, info, warn};
use serde_json::{json, Map, Value};

use crate::app::App;
use crate::rpc_handler::handle_request;
use crate::types::errors::{DeliveryError, EnhancerError};

/// Point-to-point channel to the content script of the active page.
pub trait MessageChannel {
    fn send(&mut self, message: &Value) -> Result<Value, DeliveryError>;
    /// Injects the content script and its stylesheet into the page.
    fn inject_content_script(&mut self) -> Result<(), DeliveryError>;
}

/// What the popup currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub size: f64,
    pub chrome_hidden: bool,
    pub line_focus_on: bool,
    pub color_filter: String,
    pub last_error: Option<String>,
}

impl Default for PopupView {
    fn default() -> Self {
        Self {
            size: 1.0,
            chrome_hidden: false,
            line_focus_on: false,
            color_filter: "none".to_string(),
            last_error: None,
        }
    }
}

impl PopupView {
    pub fn size_label(&self) -> String {
        format!("{}%", (self.size * 100.0).round() as i64)
    }

    pub fn focus_mode_label(&self) -> &'static str {
        if self.chrome_hidden {
            "Disable Focus Mode"
        } else {
            "Enable Focus Mode"
        }
    }

    fn absorb(&mut self, reply: &Value) {
        if reply.get("success").and_then(Value::as_bool) != Some(true) {
            let error = reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            self.last_error = Some(error.to_string());
            return;
        }
        self.last_error = None;
        if let Some(size) = reply.get("size").and_then(Value::as_f64) {
            self.size = size;
        }
        if let Some(hidden) = reply
            .get("isHidden")
            .or_else(|| reply.get("wikiControlsHidden"))
            .and_then(Value::as_bool)
        {
            self.chrome_hidden = hidden;
        }
        if let Some(on) = reply.get("lineFocus").and_then(Value::as_bool) {
            self.line_focus_on = on;
        }
        if let Some(filter) = reply.get("colorFilter").and_then(Value::as_str) {
            self.color_filter = filter.to_string();
        }
    }
}

pub struct PopupClient<C: MessageChannel> {
    channel: C,
    view: PopupView,
}

impl<C: MessageChannel> PopupClient<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            view: PopupView::default(),
        }
    }

    pub fn view(&self) -> &PopupView {
        &self.view
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Sends `{action, ...params}` with the inject-and-retry-once fallback.
    pub fn send_command(&mut self, action: &str, params: Value) -> Result<Value, DeliveryError> {
        let mut message = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(DeliveryError::Malformed(format!("params must be an object, got {}", other)))
            }
        };
        message.insert("action".to_string(), Value::String(action.to_string()));
        let message = Value::Object(message);

        let reply = match self.channel.send(&message) {
            Err(DeliveryError::NoReceiver) => {
                info!("no content script in page, injecting before retrying {}", action);
                self.channel.inject_content_script()?;
                self.channel.send(&message)
            }
            other => other,
        };
        match reply {
            Ok(reply) => {
                debug!("{} -> {}", action, reply);
                self.view.absorb(&reply);
                Ok(reply)
            }
            Err(e) => {
                warn!("{} not delivered: {}", action, e);
                self.view.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads the page's current state into the view.
    pub fn init(&mut self) -> Result<Value, DeliveryError> {
        self.send_command("get-state", Value::Null)
    }

    /// A parameterless button.
    pub fn click(&mut self, action: &str) -> Result<Value, DeliveryError> {
        let reply = self.send_command(action, Value::Null)?;
        if action == "reset-all" && reply.get("success").and_then(Value::as_bool) == Some(true) {
            self.view = PopupView {
                size: self.view.size,
                ..PopupView::default()
            };
        }
        Ok(reply)
    }

    /// Filter selector; "none" clears the filter.
    pub fn select_color_filter(&mut self, filter: &str) -> Result<Value, DeliveryError> {
        let reply = if filter == "none" {
            self.send_command("reset-color-filter", Value::Null)?
        } else {
            self.send_command("set-color-filter", json!({ "filter": filter }))?
        };
        if reply.get("success").and_then(Value::as_bool) == Some(true) {
            self.view.color_filter = filter.to_string();
        }
        Ok(reply)
    }

    pub fn apply_colors(&mut self, text_color: &str, background_color: &str) -> Result<Value, DeliveryError> {
        self.send_command(
            "set-custom-colors",
            json!({ "textColor": text_color, "bgColor": background_color }),
        )
    }

    pub fn reset_colors(&mut self) -> Result<Value, DeliveryError> {
        self.send_command("reset-custom-colors", Value::Null)
    }

    pub fn set_line_focus(&mut self, on: bool) -> Result<Value, DeliveryError> {
        let action = if on { "enable-line-focus" } else { "disable-line-focus" };
        let reply = self.send_command(action, Value::Null)?;
        if reply.get("success").and_then(Value::as_bool) == Some(true) {
            self.view.line_focus_on = on;
        }
        Ok(reply)
    }
}

/// Channel to a session in this process. The page starts without a content
/// script; injection builds the session with `loader`.
pub struct InProcessChannel<F>
where
    F: FnMut() -> Result<App, EnhancerError>,
{
    session: Option<Mutex<App>>,
    loader: F,
    injections: usize,
    sends: usize,
}

impl<F> InProcessChannel<F>
where
    F: FnMut() -> Result<App, EnhancerError>,
{
    pub fn new(loader: F) -> Self {
        Self {
            session: None,
            loader,
            injections: 0,
            sends: 0,
        }
    }

    /// A channel whose content script is already running.
    pub fn connected(mut loader: F) -> Result<Self, EnhancerError> {
        let app = loader()?;
        Ok(Self {
            session: Some(Mutex::new(app)),
            loader,
            injections: 0,
            sends: 0,
        })
    }

    pub fn session(&self) -> Option<&Mutex<App>> {
        self.session.as_ref()
    }

    pub fn injections(&self) -> usize {
        self.injections
    }

    /// Send attempts, including those that found no receiver.
    pub fn sends(&self) -> usize {
        self.sends
    }
}

impl<F> MessageChannel for InProcessChannel<F>
where
    F: FnMut() -> Result<App, EnhancerError>,
{
    fn send(&mut self, message: &Value) -> Result<Value, DeliveryError> {
        self.sends += 1;
        match &self.session {
            Some(app) => Ok(handle_request(app, message)),
            None => Err(DeliveryError::NoReceiver),
        }
    }

    fn inject_content_script(&mut self) -> Result<(), DeliveryError> {
        self.injections += 1;
        if self.session.is_none() {
            let app = (self.loader)().map_err(|e| DeliveryError::InjectionFailed(e.to_string()))?;
            self.session = Some(Mutex::new(app));
        }
        Ok(())
    }
}
