//! Message boundary between the popup channel and the page session.
//!
//! Requests are flat JSON objects, `{"action": <id>, ...params}`; replies are
//! `{"success": true, ...fields}` or `{"success": false, "error": <reason>}`.
//! Nothing raised inside a command crosses this boundary.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, warn};
use serde_json::{json, Map, Value};

use crate::app::App;
use crate::types::command::{Command, PageEventKind};

fn lock(app: &Mutex<App>) -> MutexGuard<'_, App> {
    // A panicking command leaves the session usable; appliers are
    // remove-then-add so the document stays self-consistent.
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Decodes and runs one command. Returns the outcome fields as an object.
pub fn handle_action(app: &Mutex<App>, action: &str, params: &Value) -> Result<Value, String> {
    let command = Command::parse(action, params).map_err(|e| e.to_string())?;
    let outcome = lock(app).execute(command).map_err(|e| e.to_string())?;
    serde_json::to_value(outcome).map_err(|e| e.to_string())
}

/// Delivers a pointer or focus event aimed at the first element matching
/// `params.target`.
pub fn handle_event(app: &Mutex<App>, event: &str, params: &Value) -> Result<Value, String> {
    let kind = PageEventKind::from_name(event).ok_or_else(|| format!("unknown event: {}", event))?;
    let selector = params.get("target").and_then(|v| v.as_str()).ok_or("missing target")?;
    let mut a = lock(app);
    let target = a
        .document()
        .query_selector(selector)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no element matches '{}'", selector))?;
    let highlighted = a.handle_event(kind, target).map_err(|e| e.to_string())?;
    let html = highlighted.map(|n| a.document().opening_tag(n));
    Ok(json!({ "highlighted": html }))
}

/// Host-level methods that are not popup commands.
pub fn handle_method(app: &Mutex<App>, method: &str, _params: &Value) -> Result<Value, String> {
    match method {
        "page.html" => {
            let a = lock(app);
            Ok(json!({ "html": a.document().to_html() }))
        }
        "page.state" => {
            let a = lock(app);
            serde_json::to_value(a.snapshot()).map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown method: {}", method)),
    }
}

fn failure(message: String) -> Value {
    json!({ "success": false, "error": message })
}

/// Handles one popup message and always produces exactly one reply.
pub fn handle_request(app: &Mutex<App>, request: &Value) -> Value {
    let action = match request.get("action").and_then(|v| v.as_str()) {
        Some(action) => action,
        None => return failure("missing action".to_string()),
    };
    debug!("request {}", action);

    let result = panic::catch_unwind(AssertUnwindSafe(|| handle_action(app, action, request)));
    match result {
        Ok(Ok(Value::Object(fields))) => {
            let mut reply = Map::new();
            reply.insert("success".to_string(), Value::Bool(true));
            reply.extend(fields);
            Value::Object(reply)
        }
        Ok(Ok(_)) => json!({ "success": true }),
        Ok(Err(message)) => {
            warn!("action {} failed: {}", action, message);
            failure(message)
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "internal error".to_string());
            error!("action {} panicked: {}", action, message);
            failure(message)
        }
    }
}

fn with_id(id: Value, mut response: Value) -> Value {
    if let Value::Object(map) = &mut response {
        map.insert("id".to_string(), id);
    }
    response
}

/// Routes one line of the host protocol. Blank lines yield no reply; every
/// other line yields exactly one, tagged with the request `id`.
pub fn handle_line(app: &Mutex<App>, line: &str) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }
    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Some(json!({"id": null, "error": format!("parse error: {}", e)})),
    };
    let id = req.get("id").cloned().unwrap_or(Value::Null);

    let response = if req.get("action").is_some() {
        with_id(id, handle_request(app, &req))
    } else if let Some(event) = req.get("event").and_then(|v| v.as_str()) {
        match handle_event(app, event, &req) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        }
    } else {
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));
        match handle_method(app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        }
    };
    Some(response)
}
