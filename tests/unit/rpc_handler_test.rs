//! Unit tests for the message boundary: every popup action goes through
//! `handle_request` exactly as the host binary routes it.

use std::sync::Mutex;

use rstest::rstest;
use serde_json::{json, Value};

use readassist::app::App;
use readassist::rpc_handler::{handle_action, handle_event, handle_line, handle_method, handle_request};
use readassist::services::preference_store::MemoryPreferenceStore;
use readassist::services::speech_engine::{LoggingSynthesizer, SpeechSynthesizer};
use readassist::types::errors::SpeechError;
use readassist::types::settings::EnhancerSettings;
use readassist::types::speech::Utterance;

const PAGE: &str = r#"<html><head><title>Alan Turing</title></head><body>
<div class="vector-header-container">Wikipedia</div>
<div id="vector-appearance-pinned-container">Appearance</div>
<ul id="mw-panel-toc-list"><li>Early life</li></ul>
<h1 id="firstHeading">Alan Turing</h1>
<div id="mw-content-text">
<p id="intro">Alan Turing was a mathematician.</p>
<p id="second">He broke codes.</p>
</div>
</body></html>"#;

fn setup() -> Mutex<App> {
    let app = App::from_html(
        PAGE,
        EnhancerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
        Box::new(LoggingSynthesizer),
    )
    .expect("Failed to init App");
    Mutex::new(app)
}

fn send(app: &Mutex<App>, request: Value) -> Value {
    handle_request(app, &request)
}

// ─── Boundary ───

#[test]
fn test_unknown_action() {
    let app = setup();
    let res = send(&app, json!({"action": "fly"}));
    assert_eq!(res, json!({"success": false, "error": "unknown action"}));
}

#[test]
fn test_missing_action() {
    let app = setup();
    let res = send(&app, json!({"filter": "protanopia"}));
    assert_eq!(res["success"], false);
    assert_eq!(res["error"], "missing action");
}

#[test]
fn test_ping() {
    let app = setup();
    assert_eq!(send(&app, json!({"action": "ping"})), json!({"success": true, "pong": true}));
}

// ─── Text size ───

#[test]
fn test_increase_increase_decrease_reports_1_05() {
    let app = setup();
    assert_eq!(send(&app, json!({"action": "increase-text-size"}))["size"], 1.05);
    assert_eq!(send(&app, json!({"action": "increase-text-size"}))["size"], 1.1);
    let res = send(&app, json!({"action": "decrease-text-size"}));
    assert_eq!(res, json!({"success": true, "size": 1.05}));
}

#[rstest]
#[case("increaseTextSize", 1.05)]
#[case("decreaseTextSize", 0.95)]
fn test_camel_case_aliases(#[case] action: &str, #[case] size: f64) {
    let app = setup();
    assert_eq!(send(&app, json!({"action": action}))["size"], size);
}

// ─── State ───

#[test]
fn test_get_state_does_not_mutate() {
    let app = setup();
    let before = app.lock().unwrap().document().to_html();
    let res = send(&app, json!({"action": "get-state"}));
    assert_eq!(res["success"], true);
    assert_eq!(res["size"], 1.0);
    assert_eq!(res["wikiControlsHidden"], false);
    assert_eq!(res["contrast"], false);
    assert_eq!(res["dyslexia"], false);
    assert_eq!(res["colorFilter"], "none");
    assert_eq!(res["lineFocus"], false);
    assert_eq!(res["speech"], "idle");
    assert!(res.get("customColors").is_none());
    assert_eq!(app.lock().unwrap().document().to_html(), before);
}

#[test]
fn test_toggle_wiki_controls_twice() {
    let app = setup();
    let first = send(&app, json!({"action": "toggle-wiki-controls"}));
    assert_eq!(first, json!({"success": true, "isHidden": true}));
    assert_eq!(
        app.lock().unwrap().preference("tamWikiHideControls").unwrap().as_deref(),
        Some("true")
    );
    let second = send(&app, json!({"action": "toggleWikiControls"}));
    assert_eq!(second, json!({"success": true, "isHidden": false}));
    assert_eq!(
        app.lock().unwrap().preference("tamWikiHideControls").unwrap().as_deref(),
        Some("false")
    );
}

// ─── Parameters ───

#[rstest]
#[case(json!({"action": "set-color-filter"}), "missing filter")]
#[case(json!({"action": "set-color-filter", "filter": "sepia"}), "invalid parameter: unknown color filter 'sepia'")]
#[case(json!({"action": "set-custom-colors", "backgroundColor": "#000"}), "missing textColor")]
#[case(json!({"action": "set-custom-colors", "textColor": "#fff"}), "missing backgroundColor")]
#[case(json!({"action": "set-custom-colors", "textColor": "red;}", "backgroundColor": "#000"}), "invalid color: red;}")]
fn test_bad_parameters_fail_without_mutation(#[case] request: Value, #[case] error: &str) {
    let app = setup();
    let before = app.lock().unwrap().document().to_html();
    let res = send(&app, request);
    assert_eq!(res, json!({"success": false, "error": error}));
    assert_eq!(app.lock().unwrap().document().to_html(), before);
}

#[test]
fn test_custom_colors_accept_popup_bg_color() {
    let app = setup();
    let res = send(&app, json!({"action": "setCustomColors", "textColor": "#ffffff", "bgColor": "black"}));
    assert_eq!(res, json!({"success": true}));
    let state = send(&app, json!({"action": "get-state"}));
    assert_eq!(state["customColors"], json!({"textColor": "#ffffff", "backgroundColor": "black"}));
}

#[test]
fn test_handle_action_returns_outcome_fields() {
    let app = setup();
    let fields = handle_action(&app, "toggle-contrast", &json!({})).unwrap();
    assert_eq!(fields, json!({"contrast": true}));
    assert_eq!(handle_action(&app, "nope", &json!({})).unwrap_err(), "unknown action");
}

// ─── Events and host methods ───

#[test]
fn test_events_reach_line_focus_only_when_enabled() {
    let app = setup();
    let ignored = handle_event(&app, "pointer-move", &json!({"target": "#intro"})).unwrap();
    assert_eq!(ignored, json!({"highlighted": null}));

    send(&app, json!({"action": "enable-line-focus"}));
    let res = handle_event(&app, "pointermove", &json!({"target": "#intro"})).unwrap();
    assert_eq!(res["highlighted"], "<p id=\"intro\" class=\"line-focus-highlight\">");

    assert!(handle_event(&app, "scroll", &json!({"target": "#intro"})).is_err());
    assert!(handle_event(&app, "focus-in", &json!({"target": "#nowhere"})).is_err());
    assert!(handle_event(&app, "focus-in", &json!({})).is_err());
}

#[test]
fn test_page_methods() {
    let app = setup();
    let html = handle_method(&app, "page.html", &json!({})).unwrap();
    assert!(html["html"].as_str().unwrap().contains("accessibility-base-styles"));
    let state = handle_method(&app, "page.state", &json!({})).unwrap();
    assert_eq!(state["size"], 1.0);
    assert!(handle_method(&app, "page.reload", &json!({})).unwrap_err().contains("unknown method"));
}

// ─── Panics and the host line protocol ───

struct PanickingSynthesizer;

impl SpeechSynthesizer for PanickingSynthesizer {
    fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
        panic!("audio backend crashed");
    }

    fn pause(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }
}

#[test]
fn test_panicking_command_replies_failure_and_session_survives() {
    let app = Mutex::new(
        App::from_html(
            PAGE,
            EnhancerSettings::default(),
            Box::new(MemoryPreferenceStore::new()),
            Box::new(PanickingSynthesizer),
        )
        .unwrap(),
    );
    let res = send(&app, json!({"action": "read-text"}));
    assert_eq!(res["success"], false);
    assert_eq!(res["error"], "audio backend crashed");

    let res = send(&app, json!({"action": "increase-text-size"}));
    assert_eq!(res, json!({"success": true, "size": 1.05}));
}

#[test]
fn test_every_line_in_a_burst_gets_a_reply() {
    let app = setup();
    for i in 0..500 {
        let line = json!({"id": i, "action": "ping"}).to_string();
        let res = handle_line(&app, &line).unwrap();
        assert_eq!(res["id"], i);
        assert_eq!(res["success"], true);
    }
}

#[test]
fn test_line_routing() {
    let app = setup();
    assert_eq!(handle_line(&app, "   "), None);

    let res = handle_line(&app, "{not json").unwrap();
    assert_eq!(res["id"], Value::Null);
    assert!(res["error"].as_str().unwrap().starts_with("parse error"));

    let res = handle_line(&app, r#"{"id": 7, "method": "page.state"}"#).unwrap();
    assert_eq!(res["id"], 7);
    assert_eq!(res["result"]["size"], 1.0);

    let res = handle_line(&app, r##"{"id": 8, "event": "pointer-move", "target": "#intro"}"##).unwrap();
    assert_eq!(res["id"], 8);
    assert_eq!(res["result"]["highlighted"], Value::Null);
}
