//! Unit tests for speech commands against a recording synthesizer.

use std::sync::{Arc, Mutex};

use serde_json::json;

use readassist::app::App;
use readassist::rpc_handler::handle_request;
use readassist::services::preference_store::MemoryPreferenceStore;
use readassist::services::speech_engine::SpeechSynthesizer;
use readassist::types::command::Command;
use readassist::types::errors::SpeechError;
use readassist::types::settings::EnhancerSettings;
use readassist::types::speech::{SpeechStatus, Utterance};

const PAGE: &str = r#"<body>
<h1 id="firstHeading">Alan Turing</h1>
<div id="mw-content-text">
<p>Alan Turing was a   mathematician.</p>
<pre>print("skipped")</pre>
<p>He broke <b>codes</b>.</p>
</div>
<div id="footer">Footer text</div>
</body>"#;

#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    spoken: Arc<Mutex<Vec<Utterance>>>,
    fail: bool,
}

impl SpeechSynthesizer for Recorder {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Engine("no voices installed".into()));
        }
        self.calls.lock().unwrap().push("speak".into());
        self.spoken.lock().unwrap().push(utterance.clone());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SpeechError> {
        self.calls.lock().unwrap().push("pause".into());
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        self.calls.lock().unwrap().push("resume".into());
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        self.calls.lock().unwrap().push("cancel".into());
        Ok(())
    }
}

fn setup(recorder: &Recorder) -> App {
    App::from_html(
        PAGE,
        EnhancerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
        Box::new(recorder.clone()),
    )
    .unwrap()
}

#[test]
fn test_read_text_speaks_content_regions_with_default_voice() {
    let recorder = Recorder::default();
    let mut app = setup(&recorder);
    let outcome = app.execute(Command::ReadText).unwrap();

    let spoken = recorder.spoken.lock().unwrap();
    assert_eq!(spoken.len(), 1);
    let expected = "Alan Turing Alan Turing was a mathematician. He broke codes.";
    assert_eq!(spoken[0].text, expected);
    assert_eq!(spoken[0].lang, "en-US");
    assert_eq!(spoken[0].rate, 1.0);
    assert_eq!(spoken[0].pitch, 1.0);
    assert_eq!(outcome.characters, Some(expected.chars().count()));
    assert_eq!(app.speech.status(), SpeechStatus::Speaking);
}

#[test]
fn test_read_text_cancels_active_utterance_first() {
    let recorder = Recorder::default();
    let mut app = setup(&recorder);
    app.execute(Command::ReadText).unwrap();
    app.execute(Command::ReadText).unwrap();
    assert_eq!(*recorder.calls.lock().unwrap(), vec!["speak", "cancel", "speak"]);
}

#[test]
fn test_pause_resume_stop_drive_status() {
    let recorder = Recorder::default();
    let mut app = setup(&recorder);
    app.execute(Command::ReadText).unwrap();
    app.execute(Command::PauseSpeech).unwrap();
    assert_eq!(app.speech.status(), SpeechStatus::Paused);
    app.execute(Command::ResumeSpeech).unwrap();
    assert_eq!(app.speech.status(), SpeechStatus::Speaking);
    app.execute(Command::StopSpeech).unwrap();
    assert_eq!(app.speech.status(), SpeechStatus::Idle);
    assert_eq!(
        *recorder.calls.lock().unwrap(),
        vec!["speak", "pause", "resume", "cancel"]
    );
}

#[test]
fn test_tts_aliases_and_engine_failure_over_the_boundary() {
    let recorder = Recorder { fail: true, ..Recorder::default() };
    let app = Mutex::new(setup(&recorder));
    let res = handle_request(&app, &json!({"action": "startTTS"}));
    assert_eq!(
        res,
        json!({"success": false, "error": "Speech engine error: no voices installed"})
    );
    assert_eq!(app.lock().unwrap().speech.status(), SpeechStatus::Idle);

    let res = handle_request(&app, &json!({"action": "stopTTS"}));
    assert_eq!(res, json!({"success": true}));
}

#[test]
fn test_reset_all_leaves_speech_alone() {
    let recorder = Recorder::default();
    let mut app = setup(&recorder);
    app.execute(Command::ReadText).unwrap();
    app.execute(Command::ResetAll).unwrap();
    assert_eq!(app.speech.status(), SpeechStatus::Speaking);
    assert_eq!(*recorder.calls.lock().unwrap(), vec!["speak"]);
}

#[test]
fn test_nothing_to_read() {
    let recorder = Recorder::default();
    let mut app = App::from_html(
        "<body><pre>only code</pre></body>",
        EnhancerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
        Box::new(recorder.clone()),
    )
    .unwrap();
    assert!(app.execute(Command::ReadText).is_err());
    assert!(recorder.spoken.lock().unwrap().is_empty());
}
