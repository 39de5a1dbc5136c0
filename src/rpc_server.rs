//! ReadAssist page host: one page session driven over stdin/stdout.
//!
//! Usage: `readassist-host <page.html> [origin]`
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Command: {"id":1, "action":"set-color-filter", "filter":"protanopia"}
//!       -> {"id":1, "success":true} or {"id":1, "success":false, "error":"..."}
//! Event:   {"id":2, "event":"pointer-move", "target":"#intro p"}
//!       -> {"id":2, "result":{"highlighted":"<p>"}} or {"id":2, "error":"..."}
//! Method:  {"id":3, "method":"page.html"} -> {"id":3, "result":{"html":"..."}}

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use log::{error, info, warn};
use serde_json::{json, Value};

use readassist::app::App;
use readassist::database::Database;
use readassist::platform;
use readassist::rpc_handler::handle_line;
use readassist::services::preference_store::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore};
use readassist::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use readassist::services::speech_engine::LoggingSynthesizer;

fn open_store(origin: &str) -> Box<dyn PreferenceStore> {
    let db_path = match std::env::var("READASSIST_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir).join("preferences.db"),
        Err(_) => platform::default_database_path(),
    };
    if let Some(parent) = db_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("cannot create {}: {}", parent.display(), e);
        }
    }
    match Database::open(&db_path) {
        Ok(db) => {
            info!("preferences at {}", db_path.display());
            Box::new(SqlitePreferenceStore::new(db, origin))
        }
        Err(e) => {
            warn!("preference database unavailable ({}), preferences will not persist", e);
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

fn emit(response: &Value) {
    let mut out = io::stdout().lock();
    if writeln!(out, "{}", response).and_then(|_| out.flush()).is_err() {
        process::exit(1);
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let page_path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: readassist-host <page.html> [origin]");
            process::exit(2);
        }
    };
    let origin = args.next().unwrap_or_default();

    let html = match fs::read_to_string(&page_path) {
        Ok(html) => html,
        Err(e) => {
            error!("cannot read {}: {}", page_path, e);
            process::exit(1);
        }
    };

    let mut settings_engine = SettingsEngine::new(std::env::var("READASSIST_CONFIG").ok());
    let settings = match settings_engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let app = match App::from_html(&html, settings, open_store(&origin), Box::new(LoggingSynthesizer)) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!("failed to start page session: {}", e);
            process::exit(1);
        }
    };

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if let Some(response) = handle_line(&app, &line) {
            emit(&response);
        }
    }
}
