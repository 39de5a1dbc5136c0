//! Property-based tests for reset-all.
//!
//! Whatever sequence of commands and input events ran before, reset-all
//! leaves the page with no enhancement side effects and default state,
//! while the base stylesheet stays installed.

use proptest::prelude::*;

use readassist::app::App;
use readassist::services::contrast_mode::CONTRAST_CLASS;
use readassist::services::custom_color_engine::CUSTOM_COLORS_STYLE_ID;
use readassist::services::dyslexia_mode::{DYSLEXIA_BODY_CLASS, EMPHASIS_CLASS};
use readassist::services::font_engine::FONT_STYLE_ID;
use readassist::services::line_focus::{LineFocusTrait, HIGHLIGHT_CLASS};
use readassist::services::preference_store::MemoryPreferenceStore;
use readassist::services::speech_engine::LoggingSynthesizer;
use readassist::services::style_injector::style_text;
use readassist::services::stylesheet::BASE_STYLE_ID;
use readassist::types::command::{Command, PageEventKind};
use readassist::types::page::{ColorFilter, CustomColors, SessionState};
use readassist::types::settings::EnhancerSettings;

const PAGE: &str = r#"<html><head><title>Alan Turing</title></head><body>
<div class="vector-header-container"><a href="/">Home</a></div>
<ul id="mw-panel-toc-list"><li>Early life</li></ul>
<h1 id="firstHeading">Alan Turing</h1>
<div id="mw-content-text">
  <p id="p1">Alan Turing was a <b>mathematician</b>.</p>
  <p id="p2">He <a href="/wiki/Enigma">broke</a> codes.</p>
  <pre>let x = 1;</pre>
</div>
</body></html>"#;

const TARGETS: [&str; 5] = ["#p1", "#p2 a", "#p1 b", "#firstHeading", "pre"];

#[derive(Debug, Clone)]
enum Step {
    Run(Command),
    Event(PageEventKind, &'static str),
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::IncreaseTextSize),
        Just(Command::DecreaseTextSize),
        Just(Command::ToggleContrast),
        Just(Command::ToggleDyslexia),
        prop_oneof![
            Just(ColorFilter::None),
            Just(ColorFilter::Protanopia),
            Just(ColorFilter::Deuteranopia),
            Just(ColorFilter::Tritanopia),
        ]
        .prop_map(Command::SetColorFilter),
        Just(Command::ResetColorFilter),
        ("#[0-9a-f]{6}", prop_oneof![Just("black"), Just("#fff"), Just("ivory")]).prop_map(
            |(text_color, background)| Command::SetCustomColors(CustomColors {
                text_color,
                background_color: background.to_string(),
            })
        ),
        Just(Command::ResetCustomColors),
        Just(Command::EnableLineFocus),
        Just(Command::DisableLineFocus),
        Just(Command::ToggleWikiControls),
        Just(Command::ReadText),
        Just(Command::GetState),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_command().prop_map(Step::Run),
        1 => (
            prop_oneof![Just(PageEventKind::PointerMove), Just(PageEventKind::FocusIn)],
            proptest::sample::select(TARGETS.to_vec()),
        )
            .prop_map(|(kind, target)| Step::Event(kind, target)),
    ]
}

fn new_app() -> App {
    App::from_html(
        PAGE,
        EnhancerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
        Box::new(LoggingSynthesizer),
    )
    .unwrap()
}

fn run(app: &mut App, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Run(command) => {
                app.execute(command.clone()).unwrap();
            }
            Step::Event(kind, selector) => {
                let target = app.document().query_selector(selector).unwrap().unwrap();
                app.handle_event(*kind, target).unwrap();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_reset_all_removes_every_effect(steps in proptest::collection::vec(arb_step(), 0..24)) {
        let mut app = new_app();
        run(&mut app, &steps);

        let outcome = app.execute(Command::ResetAll).unwrap();
        prop_assert_eq!(outcome.size, Some(1.0));
        prop_assert_eq!(app.state(), &SessionState::default());

        let doc = app.document();
        let body = doc.body().unwrap();
        prop_assert!(style_text(doc, FONT_STYLE_ID).is_none());
        prop_assert!(style_text(doc, CUSTOM_COLORS_STYLE_ID).is_none());
        prop_assert!(style_text(doc, BASE_STYLE_ID).is_some());
        prop_assert!(!doc.has_class(body, CONTRAST_CLASS));
        prop_assert!(!doc.has_class(body, DYSLEXIA_BODY_CLASS));
        for filter in ColorFilter::SIMULATIONS {
            prop_assert!(!doc.has_class(body, filter.class_name().unwrap()));
        }
        let emphasis_selector = format!(".{}", EMPHASIS_CLASS);
        let highlight_selector = format!(".{}", HIGHLIGHT_CLASS);
        prop_assert!(doc.query_selector_all(&emphasis_selector).unwrap().is_empty());
        prop_assert!(doc.query_selector_all(&highlight_selector).unwrap().is_empty());
        prop_assert_eq!(doc.listener_count(), 0);
        prop_assert!(!app.line_focus.is_enabled());

        for selector in [".vector-header-container", "#mw-panel-toc-list"] {
            let region = doc.query_selector(selector).unwrap().unwrap();
            prop_assert_eq!(doc.style_property(region, "display"), None);
        }
        prop_assert_eq!(app.preference("tamWikiHideControls").unwrap(), None);
    }

    #[test]
    fn prop_reset_all_restores_original_text(steps in proptest::collection::vec(arb_step(), 0..24)) {
        let fresh = new_app();
        let mut app = new_app();
        run(&mut app, &steps);
        app.execute(Command::ResetAll).unwrap();

        for id in ["p1", "p2", "firstHeading"] {
            let before = fresh.document().get_element_by_id(id).unwrap();
            let after = app.document().get_element_by_id(id).unwrap();
            prop_assert_eq!(
                app.document().inner_html(after),
                fresh.document().inner_html(before)
            );
        }
    }
}

#[test]
fn test_reset_all_twice_is_harmless() {
    let mut app = new_app();
    app.execute(Command::ToggleDyslexia).unwrap();
    app.execute(Command::ToggleWikiControls).unwrap();
    app.execute(Command::ResetAll).unwrap();
    let once = app.document().to_html();
    app.execute(Command::ResetAll).unwrap();
    assert_eq!(app.document().to_html(), once);
}
