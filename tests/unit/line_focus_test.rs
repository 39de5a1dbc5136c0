//! Unit tests for the line focus subscription: exactly one highlight while
//! enabled, nothing left behind once disabled.

use readassist::app::App;
use readassist::dom::{Document, NodeId};
use readassist::services::line_focus::{resolve_block, LineFocusTrait, HIGHLIGHT_CLASS};
use readassist::services::preference_store::MemoryPreferenceStore;
use readassist::services::speech_engine::LoggingSynthesizer;
use readassist::types::command::{Command, PageEventKind};
use readassist::types::settings::EnhancerSettings;

const PAGE: &str = r#"<body>
<div id="mw-content-text">
<p id="one">First <a id="link" href="/a">paragraph</a>.</p>
<p id="two">Second paragraph.</p>
<div id="blank">   <span id="empty-span"> </span></div>
<ul><li id="item"><b id="bold">Item</b></li></ul>
</div>
<span id="loose">loose text</span>
</body>"#;

fn setup() -> App {
    App::from_html(
        PAGE,
        EnhancerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
        Box::new(LoggingSynthesizer),
    )
    .unwrap()
}

fn node(app: &App, id: &str) -> NodeId {
    app.document().get_element_by_id(id).unwrap()
}

fn highlighted(doc: &Document) -> Vec<NodeId> {
    doc.query_selector_all(&format!(".{}", HIGHLIGHT_CLASS)).unwrap()
}

#[test]
fn test_pointer_moves_over_two_paragraphs_keep_one_highlight() {
    let mut app = setup();
    app.execute(Command::EnableLineFocus).unwrap();
    let (one, two) = (node(&app, "one"), node(&app, "two"));

    app.handle_event(PageEventKind::PointerMove, one).unwrap();
    assert_eq!(highlighted(app.document()), vec![one]);

    app.handle_event(PageEventKind::PointerMove, two).unwrap();
    assert_eq!(highlighted(app.document()), vec![two]);

    app.handle_event(PageEventKind::FocusIn, one).unwrap();
    assert_eq!(highlighted(app.document()), vec![one]);
}

#[test]
fn test_inline_target_resolves_to_enclosing_block() {
    let mut app = setup();
    app.execute(Command::EnableLineFocus).unwrap();
    let link = node(&app, "link");
    let result = app.handle_event(PageEventKind::FocusIn, link).unwrap();
    assert_eq!(result, Some(node(&app, "one")));

    let bold = node(&app, "bold");
    assert_eq!(resolve_block(app.document(), bold), Some(node(&app, "item")));
}

#[test]
fn test_whitespace_containers_and_body_are_skipped() {
    let mut app = setup();
    app.execute(Command::EnableLineFocus).unwrap();
    let one = node(&app, "one");
    app.handle_event(PageEventKind::PointerMove, one).unwrap();

    // The blank div has no text, but its parent region does.
    let empty = node(&app, "empty-span");
    let region = node(&app, "mw-content-text");
    assert_eq!(app.handle_event(PageEventKind::PointerMove, empty).unwrap(), Some(region));

    // Nothing between the loose span and <body> is a block: highlight stays.
    let loose = node(&app, "loose");
    assert_eq!(app.handle_event(PageEventKind::PointerMove, loose).unwrap(), Some(region));
    assert_eq!(highlighted(app.document()), vec![region]);
}

#[test]
fn test_events_ignored_while_disabled() {
    let mut app = setup();
    let one = node(&app, "one");
    assert_eq!(app.handle_event(PageEventKind::PointerMove, one).unwrap(), None);
    assert!(highlighted(app.document()).is_empty());
    assert_eq!(app.document().listener_count(), 0);
}

#[test]
fn test_disable_detaches_and_clears() {
    let mut app = setup();
    app.execute(Command::EnableLineFocus).unwrap();
    assert_eq!(app.document().listener_count(), 2);
    let two = node(&app, "two");
    app.handle_event(PageEventKind::PointerMove, two).unwrap();

    app.execute(Command::DisableLineFocus).unwrap();
    assert_eq!(app.document().listener_count(), 0);
    assert!(highlighted(app.document()).is_empty());
    assert!(!app.line_focus.is_enabled());
    assert_eq!(app.line_focus.highlighted(), None);
    assert_eq!(app.handle_event(PageEventKind::PointerMove, two).unwrap(), None);
}

#[test]
fn test_enable_twice_keeps_one_subscription() {
    let mut app = setup();
    app.execute(Command::EnableLineFocus).unwrap();
    let one = node(&app, "one");
    app.handle_event(PageEventKind::PointerMove, one).unwrap();
    app.execute(Command::EnableLineFocus).unwrap();
    assert_eq!(app.document().listener_count(), 2);
    assert!(highlighted(app.document()).is_empty());
    assert_eq!(app.line_focus.highlighted(), None);
}

#[test]
fn test_highlight_moves_on_after_block_is_removed() {
    let mut doc = readassist::dom::parse_document(PAGE).unwrap();
    let mut focus = readassist::services::line_focus::LineFocus::new();
    focus.enable(&mut doc).unwrap();
    let one = doc.get_element_by_id("one").unwrap();
    let two = doc.get_element_by_id("two").unwrap();

    focus.handle_event(&mut doc, PageEventKind::PointerMove, one).unwrap();
    doc.remove(one).unwrap();

    let now = focus.handle_event(&mut doc, PageEventKind::PointerMove, two).unwrap();
    assert_eq!(now, Some(two));
    assert_eq!(highlighted(&doc), vec![two]);
}
