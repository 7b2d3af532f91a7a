//! The controller driven through whole sessions, fed by a real loader.

use sifter::config::{SearchConfig, Variant};
use sifter::controller::{DismissReason, NavKey};
use sifter::testing::{sample_corpus_json, ManualTimers, RecordingSurface, SurfaceCall};
use sifter::{Controller, Event, IndexLoader, KeyPress, MemorySource, Phase};

type TestController = Controller<RecordingSurface, ManualTimers>;

fn controller_with(config: SearchConfig) -> TestController {
    Controller::new(config, RecordingSurface::new(), ManualTimers::new()).unwrap()
}

async fn loaded(config: SearchConfig) -> TestController {
    let source = MemorySource::new()
        .with_status("/search-index.json", 404)
        .with_body("./search-index.json", sample_corpus_json());
    let loader = IndexLoader::new(source, config.corpus_paths.clone())
        .with_tokenizer(config.tokenizer());

    let mut c = controller_with(config);
    c.dispatch(Event::IndexLoaded(loader.load().await));
    c
}

fn settle(c: &mut TestController) {
    let ticket = c.timers_mut().pop_latest().unwrap();
    c.dispatch(Event::DebounceElapsed(ticket));
}

fn type_keys(c: &mut TestController, text: &str) {
    for end in 1..=text.len() {
        c.dispatch(Event::Input(text[..end].to_string()));
    }
}

#[tokio::test]
async fn test_overlay_session() {
    let mut c = loaded(SearchConfig::default()).await;
    assert_eq!(c.phase(), Phase::Ready);

    c.dispatch(Event::GlobalKey(KeyPress::new("k").with_ctrl()));
    assert!(c.session().is_open());

    type_keys(&mut c, "config");
    assert_eq!(c.timers_mut().tickets().len(), 1);
    settle(&mut c);
    assert_eq!(c.phase(), Phase::ResultsShown);
    let results = c.surface().last_results().unwrap().to_vec();
    assert_eq!(results[0].url, "/config");
    assert!(results[0].title_html.contains("<mark>Config</mark>"));

    c.dispatch(Event::Key(NavKey::ArrowDown));
    c.dispatch(Event::Key(NavKey::Enter));
    assert_eq!(c.surface().navigations(), vec!["/config"]);
}

#[tokio::test]
async fn test_typing_before_corpus_arrives() {
    let config = SearchConfig::default();
    let source = MemorySource::new().with_body("/search-index.json", sample_corpus_json());
    let loader = IndexLoader::new(source, config.corpus_paths.clone());

    let mut c = controller_with(config);
    type_keys(&mut c, "wasm");
    assert_eq!(c.phase(), Phase::Loading);
    assert!(c.surface().calls.is_empty());

    c.dispatch(Event::IndexLoaded(loader.load().await));
    settle(&mut c);
    assert_eq!(c.surface().last_results().unwrap()[0].url, "/wasm");
}

#[tokio::test]
async fn test_unavailable_corpus_disables_input() {
    let config = SearchConfig {
        unavailable_placeholder: "Search is offline".to_string(),
        ..SearchConfig::default()
    };
    let loader = IndexLoader::new(MemorySource::new(), config.corpus_paths.clone());

    let mut c = controller_with(config);
    c.dispatch(Event::IndexLoaded(loader.load().await));
    assert_eq!(c.phase(), Phase::Disabled);
    assert!(c
        .surface()
        .calls
        .contains(&SurfaceCall::DisableInput("Search is offline".into())));

    c.surface_mut().drain();
    type_keys(&mut c, "build");
    c.dispatch(Event::Key(NavKey::ArrowDown));
    c.dispatch(Event::Key(NavKey::Enter));
    assert!(!c.is_pending());
    assert!(c.surface().navigations().is_empty());
}

#[tokio::test]
async fn test_refining_a_query() {
    let mut c = loaded(SearchConfig::default()).await;
    c.dispatch(Event::TriggerClick);

    type_keys(&mut c, "buil");
    settle(&mut c);
    let broad = c.session().results().len();
    assert!(broad >= 2);

    c.dispatch(Event::Key(NavKey::ArrowDown));
    c.dispatch(Event::Key(NavKey::ArrowDown));
    assert_eq!(c.session().selection(), Some(1));

    c.dispatch(Event::Input("build production".to_string()));
    settle(&mut c);
    assert_eq!(c.session().selection(), None);
    assert_eq!(c.session().results()[0].url, "/build");
}

#[tokio::test]
async fn test_no_results_then_recover() {
    let mut c = loaded(SearchConfig::default()).await;
    c.dispatch(Event::Input("quantum".to_string()));
    settle(&mut c);
    assert!(matches!(
        c.surface().calls.last(),
        Some(SurfaceCall::ShowEmpty(message)) if message.contains("quantum")
    ));
    assert!(c.session().results().is_empty());

    // Navigation over an empty list does nothing
    c.dispatch(Event::Key(NavKey::ArrowDown));
    assert_eq!(c.session().selection(), None);

    c.dispatch(Event::Input("rust".to_string()));
    settle(&mut c);
    assert_eq!(c.surface().last_results().unwrap()[0].url, "/wasm");
}

#[tokio::test]
async fn test_escape_then_reopen() {
    let mut c = loaded(SearchConfig::default()).await;
    c.dispatch(Event::TriggerClick);
    c.dispatch(Event::Input("options".to_string()));
    settle(&mut c);

    c.dispatch(Event::GlobalKey(KeyPress::new("Escape")));
    assert!(!c.session().is_open());
    assert_eq!(c.session().query(), "");
    assert_eq!(c.phase(), Phase::Ready);

    c.surface_mut().drain();
    c.dispatch(Event::GlobalKey(KeyPress::new("/")));
    assert_eq!(
        c.surface().calls,
        vec![SurfaceCall::SetOpen(true), SurfaceCall::FocusInput]
    );
}

#[tokio::test]
async fn test_close_button_keeps_query() {
    let mut c = loaded(SearchConfig::default()).await;
    c.dispatch(Event::TriggerClick);
    c.dispatch(Event::Input("environment".to_string()));
    settle(&mut c);
    assert_eq!(c.session().results()[0].url, "/config");

    c.dispatch(Event::Dismiss(DismissReason::CloseButton));
    assert!(!c.session().is_open());
    assert_eq!(c.session().query(), "environment");
    assert_eq!(c.phase(), Phase::Ready);
}

#[tokio::test]
async fn test_inline_dropdown_session() {
    let config = SearchConfig {
        variant: Variant::Inline,
        limit: 2,
        ..SearchConfig::default()
    };
    let mut c = loaded(config).await;

    type_keys(&mut c, "the");
    settle(&mut c);
    assert!(c.session().is_open());
    assert!(c.session().results().len() <= 2);

    c.dispatch(Event::Hover(0));
    c.dispatch(Event::ResultClick(0));
    assert_eq!(c.surface().navigations().len(), 1);

    c.dispatch(Event::Dismiss(DismissReason::Outside));
    assert!(!c.session().is_open());
}
