// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for sifter.
//!
//! Two entry points:
//! - `initSearch(options)`: fetch the corpus and bind the controller to the
//!   page's search elements
//! - `SifterIndex`: a standalone index for pages that drive their own UI
//!
//! ```text
//!   DOM listeners ──Event──▶ Controller ──▶ WebSurface (DOM writes)
//!        ▲                       │
//!        └── setTimeout ◀── WindowTimers
//! ```

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    console, Document, Element, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::{KeyPress, SearchConfig, Variant};
use crate::controller::{Controller, DismissReason, Event, NavKey, SearchSurface, Ticket, Timers};
use crate::error::{BindError, LoadError};
use crate::index::SearchIndex;
use crate::loader::{parse_corpus, CorpusSource, IndexLoader, LoadOutcome};
use crate::render::{escape_html, RenderedResult};
use crate::search::{search, DEFAULT_LIMIT};

const ITEM_CLASS: &str = "search-result-item";
const ACTIVE_CLASS: &str = "active";

type PageController = Controller<WebSurface, WindowTimers>;
type Shared = Rc<RefCell<PageController>>;
/// Late-bound weak handle, so timers inside the controller can reach it.
type Link = Rc<OnceCell<Weak<RefCell<PageController>>>>;

fn js_error(context: &'static str) -> impl Fn(JsValue) -> BindError {
    move |value| BindError::Js {
        context,
        message: format!("{:?}", value),
    }
}

fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}

// =============================================================================
// Corpus fetch
// =============================================================================

/// Loads corpus candidates with the global `fetch`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchSource;

impl CorpusSource for FetchSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        use js_sys::{Function, Promise, Reflect};

        let failed = |reason: String| LoadError::Fetch {
            location: location.to_string(),
            reason,
        };

        let global = js_sys::global();
        let fetch_fn = Reflect::get(&global, &JsValue::from_str("fetch"))
            .map_err(|_| failed("fetch API unavailable".to_string()))?
            .dyn_into::<Function>()
            .map_err(|_| failed("fetch is not callable".to_string()))?;

        let promise = fetch_fn
            .call1(&global, &JsValue::from_str(location))
            .map_err(|e| failed(format!("{:?}", e)))?;
        let response: web_sys::Response = JsFuture::from(Promise::from(promise))
            .await
            .map_err(|e| failed(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| failed("not a Response".to_string()))?;

        if !response.ok() {
            return Err(LoadError::Status {
                location: location.to_string(),
                status: response.status(),
            });
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(|e| failed(format!("{:?}", e)))?)
            .await
            .map_err(|e| failed(format!("{:?}", e)))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

// =============================================================================
// DOM surface
// =============================================================================

/// The page elements the controller writes to.
pub struct WebSurface {
    window: web_sys::Window,
    input: HtmlInputElement,
    results: HtmlElement,
    modal: Option<HtmlElement>,
    backdrop: Option<HtmlElement>,
    variant: Variant,
    active: Option<usize>,
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

impl WebSurface {
    /// Find the configured elements. `None` when a mandatory one is missing.
    fn find(window: web_sys::Window, document: &Document, config: &SearchConfig) -> Option<Self> {
        let ids = &config.elements;
        Some(Self {
            input: element_by_id(document, &ids.input)?,
            results: element_by_id(document, &ids.results)?,
            modal: element_by_id(document, &ids.modal),
            backdrop: element_by_id(document, &ids.backdrop),
            variant: config.variant,
            active: None,
            window,
        })
    }

    fn item(&self, index: usize) -> Option<Element> {
        let selector = format!(".{}[data-index=\"{}\"]", ITEM_CLASS, index);
        self.results.query_selector(&selector).ok().flatten()
    }
}

impl SearchSurface for WebSurface {
    fn show_results(&mut self, results: &[RenderedResult]) {
        let mut html = String::new();
        for (i, result) in results.iter().enumerate() {
            html.push_str(&format!(
                concat!(
                    r#"<div class="search-result-item" data-index="{}">"#,
                    r#"<div class="search-result-title">{}</div>"#,
                    r#"<div class="search-result-excerpt">{}</div>"#,
                    r#"<div class="search-result-url">{}</div>"#,
                    "</div>"
                ),
                i,
                result.title_html,
                result.excerpt_html,
                escape_html(&result.url),
            ));
        }
        self.active = None;
        self.results.set_inner_html(&html);
        self.results.set_hidden(false);
    }

    fn show_empty(&mut self, message_html: &str) {
        self.active = None;
        self.results.set_inner_html(&format!(
            r#"<div class="search-no-results">{}</div>"#,
            message_html
        ));
        self.results.set_hidden(false);
    }

    fn clear_results(&mut self) {
        self.active = None;
        self.results.set_inner_html("");
        self.results.set_hidden(true);
    }

    fn set_active(&mut self, index: Option<usize>) {
        if let Some(previous) = self.active.and_then(|i| self.item(i)) {
            let _ = previous.class_list().remove_1(ACTIVE_CLASS);
        }
        if let Some(current) = index.and_then(|i| self.item(i)) {
            let _ = current.class_list().add_1(ACTIVE_CLASS);
        }
        self.active = index;
    }

    fn reveal(&mut self, index: usize) {
        if let Some(item) = self.item(index) {
            let options = ScrollIntoViewOptions::new();
            options.set_block(ScrollLogicalPosition::Nearest);
            item.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_open(&mut self, open: bool) {
        match self.variant {
            Variant::Overlay => {
                for element in [&self.modal, &self.backdrop].into_iter().flatten() {
                    element.set_hidden(!open);
                }
            }
            Variant::Inline => self.results.set_hidden(!open),
        }
    }

    fn focus_input(&mut self) {
        if let Err(e) = self.input.focus() {
            warn(&format!("sifter: could not focus search input: {:?}", e));
        }
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn disable_input(&mut self, placeholder: &str) {
        self.input.set_disabled(true);
        self.input.set_placeholder(placeholder);
    }

    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            warn(&format!("sifter: navigation to {} failed: {:?}", url, e));
        }
    }
}

// =============================================================================
// Timers
// =============================================================================

/// `setTimeout`-backed timers that dispatch back into the controller.
pub struct WindowTimers {
    window: web_sys::Window,
    link: Link,
}

/// A scheduled `setTimeout` and the callback it will run. Dropping the
/// handle frees the callback, so cancelled timers do not leak.
pub struct TimerHandle {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timers for WindowTimers {
    type Handle = TimerHandle;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TimerHandle {
        let link = Rc::clone(&self.link);
        let callback = Closure::<dyn FnMut()>::new(move || {
            dispatch_linked(&link, Event::DebounceElapsed(ticket));
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .unwrap_or_else(|e| {
                warn(&format!("sifter: setTimeout failed: {:?}", e));
                0
            });
        TimerHandle {
            id,
            _callback: callback,
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.id);
    }
}

fn dispatch_linked(link: &Link, event: Event) {
    if let Some(shared) = link.get().and_then(Weak::upgrade) {
        dispatch(&shared, event);
    }
}

fn dispatch(shared: &Shared, event: Event) {
    // Re-entrant events (fired synchronously by a surface write) are dropped.
    match shared.try_borrow_mut() {
        Ok(mut controller) => controller.dispatch(event),
        Err(_) => console::debug_1(&JsValue::from_str("sifter: dropped re-entrant event")),
    }
}

// =============================================================================
// Binding
// =============================================================================

fn listen<E, F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), BindError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error("addEventListener"))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Index of the result item containing the event target.
fn item_index(event: &web_sys::Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let item = target.closest(&format!(".{}", ITEM_CLASS)).ok()??;
    item.get_attribute("data-index")?.parse().ok()
}

fn is_text_input(target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

fn contains(element: Option<&Element>, target: &web_sys::Node) -> bool {
    element.map(|el| el.contains(Some(target))).unwrap_or(false)
}

fn bind(options: JsValue) -> Result<(), BindError> {
    let config: SearchConfig = if options.is_undefined() || options.is_null() {
        SearchConfig::default()
    } else {
        from_value(options).map_err(|e| BindError::Options(e.to_string()))?
    };

    let window = web_sys::window().ok_or(BindError::NoDocument)?;
    let document = window.document().ok_or(BindError::NoDocument)?;

    let Some(surface) = WebSurface::find(window.clone(), &document, &config) else {
        console::debug_1(&JsValue::from_str(
            "sifter: search elements not found, nothing to bind",
        ));
        return Ok(());
    };
    let input = surface.input.clone();
    let results = surface.results.clone();
    let ids = config.elements.clone();
    let trigger: Option<Element> = document.get_element_by_id(&ids.trigger);
    let modal: Option<Element> = document.get_element_by_id(&ids.modal);

    let link: Link = Rc::new(OnceCell::new());
    let timers = WindowTimers {
        window,
        link: Rc::clone(&link),
    };
    let shared: Shared = Rc::new(RefCell::new(Controller::new(config.clone(), surface, timers)?));
    let _ = link.set(Rc::downgrade(&shared));

    // Query entry
    {
        let shared = Rc::clone(&shared);
        let field = input.clone();
        listen(&input, "input", move |_: web_sys::Event| {
            dispatch(&shared, Event::Input(field.value()));
        })?;
    }
    {
        let shared = Rc::clone(&shared);
        listen(&input, "keydown", move |e: KeyboardEvent| {
            let key = NavKey::from_key(&e.key());
            if key.is_handled() {
                e.prevent_default();
                e.stop_propagation();
                dispatch(&shared, Event::Key(key));
            }
        })?;
    }

    // Results region, delegated
    {
        let shared = Rc::clone(&shared);
        listen(&results, "mouseover", move |e: web_sys::Event| {
            if let Some(i) = item_index(&e) {
                dispatch(&shared, Event::Hover(i));
            }
        })?;
    }
    {
        let shared = Rc::clone(&shared);
        listen(&results, "click", move |e: web_sys::Event| {
            if let Some(i) = item_index(&e) {
                e.prevent_default();
                dispatch(&shared, Event::ResultClick(i));
            }
        })?;
    }

    // Optional affordances
    if let Some(trigger) = &trigger {
        let shared = Rc::clone(&shared);
        listen(trigger, "click", move |e: web_sys::Event| {
            e.stop_propagation();
            dispatch(&shared, Event::TriggerClick);
        })?;
    }
    for (id, reason) in [
        (&ids.backdrop, DismissReason::Backdrop),
        (&ids.close, DismissReason::CloseButton),
    ] {
        if let Some(element) = document.get_element_by_id(id) {
            let shared = Rc::clone(&shared);
            listen(&element, "click", move |e: web_sys::Event| {
                e.stop_propagation();
                dispatch(&shared, Event::Dismiss(reason));
            })?;
        }
    }

    // Page-level: shortcuts, Escape, outside clicks
    {
        let shared = Rc::clone(&shared);
        listen(&document, "keydown", move |e: KeyboardEvent| {
            let press = KeyPress {
                key: e.key(),
                ctrl: e.ctrl_key(),
                meta: e.meta_key(),
                in_text_input: is_text_input(e.target()),
            };
            let is_shortcut = shared
                .try_borrow()
                .map(|c| c.session().is_shortcut(&press))
                .unwrap_or(false);
            if is_shortcut {
                e.prevent_default();
            }
            dispatch(&shared, Event::GlobalKey(press));
        })?;
    }
    {
        let shared = Rc::clone(&shared);
        let input: Element = input.into();
        let results: Element = results.into();
        listen(&document, "click", move |e: web_sys::Event| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
                return;
            };
            let inside = contains(Some(&input), &target)
                || contains(Some(&results), &target)
                || contains(trigger.as_ref(), &target)
                || contains(modal.as_ref(), &target);
            if !inside {
                dispatch(&shared, Event::Dismiss(DismissReason::Outside));
            }
        })?;
    }

    // Corpus
    spawn_local(async move {
        let loader = IndexLoader::new(FetchSource, config.corpus_paths.clone())
            .with_tokenizer(config.tokenizer());
        let outcome = loader.load().await;
        if let LoadOutcome::Unavailable(failures) = &outcome {
            for failure in failures {
                warn(&format!("sifter: {}", failure));
            }
            warn("sifter: search index unavailable");
        }
        dispatch(&shared, Event::IndexLoaded(outcome));
    });

    Ok(())
}

/// Bind search to the page.
///
/// `options` is a (possibly partial) configuration object, e.g.
/// `{ limit: 8, variant: "inline" }`. Binding problems are reported on the
/// console; this never throws.
#[wasm_bindgen(js_name = initSearch)]
pub fn init_search(options: JsValue) {
    if let Err(e) = bind(options) {
        console::error_1(&JsValue::from_str(&format!("sifter: {}", e)));
    }
}

// =============================================================================
// Standalone index
// =============================================================================

/// A search index for pages with their own UI.
#[wasm_bindgen]
pub struct SifterIndex {
    index: SearchIndex,
}

#[wasm_bindgen]
impl SifterIndex {
    /// Build from corpus JSON text.
    #[wasm_bindgen(constructor)]
    pub fn new(corpus: &str) -> Result<SifterIndex, JsValue> {
        let index = parse_corpus(corpus.as_bytes(), "inline corpus", Default::default())
            .map_err(|e| e.to_string())?;
        Ok(SifterIndex { index })
    }

    #[wasm_bindgen]
    pub fn doc_count(&self) -> usize {
        self.index.doc_count()
    }

    /// Ranked, highlighted results:
    /// `[{ titleHtml, excerptHtml, url }, ...]`.
    #[wasm_bindgen]
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<JsValue, JsValue> {
        let renderer = crate::render::Renderer::default();
        let results: Vec<RenderedResult> = search(&self.index, query, limit.unwrap_or(DEFAULT_LIMIT))
            .into_iter()
            .map(|doc| renderer.render(doc, query))
            .collect();
        to_value(&results).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
