// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interaction controller.
//!
//! Ties the index, query engine and renderer to a search UI. All host input
//! arrives as an [`Event`] through [`Controller::dispatch`]; the pure
//! [`transition`] table picks an [`Action`], and the controller carries it
//! out against its [`SearchSurface`] and [`Timers`].
//!
//! ```text
//!   host events ──▶ dispatch ──▶ transition(phase, &event) ──▶ Action
//!                                                               │
//!            ┌──────────────────┬──────────────────┬────────────┘
//!            ▼                  ▼                  ▼
//!        Debouncer          search() +         SearchSurface
//!      (one pending)        Renderer           (show, select, open, navigate)
//! ```
//!
//! Everything lives in one [`Session`] owned by the controller. There is no
//! global state, so several independent search boxes can coexist on a page.

mod debounce;
mod selection;
mod state;
mod surface;

pub use debounce::{Debouncer, Ticket};
pub use selection::Selection;
pub use state::{transition, Action, Direction, DismissReason, Event, NavKey, Phase};
pub use surface::{SearchSurface, Timers};

use crate::config::{KeyChord, KeyPress, SearchConfig, Variant};
use crate::error::ConfigError;
use crate::index::SearchIndex;
use crate::loader::LoadOutcome;
use crate::render::{RenderedResult, Renderer};
use crate::search::search;

/// Per-page search state.
#[derive(Debug)]
pub struct Session {
    config: SearchConfig,
    renderer: Renderer,
    chords: Vec<KeyChord>,
    index: Option<SearchIndex>,
    phase: Phase,
    open: bool,
    query: String,
    results: Vec<RenderedResult>,
    selection: Selection,
}

impl Session {
    /// Validate `config` and start in [`Phase::Loading`].
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let chords = config.validate()?;
        Ok(Self {
            renderer: config.renderer(),
            config,
            chords,
            index: None,
            phase: Phase::Loading,
            open: false,
            query: String::new(),
            results: Vec::new(),
            selection: Selection::none(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RenderedResult] {
        &self.results
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection.get()
    }

    /// Whether `press` is one of the configured open shortcuts.
    pub fn is_shortcut(&self, press: &KeyPress) -> bool {
        self.chords.iter().any(|chord| chord.matches(press))
    }

    /// Run the current query and render every hit.
    fn evaluate(&mut self) {
        let Some(index) = &self.index else {
            self.results.clear();
            return;
        };
        let query = self.query.as_str();
        self.results = search(index, query, self.config.limit)
            .into_iter()
            .map(|doc| self.renderer.render(doc, query))
            .collect();
        self.selection.reset();
    }
}

/// Drives a [`SearchSurface`] from host events.
pub struct Controller<S, T: Timers> {
    session: Session,
    surface: S,
    timers: T,
    debouncer: Debouncer<T::Handle>,
}

impl<S, T> Controller<S, T>
where
    S: SearchSurface,
    T: Timers,
{
    pub fn new(config: SearchConfig, surface: S, timers: T) -> Result<Self, ConfigError> {
        Ok(Self {
            session: Session::new(config)?,
            surface,
            timers,
            debouncer: Debouncer::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Whether an evaluation is waiting on its debounce timer.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The single entry point for host events.
    pub fn dispatch(&mut self, event: Event) {
        let phase = self.session.phase;
        let action = transition(phase, &event);
        tracing::trace!(target: "sifter::controller", ?phase, ?action, "dispatch");

        match (action, event) {
            (Action::FinishLoading, Event::IndexLoaded(outcome)) => self.finish_loading(outcome),
            (Action::Reload, Event::IndexLoaded(LoadOutcome::Ready(index))) => self.reload(index),
            (Action::RecordQuery, Event::Input(text)) => self.record_query(text),
            (Action::Evaluate, Event::DebounceElapsed(ticket)) => {
                if self.debouncer.fire(ticket) {
                    self.show_query();
                } else {
                    tracing::debug!(
                        target: "sifter::controller",
                        ticket = ticket.get(),
                        "Ignoring stale debounce ticket"
                    );
                }
            }
            (Action::MoveSelection(direction), _) => self.move_selection(direction),
            (Action::Activate, _) => {
                if let Some(i) = self.session.selection.get() {
                    self.follow(i);
                }
            }
            (Action::Escape, _) => self.escape(),
            (Action::Select(i), _) => {
                let count = self.session.results.len();
                if self.session.selection.get() != Some(i)
                    && self.session.selection.set(i, count)
                {
                    self.surface.set_active(Some(i));
                }
            }
            (Action::Follow(i), _) => self.follow(i),
            (Action::Shortcut, Event::GlobalKey(press)) => self.shortcut(&press),
            (Action::Open, _) => self.open(),
            (Action::Dismiss, _) => self.dismiss(),
            _ => {}
        }
    }

    fn finish_loading(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Ready(index) => {
                self.session.index = Some(index);
                self.session.phase = Phase::Ready;
                // Text typed while the corpus was in flight.
                if !self.session.query.trim().is_empty() {
                    self.schedule();
                }
            }
            LoadOutcome::Unavailable(failures) => {
                tracing::warn!(
                    target: "sifter::controller",
                    attempts = failures.len(),
                    "Search disabled for this session"
                );
                self.debouncer.cancel(&mut self.timers);
                self.session.phase = Phase::Disabled;
                self.surface
                    .disable_input(&self.session.config.unavailable_placeholder);
            }
        }
    }

    fn reload(&mut self, index: SearchIndex) {
        tracing::debug!(
            target: "sifter::controller",
            documents = index.doc_count(),
            "Replacing search index"
        );
        self.session.index = Some(index);
        if self.session.phase == Phase::ResultsShown {
            self.debouncer.cancel(&mut self.timers);
            self.show_query();
        }
    }

    fn record_query(&mut self, text: String) {
        self.session.query = text;
        if self.session.phase == Phase::Loading {
            return;
        }
        if self.session.query.trim().is_empty() {
            self.debouncer.cancel(&mut self.timers);
            self.clear_results();
        } else {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        let delay = self.session.config.debounce();
        let ticket = self.debouncer.schedule(&mut self.timers, delay);
        tracing::trace!(target: "sifter::controller", ticket = ticket.get(), "Evaluation scheduled");
    }

    fn show_query(&mut self) {
        self.session.evaluate();
        tracing::debug!(
            target: "sifter::controller",
            query = self.session.query.as_str(),
            hits = self.session.results.len(),
            "Query evaluated"
        );

        if self.session.results.is_empty() {
            let message = self
                .session
                .renderer
                .empty_state(&self.session.config.empty_message, &self.session.query);
            self.surface.show_empty(&message);
        } else {
            self.surface.show_results(&self.session.results);
        }
        self.session.phase = Phase::ResultsShown;
        if self.session.config.variant == Variant::Inline {
            self.set_open(true);
        }
    }

    /// Drop the shown list and fall back to `Ready`.
    fn clear_results(&mut self) {
        self.session.results.clear();
        self.session.selection.reset();
        self.surface.clear_results();
        if self.session.phase == Phase::ResultsShown {
            self.session.phase = Phase::Ready;
        }
        // The inline dropdown is only shown while it has something in it.
        if self.session.config.variant == Variant::Inline {
            self.set_open(false);
        }
    }

    fn move_selection(&mut self, direction: Direction) {
        let count = self.session.results.len();
        match direction {
            Direction::Down => self.session.selection.next(count),
            Direction::Up => self.session.selection.prev(count),
        }
        let active = self.session.selection.get();
        self.surface.set_active(active);
        if let Some(i) = active {
            self.surface.reveal(i);
        }
    }

    fn follow(&mut self, i: usize) {
        if let Some(result) = self.session.results.get(i) {
            self.surface.navigate(&result.url);
        }
    }

    fn shortcut(&mut self, press: &KeyPress) {
        if press.key == "Escape" {
            if self.session.open {
                self.escape();
            }
            return;
        }
        if self.session.is_shortcut(press) {
            self.open();
        }
    }

    fn open(&mut self) {
        if self.session.config.variant == Variant::Overlay {
            self.set_open(true);
        }
        self.surface.focus_input();
    }

    fn escape(&mut self) {
        self.debouncer.cancel(&mut self.timers);
        if self.session.phase != Phase::Disabled {
            self.session.query.clear();
            self.surface.clear_input();
            self.clear_results();
        }
        self.set_open(false);
    }

    fn dismiss(&mut self) {
        self.debouncer.cancel(&mut self.timers);
        if self.session.phase == Phase::ResultsShown {
            self.clear_results();
        }
        self.set_open(false);
    }

    fn set_open(&mut self, open: bool) {
        if self.session.open != open {
            self.session.open = open;
            self.surface.set_open(open);
        }
    }
}
