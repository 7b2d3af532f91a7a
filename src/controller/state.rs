// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phases, events and the transition table.
//!
//! ```text
//!              IndexLoaded(Ready)
//!   Loading ─────────────────────────▶ Ready ◀──────────────┐
//!      │                                 │                  │ cleared input,
//!      │ IndexLoaded(Unavailable)        │ debounced,       │ Escape, dismiss
//!      ▼                                 │ non-empty query  │
//!   Disabled (terminal)                  ▼                  │
//!                                   ResultsShown ───────────┘
//! ```
//!
//! [`transition`] only decides *what* to do. Side effects (timers, surface
//! updates, navigation) happen in the controller's `dispatch`.

use crate::config::KeyPress;
use crate::loader::LoadOutcome;

use super::debounce::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Corpus fetch in flight. Typing is recorded, not evaluated.
    Loading,
    /// Index available, nothing shown.
    Ready,
    /// A result list (possibly the empty-state message) is on screen.
    ResultsShown,
    /// Corpus unavailable for the rest of the session.
    Disabled,
}

/// Keys handled while focus is in the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" => NavKey::ArrowDown,
            "ArrowUp" => NavKey::ArrowUp,
            "Enter" => NavKey::Enter,
            "Escape" | "Esc" => NavKey::Escape,
            _ => NavKey::Other,
        }
    }

    /// Whether the host should suppress the key's default behavior.
    pub fn is_handled(self) -> bool {
        !matches!(self, NavKey::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Click outside the input and results.
    Outside,
    Backdrop,
    CloseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

#[derive(Debug)]
pub enum Event {
    /// The loader finished (startup or an explicit reload).
    IndexLoaded(LoadOutcome),
    /// The input now holds this text.
    Input(String),
    /// A debounce timer fired.
    DebounceElapsed(Ticket),
    Key(NavKey),
    /// A key press anywhere on the page outside the search input.
    GlobalKey(KeyPress),
    /// Pointer entered result item `i`.
    Hover(usize),
    /// Result item `i` was clicked.
    ResultClick(usize),
    TriggerClick,
    Dismiss(DismissReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave `Loading` with the loader's outcome.
    FinishLoading,
    /// Swap in a freshly loaded index.
    Reload,
    /// Store the input text; schedule, or clear when blank.
    RecordQuery,
    /// Run the query if the ticket is current.
    Evaluate,
    MoveSelection(Direction),
    /// Navigate to the selected result, if any.
    Activate,
    /// Close, clear the query and results.
    Escape,
    Select(usize),
    /// Navigate to result `i`.
    Follow(usize),
    /// Check the press against the configured chords.
    Shortcut,
    Open,
    /// Close and clear results, keeping the query text.
    Dismiss,
    Ignore,
}

/// The transition table.
pub fn transition(phase: Phase, event: &Event) -> Action {
    use Phase::*;

    match (phase, event) {
        (Loading, Event::IndexLoaded(_)) => Action::FinishLoading,
        // A failed reload keeps the index we have.
        (Ready | ResultsShown, Event::IndexLoaded(LoadOutcome::Ready(_))) => Action::Reload,
        (_, Event::IndexLoaded(_)) => Action::Ignore,

        (Disabled, Event::Input(_)) => Action::Ignore,
        (_, Event::Input(_)) => Action::RecordQuery,

        (Ready | ResultsShown, Event::DebounceElapsed(_)) => Action::Evaluate,
        (_, Event::DebounceElapsed(_)) => Action::Ignore,

        (ResultsShown, Event::Key(NavKey::ArrowDown)) => Action::MoveSelection(Direction::Down),
        (ResultsShown, Event::Key(NavKey::ArrowUp)) => Action::MoveSelection(Direction::Up),
        (ResultsShown, Event::Key(NavKey::Enter)) => Action::Activate,
        (_, Event::Key(NavKey::Escape)) => Action::Escape,
        (_, Event::Key(_)) => Action::Ignore,

        (_, Event::GlobalKey(_)) => Action::Shortcut,

        (ResultsShown, Event::Hover(i)) => Action::Select(*i),
        (ResultsShown, Event::ResultClick(i)) => Action::Follow(*i),
        (_, Event::Hover(_) | Event::ResultClick(_)) => Action::Ignore,

        (_, Event::TriggerClick) => Action::Open,
        (_, Event::Dismiss(_)) => Action::Dismiss,
    }
}
