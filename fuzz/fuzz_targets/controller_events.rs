// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the interaction controller.
//!
//! Random event sequences must never panic, never leave the selection out of
//! range and never navigate anywhere a shown result does not point.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sifter::controller::{DismissReason, NavKey};
use sifter::testing::{sample_index, ManualTimers, RecordingSurface};
use sifter::{Controller, Event, KeyPress, LoadOutcome, SearchConfig};

#[derive(Debug, Arbitrary)]
enum Step {
    Load(bool),
    Input(String),
    Fire,
    FireStale(u8),
    Down,
    Up,
    Enter,
    Escape,
    Hover(u8),
    Click(u8),
    Shortcut(char, bool),
    Trigger,
    Dismiss(u8),
}

fuzz_target!(|steps: Vec<Step>| {
    let Ok(mut c) = Controller::new(
        SearchConfig::default(),
        RecordingSurface::new(),
        ManualTimers::new(),
    ) else {
        return;
    };

    for step in steps.into_iter().take(64) {
        let event = match step {
            Step::Load(true) => Event::IndexLoaded(LoadOutcome::Ready(sample_index())),
            Step::Load(false) => Event::IndexLoaded(LoadOutcome::Unavailable(Vec::new())),
            Step::Input(text) => Event::Input(text),
            Step::Fire => match c.timers_mut().pop_latest() {
                Some(ticket) => Event::DebounceElapsed(ticket),
                None => continue,
            },
            Step::FireStale(n) => match c.timers_mut().tickets().first() {
                Some(ticket) if n % 2 == 0 => Event::DebounceElapsed(*ticket),
                _ => continue,
            },
            Step::Down => Event::Key(NavKey::ArrowDown),
            Step::Up => Event::Key(NavKey::ArrowUp),
            Step::Enter => Event::Key(NavKey::Enter),
            Step::Escape => Event::Key(NavKey::Escape),
            Step::Hover(i) => Event::Hover(usize::from(i)),
            Step::Click(i) => Event::ResultClick(usize::from(i)),
            Step::Shortcut(key, ctrl) => {
                let press = KeyPress::new(key.to_string());
                Event::GlobalKey(if ctrl { press.with_ctrl() } else { press })
            }
            Step::Trigger => Event::TriggerClick,
            Step::Dismiss(n) => Event::Dismiss(match n % 3 {
                0 => DismissReason::Outside,
                1 => DismissReason::Backdrop,
                _ => DismissReason::CloseButton,
            }),
        };
        c.dispatch(event);

        let session = c.session();
        if let Some(i) = session.selection() {
            assert!(i < session.results().len(), "selection {} out of range", i);
        }
        for url in c.surface().navigations() {
            assert!(url.starts_with('/'), "navigated to {:?}", url);
        }
    }
});
