// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What the controller needs from its host page.
//!
//! [`SearchSurface`] is the UI element contract: an input, a results region
//! and (for the overlay variant) something that opens and closes. [`Timers`]
//! is the clock. The browser binding implements both on top of the DOM;
//! tests implement them with recorders.

use std::time::Duration;

use super::debounce::Ticket;
use crate::render::RenderedResult;

/// The page elements the controller drives.
pub trait SearchSurface {
    /// Replace the results region with `results` and make it visible.
    fn show_results(&mut self, results: &[RenderedResult]);

    /// Replace the results region with the no-results message (markup).
    fn show_empty(&mut self, message_html: &str);

    /// Empty and hide the results region.
    fn clear_results(&mut self);

    /// Mark item `index` active, or none.
    fn set_active(&mut self, index: Option<usize>);

    /// Scroll item `index` into view if any part of it is hidden. Only
    /// keyboard moves ask for this; the pointer is already on the item.
    fn reveal(&mut self, index: usize);

    /// Open or close the modal / dropdown container.
    fn set_open(&mut self, open: bool);

    fn focus_input(&mut self);

    /// Erase the text in the input.
    fn clear_input(&mut self);

    /// Disable the input and show `placeholder`. Search is unavailable for
    /// the rest of the session.
    fn disable_input(&mut self, placeholder: &str);

    /// Leave the page for `url`.
    fn navigate(&mut self, url: &str);
}

/// One-shot timers. When a timer fires, the host dispatches
/// `Event::DebounceElapsed(ticket)` back to the controller.
pub trait Timers {
    type Handle;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}
