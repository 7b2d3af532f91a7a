// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-slot debouncing.
//!
//! At most one evaluation is ever pending. Scheduling a new one cancels the
//! old timer and replaces it in the same step. Every schedule gets a fresh
//! [`Ticket`]; when a timer fires, only the ticket currently in the slot is
//! honored. A host whose timer cannot be cancelled in time (or fires late)
//! is therefore harmless: its ticket is stale and gets ignored.

use std::time::Duration;

use super::surface::Timers;

/// Identity of one scheduled evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct Debouncer<H> {
    issued: u64,
    pending: Option<(Ticket, H)>,
}

impl<H> Default for Debouncer<H> {
    fn default() -> Self {
        Self {
            issued: 0,
            pending: None,
        }
    }
}

impl<H> Debouncer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and schedule a new evaluation.
    pub fn schedule<T>(&mut self, timers: &mut T, delay: Duration) -> Ticket
    where
        T: Timers<Handle = H>,
    {
        self.cancel(timers);
        self.issued += 1;
        let ticket = Ticket(self.issued);
        let handle = timers.schedule(delay, ticket);
        self.pending = Some((ticket, handle));
        ticket
    }

    /// Cancel the pending evaluation, if any.
    pub fn cancel<T>(&mut self, timers: &mut T)
    where
        T: Timers<Handle = H>,
    {
        if let Some((_, handle)) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    /// Claim the slot for a fired timer. True only for the current ticket;
    /// the slot is then empty.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending {
            Some((current, _)) if current == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }
}
