// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Active result selection, shared by keyboard and mouse.

/// Index into the rendered list, or nothing selected.
///
/// Movement is clamped to `[0, count-1]` and never wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn get(self) -> Option<usize> {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = None;
    }

    /// ArrowDown: from nothing to the first item, otherwise one down.
    pub fn next(&mut self, count: usize) {
        if count == 0 {
            self.0 = None;
            return;
        }
        self.0 = Some(match self.0 {
            None => 0,
            Some(i) => (i + 1).min(count - 1),
        });
    }

    /// ArrowUp: one up, stopping at the first item. Nothing stays nothing.
    pub fn prev(&mut self, count: usize) {
        if count == 0 {
            self.0 = None;
            return;
        }
        self.0 = self.0.map(|i| i.min(count - 1).saturating_sub(1));
    }

    /// Select `index` if it is in range. Returns whether it was.
    pub fn set(&mut self, index: usize, count: usize) -> bool {
        if index < count {
            self.0 = Some(index);
            true
        } else {
            false
        }
    }
}
