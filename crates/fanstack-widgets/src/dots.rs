#![forbid(unsafe_code)]

//! Pagination dots for text surfaces.
//!
//! Renders the active card as a row of symbols (`"○○●○"`), falling back to
//! a compact `"3/4"` counter when the row would not fit the available width.

use unicode_width::UnicodeWidthStr;

use crate::card_stack::CardStackState;

/// A row of pagination dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dots<'a> {
    active: Option<usize>,
    total: usize,
    active_symbol: &'a str,
    inactive_symbol: &'a str,
}

impl Default for Dots<'_> {
    fn default() -> Self {
        Self {
            active: None,
            total: 0,
            active_symbol: "●",
            inactive_symbol: "○",
        }
    }
}

impl<'a> Dots<'a> {
    /// Dots for `total` cards with `active` highlighted (0-based).
    #[must_use]
    pub fn new(active: Option<usize>, total: usize) -> Self {
        Self {
            active,
            total,
            ..Self::default()
        }
    }

    /// Dots mirroring a navigator.
    #[must_use]
    pub fn from_state(state: &CardStackState) -> Self {
        Self::new(state.active_index(), state.len())
    }

    #[must_use]
    pub fn symbols(mut self, active: &'a str, inactive: &'a str) -> Self {
        self.active_symbol = active;
        self.inactive_symbol = inactive;
        self
    }

    /// Format for at most `max_width` terminal columns.
    ///
    /// Returns an empty string when there is nothing to show or no room.
    #[must_use]
    pub fn format(&self, max_width: usize) -> String {
        if self.total == 0 || max_width == 0 {
            return String::new();
        }
        self.format_row(max_width)
            .unwrap_or_else(|| self.format_compact())
    }

    fn format_compact(&self) -> String {
        let current = self.active.map_or(0, |a| a.min(self.total - 1) + 1);
        format!("{current}/{}", self.total)
    }

    fn format_row(&self, max_width: usize) -> Option<String> {
        let symbol_width = UnicodeWidthStr::width(self.active_symbol)
            .max(UnicodeWidthStr::width(self.inactive_symbol));
        if symbol_width == 0 || self.total > max_width / symbol_width {
            return None;
        }

        let out: String = (0..self.total)
            .map(|i| {
                if Some(i) == self.active {
                    self.active_symbol
                } else {
                    self.inactive_symbol
                }
            })
            .collect();

        (UnicodeWidthStr::width(out.as_str()) <= max_width).then_some(out)
    }
}
