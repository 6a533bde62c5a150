#![forbid(unsafe_code)]

//! Card stack navigator state.
//!
//! [`CardStackState`] owns the item list and the active index. Every index
//! change, whatever its origin (keyboard, click, dot, swipe or the
//! auto-advance timer), goes through [`CardStackState::go_to`],
//! [`next`](CardStackState::next) or [`prev`](CardStackState::prev), so the
//! active index is always normalized and the change callback fires exactly
//! once per change.
//!
//! # Invariants
//!
//! 1. When `items` is non-empty, `active < items.len()`.
//! 2. Replacing `items` re-wraps `active` modulo the new length.
//! 3. With `loop` off, `next()` on the last card and `prev()` on the first
//!    card are no-ops.
//! 4. With no items every operation is a no-op.
//!
//! # Example
//!
//! ```
//! use fanstack_widgets::card_stack::{CardStackConfig, CardStackItem, CardStackState};
//!
//! let items = (0..5).map(|i| CardStackItem::new(i as u64, format!("card {i}"))).collect();
//! let mut state = CardStackState::new(items, &CardStackConfig::default());
//! state.prev();
//! assert_eq!(state.active_index(), Some(4));
//! ```

use core::fmt;
use std::collections::HashSet;
use std::time::Duration;

use fanstack_core::event::{KeyCode, KeyEvent};

use crate::swipe::{DragRelease, SwipeConfig, SwipeDecision};

/// Shortest period the auto-advance timer may run at.
pub const MIN_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(700);

/// Notification fired with `(index, item)` whenever the active card changes.
pub type ChangeCallback = Box<dyn FnMut(usize, &CardStackItem) + Send>;

/// Unique key of a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One card. Only `id` matters to navigation; the rest is display payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStackItem {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub image_src: Option<String>,
    pub href: Option<String>,
    pub cta_label: Option<String>,
    pub tag: Option<String>,
}

impl CardStackItem {
    /// Create a card with just an id and a title.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            image_src: None,
            href: None,
            cta_label: None,
            tag: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image_src(mut self, src: impl Into<String>) -> Self {
        self.image_src = Some(src.into());
        self
    }

    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn cta_label(mut self, label: impl Into<String>) -> Self {
        self.cta_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Behavior and presentation settings for a card stack.
///
/// Presentation fields only feed [`compute_layout`](crate::layout::compute_layout);
/// they never influence navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStackConfig {
    /// Index shown on mount; wrapped into range.
    pub initial_index: i64,
    /// Number of cards rendered at once, centered on the active card.
    pub max_visible: usize,
    pub card_width: f32,
    pub card_height: f32,
    /// Fraction of a card hidden under its neighbour (0..1).
    pub overlap: f32,
    /// Rotation of the outermost visible card, in degrees.
    pub spread_deg: f32,
    pub perspective_px: f32,
    pub depth_px: f32,
    pub tilt_x_deg: f32,
    pub active_lift_px: f32,
    pub active_scale: f32,
    pub inactive_scale: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    /// Wrap past either end.
    pub loop_nav: bool,
    pub auto_advance: bool,
    pub interval: Duration,
    pub pause_on_hover: bool,
    pub show_dots: bool,
    pub swipe: SwipeConfig,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            max_visible: 7,
            card_width: 520.0,
            card_height: 320.0,
            overlap: 0.48,
            spread_deg: 48.0,
            perspective_px: 1100.0,
            depth_px: 140.0,
            tilt_x_deg: 12.0,
            active_lift_px: 22.0,
            active_scale: 1.03,
            inactive_scale: 0.94,
            spring_stiffness: 280.0,
            spring_damping: 28.0,
            loop_nav: true,
            auto_advance: false,
            interval: Duration::from_millis(2800),
            pause_on_hover: true,
            show_dots: true,
            swipe: SwipeConfig::default(),
        }
    }
}

impl CardStackConfig {
    #[must_use]
    pub fn initial_index(mut self, index: i64) -> Self {
        self.initial_index = index;
        self
    }

    #[must_use]
    pub fn max_visible(mut self, count: usize) -> Self {
        self.max_visible = count;
        self
    }

    #[must_use]
    pub fn card_size(mut self, width: f32, height: f32) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    #[must_use]
    pub fn loop_nav(mut self, enabled: bool) -> Self {
        self.loop_nav = enabled;
        self
    }

    /// Enable or disable auto-advance with the given period.
    #[must_use]
    pub fn auto_advance(mut self, enabled: bool, interval: Duration) -> Self {
        self.auto_advance = enabled;
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = enabled;
        self
    }

    #[must_use]
    pub fn show_dots(mut self, enabled: bool) -> Self {
        self.show_dots = enabled;
        self
    }

    #[must_use]
    pub fn swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }
}

/// Normalize `n` into `[0, len)`. Returns 0 when `len == 0`.
#[must_use]
pub fn wrap_index(n: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    n.rem_euclid(len as i64) as usize
}

/// Signed distance from card `i` to the active card.
///
/// In loop mode the shorter way around the ring wins; a tie (exactly half
/// the ring apart) keeps the un-wrapped value.
#[must_use]
pub fn compute_offset(i: usize, active: usize, len: usize, looping: bool) -> i64 {
    let raw = i as i64 - active as i64;
    if !looping || len <= 1 {
        return raw;
    }
    let len = len as i64;
    let alt = if raw > 0 { raw - len } else { raw + len };
    if alt.abs() < raw.abs() { alt } else { raw }
}

/// Largest `|offset|` that is still rendered.
#[must_use]
pub const fn max_offset(max_visible: usize) -> usize {
    max_visible / 2
}

/// What the auto-advance timer should currently be doing.
///
/// Any field change means the running timer must be cancelled and a new one
/// scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoAdvancePlan {
    /// Tick period, already clamped to [`MIN_AUTO_ADVANCE_INTERVAL`].
    pub period: Duration,
    pub looping: bool,
    pub active: usize,
    pub len: usize,
}

/// Navigator state for one mounted card stack.
pub struct CardStackState {
    items: Vec<CardStackItem>,
    active: usize,
    looping: bool,
    max_visible: usize,
    hovering: bool,
    focused: bool,
    reduced_motion: bool,
    auto_advance: bool,
    interval: Duration,
    pause_on_hover: bool,
    on_change: Option<ChangeCallback>,
}

impl CardStackState {
    /// Create navigator state with the initial index wrapped into range.
    ///
    /// No change notification is fired here; call [`announce`](Self::announce)
    /// once the owner is ready to receive the mount notification.
    #[must_use]
    pub fn new(items: Vec<CardStackItem>, config: &CardStackConfig) -> Self {
        debug_assert!(has_unique_ids(&items), "card stack items must have unique ids");
        let active = wrap_index(config.initial_index, items.len());
        Self {
            items,
            active,
            looping: config.loop_nav,
            max_visible: config.max_visible,
            hovering: false,
            focused: false,
            reduced_motion: false,
            auto_advance: config.auto_advance,
            interval: config.interval,
            pause_on_hover: config.pause_on_hover,
            on_change: None,
        }
    }

    /// Attach the change notification.
    #[must_use]
    pub fn with_on_change(mut self, callback: ChangeCallback) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Replace (or remove) the change notification.
    pub fn set_on_change(&mut self, callback: Option<ChangeCallback>) {
        self.on_change = callback;
    }

    /// Fire the change notification for the current card (mount).
    pub fn announce(&mut self) {
        self.notify();
    }

    /// Re-apply behavior settings from a config. The active index is kept.
    pub fn apply_config(&mut self, config: &CardStackConfig) {
        self.looping = config.loop_nav;
        self.max_visible = config.max_visible;
        self.auto_advance = config.auto_advance;
        self.interval = config.interval;
        self.pause_on_hover = config.pause_on_hover;
    }

    // --- Accessors --------------------------------------------------------

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[CardStackItem] {
        &self.items
    }

    /// The active index, or `None` when there are no items.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.active)
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&CardStackItem> {
        self.items.get(self.active)
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Configured visible count, as given.
    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Visible count rounded down to an odd number for symmetric centering.
    #[must_use]
    pub fn effective_max_visible(&self) -> usize {
        if self.max_visible > 0 && self.max_visible % 2 == 0 {
            self.max_visible - 1
        } else {
            self.max_visible
        }
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        !self.items.is_empty() && (self.looping || self.active > 0)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        !self.items.is_empty() && (self.looping || self.active + 1 < self.items.len())
    }

    /// Offset of card `i` from the active card.
    #[must_use]
    pub fn offset_of(&self, i: usize) -> i64 {
        compute_offset(i, self.active, self.items.len(), self.looping)
    }

    /// Whether card `i` is inside the rendered window.
    #[must_use]
    pub fn is_visible(&self, i: usize) -> bool {
        i < self.items.len()
            && self.offset_of(i).unsigned_abs() <= max_offset(self.max_visible) as u64
    }

    /// Whether every item id is distinct.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        has_unique_ids(&self.items)
    }

    // --- Navigation -------------------------------------------------------

    /// Jump to `index`, wrapped modulo the item count.
    ///
    /// Returns `true` if the active card changed.
    pub fn go_to(&mut self, index: i64) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.set_active(wrap_index(index, self.items.len()))
    }

    /// Direct selection of a card or pagination dot by absolute index.
    pub fn select(&mut self, index: usize) -> bool {
        self.go_to(index as i64)
    }

    /// Step forward one card.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.go_to(self.active as i64 + 1)
    }

    /// Step back one card.
    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.go_to(self.active as i64 - 1)
    }

    /// Replace the item list, re-wrapping the active index.
    pub fn set_items(&mut self, items: Vec<CardStackItem>) {
        debug_assert!(has_unique_ids(&items), "card stack items must have unique ids");
        self.items = items;
        let wrapped = wrap_index(self.active as i64, self.items.len());
        if self.items.is_empty() {
            self.active = 0;
        } else {
            self.set_active(wrapped);
        }
    }

    // --- Input ------------------------------------------------------------

    /// Left/Right arrows step back/forward while focused.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused || !key.is_actionable() {
            return false;
        }
        match key.code {
            KeyCode::Left => {
                self.prev();
                true
            }
            KeyCode::Right => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Interpret the end of a drag on the active card.
    ///
    /// Dragging right reveals the previous card. Under reduced motion the
    /// gesture never navigates.
    pub fn release_drag(
        &mut self,
        release: DragRelease,
        swipe: &SwipeConfig,
        card_width: f32,
    ) -> SwipeDecision {
        if self.reduced_motion || self.items.is_empty() {
            return SwipeDecision::SpringBack;
        }
        let decision = swipe.classify(release, card_width);
        match decision {
            SwipeDecision::Prev => {
                self.prev();
            }
            SwipeDecision::Next => {
                self.next();
            }
            SwipeDecision::SpringBack => {}
        }
        decision
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    pub fn set_pause_on_hover(&mut self, enabled: bool) {
        self.pause_on_hover = enabled;
    }

    pub fn set_max_visible(&mut self, count: usize) {
        self.max_visible = count;
    }

    // --- Auto-advance -----------------------------------------------------

    /// The timer that should be running right now, if any.
    #[must_use]
    pub fn auto_advance_plan(&self) -> Option<AutoAdvancePlan> {
        if !self.auto_advance || self.reduced_motion || self.items.is_empty() {
            return None;
        }
        if self.pause_on_hover && self.hovering {
            return None;
        }
        Some(AutoAdvancePlan {
            period: self.interval.max(MIN_AUTO_ADVANCE_INTERVAL),
            looping: self.looping,
            active: self.active,
            len: self.items.len(),
        })
    }

    /// Apply one timer tick. Never wraps when looping is off.
    pub fn auto_advance_tick(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        if self.looping || self.active + 1 < self.items.len() {
            self.next()
        } else {
            false
        }
    }

    // --- Internals --------------------------------------------------------

    fn set_active(&mut self, index: usize) -> bool {
        if index == self.active {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.active, to = index, len = self.items.len(), "card stack index changed");
        self.active = index;
        self.notify();
        true
    }

    fn notify(&mut self) {
        if let (Some(callback), Some(item)) = (self.on_change.as_mut(), self.items.get(self.active)) {
            callback(self.active, item);
        }
    }
}

impl fmt::Debug for CardStackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardStackState")
            .field("len", &self.items.len())
            .field("active", &self.active)
            .field("looping", &self.looping)
            .field("max_visible", &self.max_visible)
            .field("hovering", &self.hovering)
            .field("focused", &self.focused)
            .field("reduced_motion", &self.reduced_motion)
            .field("auto_advance", &self.auto_advance)
            .field("interval", &self.interval)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

fn has_unique_ids(items: &[CardStackItem]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(&item.id))
}
