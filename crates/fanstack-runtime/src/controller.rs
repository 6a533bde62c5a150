#![forbid(unsafe_code)]

//! Event-driven glue around one mounted card stack.
//!
//! [`CardStackController`] owns the navigator state and its auto-advance
//! timer. Hosts feed it input [`Event`]s and drain timer ticks with
//! [`poll_ticks`](CardStackController::poll_ticks) or
//! [`wait_tick`](CardStackController::wait_tick); after every mutation the
//! timer is reconciled against the new state.
//!
//! Pointer input arrives in terminal cells. The stage occupies `area`; cell
//! columns are converted to stage pixels with `px_per_cell`, measured from the
//! horizontal centre of the area.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use fanstack_core::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use fanstack_core::geometry::Rect;
use fanstack_core::motion::MotionPreference;
use fanstack_widgets::{
    CardStackConfig, CardStackItem, CardStackState, ChangeCallback, Dots, DragTracker,
    StackLayout, SwipeDecision, compute_layout,
};

use crate::auto_advance::AutoAdvance;
use crate::subscription::Tick;

/// Default horizontal size of one terminal cell, in stage pixels.
pub const DEFAULT_PX_PER_CELL: f32 = 8.0;

/// A pointer press that has not been released yet.
#[derive(Debug)]
struct Press {
    /// Card under the pointer when the button went down.
    index: usize,
    tracker: DragTracker,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not for the card stack.
    Ignored,
    /// The event was consumed without changing the active card.
    Consumed,
    /// The active card changed.
    Changed,
}

/// Result of waiting for a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickWait {
    /// A live tick moved the active card.
    Advanced,
    /// A live tick arrived but the card stayed (last card with looping off).
    Held,
    /// No live tick before the timeout, or no timer running.
    TimedOut,
}

impl Outcome {
    fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Consumed }
    }
}

/// One mounted card stack plus its timer.
pub struct CardStackController {
    state: CardStackState,
    config: CardStackConfig,
    area: Rect,
    px_per_cell: f32,
    press: Option<Press>,
    timer: AutoAdvance,
    ticks: mpsc::Receiver<Tick>,
    mounted: bool,
}

impl CardStackController {
    /// Create an unmounted controller.
    #[must_use]
    pub fn new(items: Vec<CardStackItem>, config: CardStackConfig) -> Self {
        let (sender, ticks) = mpsc::channel();
        Self {
            state: CardStackState::new(items, &config),
            config,
            area: Rect::default(),
            px_per_cell: DEFAULT_PX_PER_CELL,
            press: None,
            timer: AutoAdvance::new(sender),
            ticks,
            mounted: false,
        }
    }

    #[must_use]
    pub fn with_on_change(mut self, callback: ChangeCallback) -> Self {
        self.state.set_on_change(Some(callback));
        self
    }

    #[must_use]
    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.state.set_reduced_motion(motion.is_reduced());
        if motion.is_reduced() {
            self.press = None;
        }
        self.reconcile();
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_px_per_cell(mut self, px: f32) -> Self {
        self.px_per_cell = px;
        self
    }

    // --- Lifecycle --------------------------------------------------------

    /// Announce the initial card and start the timer if it should run.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!(len = self.state.len(), active = ?self.state.active_index(), "card stack mounted");
        self.state.announce();
        self.reconcile();
    }

    /// Stop the timer and drop any in-flight gesture.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.press = None;
        self.timer.cancel();
        tracing::debug!("card stack unmounted");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- Accessors --------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &CardStackState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &CardStackConfig {
        &self.config
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Placement of every visible card.
    #[must_use]
    pub fn layout(&self) -> StackLayout {
        compute_layout(&self.state, &self.config)
    }

    #[must_use]
    pub fn dots(&self) -> Dots<'static> {
        Dots::from_state(&self.state)
    }

    /// Link of the active card, when the dots row is shown.
    #[must_use]
    pub fn open_link(&self) -> Option<&str> {
        if !self.config.show_dots {
            return None;
        }
        self.state.active_item().and_then(|item| item.href.as_deref())
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn timer_generation(&self) -> u64 {
        self.timer.generation()
    }

    // --- Mutation ---------------------------------------------------------

    pub fn next(&mut self) -> bool {
        let changed = self.state.next();
        self.reconcile();
        changed
    }

    pub fn prev(&mut self) -> bool {
        let changed = self.state.prev();
        self.reconcile();
        changed
    }

    pub fn go_to(&mut self, index: i64) -> bool {
        let changed = self.state.go_to(index);
        self.reconcile();
        changed
    }

    pub fn set_items(&mut self, items: Vec<CardStackItem>) {
        self.state.set_items(items);
        self.reconcile();
    }

    /// Replace the config; the active index is kept.
    pub fn set_config(&mut self, config: CardStackConfig) {
        self.state.apply_config(&config);
        self.config = config;
        self.reconcile();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.state.set_reduced_motion(reduced);
        if reduced {
            self.press = None;
        }
        self.reconcile();
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    // --- Input ------------------------------------------------------------

    /// Handle one input event, timestamped now.
    pub fn handle_event(&mut self, event: &Event) -> Outcome {
        self.handle_event_at(event, Instant::now())
    }

    /// Handle one input event observed at `now`.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> Outcome {
        let outcome = match event {
            Event::Key(key) => {
                let before = self.state.active_index();
                if self.state.handle_key(key) {
                    Outcome::from_changed(before != self.state.active_index())
                } else {
                    Outcome::Ignored
                }
            }
            Event::Focus(focused) => {
                self.state.set_focused(*focused);
                Outcome::Consumed
            }
            Event::Hover(hovering) => {
                self.state.set_hovering(*hovering);
                Outcome::Consumed
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Tick => {
                if self.mounted && self.state.auto_advance_plan().is_some() {
                    Outcome::from_changed(self.state.auto_advance_tick())
                } else {
                    Outcome::Ignored
                }
            }
        };
        self.reconcile();
        outcome
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> Outcome {
        let inside = self.area.contains(mouse.x, mouse.y);
        if inside != self.state.is_hovering() {
            self.state.set_hovering(inside);
        }

        let stage_x = self.stage_x(mouse.x);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let Some(index) = self.layout().hit_test(stage_x) else {
                    return Outcome::Consumed;
                };
                let window = self.config.swipe.velocity_window;
                self.press = Some(Press {
                    index,
                    tracker: DragTracker::begin(stage_x, now, window),
                });
                Outcome::Consumed
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.press.as_mut() {
                Some(press) => {
                    press.tracker.update(stage_x, now);
                    Outcome::Consumed
                }
                None => Outcome::Ignored,
            },
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(press) = self.press.take() else {
                    return Outcome::Ignored;
                };
                self.release(press, stage_x, now)
            }
            _ if inside => Outcome::Consumed,
            _ => Outcome::Ignored,
        }
    }

    fn release(&mut self, press: Press, stage_x: f32, now: Instant) -> Outcome {
        let release = press.tracker.release(stage_x, now);
        let swipe = self.config.swipe;

        if swipe.is_click(release) {
            return Outcome::from_changed(self.state.select(press.index));
        }
        // Only the active card is draggable.
        if Some(press.index) != self.state.active_index() {
            return Outcome::Consumed;
        }
        let before = self.state.active_index();
        let decision = self
            .state
            .release_drag(release, &swipe, self.config.card_width);
        tracing::debug!(
            travel = release.travel,
            velocity = release.velocity,
            ?decision,
            "card stack drag released"
        );
        match decision {
            SwipeDecision::SpringBack => Outcome::Consumed,
            _ => Outcome::from_changed(before != self.state.active_index()),
        }
    }

    fn stage_x(&self, column: u16) -> f32 {
        (f32::from(column) + 0.5 - self.area.center_x()) * self.px_per_cell
    }

    // --- Timer ------------------------------------------------------------

    /// Apply every tick that has already arrived. Returns the number of
    /// cards advanced.
    pub fn poll_ticks(&mut self) -> usize {
        let mut advanced = 0;
        while let Ok(tick) = self.ticks.try_recv() {
            if self.apply_tick(tick) {
                advanced += 1;
            }
        }
        advanced
    }

    /// Block up to `timeout` for the next live tick and apply it.
    ///
    /// Returns `true` if the active card advanced. Stale ticks are skipped.
    pub fn wait_tick(&mut self, timeout: Duration) -> bool {
        self.wait_for_tick(timeout) == TickWait::Advanced
    }

    /// Like [`wait_tick`](Self::wait_tick), but tells a live tick that did
    /// not move the card apart from no tick at all.
    pub fn wait_for_tick(&mut self, timeout: Duration) -> TickWait {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.timer.is_running() {
                return TickWait::TimedOut;
            }
            match self.ticks.recv_timeout(remaining) {
                Ok(tick) if self.timer.accepts(tick) => {
                    return if self.apply_tick(tick) {
                        TickWait::Advanced
                    } else {
                        TickWait::Held
                    };
                }
                Ok(_) => continue,
                Err(_) => return TickWait::TimedOut,
            }
        }
    }

    fn apply_tick(&mut self, tick: Tick) -> bool {
        if !self.mounted || !self.timer.accepts(tick) {
            tracing::trace!(generation = tick.generation, "stale tick discarded");
            return false;
        }
        if self.state.auto_advance_plan().is_none() {
            tracing::trace!(generation = tick.generation, "tick without plan discarded");
            return false;
        }
        let advanced = self.state.auto_advance_tick();
        self.reconcile();
        advanced
    }

    fn reconcile(&mut self) {
        let plan = if self.mounted {
            self.state.auto_advance_plan()
        } else {
            None
        };
        self.timer.reconcile(plan);
    }
}

impl Drop for CardStackController {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

impl std::fmt::Debug for CardStackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStackController")
            .field("state", &self.state)
            .field("area", &self.area)
            .field("mounted", &self.mounted)
            .field("timer", &self.timer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanstack_core::event::{KeyCode, MouseEvent};
    use std::sync::{Arc, Mutex};

    fn items(n: usize) -> Vec<CardStackItem> {
        (0..n)
            .map(|i| CardStackItem::new(i as u64, format!("card {i}")))
            .collect()
    }

    /// 100 columns centred on column 50, 8px per cell.
    fn area() -> Rect {
        Rect::new(0, 0, 100, 20)
    }

    fn mouse(kind: MouseEventKind, x: u16) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, 5))
    }

    fn controller(n: usize) -> CardStackController {
        let mut c = CardStackController::new(items(n), CardStackConfig::default()).with_area(area());
        c.mount();
        c
    }

    #[test]
    fn mount_announces_initial_card() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut c = CardStackController::new(items(3), CardStackConfig::default().initial_index(2))
            .with_on_change(Box::new(move |index: usize, _item: &CardStackItem| {
                sink.lock().unwrap().push(index);
            }));
        c.mount();
        c.mount();
        c.next();
        assert_eq!(*seen.lock().unwrap(), vec![2, 0]);
    }

    #[test]
    fn keys_need_focus() {
        let mut c = controller(3);
        assert_eq!(c.handle_event(&Event::key(KeyCode::Right)), Outcome::Ignored);
        c.handle_event(&Event::Focus(true));
        assert_eq!(c.handle_event(&Event::key(KeyCode::Right)), Outcome::Changed);
        assert_eq!(c.state().active_index(), Some(1));
    }

    #[test]
    fn click_on_neighbour_selects_it() {
        let mut c = controller(5);
        let t0 = Instant::now();
        // Column 85 is 35.5 cells (284px) right of centre: card 1.
        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 85), t0);
        let outcome = c.handle_event_at(
            &mouse(MouseEventKind::Up(MouseButton::Left), 85),
            t0 + Duration::from_millis(80),
        );
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(c.state().active_index(), Some(1));
    }

    #[test]
    fn drag_left_on_active_card_goes_next() {
        let mut c = controller(5);
        let t0 = Instant::now();
        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 50), t0);
        c.handle_event_at(
            &mouse(MouseEventKind::Drag(MouseButton::Left), 40),
            t0 + Duration::from_millis(200),
        );
        // 20 cells = 160px of travel, slowly.
        let outcome = c.handle_event_at(
            &mouse(MouseEventKind::Up(MouseButton::Left), 30),
            t0 + Duration::from_millis(400),
        );
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(c.state().active_index(), Some(1));
    }

    #[test]
    fn short_slow_drag_springs_back() {
        let mut c = controller(5);
        let t0 = Instant::now();
        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 50), t0);
        let outcome = c.handle_event_at(
            &mouse(MouseEventKind::Up(MouseButton::Left), 45),
            t0 + Duration::from_millis(500),
        );
        assert_eq!(outcome, Outcome::Consumed);
        assert_eq!(c.state().active_index(), Some(0));
    }

    #[test]
    fn reduced_motion_ignores_drag_but_not_click() {
        let mut c = controller(5).with_motion(MotionPreference::Reduced);
        let t0 = Instant::now();
        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 50), t0);
        c.handle_event_at(
            &mouse(MouseEventKind::Up(MouseButton::Left), 10),
            t0 + Duration::from_millis(100),
        );
        assert_eq!(c.state().active_index(), Some(0));

        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 85), t0);
        c.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), 85), t0);
        assert_eq!(c.state().active_index(), Some(1));
    }

    #[test]
    fn pointer_position_drives_hover() {
        let mut c = controller(3);
        c.handle_event(&mouse(MouseEventKind::Moved, 10));
        assert!(c.state().is_hovering());
        c.handle_event(&Event::Mouse(MouseEvent::new(MouseEventKind::Moved, 10, 40)));
        assert!(!c.state().is_hovering());
    }

    #[test]
    fn hover_pauses_timer() {
        let config = CardStackConfig::default().auto_advance(true, Duration::from_secs(30));
        let mut c = CardStackController::new(items(3), config).with_area(area());
        assert!(!c.timer_running());
        c.mount();
        assert!(c.timer_running());

        c.handle_event(&Event::Hover(true));
        assert!(!c.timer_running());
        c.handle_event(&Event::Hover(false));
        assert!(c.timer_running());
    }

    #[test]
    fn navigation_restarts_timer() {
        let config = CardStackConfig::default().auto_advance(true, Duration::from_secs(30));
        let mut c = CardStackController::new(items(3), config);
        c.mount();
        let generation = c.timer_generation();
        c.next();
        assert!(c.timer_generation() > generation);
        assert!(c.timer_running());
    }

    #[test]
    fn unmount_cancels_timer() {
        let config = CardStackConfig::default().auto_advance(true, Duration::from_secs(30));
        let mut c = CardStackController::new(items(3), config);
        c.mount();
        c.unmount();
        assert!(!c.timer_running());
        assert!(!c.wait_tick(Duration::from_millis(10)));
        assert_eq!(c.poll_ticks(), 0);
    }

    #[test]
    fn host_tick_advances_only_when_planned() {
        let mut c = controller(3);
        assert_eq!(c.handle_event(&Event::Tick), Outcome::Ignored);

        c.set_config(CardStackConfig::default().auto_advance(true, Duration::from_secs(30)));
        assert_eq!(c.handle_event(&Event::Tick), Outcome::Changed);
        assert_eq!(c.state().active_index(), Some(1));
    }

    #[test]
    fn unmounted_controller_ignores_host_tick() {
        let config = CardStackConfig::default().auto_advance(true, Duration::from_secs(30));
        let fired = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&fired);
        let mut c = CardStackController::new(items(3), config).with_on_change(Box::new(
            move |_: usize, _: &CardStackItem| {
                *counter.lock().unwrap() += 1;
            },
        ));
        assert_eq!(c.handle_event(&Event::Tick), Outcome::Ignored);
        assert_eq!(c.state().active_index(), Some(0));

        c.mount();
        c.unmount();
        assert_eq!(c.handle_event(&Event::Tick), Outcome::Ignored);
        assert_eq!(c.state().active_index(), Some(0));
        // Only the mount announcement.
        assert_eq!(*fired.lock().unwrap(), 1);
    }

    #[test]
    fn reduced_motion_after_mount_stops_timer() {
        let config = CardStackConfig::default().auto_advance(true, Duration::from_millis(700));
        let mut c = CardStackController::new(items(3), config);
        c.mount();
        assert!(c.timer_running());

        let mut c = c.with_motion(MotionPreference::Reduced);
        assert!(!c.timer_running());
        assert!(!c.wait_tick(Duration::from_millis(900)));
        assert_eq!(c.poll_ticks(), 0);
        assert_eq!(c.state().active_index(), Some(0));
        assert_eq!(c.handle_event(&Event::Tick), Outcome::Ignored);
    }

    #[test]
    fn tick_at_last_card_without_loop_is_held() {
        let config = CardStackConfig::default()
            .loop_nav(false)
            .initial_index(1)
            .auto_advance(true, Duration::from_millis(700));
        let mut c = CardStackController::new(items(2), config);
        c.mount();
        assert!(c.timer_running());
        assert_eq!(c.wait_for_tick(Duration::from_secs(5)), TickWait::Held);
        assert_eq!(c.state().active_index(), Some(1));

        c.unmount();
        assert_eq!(c.wait_for_tick(Duration::from_millis(10)), TickWait::TimedOut);
    }

    #[test]
    fn open_link_follows_dots_setting() {
        let items = vec![CardStackItem::new("a", "A").href("https://a.example")];
        let mut c = CardStackController::new(items, CardStackConfig::default());
        assert_eq!(c.open_link(), Some("https://a.example"));
        c.set_config(CardStackConfig::default().show_dots(false));
        assert_eq!(c.open_link(), None);
    }

    #[test]
    fn empty_stack_ignores_pointer() {
        let mut c = controller(0);
        let t0 = Instant::now();
        c.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 50), t0);
        c.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), 50), t0);
        assert_eq!(c.state().active_index(), None);
        assert!(c.layout().is_empty());
    }
}
