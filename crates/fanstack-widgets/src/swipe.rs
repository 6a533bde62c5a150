#![forbid(unsafe_code)]

//! Drag tracking and drag-end interpretation.
//!
//! A drag on the active card produces pointer samples. [`DragTracker`]
//! reduces them to a [`DragRelease`] (total horizontal travel plus release
//! velocity) and [`SwipeConfig::classify`] turns the release into a
//! navigation decision.
//!
//! Positive travel and velocity mean rightward motion, which reveals the
//! previous card.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Tuning for swipe interpretation.
///
/// The defaults are empirical UX values; keep them unless a host has a
/// measured reason to change them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Upper bound on the travel threshold, in px (default: 160).
    pub max_threshold_px: f32,
    /// Travel threshold as a fraction of the card width (default: 0.22).
    pub width_ratio: f32,
    /// Release speed that navigates regardless of travel, in px/s (default: 650).
    pub velocity_px_per_s: f32,
    /// Trailing window used to measure release velocity (default: 100ms).
    pub velocity_window: Duration,
    /// Travel at or below which a slow release counts as a click, in px
    /// (default: 6).
    pub click_slop_px: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            max_threshold_px: 160.0,
            width_ratio: 0.22,
            velocity_px_per_s: 650.0,
            velocity_window: Duration::from_millis(100),
            click_slop_px: 6.0,
        }
    }
}

impl SwipeConfig {
    /// Travel needed to navigate for a card of the given width.
    #[must_use]
    pub fn threshold(&self, card_width: f32) -> f32 {
        self.max_threshold_px.min(card_width * self.width_ratio)
    }

    /// Decide what a drag release does.
    #[must_use]
    pub fn classify(&self, release: DragRelease, card_width: f32) -> SwipeDecision {
        let threshold = self.threshold(card_width);
        let v = release.velocity;
        if release.travel > threshold || v > self.velocity_px_per_s {
            SwipeDecision::Prev
        } else if release.travel < -threshold || v < -self.velocity_px_per_s {
            SwipeDecision::Next
        } else {
            SwipeDecision::SpringBack
        }
    }

    /// Whether a release is a click rather than a drag.
    #[must_use]
    pub fn is_click(&self, release: DragRelease) -> bool {
        release.travel.abs() <= self.click_slop_px
            && release.velocity.abs() <= self.velocity_px_per_s
    }

    #[must_use]
    pub fn with_max_threshold(mut self, px: f32) -> Self {
        self.max_threshold_px = px;
        self
    }

    #[must_use]
    pub fn with_width_ratio(mut self, ratio: f32) -> Self {
        self.width_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, px_per_s: f32) -> Self {
        self.velocity_px_per_s = px_per_s;
        self
    }

    #[must_use]
    pub fn with_click_slop(mut self, px: f32) -> Self {
        self.click_slop_px = px;
        self
    }
}

/// Outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Dragged right far or fast enough: show the previous card.
    Prev,
    /// Dragged left far or fast enough: show the next card.
    Next,
    /// Neither; the card returns to the centre.
    SpringBack,
}

/// Horizontal travel and release velocity of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragRelease {
    /// Signed displacement in px.
    pub travel: f32,
    /// Signed velocity in px/s.
    pub velocity: f32,
}

impl DragRelease {
    #[must_use]
    pub const fn new(travel: f32, velocity: f32) -> Self {
        Self { travel, velocity }
    }
}

/// Accumulates pointer samples for one drag.
#[derive(Debug, Clone)]
pub struct DragTracker {
    origin: f32,
    window: Duration,
    samples: VecDeque<(f32, Instant)>,
}

impl DragTracker {
    /// Start tracking at pointer position `x`.
    #[must_use]
    pub fn begin(x: f32, at: Instant, window: Duration) -> Self {
        let mut samples = VecDeque::with_capacity(8);
        samples.push_back((x, at));
        Self {
            origin: x,
            window,
            samples,
        }
    }

    /// Record a pointer move.
    pub fn update(&mut self, x: f32, at: Instant) {
        self.samples.push_back((x, at));
        // Keep one sample at or beyond the window edge as the velocity baseline.
        while self.samples.len() > 2 {
            let newest = self.samples[self.samples.len() - 1].1;
            let second = self.samples[1].1;
            if newest.saturating_duration_since(second) >= self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Travel so far.
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.samples
            .back()
            .map_or(0.0, |(x, _)| x - self.origin)
    }

    /// Finish the drag at pointer position `x`.
    #[must_use]
    pub fn release(mut self, x: f32, at: Instant) -> DragRelease {
        self.update(x, at);
        DragRelease {
            travel: self.travel(),
            velocity: self.velocity(),
        }
    }

    fn velocity(&self) -> f32 {
        let (Some(&(x0, t0)), Some(&(x1, t1))) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return 0.0;
        }
        (x1 - x0) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn threshold_is_capped() {
        let cfg = SwipeConfig::default();
        assert!((cfg.threshold(520.0) - 114.4).abs() < 1e-3);
        assert_eq!(cfg.threshold(1000.0), 160.0);
    }

    #[test]
    fn travel_past_threshold_navigates() {
        let cfg = SwipeConfig::default();
        assert_eq!(cfg.classify(DragRelease::new(120.0, 0.0), 520.0), SwipeDecision::Prev);
        assert_eq!(cfg.classify(DragRelease::new(-120.0, 0.0), 520.0), SwipeDecision::Next);
    }

    #[test]
    fn velocity_overrides_short_travel() {
        let cfg = SwipeConfig::default();
        assert_eq!(cfg.classify(DragRelease::new(80.0, 700.0), 520.0), SwipeDecision::Prev);
        assert_eq!(cfg.classify(DragRelease::new(80.0, -700.0), 520.0), SwipeDecision::Next);
    }

    #[test]
    fn small_slow_drag_springs_back() {
        let cfg = SwipeConfig::default();
        assert_eq!(
            cfg.classify(DragRelease::new(50.0, 100.0), 520.0),
            SwipeDecision::SpringBack
        );
        // Exactly at the threshold is not past it.
        assert_eq!(
            cfg.classify(DragRelease::new(160.0, 650.0), 1000.0),
            SwipeDecision::SpringBack
        );
    }

    #[test]
    fn positive_travel_wins_over_negative_velocity() {
        let cfg = SwipeConfig::default();
        assert_eq!(cfg.classify(DragRelease::new(200.0, -900.0), 520.0), SwipeDecision::Prev);
    }

    #[test]
    fn click_detection() {
        let cfg = SwipeConfig::default();
        assert!(cfg.is_click(DragRelease::new(2.0, 10.0)));
        assert!(!cfg.is_click(DragRelease::new(20.0, 10.0)));
        assert!(!cfg.is_click(DragRelease::new(1.0, 900.0)));
    }

    #[test]
    fn tracker_measures_travel_and_velocity() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::begin(100.0, t0, WINDOW);
        tracker.update(110.0, t0 + ms(20));
        tracker.update(130.0, t0 + ms(40));
        assert_eq!(tracker.travel(), 30.0);
        let release = tracker.release(150.0, t0 + ms(60));
        assert_eq!(release.travel, 50.0);
        // 50px over 60ms.
        assert!((release.velocity - 833.33).abs() < 0.5, "got {}", release.velocity);
    }

    #[test]
    fn velocity_uses_trailing_window() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::begin(0.0, t0, WINDOW);
        // Fast start, then the pointer stops.
        tracker.update(200.0, t0 + ms(50));
        tracker.update(200.0, t0 + ms(300));
        tracker.update(200.0, t0 + ms(350));
        let release = tracker.release(200.0, t0 + ms(400));
        assert_eq!(release.travel, 200.0);
        assert_eq!(release.velocity, 0.0);
    }

    #[test]
    fn zero_duration_release_has_no_velocity() {
        let t0 = Instant::now();
        let tracker = DragTracker::begin(10.0, t0, WINDOW);
        let release = tracker.release(40.0, t0);
        assert_eq!(release.travel, 30.0);
        assert_eq!(release.velocity, 0.0);
    }

    #[test]
    fn builders_override_defaults() {
        let cfg = SwipeConfig::default()
            .with_max_threshold(80.0)
            .with_width_ratio(0.5)
            .with_velocity(300.0)
            .with_click_slop(1.0);
        assert_eq!(cfg.threshold(520.0), 80.0);
        assert_eq!(cfg.classify(DragRelease::new(0.0, 301.0), 520.0), SwipeDecision::Prev);
        assert!(!cfg.is_click(DragRelease::new(2.0, 0.0)));
    }
}
