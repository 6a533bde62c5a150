//! Property-based invariant tests for the card stack navigator.
//!
//! These hold for **any** item count and operation sequence:
//!
//! 1. `wrap_index` always lands in range and agrees with modular arithmetic.
//! 2. Loop-mode offsets never exceed half the ring.
//! 3. The active index stays in range after any sequence of operations.
//! 4. With looping off, the active index never jumps from an end to the
//!    other end via `next`/`prev`.
//! 5. Exactly one visible card is active, and only cards within
//!    `max_visible / 2` of it are placed.
//! 6. With looping on, `next` then `prev` (or `prev` then `next`) returns
//!    to the starting card.

use fanstack_widgets::{
    CardStackConfig, CardStackItem, CardStackState, DragRelease, SwipeConfig, compute_layout,
    compute_offset, wrap_index,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    GoTo(i64),
    Tick,
    Drag(f32, f32),
    Resize(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Prev),
        (-50i64..50).prop_map(Op::GoTo),
        Just(Op::Tick),
        (-400.0f32..400.0, -2000.0f32..2000.0).prop_map(|(t, v)| Op::Drag(t, v)),
        (0usize..20).prop_map(Op::Resize),
    ]
}

fn items(n: usize) -> Vec<CardStackItem> {
    (0..n)
        .map(|i| CardStackItem::new(i as u64, format!("card {i}")))
        .collect()
}

fn apply(state: &mut CardStackState, op: &Op, swipe: &SwipeConfig) {
    match *op {
        Op::Next => {
            state.next();
        }
        Op::Prev => {
            state.prev();
        }
        Op::GoTo(n) => {
            state.go_to(n);
        }
        Op::Tick => {
            state.auto_advance_tick();
        }
        Op::Drag(travel, velocity) => {
            state.release_drag(DragRelease::new(travel, velocity), swipe, 520.0);
        }
        Op::Resize(n) => state.set_items(items(n)),
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn wrap_index_in_range(n in -10_000i64..10_000, len in 1usize..200) {
        let w = wrap_index(n, len);
        prop_assert!(w < len);
        prop_assert_eq!((w as i64 - n).rem_euclid(len as i64), 0);
    }

    #[test]
    fn loop_offsets_take_short_way(len in 2usize..100, i in 0usize..100, active in 0usize..100) {
        let i = i % len;
        let active = active % len;
        let off = compute_offset(i, active, len, true);
        prop_assert!(off.unsigned_abs() as usize <= len / 2);
        prop_assert_eq!(wrap_index(active as i64 + off, len), i);
    }

    #[test]
    fn raw_offsets_without_loop(len in 1usize..100, i in 0usize..100, active in 0usize..100) {
        let i = i % len;
        let active = active % len;
        prop_assert_eq!(compute_offset(i, active, len, false), i as i64 - active as i64);
    }

    #[test]
    fn active_index_stays_in_range(
        len in 0usize..20,
        looping in any::<bool>(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let config = CardStackConfig::default().loop_nav(looping);
        let swipe = SwipeConfig::default();
        let mut state = CardStackState::new(items(len), &config);
        for op in &ops {
            apply(&mut state, op, &swipe);
            match state.active_index() {
                Some(active) => prop_assert!(active < state.len()),
                None => prop_assert!(state.is_empty()),
            }
        }
    }

    #[test]
    fn no_wrap_when_loop_is_off(
        len in 2usize..20,
        steps in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let config = CardStackConfig::default().loop_nav(false);
        let mut state = CardStackState::new(items(len), &config);
        for forward in steps {
            let before = state.active_index().unwrap_or(0);
            if forward {
                state.next();
            } else {
                state.prev();
            }
            let after = state.active_index().unwrap_or(0);
            prop_assert!(after.abs_diff(before) <= 1);
        }
    }

    #[test]
    fn loop_steps_are_inverse(len in 1usize..50, start in 0i64..50) {
        let config = CardStackConfig::default().loop_nav(true).initial_index(start);
        let mut state = CardStackState::new(items(len), &config);
        let origin = state.active_index();
        prop_assert_eq!(origin, Some(wrap_index(start, len)));

        state.next();
        state.prev();
        prop_assert_eq!(state.active_index(), origin);

        state.prev();
        state.next();
        prop_assert_eq!(state.active_index(), origin);
    }

    #[test]
    fn layout_has_one_active_card(
        len in 1usize..30,
        max_visible in 0usize..12,
        active in 0i64..30,
        looping in any::<bool>(),
    ) {
        let config = CardStackConfig::default()
            .loop_nav(looping)
            .max_visible(max_visible)
            .initial_index(active);
        let state = CardStackState::new(items(len), &config);
        let layout = compute_layout(&state, &config);

        prop_assert_eq!(layout.cards.iter().filter(|c| c.active).count(), 1);
        prop_assert!(layout.cards.len() <= 2 * (max_visible / 2) + 1);
        for card in &layout.cards {
            prop_assert!(card.offset.unsigned_abs() as usize <= max_visible / 2);
            prop_assert_eq!(card.z_index, 100 - card.offset.unsigned_abs() as i32);
        }
    }
}
