//! Property tests for the controller's single-timer bookkeeping.
//!
//! After any sequence of input the timer runs exactly when the controller
//! is mounted and the navigator has an auto-advance plan, generations never
//! go backwards, and the active index stays in range.

use std::time::Duration;

use fanstack_core::event::{Event, KeyCode};
use fanstack_runtime::CardStackController;
use fanstack_widgets::{CardStackConfig, CardStackItem};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    GoTo(i64),
    Key(bool),
    Focus(bool),
    Hover(bool),
    Reduced(bool),
    HostTick,
    Mount,
    Unmount,
    Resize(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Prev),
        (-20i64..20).prop_map(Op::GoTo),
        any::<bool>().prop_map(Op::Key),
        any::<bool>().prop_map(Op::Focus),
        any::<bool>().prop_map(Op::Hover),
        any::<bool>().prop_map(Op::Reduced),
        Just(Op::HostTick),
        Just(Op::Mount),
        Just(Op::Unmount),
        (0usize..6).prop_map(Op::Resize),
    ]
}

fn items(n: usize) -> Vec<CardStackItem> {
    (0..n)
        .map(|i| CardStackItem::new(i as u64, format!("card {i}")))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn timer_runs_only_when_mounted_and_planned(
        len in 0usize..6,
        looping in any::<bool>(),
        ops in prop::collection::vec(op(), 0..24),
    ) {
        let config = CardStackConfig::default()
            .loop_nav(looping)
            .auto_advance(true, Duration::from_secs(60));
        let mut c = CardStackController::new(items(len), config);
        let mut generation = c.timer_generation();

        for op in ops {
            match op {
                Op::Next => { c.next(); }
                Op::Prev => { c.prev(); }
                Op::GoTo(i) => { c.go_to(i); }
                Op::Key(right) => {
                    let code = if right { KeyCode::Right } else { KeyCode::Left };
                    c.handle_event(&Event::key(code));
                }
                Op::Focus(f) => { c.handle_event(&Event::Focus(f)); }
                Op::Hover(h) => { c.handle_event(&Event::Hover(h)); }
                Op::Reduced(r) => c.set_reduced_motion(r),
                Op::HostTick => {
                    let before = c.state().active_index();
                    c.handle_event(&Event::Tick);
                    if !c.is_mounted() {
                        prop_assert_eq!(c.state().active_index(), before);
                    }
                }
                Op::Mount => c.mount(),
                Op::Unmount => c.unmount(),
                Op::Resize(n) => c.set_items(items(n)),
            }

            let planned = c.state().auto_advance_plan().is_some();
            prop_assert_eq!(c.timer_running(), c.is_mounted() && planned);
            prop_assert!(c.timer_generation() >= generation);
            generation = c.timer_generation();

            match c.state().active_index() {
                Some(active) => prop_assert!(active < c.state().len()),
                None => prop_assert!(c.state().is_empty()),
            }
        }
    }
}
