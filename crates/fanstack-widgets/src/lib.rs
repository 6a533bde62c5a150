#![forbid(unsafe_code)]

//! Card stack navigator for fanstack.
//!
//! The navigator is split into pure pieces so index, offset and gesture math
//! can be tested without any rendering harness:
//!
//! - [`card_stack`]: items, active index, wraparound and boundary rules
//! - [`layout`]: per-card placement derived from the navigator state
//! - [`swipe`]: drag tracking and drag-end interpretation
//! - [`dots`]: pagination dot row for text surfaces

pub mod card_stack;
pub mod dots;
pub mod layout;
pub mod swipe;

pub use card_stack::{
    AutoAdvancePlan, CardStackConfig, CardStackItem, CardStackState, ChangeCallback, ItemId,
    MIN_AUTO_ADVANCE_INTERVAL, compute_offset, max_offset, wrap_index,
};
pub use dots::Dots;
pub use layout::{CardPlacement, CardPose, DotState, Spring, StackLayout, compute_layout};
pub use swipe::{DragRelease, DragTracker, SwipeConfig, SwipeDecision};
