#![forbid(unsafe_code)]

//! Core types shared by every fanstack crate.
//!
//! - [`event`]: canonical input events consumed by the card stack controller
//! - [`geometry`]: the stage rectangle used for hover and click hit testing
//! - [`motion`]: reduced-motion preference detection
//! - [`logging`]: tracing subscriber setup

pub mod event;
pub mod geometry;
pub mod logging;
pub mod motion;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use geometry::Rect;
pub use motion::MotionPreference;
