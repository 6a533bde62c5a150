#![forbid(unsafe_code)]

//! Runtime pieces around the card stack navigator.
//!
//! - [`subscription`]: cancelable repeating tick task on a background thread
//! - [`auto_advance`]: single-timer scheduling with generation-tagged ticks
//! - [`controller`]: input events, drag gestures and timer ticks for one
//!   mounted card stack
//! - [`section_store`]: section-keyed JSON persistence backends

pub mod auto_advance;
pub mod controller;
pub mod section_store;
pub mod subscription;

pub use auto_advance::AutoAdvance;
pub use controller::{CardStackController, DEFAULT_PX_PER_CELL, Outcome, TickWait};
pub use section_store::{FileStore, MemoryStore, SectionStore, StoreError, StoreResult};
pub use subscription::{StopSignal, Tick, TickHandle, TickTask};
