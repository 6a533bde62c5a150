#![forbid(unsafe_code)]

//! Auto-advance scheduling.
//!
//! At most one tick task is alive per card stack. Whenever the navigator's
//! [`AutoAdvancePlan`] changes (period, loop flag, active index, item count,
//! or the timer being paused or disabled) the old task is cancelled and
//! joined before a new one is spawned under a fresh generation. Ticks that
//! were already queued by the old task carry the old generation and are
//! rejected by [`AutoAdvance::accepts`].

use std::sync::mpsc;

use fanstack_widgets::AutoAdvancePlan;

use crate::subscription::{Tick, TickHandle, TickTask};

struct Running {
    plan: AutoAdvancePlan,
    handle: TickHandle,
}

/// Owner of the single auto-advance timer of one card stack.
pub struct AutoAdvance {
    sender: mpsc::Sender<Tick>,
    running: Option<Running>,
    generation: u64,
}

impl AutoAdvance {
    /// Timer whose ticks are delivered to `sender`.
    #[must_use]
    pub fn new(sender: mpsc::Sender<Tick>) -> Self {
        Self {
            sender,
            running: None,
            generation: 0,
        }
    }

    /// The plan the running timer was started with.
    #[must_use]
    pub fn plan(&self) -> Option<AutoAdvancePlan> {
        self.running.as_ref().map(|r| r.plan)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Generation of the current (or most recently cancelled) timer.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bring the timer in line with `plan`.
    ///
    /// Returns `true` if the timer was restarted or stopped.
    pub fn reconcile(&mut self, plan: Option<AutoAdvancePlan>) -> bool {
        if self.plan() == plan {
            return false;
        }

        self.stop_current();
        self.generation += 1;

        let Some(plan) = plan else {
            tracing::debug!(generation = self.generation, "auto-advance stopped");
            return true;
        };

        match TickTask::spawn(plan.period, self.generation, self.sender.clone()) {
            Ok(handle) => {
                tracing::debug!(
                    generation = self.generation,
                    period_ms = plan.period.as_millis() as u64,
                    active = plan.active,
                    len = plan.len,
                    looping = plan.looping,
                    "auto-advance scheduled"
                );
                self.running = Some(Running { plan, handle });
            }
            Err(error) => {
                tracing::warn!(%error, "failed to spawn auto-advance timer, auto-advance disabled");
            }
        }
        true
    }

    /// Whether `tick` came from the live timer.
    #[must_use]
    pub fn accepts(&self, tick: Tick) -> bool {
        self.running.is_some() && tick.generation == self.generation
    }

    /// Stop the timer; queued ticks become stale.
    pub fn cancel(&mut self) {
        if self.running.is_some() {
            self.stop_current();
            self.generation += 1;
        }
    }

    fn stop_current(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.cancel();
        }
    }
}

impl std::fmt::Debug for AutoAdvance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoAdvance")
            .field("generation", &self.generation)
            .field("plan", &self.plan())
            .finish()
    }
}
