#![forbid(unsafe_code)]

//! Cancelable repeating tick task.
//!
//! A [`TickTask`] runs on its own thread and sends a [`Tick`] every period
//! until its [`TickHandle`] is cancelled or dropped, or the receiving side of
//! the channel goes away. Cancellation wakes the thread immediately through a
//! condvar instead of waiting out the current period.

use std::io;
use std::sync::{Arc, Condvar, Mutex, PoisonError, mpsc};
use std::thread;
use std::time::{Duration, Instant};

/// One timer firing, stamped with the generation of the task that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    pub generation: u64,
}

type Shared = Arc<(Mutex<bool>, Condvar)>;

/// Stop flag observed by a running task.
#[derive(Clone)]
pub struct StopSignal {
    inner: Shared,
}

impl StopSignal {
    /// Create a new (signal, trigger) pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner: Shared = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether stop has been requested.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` on timeout. Spurious wakeups are
    /// absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + duration;
        while !*stopped {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
        true
    }
}

/// Owner side of a [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Shared,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }
}

/// Spawns repeating tick threads.
pub struct TickTask;

impl TickTask {
    /// Start sending `Tick { generation }` every `period`.
    ///
    /// The first tick arrives one full period after the call.
    pub fn spawn(
        period: Duration,
        generation: u64,
        sender: mpsc::Sender<Tick>,
    ) -> io::Result<TickHandle> {
        let (stop, trigger) = StopSignal::new();
        let thread = thread::Builder::new()
            .name(format!("fanstack-tick-{generation}"))
            .spawn(move || run(period, generation, &sender, &stop))?;
        Ok(TickHandle {
            generation,
            trigger,
            thread: Some(thread),
        })
    }
}

fn run(period: Duration, generation: u64, sender: &mpsc::Sender<Tick>, stop: &StopSignal) {
    tracing::debug!(generation, ?period, "tick task started");
    let mut sent: u64 = 0;
    loop {
        if stop.wait_timeout(period) {
            tracing::debug!(generation, sent, "tick task stopped");
            break;
        }
        if sender.send(Tick { generation }).is_err() {
            tracing::debug!(generation, sent, "tick channel closed");
            break;
        }
        sent += 1;
    }
}

/// A running tick task.
///
/// Dropping the handle requests a stop without waiting for the thread.
pub struct TickHandle {
    generation: u64,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl TickHandle {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the task and wait for its thread to exit.
    ///
    /// Once this returns no further ticks from this task will be sent.
    pub fn cancel(mut self) {
        self.trigger.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("generation", &self.generation)
            .field("joined", &self.thread.is_none())
            .finish()
    }
}
