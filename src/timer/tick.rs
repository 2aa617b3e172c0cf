//! Cancellable periodic tick loop.
//!
//! At most one tick task is alive at a time. Every registration gets a new
//! generation number, and every tick carries the generation it was produced
//! by, so the receiver can drop ticks that were already queued when the loop
//! was cancelled.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Nominal tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// One periodic tick produced by a [`TickLoop`] registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Registration that produced this tick
    pub generation: u64,
}

/// Owner of the single periodic tick task.
#[derive(Debug)]
pub struct TickLoop {
    tick_tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TickLoop {
    /// Creates an inactive tick loop delivering ticks to `tick_tx`.
    pub fn new(tick_tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            tick_tx,
            period,
            generation: 0,
            handle: None,
        }
    }

    /// Creates a tick loop with the default one-second period.
    pub fn with_default_period(tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::new(tick_tx, DEFAULT_TICK_PERIOD)
    }

    /// Registers a new periodic task, cancelling any previous one first.
    ///
    /// The first tick arrives one period after this call. Must be called
    /// from within a tokio runtime.
    pub fn start(&mut self) -> u64 {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                trace!(generation, "tick");
                if tick_tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));

        debug!(generation, period_ms = period.as_millis() as u64, "Tick loop started");
        generation
    }

    /// Cancels the active task. Does nothing when no task is active.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(generation = self.generation, "Tick loop cancelled");
        }
    }

    /// Returns true if a periodic task is registered.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns true if `generation` belongs to the active registration.
    pub fn is_current(&self, generation: u64) -> bool {
        self.is_active() && generation == self.generation
    }

    /// Returns the generation of the latest registration (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TickLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ============================================================================
// Tests
// ============================================================================
