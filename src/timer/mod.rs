//! Countdown engine.
//!
//! [`TimerController`] owns the countdown state and mutates it only through
//! its operations. Ticks come from a [`TickLoop`] over a channel, and the
//! display reads a [`TimerView`] projection.

mod controller;
mod error;
mod tick;
mod view;

pub use controller::{StartOutcome, TickOutcome, TimerController, TimerEvent};
pub use error::TimerError;
pub use tick::{Tick, TickLoop, DEFAULT_TICK_PERIOD};
pub use view::{split_seconds, TimerView};
