//! One-shot timers.
//!
//! The copy indicator hides itself after a fixed delay. Scheduling goes
//! through [`Scheduler`] so tests can advance time by hand.

use gloo_timers::callback::Timeout;

/// Runs a task once after a delay.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser scheduler backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // Timers are never cancelled, so the handle can go.
        Timeout::new(delay_ms, task).forget();
    }
}
