//! Browser timers behind the widget's [`Scheduler`] seam.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use ringbar_core::{Cancel, Scheduler};

/// `setInterval`/`setTimeout` scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// A running `setInterval`. Dropping it clears the interval too.
pub struct IntervalTask(Interval);

impl Cancel for IntervalTask {
    fn cancel(self) {
        drop(self.0.cancel());
    }
}

impl Scheduler for BrowserScheduler {
    type Task = IntervalTask;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> IntervalTask {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        IntervalTask(Interval::new(millis, tick))
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        Timeout::new(0, task).forget();
    }
}
