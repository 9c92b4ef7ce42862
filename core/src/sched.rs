//! Scheduling seams for the spin animation.
//!
//! The widget never talks to a timer API directly. A [`Scheduler`] hands out
//! repeating tasks and zero-delay callbacks; the browser front end backs it
//! with `setInterval`/`setTimeout`, while [`VirtualScheduler`] runs everything
//! on a virtual clock for the REPL and tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// Handle to a running repeating task.
pub trait Cancel {
    /// Stop the task. Callbacks never fire after this returns.
    fn cancel(self);
}

/// Source of repeating tasks and deferred callbacks.
pub trait Scheduler {
    type Task: Cancel;

    /// Call `tick` every `period` until the returned task is cancelled or dropped.
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Task;

    /// Run `task` on the next turn of the event loop.
    fn defer(&self, task: Box<dyn FnOnce()>);
}

// ─────────────────────────────────────────────────────────────────────────────
// Task Slot
// ─────────────────────────────────────────────────────────────────────────────

/// Holds at most one outstanding task.
#[derive(Debug)]
pub struct TaskSlot<T: Cancel> {
    current: Option<T>,
}

impl<T: Cancel> TaskSlot<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Cancel the outstanding task, then store the one built by `start`.
    pub fn start(&mut self, start: impl FnOnce() -> T) {
        self.cancel();
        self.current = Some(start());
    }

    /// Cancel the outstanding task. No-op when empty.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }
}

impl<T: Cancel> Default for TaskSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Virtual Scheduler
// ─────────────────────────────────────────────────────────────────────────────

type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

struct Repeating {
    period: Duration,
    next_due: Duration,
    tick: Tick,
    alive: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    repeating: Vec<Repeating>,
    deferred: VecDeque<Box<dyn FnOnce()>>,
}

/// Deterministic scheduler driven by [`VirtualScheduler::advance`].
///
/// Deferred callbacks run before any repeating task that is due at the same
/// instant. Repeating tasks due at the same instant fire in creation order.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

/// Task handle from a [`VirtualScheduler`]. Dropping it cancels the task.
#[derive(Debug)]
pub struct VirtualTask {
    alive: Rc<Cell<bool>>,
}

impl Drop for VirtualTask {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl Cancel for VirtualTask {
    fn cancel(self) {
        drop(self);
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    /// Number of repeating tasks that have not been cancelled.
    pub fn live_tasks(&self) -> usize {
        self.timeline
            .borrow()
            .repeating
            .iter()
            .filter(|task| task.alive.get())
            .count()
    }

    /// Number of deferred callbacks waiting for the next turn.
    pub fn pending_deferred(&self) -> usize {
        self.timeline.borrow().deferred.len()
    }

    /// Run every deferred callback, including ones queued while flushing.
    pub fn flush(&self) {
        loop {
            let next = self.timeline.borrow_mut().deferred.pop_front();
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    /// Move virtual time forward by `by`, firing everything that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            self.flush();
            let Some(tick) = self.next_due(target) else {
                break;
            };
            let mut callback = tick.borrow_mut();
            (*callback)();
        }
        self.timeline.borrow_mut().now = target;
        self.flush();
    }

    // Pops the earliest due task at or before `target`, moves the clock to its
    // due time and reschedules it. The timeline borrow is released before the
    // caller runs the tick, so ticks may schedule more work.
    fn next_due(&self, target: Duration) -> Option<Tick> {
        let mut timeline = self.timeline.borrow_mut();
        timeline.repeating.retain(|task| task.alive.get());

        let task = timeline
            .repeating
            .iter_mut()
            .filter(|task| task.next_due <= target)
            .min_by_key(|task| task.next_due)?;
        let due = task.next_due;
        task.next_due += task.period;
        let tick = Rc::clone(&task.tick);

        timeline.now = due;
        Some(tick)
    }
}

impl Scheduler for VirtualScheduler {
    type Task = VirtualTask;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> VirtualTask {
        let period = period.max(Duration::from_millis(1));
        let alive = Rc::new(Cell::new(true));
        let mut timeline = self.timeline.borrow_mut();
        let next_due = timeline.now + period;
        timeline.repeating.push(Repeating {
            period,
            next_due,
            tick: Rc::new(RefCell::new(tick)),
            alive: Rc::clone(&alive),
        });
        VirtualTask { alive }
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.timeline.borrow_mut().deferred.push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(scheduler: &VirtualScheduler, period_ms: u64) -> (Rc<Cell<u32>>, VirtualTask) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let task = scheduler.every(
            Duration::from_millis(period_ms),
            Box::new(move || seen.set(seen.get() + 1)),
        );
        (count, task)
    }

    #[test]
    fn repeating_task_fires_per_period() {
        let scheduler = VirtualScheduler::new();
        let (count, _task) = counter(&scheduler, 20);

        scheduler.advance(Duration::from_millis(19));
        assert_eq!(count.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        scheduler.advance(Duration::from_millis(200));
        assert_eq!(count.get(), 11);
        assert_eq!(scheduler.now(), Duration::from_millis(220));
    }

    #[test]
    fn cancelled_task_stops_firing() {
        let scheduler = VirtualScheduler::new();
        let (count, task) = counter(&scheduler, 10);
        scheduler.advance(Duration::from_millis(30));
        task.cancel();
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn deferred_runs_on_next_turn() {
        let scheduler = VirtualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        scheduler.defer(Box::new(move || flag.set(true)));

        assert!(!ran.get());
        assert_eq!(scheduler.pending_deferred(), 1);
        scheduler.advance(Duration::ZERO);
        assert!(ran.get());
        assert_eq!(scheduler.pending_deferred(), 0);
    }

    #[test]
    fn slot_cancels_before_starting() {
        let scheduler = VirtualScheduler::new();
        let mut slot = TaskSlot::new();
        slot.start(|| counter(&scheduler, 10).1);
        slot.start(|| counter(&scheduler, 10).1);
        assert_eq!(scheduler.live_tasks(), 1);

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert!(!slot.is_active());
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        let scheduler = VirtualScheduler::new();
        let (count, _task) = counter(&scheduler, 0);
        scheduler.advance(Duration::from_millis(5));
        assert_eq!(count.get(), 5);
    }
}
