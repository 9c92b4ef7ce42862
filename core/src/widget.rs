//! The progress widget controller.
//!
//! [`ProgressWidget`] binds one [`WidgetState`] to a [`View`] and owns the
//! spin task. Handles are cheap to clone and share one instance; scheduled
//! callbacks hold weak references, so dropping the last handle stops the
//! animation.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;
use std::time::Duration;

use ringbar_types::WidgetConfig;
use tracing::{debug, trace};

use crate::geometry::Ring;
use crate::machine::{Action, ControlState, Features, RESET_SEQUENCE, SpinChange, WidgetState};
use crate::sched::{Scheduler, TaskSlot};
use crate::spin::Spin;
use crate::value::coerce_percent;
use crate::view::{self, Frame, View};

/// Construction parameters for a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetOptions {
    pub ring: Ring,
    pub features: Features,
    pub tick_interval: Duration,
}

impl WidgetOptions {
    pub fn from_config(config: &WidgetConfig, ring: Ring) -> Self {
        Self {
            ring,
            features: Features::from(config),
            tick_interval: Duration::from_millis(u64::from(config.tick_interval_ms)),
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default(), Ring::default())
    }
}

struct Inner<V, S: Scheduler> {
    state: WidgetState,
    features: Features,
    ring: Ring,
    spin: Spin,
    transition_suppressed: bool,
    tick_interval: Duration,
    view: V,
    scheduler: S,
    task: TaskSlot<S::Task>,
}

impl<V: View, S: Scheduler> Inner<V, S> {
    fn frame(&self) -> Frame {
        view::render(
            &self.state,
            self.features,
            &self.ring,
            &self.spin,
            self.transition_suppressed,
        )
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.view.apply(&frame);
    }

    fn tick(&mut self) {
        if !self.state.is_animated() {
            return;
        }
        let offset = self.spin.advance(&self.ring);
        trace!(index = self.state.index(), offset, "spin tick");
        self.view.draw_arc(offset);
    }
}

/// One circular progress indicator and its controls.
pub struct ProgressWidget<V: View, S: Scheduler> {
    inner: Rc<RefCell<Inner<V, S>>>,
}

impl<V: View, S: Scheduler> Clone for ProgressWidget<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: View + 'static, S: Scheduler + 'static> ProgressWidget<V, S> {
    /// Create a widget and draw its initial frame.
    pub fn new(index: usize, view: V, scheduler: S, options: WidgetOptions) -> Self {
        let mut inner = Inner {
            state: WidgetState::new(index),
            features: options.features,
            ring: options.ring,
            spin: Spin::new(),
            transition_suppressed: false,
            tick_interval: options.tick_interval,
            view,
            scheduler,
            task: TaskSlot::new(),
        };
        inner.render();
        debug!(
            index,
            radius = options.ring.radius(),
            rotation = options.features.rotation,
            "widget created"
        );

        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn index(&self) -> usize {
        self.inner.borrow().state.index()
    }

    pub fn get_value(&self) -> u8 {
        self.inner.borrow().state.value()
    }

    pub fn state(&self) -> WidgetState {
        self.inner.borrow().state
    }

    pub fn controls(&self) -> ControlState {
        let inner = self.inner.borrow();
        inner.state.controls(inner.features)
    }

    pub fn features(&self) -> Features {
        self.inner.borrow().features
    }

    pub fn ring(&self) -> Ring {
        self.inner.borrow().ring
    }

    /// The frame the view currently reflects (ignoring direct spin draws).
    pub fn frame(&self) -> Frame {
        self.inner.borrow().frame()
    }

    /// Whether a spin task is outstanding.
    pub fn is_spinning(&self) -> bool {
        self.inner.borrow().task.is_active()
    }

    /// Borrow the view, e.g. to read back what a headless view recorded.
    pub fn inspect_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.inner.borrow().view)
    }

    /// Set the value from raw input. See [`coerce_percent`] for the rules.
    pub fn set_value(&self, raw: impl Display) {
        self.dispatch(Action::SetValue(coerce_percent(raw)));
    }

    pub fn toggle_animation(&self, is_animated: bool) {
        self.dispatch(Action::ToggleAnimation(is_animated));
    }

    /// Only takes effect while animated; otherwise rotation is forced off.
    pub fn toggle_rotation(&self, is_rotated: bool) {
        self.dispatch(Action::ToggleRotation(is_rotated));
    }

    pub fn toggle_hiding(&self, is_hidden: bool) {
        self.dispatch(Action::ToggleHiding(is_hidden));
    }

    /// Stop animation, stop rotation, zero the value and un-hide, in that order.
    pub fn reset(&self) {
        debug!(index = self.index(), "widget reset");
        for action in RESET_SEQUENCE {
            self.dispatch(action);
        }
    }

    /// Advance the spin by one step. Called by the scheduled task.
    pub fn tick(&self) {
        self.inner.borrow_mut().tick();
    }

    fn dispatch(&self, action: Action) {
        let mut inner = self.inner.borrow_mut();
        let transition = inner.state.apply(action, inner.features);
        debug!(
            index = inner.state.index(),
            ?action,
            state = ?transition.state,
            "widget transition"
        );
        inner.state = transition.state;

        match transition.spin {
            SpinChange::Keep => {}
            SpinChange::Start => self.start_spin(&mut inner),
            SpinChange::Stop => self.stop_spin(&mut inner),
        }
        inner.render();
    }

    fn start_spin(&self, inner: &mut Inner<V, S>) {
        inner.spin.reset();
        let period = inner.tick_interval;
        let weak = Rc::downgrade(&self.inner);
        let Inner {
            scheduler, task, ..
        } = inner;
        task.start(|| {
            scheduler.every(
                period,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade()
                        && let Ok(mut inner) = shared.try_borrow_mut()
                    {
                        inner.tick();
                    }
                }),
            )
        });
    }

    // Snapping the arc back to empty must not animate, so the transition is
    // suppressed for this frame and restored on the next event-loop turn.
    fn stop_spin(&self, inner: &mut Inner<V, S>) {
        if !inner.task.cancel() {
            return;
        }
        inner.spin.reset();
        inner.transition_suppressed = true;

        let weak = Rc::downgrade(&self.inner);
        inner.scheduler.defer(Box::new(move || {
            if let Some(shared) = weak.upgrade()
                && let Ok(mut inner) = shared.try_borrow_mut()
            {
                inner.transition_suppressed = false;
                inner.view.set_transition(true);
            }
        }));
    }
}

impl<V: View, S: Scheduler> fmt::Debug for ProgressWidget<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("ProgressWidget")
                .field("state", &inner.state)
                .field("features", &inner.features)
                .field("spinning", &inner.task.is_active())
                .finish(),
            Err(_) => f.write_str("ProgressWidget { <busy> }"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::VirtualScheduler;
    use crate::view::HeadlessView;

    type TestWidget = ProgressWidget<HeadlessView, VirtualScheduler>;

    fn widget() -> (TestWidget, VirtualScheduler) {
        widget_with(Features::default())
    }

    fn widget_with(features: Features) -> (TestWidget, VirtualScheduler) {
        let scheduler = VirtualScheduler::new();
        let options = WidgetOptions {
            features,
            ..WidgetOptions::default()
        };
        let widget = ProgressWidget::new(0, HeadlessView::default(), scheduler.clone(), options);
        (widget, scheduler)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn arc(widget: &TestWidget) -> f64 {
        widget.inspect_view(|view| view.arc_offset)
    }

    #[test]
    fn initial_frame_is_drawn_empty() {
        let (widget, _) = widget();
        let circumference = widget.ring().circumference();
        assert_eq!(arc(&widget), circumference);
        assert!(widget.inspect_view(|view| view.frame.is_some()));
    }

    #[test]
    fn set_value_redraws_arc_and_mirrors_input() {
        let (widget, _) = widget();
        widget.set_value(50);
        let half = widget.ring().circumference() * 0.5;
        assert!((arc(&widget) - half).abs() < 1e-9);
        let text = widget.inspect_view(|view| view.frame.as_ref().map(|f| f.value_text.clone()));
        assert_eq!(text.as_deref(), Some("50"));
    }

    #[test]
    fn set_value_coerces_raw_text() {
        let (widget, _) = widget();
        widget.set_value("150");
        assert_eq!(widget.get_value(), 100);
        widget.set_value("-5");
        assert_eq!(widget.get_value(), 5);
        widget.set_value("abc");
        assert_eq!(widget.get_value(), 0);
    }

    #[test]
    fn spin_sweeps_once_per_hundred_ticks() {
        let (widget, scheduler) = widget();
        let ring = widget.ring();
        widget.toggle_animation(true);

        scheduler.advance(ms(20));
        assert_eq!(widget.inspect_view(|view| view.draws), 1);
        assert!((arc(&widget) - (ring.circumference() - ring.step())).abs() < 1e-9);

        scheduler.advance(ms(1980));
        assert_eq!(widget.inspect_view(|view| view.draws), 100);
        assert!(arc(&widget).abs() < 1e-9);
    }

    #[test]
    fn at_most_one_spin_task() {
        let (widget, scheduler) = widget();
        widget.toggle_animation(true);
        widget.toggle_animation(true);
        widget.toggle_animation(true);
        assert_eq!(scheduler.live_tasks(), 1);

        scheduler.advance(ms(20));
        assert_eq!(widget.inspect_view(|view| view.draws), 1);

        widget.toggle_animation(false);
        widget.toggle_animation(false);
        assert_eq!(scheduler.live_tasks(), 0);
        assert!(!widget.is_spinning());
    }

    #[test]
    fn stopping_snaps_back_without_transition() {
        let (widget, scheduler) = widget();
        widget.toggle_animation(true);
        scheduler.advance(ms(400));

        widget.toggle_animation(false);
        assert!(!widget.inspect_view(|view| view.transition_enabled));
        assert!(widget.frame().transition_suppressed);
        assert_eq!(arc(&widget), widget.ring().empty_offset());

        scheduler.advance(Duration::ZERO);
        assert!(widget.inspect_view(|view| view.transition_enabled));
        assert!(!widget.frame().transition_suppressed);

        let draws = widget.inspect_view(|view| view.draws);
        scheduler.advance(ms(200));
        assert_eq!(widget.inspect_view(|view| view.draws), draws);
    }

    #[test]
    fn stopping_idle_widget_keeps_transition() {
        let (widget, scheduler) = widget();
        widget.toggle_animation(false);
        assert!(widget.inspect_view(|view| view.transition_enabled));
        assert_eq!(scheduler.pending_deferred(), 0);
    }

    #[test]
    fn stopping_idle_widget_keeps_value() {
        let (widget, _) = widget();
        widget.set_value(60);
        widget.toggle_animation(false);
        assert_eq!(widget.get_value(), 60);
        assert_eq!(arc(&widget), widget.ring().offset_for(60));
    }

    #[test]
    fn animate_rotate_then_stop() {
        let (widget, _) = widget();
        widget.toggle_animation(true);
        widget.toggle_rotation(true);
        assert!(widget.state().is_rotated());

        widget.toggle_animation(false);
        let state = widget.state();
        assert!(!state.is_animated());
        assert!(!state.is_rotated());
        assert!(!widget.controls().rotate_enabled);
    }

    #[test]
    fn rotation_without_animation_is_forced_off() {
        let (widget, _) = widget();
        widget.toggle_rotation(true);
        assert!(!widget.state().is_rotated());
        let checked = widget.inspect_view(|view| view.frame.as_ref().map(|f| f.rotate_checked));
        assert_eq!(checked, Some(false));
    }

    #[test]
    fn reduced_variant_ignores_rotation() {
        let (widget, _) = widget_with(Features { rotation: false });
        widget.toggle_animation(true);
        widget.toggle_rotation(true);
        assert!(!widget.state().is_rotated());
        assert!(!widget.controls().rotate_enabled);
    }

    #[test]
    fn hiding_twice_matches_hiding_once() {
        let (widget, scheduler) = widget();
        widget.set_value(40);
        widget.toggle_animation(true);
        widget.toggle_hiding(true);
        let once = (widget.state(), widget.controls());
        widget.toggle_hiding(true);
        assert_eq!((widget.state(), widget.controls()), once);
        assert_eq!(scheduler.live_tasks(), 0);

        let controls = widget.controls();
        assert!(!controls.value_enabled && !controls.animate_enabled && !controls.rotate_enabled);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let setups: [fn(&TestWidget); 4] = [
            |w| w.set_value(77),
            |w| {
                w.toggle_animation(true);
                w.toggle_rotation(true);
            },
            |w| {
                w.set_value(12);
                w.toggle_hiding(true);
            },
            |w| {
                w.toggle_animation(true);
                w.toggle_hiding(true);
            },
        ];

        for setup in setups {
            let (widget, scheduler) = widget();
            setup(&widget);
            scheduler.advance(ms(60));
            widget.reset();

            assert_eq!(widget.state(), WidgetState::new(0));
            assert_eq!(
                widget.controls(),
                ControlState {
                    value_enabled: true,
                    animate_enabled: true,
                    rotate_enabled: false,
                }
            );
            assert_eq!(scheduler.live_tasks(), 0);
        }
    }

    #[test]
    fn dropping_last_handle_cancels_spin() {
        let (widget, scheduler) = widget();
        let other = widget.clone();
        widget.toggle_animation(true);
        drop(widget);
        assert_eq!(scheduler.live_tasks(), 1);
        drop(other);
        assert_eq!(scheduler.live_tasks(), 0);
        scheduler.advance(ms(100));
    }

    #[test]
    fn restart_begins_from_empty_arc() {
        let (widget, scheduler) = widget();
        widget.toggle_animation(true);
        scheduler.advance(ms(500));
        widget.toggle_animation(true);
        assert_eq!(arc(&widget), widget.ring().empty_offset());
    }
}
