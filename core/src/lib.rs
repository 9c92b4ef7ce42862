//! Core of the ringbar circular progress widget.
//!
//! The widget is split into a pure state machine ([`machine`]), a render step
//! that turns state into a [`Frame`] ([`view`]), and a controller
//! ([`ProgressWidget`]) that owns the animation task and pushes frames into a
//! [`View`]. Nothing in this crate touches the DOM; the browser front end and
//! the headless REPL provide their own views and schedulers.

pub mod config;
pub mod error;
pub mod geometry;
pub mod machine;
pub mod sched;
pub mod spin;
pub mod value;
pub mod view;
pub mod widget;

// Re-exports for convenience
pub use error::ConfigError;
pub use geometry::Ring;
pub use machine::{Action, ControlState, Features, SpinChange, Transition, WidgetState};
pub use sched::{Cancel, Scheduler, TaskSlot, VirtualScheduler, VirtualTask};
pub use spin::Spin;
pub use value::coerce_percent;
pub use view::{Frame, HeadlessView, Modifiers, View};
pub use widget::{ProgressWidget, WidgetOptions};
