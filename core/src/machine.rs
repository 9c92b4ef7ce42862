//! Pure widget state machine.
//!
//! [`WidgetState::apply`] takes the current state and an [`Action`] and
//! returns the next state together with what the spin animation should do.
//! It never touches a view or a timer.
//!
//! States, as seen from the controls:
//!
//! - **Idle**: not animated, not hidden. Value editable, animate togglable.
//! - **Animating**: value input locked, spin running, rotate togglable.
//! - **Animating + Rotated**: as Animating, with the rotation class applied.
//! - **Hidden**: overrides everything. Value is 0, nothing animates, and every
//!   control except hide is disabled. Leaving it lands in Idle at 0.

use serde::Serialize;

use ringbar_types::WidgetConfig;

/// Snapshot of one widget's state.
///
/// Fields are private so the invariants below can only be reached through
/// [`WidgetState::apply`]:
///
/// - `value <= 100`
/// - `is_rotated` implies `is_animated`
/// - `is_hidden` implies `value == 0 && !is_animated && !is_rotated`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
    index: usize,
    value: u8,
    is_animated: bool,
    is_rotated: bool,
    is_hidden: bool,
}

/// Optional controls present on a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// The rotate checkbox exists and is wired up.
    pub rotation: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { rotation: true }
    }
}

impl From<&WidgetConfig> for Features {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            rotation: config.rotate_control,
        }
    }
}

/// A request to change widget state. Values are already coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetValue(u8),
    ToggleAnimation(bool),
    ToggleRotation(bool),
    ToggleHiding(bool),
}

/// The steps of `reset()`, applied in order.
pub const RESET_SEQUENCE: [Action; 4] = [
    Action::ToggleAnimation(false),
    Action::ToggleRotation(false),
    Action::SetValue(0),
    Action::ToggleHiding(false),
];

/// What the spin animation should do after a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinChange {
    #[default]
    Keep,
    /// (Re)start from an empty arc. Any running task must be cancelled first.
    Start,
    /// Cancel the running task, if any.
    Stop,
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: WidgetState,
    pub spin: SpinChange,
}

/// Which controls accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlState {
    pub value_enabled: bool,
    pub animate_enabled: bool,
    pub rotate_enabled: bool,
}

impl WidgetState {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_animated(&self) -> bool {
        self.is_animated
    }

    pub fn is_rotated(&self) -> bool {
        self.is_rotated
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Apply one action.
    ///
    /// While hidden, value and animation requests are coerced to their hidden
    /// defaults instead of breaking the hidden invariant. Stopping a running
    /// animation also resets the value to 0, so the arc and the input agree
    /// once the spin snaps back to empty. Turning animation off while idle
    /// leaves the value alone.
    pub fn apply(self, action: Action, features: Features) -> Transition {
        let mut next = self;
        let mut spin = SpinChange::Keep;

        match action {
            Action::SetValue(value) => {
                next.value = if self.is_hidden {
                    0
                } else {
                    value.min(crate::value::MAX_PERCENT)
                };
            }
            Action::ToggleAnimation(true) if !self.is_hidden => {
                next.is_animated = true;
                spin = SpinChange::Start;
            }
            Action::ToggleAnimation(_) => {
                if self.is_animated {
                    next.value = 0;
                }
                next.is_animated = false;
                next.is_rotated = false;
                spin = SpinChange::Stop;
            }
            Action::ToggleRotation(rotated) => {
                next.is_rotated = rotated && features.rotation && self.is_animated;
            }
            Action::ToggleHiding(true) => {
                next.is_hidden = true;
                next.value = 0;
                next.is_animated = false;
                next.is_rotated = false;
                spin = SpinChange::Stop;
            }
            Action::ToggleHiding(false) => {
                next.is_hidden = false;
            }
        }

        Transition { state: next, spin }
    }

    /// Which controls accept input in this state.
    pub fn controls(&self, features: Features) -> ControlState {
        ControlState {
            value_enabled: !self.is_hidden && !self.is_animated,
            animate_enabled: !self.is_hidden,
            rotate_enabled: features.rotation && !self.is_hidden && self.is_animated,
        }
    }
}
