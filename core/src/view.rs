//! Render model: turns widget state into a [`Frame`] and hands it to a [`View`].

use serde::Serialize;

use crate::geometry::Ring;
use crate::machine::{ControlState, Features, WidgetState};
use crate::spin::Spin;

/// Modifier classes on the widget root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub animated: bool,
    pub rotated: bool,
    pub hidden: bool,
}

impl Modifiers {
    /// `(modifier name, present)` pairs, in a stable order.
    pub fn entries(self) -> [(&'static str, bool); 3] {
        [
            ("animated", self.animated),
            ("rotated", self.rotated),
            ("hidden", self.hidden),
        ]
    }
}

/// Everything a view needs to show one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub modifiers: Modifiers,
    pub arc_offset: f64,
    /// Text mirrored into the numeric input.
    pub value_text: String,
    pub animate_checked: bool,
    pub rotate_checked: bool,
    pub hide_checked: bool,
    pub controls: ControlState,
    /// The arc's CSS transition is switched off until the next event-loop turn.
    pub transition_suppressed: bool,
}

/// Build the frame for a state.
///
/// While animated the spin owns the arc; otherwise the arc shows the value.
pub fn render(
    state: &WidgetState,
    features: Features,
    ring: &Ring,
    spin: &Spin,
    transition_suppressed: bool,
) -> Frame {
    let arc_offset = if state.is_animated() {
        spin.offset(ring)
    } else {
        ring.offset_for(state.value())
    };

    Frame {
        modifiers: Modifiers {
            animated: state.is_animated(),
            rotated: state.is_rotated(),
            hidden: state.is_hidden(),
        },
        arc_offset,
        value_text: state.value().to_string(),
        animate_checked: state.is_animated(),
        rotate_checked: state.is_rotated(),
        hide_checked: state.is_hidden(),
        controls: state.controls(features),
        transition_suppressed,
    }
}

/// Sink for rendered output.
pub trait View {
    /// Bring classes, controls and the arc in line with `frame`.
    fn apply(&mut self, frame: &Frame);

    /// Write a stroke-dashoffset straight to the arc, leaving everything else.
    fn draw_arc(&mut self, offset: f64);

    /// Switch the arc's CSS transition on or off.
    fn set_transition(&mut self, enabled: bool);
}

/// View that only remembers what it was told. Used by the REPL and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessView {
    pub frame: Option<Frame>,
    pub arc_offset: f64,
    pub transition_enabled: bool,
    /// Number of direct arc draws (spin ticks).
    pub draws: usize,
}

impl View for HeadlessView {
    fn apply(&mut self, frame: &Frame) {
        self.arc_offset = frame.arc_offset;
        self.transition_enabled = !frame.transition_suppressed;
        self.frame = Some(frame.clone());
    }

    fn draw_arc(&mut self, offset: f64) {
        self.arc_offset = offset;
        self.draws += 1;
    }

    fn set_transition(&mut self, enabled: bool) {
        self.transition_enabled = enabled;
    }
}
