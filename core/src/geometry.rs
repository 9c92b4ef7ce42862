//! Ring geometry: circumference and stroke-dashoffset math.
//!
//! The arc is drawn with `stroke-dasharray` equal to the circumference, so an
//! offset of one circumference shows nothing and an offset of zero shows the
//! full ring.

use std::f64::consts::PI;

use ringbar_types::RadiusSource;
use tracing::warn;

/// Geometry of one progress circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    radius: f64,
}

impl Ring {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Offset that draws `percent` of the outline.
    pub fn offset_for(&self, percent: u8) -> f64 {
        let circumference = self.circumference();
        circumference - circumference * f64::from(percent) / 100.0
    }

    /// Offset of an empty ring.
    pub fn empty_offset(&self) -> f64 {
        self.circumference()
    }

    /// Distance the spin animation advances per tick.
    pub fn step(&self) -> f64 {
        self.circumference() / 100.0
    }

    /// Build the ring for a radius source.
    ///
    /// `computed` is the arc's computed `r` property (e.g. `"45px"`), if the
    /// caller could read one. It is ignored for [`RadiusSource::Fixed`].
    pub fn resolve(source: &RadiusSource, computed: Option<&str>) -> Self {
        match source {
            RadiusSource::Fixed { radius } => Ring::new(*radius),
            RadiusSource::Computed { fallback } => match computed.and_then(parse_radius) {
                Some(radius) => Ring::new(radius),
                None => {
                    warn!(?computed, fallback, "unreadable arc radius, using fallback");
                    Ring::new(*fallback)
                }
            },
        }
    }
}

impl Default for Ring {
    fn default() -> Self {
        Ring::new(ringbar_types::DEFAULT_RADIUS)
    }
}

/// Parse a computed style length such as `"45px"` or `"45"`.
///
/// Returns `None` for anything that is not a finite, positive length.
pub fn parse_radius(css: &str) -> Option<f64> {
    let trimmed = css.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    let radius: f64 = number.parse().ok()?;
    (radius.is_finite() && radius > 0.0).then_some(radius)
}
