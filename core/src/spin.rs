//! Indeterminate spin animation sub-state.

use crate::geometry::Ring;

/// Ticks per full sweep of the arc.
pub const TICKS_PER_REVOLUTION: u32 = 100;

// The dash pattern is one circumference of stroke then one of gap, so offsets
// repeat every two revolutions.
const TICK_PERIOD: u32 = 2 * TICKS_PER_REVOLUTION;

/// Progress of the spin animation since it last started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spin {
    ticks: u32,
}

impl Spin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advance one tick and return the arc offset to draw.
    pub fn advance(&mut self, ring: &Ring) -> f64 {
        self.ticks = (self.ticks + 1) % TICK_PERIOD;
        self.offset(ring)
    }

    pub fn offset(&self, ring: &Ring) -> f64 {
        ring.circumference() - ring.step() * f64::from(self.ticks)
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let ring = Ring::default();
        let spin = Spin::new();
        assert_eq!(spin.offset(&ring), ring.empty_offset());
    }

    #[test]
    fn full_after_one_revolution() {
        let ring = Ring::default();
        let mut spin = Spin::new();
        let mut last = 0.0;
        for _ in 0..TICKS_PER_REVOLUTION {
            last = spin.advance(&ring);
        }
        assert!(last.abs() < 1e-9);
    }

    #[test]
    fn each_tick_moves_one_step() {
        let ring = Ring::new(20.0);
        let mut spin = Spin::new();
        let first = spin.advance(&ring);
        let second = spin.advance(&ring);
        assert!((first - second - ring.step()).abs() < 1e-9);
    }

    #[test]
    fn counter_wraps_after_two_revolutions() {
        let ring = Ring::default();
        let mut spin = Spin::new();
        for _ in 0..TICK_PERIOD {
            spin.advance(&ring);
        }
        assert_eq!(spin.ticks(), 0);
        assert_eq!(spin.offset(&ring), ring.empty_offset());
    }

    #[test]
    fn reset_returns_to_empty() {
        let ring = Ring::default();
        let mut spin = Spin::new();
        spin.advance(&ring);
        spin.reset();
        assert_eq!(spin, Spin::new());
    }
}
