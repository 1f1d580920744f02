//! Rotation windows: half-open intervals on the cyclic timeline.
//!
//! A [`RotationWindow`] is the uncertainty about a rotation's current phase.
//! Windows from independent sightings of the same world are intersected with
//! [`RotationWindow::combine`]; an empty intersection means the sightings
//! contradict each other.
//!
//! # Reference frame
//!
//! `combine` shifts both windows so that `self.start` sits at phase 0 and
//! resolves boundary ties in that frame. The operation is therefore not
//! symmetric: the running estimate is always the receiver and the incoming
//! window the argument. Reconciliation folds newest-to-oldest in exactly that
//! order.
//!
//! ```text
//!   0                         end'
//!   |=========== self ==========)
//!         [--- other (case A) ---------)
//! ---)  (case B: other wraps into the frame from the left)
//! ```
//!
//! # Invariant
//!
//! Every window must be shorter than half the circumference, otherwise a
//! window could overlap another in two places. Construction does not check
//! this; the producers ([`crate::sighting`] and `combine` itself) guarantee it.

mod likelihood;

pub use likelihood::LikelihoodDistribution;

use std::fmt;

use thiserror::Error;

use crate::ring::RingGeometry;

/// Two windows share no phase, so the sightings behind them contradict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation windows do not overlap")]
pub struct Inconsistent;

/// A half-open interval `[start, end)` on the rotation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationWindow {
    start: i64,
    end: i64,
    ring: RingGeometry,
}

impl RotationWindow {
    /// Create a window, wrapping both endpoints onto the ring.
    pub fn new(start: i64, end: i64, ring: RingGeometry) -> Self {
        Self {
            start: ring.wrap(start),
            end: ring.wrap(end),
            ring,
        }
    }

    /// Normalized start phase.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Normalized (exclusive) end phase.
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Geometry this window lives on.
    #[inline]
    pub fn ring(&self) -> RingGeometry {
        self.ring
    }

    /// Forward distance from `start` to `end`.
    ///
    /// A window whose endpoints coincide is empty and has length 0.
    pub fn length(&self) -> i64 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            (self.ring.circumference() - self.start) + self.end
        }
    }

    /// Intersect this window with `other`, using `self` as the reference frame.
    ///
    /// # Errors
    ///
    /// Returns [`Inconsistent`] when `other` does not overlap `self` in this
    /// frame.
    pub fn combine(&self, other: &RotationWindow) -> Result<RotationWindow, Inconsistent> {
        debug_assert_eq!(self.ring, other.ring, "windows from different rings");

        let ring = self.ring;
        // Shift so that self.start lands on 0.
        let offset = ring.circumference() - self.start;
        let end = ring.wrap(self.end + offset);
        let other_start = ring.wrap(other.start + offset);
        let other_end = ring.wrap(other.end + offset);

        let (start, end) = if other_start < end {
            (other_start, end.min(other_end))
        } else if other_end < end {
            let start = if other_start < other_end {
                other_start
            } else {
                0
            };
            (start, other_end)
        } else {
            return Err(Inconsistent);
        };

        Ok(RotationWindow::new(start - offset, end - offset, ring))
    }

    /// Project this window onto the discrete locations.
    pub fn likelihoods(&self) -> LikelihoodDistribution {
        likelihood::project(self)
    }
}

impl fmt::Display for RotationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> RingGeometry {
        RingGeometry::new_unchecked(4, 900)
    }

    fn window(start: i64, end: i64) -> RotationWindow {
        RotationWindow::new(start, end, ring())
    }

    #[test]
    fn test_new_wraps_endpoints() {
        let w = window(-100, 3700);
        assert_eq!(w.start(), 3500);
        assert_eq!(w.end(), 100);
    }

    #[test]
    fn test_length_plain() {
        assert_eq!(window(100, 1000).length(), 900);
    }

    #[test]
    fn test_length_wrapping() {
        assert_eq!(window(3500, 100).length(), 200);
    }

    #[test]
    fn test_length_empty() {
        assert_eq!(window(42, 42).length(), 0);
    }

    #[test]
    fn test_combine_with_self_is_identity() {
        let w = window(3150, 450);
        assert_eq!(w.combine(&w), Ok(w));
    }

    #[test]
    fn test_combine_other_starts_inside() {
        let a = window(901, 1801);
        let b = window(901, 1804);
        assert_eq!(a.combine(&b), Ok(window(901, 1801)));
    }

    #[test]
    fn test_combine_other_ends_inside() {
        let a = window(0, 900);
        let b = window(3150, 450);
        assert_eq!(a.combine(&b), Ok(window(0, 450)));
    }

    #[test]
    fn test_combine_other_strictly_inside() {
        let a = window(0, 900);
        let b = window(200, 300);
        assert_eq!(a.combine(&b), Ok(window(200, 300)));
    }

    #[test]
    fn test_combine_across_zero() {
        let a = window(3400, 400);
        let b = window(0, 1000);
        assert_eq!(a.combine(&b), Ok(window(0, 400)));
    }

    #[test]
    fn test_combine_disjoint_is_inconsistent() {
        let a = window(0, 900);
        let b = window(1900, 2834);
        assert_eq!(a.combine(&b), Err(Inconsistent));
    }

    #[test]
    fn test_combine_touching_at_end_is_inconsistent() {
        // Half-open: [0, 900) and [900, 1800) share no phase.
        let a = window(0, 900);
        let b = window(900, 1800);
        assert_eq!(a.combine(&b), Err(Inconsistent));
    }

    #[test]
    fn test_combine_touching_at_start_yields_empty_window() {
        // Boundary tie resolved in the receiver's frame.
        let a = window(900, 1800);
        let b = window(0, 900);
        let combined = a.combine(&b).unwrap();
        assert_eq!(combined.length(), 0);
        assert_eq!(combined.start(), 900);
    }

    #[test]
    fn test_empty_window_rejects_everything() {
        let empty = window(900, 900);
        assert_eq!(empty.combine(&window(0, 1800)), Err(Inconsistent));
    }

    #[test]
    fn test_display() {
        assert_eq!(window(10, 20).to_string(), "[10, 20)");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_window() -> impl Strategy<Value = RotationWindow> {
            // Lengths strictly below half of the 3600s ring.
            (0i64..3600, 1i64..1800).prop_map(|(start, len)| window(start, start + len))
        }

        proptest! {
            #[test]
            fn test_combine_self_identity(w in arb_window()) {
                prop_assert_eq!(w.combine(&w), Ok(w));
            }

            #[test]
            fn test_combine_never_grows(a in arb_window(), b in arb_window()) {
                if let Ok(c) = a.combine(&b) {
                    prop_assert!(c.length() <= a.length());
                    prop_assert!(c.length() <= b.length());
                }
            }

            #[test]
            fn test_combined_window_lies_inside_receiver(a in arb_window(), b in arb_window()) {
                if let Ok(c) = a.combine(&b) {
                    let shift = |x: i64| (x - a.start()).rem_euclid(3600);
                    prop_assert!(shift(c.start()) <= a.length());
                    prop_assert!(shift(c.start()) + c.length() <= a.length());
                }
            }
        }
    }
}
