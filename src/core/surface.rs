//! core/surface.rs — closed-form CC4 surface over the (CC1, CC2) mesh.
//!
//! The four constant-current steps share one charging budget:
//!   CC4 = K / (C - (A/CC1 + A/CC2 + A/CC3))
//! with K = 0.2, C = 1/6, A = 0.2. Values outside the validity limits become NaN
//! so they drop out of contour and pseudocolor rendering. A denominator near zero
//! gives ±inf, which the limit check also removes.

use serde::{Deserialize, Serialize};

use crate::core::grid::Mesh;

/// Numerator of the closed form.
pub const CC4_NUMERATOR: f64 = 0.2;
/// Total budget the first three steps draw from.
pub const CC4_BUDGET: f64 = 1.0 / 6.0;
/// Per-step share numerator.
pub const CC4_STEP_SHARE: f64 = 0.2;

/// Raw CC4 value, unmasked. May be infinite or negative.
#[inline]
pub fn cc4(cc1: f64, cc2: f64, cc3: f64) -> f64 {
    let spent = CC4_STEP_SHARE / cc1 + CC4_STEP_SHARE / cc2 + CC4_STEP_SHARE / cc3;
    CC4_NUMERATOR / (CC4_BUDGET - spent)
}

/// Inclusive validity range for CC4.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct C4Limits {
    pub lower: f64,
    pub upper: f64,
}

impl Default for C4Limits {
    fn default() -> Self {
        Self {
            lower: 0.1,
            upper: 4.81,
        }
    }
}

impl C4Limits {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// NaN for anything strictly outside the limits; NaN input stays NaN.
    #[inline]
    pub fn mask(&self, v: f64) -> f64 {
        if v < self.lower || v > self.upper {
            f64::NAN
        } else {
            v
        }
    }
}

/// Masked CC4 value.
#[inline]
pub fn cc4_masked(cc1: f64, cc2: f64, cc3: f64, limits: C4Limits) -> f64 {
    limits.mask(cc4(cc1, cc2, cc3))
}

/// CC4 evaluated on every mesh point for one CC3 slice.
#[derive(Clone, Debug)]
pub struct Surface {
    pub mesh: Mesh,
    pub cc3: f64,
    pub limits: C4Limits,
    /// Row-major, see [`Mesh`].
    pub values: Vec<f64>,
}

impl Surface {
    pub fn compute(mesh: &Mesh, cc3: f64, limits: C4Limits) -> Self {
        let values: Vec<f64> = mesh
            .points()
            .map(|(x, y)| cc4_masked(x, y, cc3, limits))
            .collect();
        mesh.assert_values_len(&values);
        Self {
            mesh: mesh.clone(),
            cc3,
            limits,
            values,
        }
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[self.mesh.index(row, col)]
    }

    /// Number of mesh points that survived the mask.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// (min, max) over valid points, `None` when everything is masked.
    pub fn valid_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| !v.is_nan()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn symmetric_policy_matches_hand_value() {
        // 0.2 / (1/6 - 3 * 0.2/4.8) = 0.2 / (1/6 - 1/8) = 4.8
        assert_relative_eq!(cc4(4.8, 4.8, 4.8), 4.8, epsilon = 1e-12);
    }

    #[test]
    fn formula_is_symmetric_in_first_three_steps() {
        let a = cc4(3.6, 6.0, 5.2);
        let b = cc4(5.2, 3.6, 6.0);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn mask_drops_out_of_range_and_infinities() {
        let lim = C4Limits::new(0.1, 4.81);
        assert!(lim.mask(0.05).is_nan());
        assert!(lim.mask(4.9).is_nan());
        assert!(lim.mask(f64::INFINITY).is_nan());
        assert!(lim.mask(f64::NEG_INFINITY).is_nan());
        assert!(lim.mask(f64::NAN).is_nan());
        assert_eq!(lim.mask(0.1), 0.1);
        assert_eq!(lim.mask(4.81), 4.81);
        assert_eq!(lim.mask(3.0), 3.0);
    }

    #[test]
    fn zero_denominator_is_masked_not_raised() {
        // 3 * 0.2/3.6 == 1/6, so the denominator vanishes.
        let v = cc4_masked(3.6, 3.6, 3.6, C4Limits::default());
        assert!(v.is_nan());
    }

    #[test]
    fn surface_values_follow_mesh_order() {
        let mesh = Mesh::new(vec![4.0, 4.8, 6.0], vec![4.8, 7.0]);
        let s = Surface::compute(&mesh, 4.8, C4Limits::new(f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(s.values.len(), 6);
        assert_eq!(s.at(0, 1), cc4(4.8, 4.8, 4.8));
        assert_eq!(s.at(1, 2), cc4(6.0, 7.0, 4.8));
        assert_eq!(s.valid_count(), 6);
    }

    #[test]
    fn valid_range_none_when_fully_masked() {
        let mesh = Mesh::new(vec![3.6], vec![3.6]);
        let s = Surface::compute(&mesh, 3.6, C4Limits::default());
        assert_eq!(s.valid_count(), 0);
        assert!(s.valid_range().is_none());
    }
}
