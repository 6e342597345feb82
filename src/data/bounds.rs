//! Bound statistics: per-policy upper/lower/mean estimates of cycle life.
//!
//! On disk this is a JSON positional tuple `[param_space, ub, lb, mean]` where
//! `param_space` is a list of `[cc1, cc2, cc3]` rows and the other three are
//! scalar lists aligned with it by position.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::{DataError, Result};
use super::policies::{Policy, PolicySpace};

/// Divisor applied to `mean - lb`.
pub const UNCERTAINTY_SCALE: f64 = 5.0 * 0.5 * 0.5 * 0.5 * 0.5 * 0.5;

#[derive(Clone, Debug)]
pub struct BoundStats {
    pub param_space: PolicySpace,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub mean: Vec<f64>,
}

type RawBounds = (Vec<Policy>, Vec<f64>, Vec<f64>, Vec<f64>);

impl BoundStats {
    pub fn from_parts(
        param_space: Vec<Policy>,
        upper: Vec<f64>,
        lower: Vec<f64>,
        mean: Vec<f64>,
    ) -> Result<Self> {
        let n = param_space.len();
        for (what, len) in [
            ("upper bound", upper.len()),
            ("lower bound", lower.len()),
            ("mean", mean.len()),
        ] {
            if len != n {
                return Err(DataError::Shape {
                    what,
                    expected: n,
                    found: len,
                });
            }
        }
        Ok(Self {
            param_space: PolicySpace::new(param_space),
            upper,
            lower,
            mean,
        })
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stats = Self::parse_json(&text, path)?;
        debug!(
            "loaded bound statistics for {} policies from {}",
            stats.len(),
            path.display()
        );
        Ok(stats)
    }

    pub fn parse_json(text: &str, origin: &Path) -> Result<Self> {
        let (param_space, upper, lower, mean): RawBounds =
            serde_json::from_str(text).map_err(|source| DataError::Json {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_parts(param_space, upper, lower, mean)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.param_space.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.param_space.is_empty()
    }

    /// `(mean - lb) / UNCERTAINTY_SCALE` per policy.
    pub fn uncertainty_share(&self) -> Vec<f64> {
        self.mean
            .iter()
            .zip(&self.lower)
            .map(|(m, lb)| (m - lb) / UNCERTAINTY_SCALE)
            .collect()
    }

    /// (min, max) of the uncertainty share, skipping NaN. `None` if nothing is left.
    pub fn share_range(&self) -> Option<(f64, f64)> {
        let share = self.uncertainty_share();
        let mut it = share.iter().copied().filter(|v| !v.is_nan());
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Policies with CC3 == `cc3` and their uncertainty share, in input order.
    pub fn subset_with_cc3(&self, cc3: f64) -> Vec<(Policy, f64)> {
        let share = self.uncertainty_share();
        self.param_space
            .indices_with_cc3(cc3)
            .into_iter()
            .map(|i| (self.param_space.as_slice()[i], share[i]))
            .collect()
    }
}
