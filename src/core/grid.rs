//! core/grid.rs — evenly spaced (CC1, CC2) sample mesh.
//!
//! Axes are half-open `arange` sequences: `start + i*step` for every sample below `stop`.
//! Example: arange(3.4, 8.2, 0.01) has 480 samples, the last one ~8.19.

/// Evenly spaced samples in `[start, stop)`.
///
/// Returns an empty vector for a non-positive step or an empty interval.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let span = stop - start;
    if step.is_nan() || span.is_nan() || step <= 0.0 || span <= 0.0 {
        return Vec::new();
    }
    let n = (span / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Dense 2D mesh. Values over the mesh are stored row-major: row = CC2 index,
/// column = CC1 index (the `meshgrid` default orientation).
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Mesh {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { xs, ys }
    }

    /// Same axis on both dimensions, padded by `margin` on either side.
    pub fn square(min_bound: f64, max_bound: f64, margin: f64, step: f64) -> Self {
        let axis = arange(min_bound - margin, max_bound + margin, step);
        Self {
            xs: axis.clone(),
            ys: axis,
        }
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of (row, col).
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.ny() && col < self.nx());
        row * self.nx() + col
    }

    /// Coordinates of every mesh point in storage order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| (x, y)))
    }

    #[inline]
    pub fn assert_values_len<T>(&self, values: &[T]) {
        debug_assert_eq!(values.len(), self.len(), "mesh value length mismatch");
    }
}
