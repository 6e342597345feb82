//! core/contour.rs — iso-lines of a masked surface (marching squares).
//!
//! Cells touching a NaN corner emit nothing, so masked regions stay blank.
//! Ambiguous saddle cells are resolved by the mean of their four corners.

use crate::core::grid::{Mesh, arange};
use crate::core::surface::Surface;

/// Contour levels drawn over the CC4 surface.
pub fn default_levels() -> Vec<f64> {
    arange(2.5, 4.8, 0.25)
}

pub type Segment = [(f64, f64); 2];

/// All segments of one level.
#[derive(Clone, Debug)]
pub struct IsoLine {
    pub level: f64,
    pub segments: Vec<Segment>,
}

impl IsoLine {
    /// Where to put the level label: midpoint of the middle segment.
    pub fn label_anchor(&self) -> Option<(f64, f64)> {
        let seg = self.segments.get(self.segments.len() / 2)?;
        Some(((seg[0].0 + seg[1].0) * 0.5, (seg[0].1 + seg[1].1) * 0.5))
    }

    /// `%1.1f` label text.
    pub fn label(&self) -> String {
        format!("{:.1}", self.level)
    }
}

/// Iso-lines for every level; levels without any crossing are dropped.
pub fn iso_lines(surface: &Surface, levels: &[f64]) -> Vec<IsoLine> {
    levels
        .iter()
        .map(|&level| IsoLine {
            level,
            segments: march(&surface.mesh, &surface.values, level),
        })
        .filter(|line| !line.segments.is_empty())
        .collect()
}

/// Marching squares over row-major `values` on `mesh`.
pub fn march(mesh: &Mesh, values: &[f64], level: f64) -> Vec<Segment> {
    mesh.assert_values_len(values);
    let (nx, ny) = (mesh.nx(), mesh.ny());
    let mut out = Vec::new();
    if nx < 2 || ny < 2 {
        return out;
    }

    for row in 0..ny - 1 {
        for col in 0..nx - 1 {
            // Corner order: bottom-left, bottom-right, top-right, top-left.
            let z = [
                values[mesh.index(row, col)],
                values[mesh.index(row, col + 1)],
                values[mesh.index(row + 1, col + 1)],
                values[mesh.index(row + 1, col)],
            ];
            if z.iter().any(|v| v.is_nan()) {
                continue;
            }
            let (x0, x1) = (mesh.xs[col], mesh.xs[col + 1]);
            let (y0, y1) = (mesh.ys[row], mesh.ys[row + 1]);

            let mut case = 0u8;
            for (bit, &v) in z.iter().enumerate() {
                if v >= level {
                    case |= 1 << bit;
                }
            }
            if case == 0 || case == 15 {
                continue;
            }

            // Edge crossing points: bottom, right, top, left.
            let t = |a: f64, b: f64| {
                let d = b - a;
                if d.abs() < f64::EPSILON { 0.5 } else { (level - a) / d }
            };
            let bottom = (x0 + (x1 - x0) * t(z[0], z[1]), y0);
            let right = (x1, y0 + (y1 - y0) * t(z[1], z[2]));
            let top = (x0 + (x1 - x0) * t(z[3], z[2]), y1);
            let left = (x0, y0 + (y1 - y0) * t(z[0], z[3]));

            match case {
                1 | 14 => out.push([left, bottom]),
                2 | 13 => out.push([bottom, right]),
                3 | 12 => out.push([left, right]),
                4 | 11 => out.push([right, top]),
                6 | 9 => out.push([bottom, top]),
                7 | 8 => out.push([left, top]),
                5 | 10 => {
                    let center = (z[0] + z[1] + z[2] + z[3]) * 0.25;
                    // In case 5 the high corners are bottom-left and top-right.
                    let center_high = center >= level;
                    if (case == 5) == center_high {
                        out.push([left, top]);
                        out.push([bottom, right]);
                    } else {
                        out.push([left, bottom]);
                        out.push([right, top]);
                    }
                }
                _ => unreachable!("case {case} handled above"),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::C4Limits;

    #[test]
    fn default_levels_span_two_and_a_half_to_four_point_seven_five() {
        let levels = default_levels();
        assert_eq!(levels.len(), 10);
        assert_eq!(levels[0], 2.5);
        assert!((levels[9] - 4.75).abs() < 1e-12);
    }

    #[test]
    fn single_cell_linear_ramp_crosses_at_interpolated_x() {
        let mesh = Mesh::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        // z = x * 4
        let values = vec![0.0, 4.0, 0.0, 4.0];
        let segs = march(&mesh, &values, 1.0);
        assert_eq!(segs.len(), 1);
        for p in segs[0] {
            assert!((p.0 - 0.25).abs() < 1e-12, "x={}", p.0);
        }
    }

    #[test]
    fn nan_corner_suppresses_cell() {
        let mesh = Mesh::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        let values = vec![0.0, 4.0, f64::NAN, 4.0];
        assert!(march(&mesh, &values, 1.0).is_empty());
    }

    #[test]
    fn saddle_emits_two_segments() {
        let mesh = Mesh::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        // High on bottom-left and top-right.
        let values = vec![2.0, 0.0, 0.0, 2.0];
        let segs = march(&mesh, &values, 1.0);
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn surface_iso_lines_sit_on_the_level() {
        let mesh = Mesh::square(3.6, 8.0, 0.2, 0.05);
        let surface = Surface::compute(&mesh, 4.8, C4Limits::default());
        let lines = iso_lines(&surface, &default_levels());
        assert!(!lines.is_empty());
        for line in &lines {
            let (x, y) = line.label_anchor().unwrap();
            let v = crate::core::surface::cc4(x, y, 4.8);
            // Linear interpolation on a 0.05 grid stays close to the true level.
            assert!((v - line.level).abs() < 0.1, "level {} got {v}", line.level);
        }
    }

    #[test]
    fn label_uses_one_decimal() {
        let line = IsoLine {
            level: 2.75,
            segments: vec![],
        };
        assert_eq!(line.label(), "2.8");
        assert!(line.label_anchor().is_none());
    }
}
