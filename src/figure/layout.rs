//! Figure plans: what goes in each of the 2x3 panels, computed before any drawing.
//!
//! A plan fixes the panel order, the policies scattered in each panel, the labels,
//! the shared axis range and the colorbar scale. Rendering only reads it.

use crate::config::PlotConfig;
use crate::core::colormap::{Colormap, Normalize};
use crate::data::{BoundStats, Policy, PolicySpace};

pub const ROWS: usize = 2;
pub const COLS: usize = 3;
pub const PANEL_COUNT: usize = ROWS * COLS;

/// Anchor of the "CC3=… / n policies" annotation in data coordinates.
pub const ANNOTATION_AT: (f64, f64) = (3.52, 3.52);

/// (row, col) of panel `k`, row-major.
#[inline]
pub fn panel_position(k: usize) -> (usize, usize) {
    (k / COLS, k % COLS)
}

/// Bold panel letter: a, b, c, ...
#[inline]
pub fn panel_letter(k: usize) -> char {
    (b'a' + (k % 26) as u8) as char
}

/// Print a CC3 value with at least one decimal (4.0, not 4).
pub fn format_cc3(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureKind {
    /// Pseudocolor CC4 surface with black policy markers.
    Surface,
    /// CC4 contour lines with policies colored by uncertainty share.
    Uncertainty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Colored through the figure scale when present, black otherwise.
    pub value: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct PanelPlan {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub cc3: f64,
    pub points: Vec<ScatterPoint>,
    pub baseline: Option<(f64, f64)>,
    pub title: Option<String>,
    pub letter: Option<char>,
    pub annotation: Vec<String>,
    pub x_desc: Option<&'static str>,
    pub y_desc: Option<&'static str>,
    /// Tick labels along the bottom axis. Off on inner panels of shared-axis figures.
    pub x_tick_labels: bool,
    pub y_tick_labels: bool,
}

impl PanelPlan {
    pub fn policy_count(&self) -> usize {
        self.points.len()
    }
}

#[derive(Clone, Debug)]
pub struct ColorScale {
    pub cmap: Colormap,
    pub norm: Normalize,
    pub title: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FigurePlan {
    pub kind: FigureKind,
    pub panels: Vec<PanelPlan>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub color: ColorScale,
}

impl FigurePlan {
    /// Layout for the per-configuration surface figure.
    pub fn surface(space: &PolicySpace, cfg: &PlotConfig) -> Self {
        let range = cfg.axis_range();
        let one_step = cfg.policy_space.one_step;
        let panels = cfg
            .policy_space
            .cc3_values
            .iter()
            .take(PANEL_COUNT)
            .enumerate()
            .map(|(k, &cc3)| {
                let (row, col) = panel_position(k);
                let points: Vec<ScatterPoint> = space
                    .with_cc3(cc3)
                    .iter()
                    .map(black_point)
                    .collect();
                let title = format!("CC3={}: {} policies", format_cc3(cc3), points.len());
                PanelPlan {
                    index: k,
                    row,
                    col,
                    cc3,
                    points,
                    baseline: (cc3 == one_step).then_some((one_step, one_step)),
                    title: Some(title),
                    letter: None,
                    annotation: Vec::new(),
                    x_desc: Some("CC1"),
                    y_desc: Some("CC2"),
                    x_tick_labels: true,
                    y_tick_labels: true,
                }
            })
            .collect();

        Self {
            kind: FigureKind::Surface,
            panels,
            x_range: range,
            y_range: range,
            color: ColorScale {
                cmap: cfg.render.surface_colormap,
                norm: Normalize::new(cfg.render.surface_color_min, cfg.render.surface_color_max),
                title: vec!["CC4".to_string()],
            },
        }
    }

    /// Layout for the bound-statistics figure.
    pub fn uncertainty(stats: &BoundStats, cfg: &PlotConfig) -> Self {
        let range = cfg.axis_range();
        let (vmin, vmax) = stats.share_range().unwrap_or((0.0, 1.0));
        let panels = cfg
            .policy_space
            .cc3_values
            .iter()
            .take(PANEL_COUNT)
            .enumerate()
            .map(|(k, &cc3)| {
                let (row, col) = panel_position(k);
                let points: Vec<ScatterPoint> = stats
                    .subset_with_cc3(cc3)
                    .into_iter()
                    .map(|(p, share)| ScatterPoint {
                        x: p.cc1,
                        y: p.cc2,
                        value: Some(share),
                    })
                    .collect();
                let annotation = vec![
                    format!("CC3={}", format_cc3(cc3)),
                    format!("{} policies", points.len()),
                ];
                PanelPlan {
                    index: k,
                    row,
                    col,
                    cc3,
                    points,
                    baseline: None,
                    title: None,
                    letter: Some(panel_letter(k)),
                    annotation,
                    x_desc: (row == ROWS - 1).then_some("CC1"),
                    y_desc: (col == 0).then_some("CC2"),
                    x_tick_labels: row == ROWS - 1,
                    y_tick_labels: col == 0,
                }
            })
            .collect();

        Self {
            kind: FigureKind::Uncertainty,
            panels,
            x_range: range,
            y_range: range,
            color: ColorScale {
                cmap: cfg.render.uncertainty_colormap,
                norm: Normalize::new(vmin, vmax),
                title: vec![
                    "Std. dev. of".to_string(),
                    "cycle life".to_string(),
                    "after round 4,".to_string(),
                    "σ4,i".to_string(),
                ],
            },
        }
    }

    pub fn panel_for_cc3(&self, cc3: f64) -> Option<&PanelPlan> {
        self.panels.iter().find(|p| p.cc3 == cc3)
    }
}

fn black_point(p: &Policy) -> ScatterPoint {
    ScatterPoint {
        x: p.cc1,
        y: p.cc2,
        value: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_fill_rows_first() {
        let pos: Vec<_> = (0..PANEL_COUNT).map(panel_position).collect();
        assert_eq!(pos, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn letters_start_at_a() {
        let letters: String = (0..PANEL_COUNT).map(panel_letter).collect();
        assert_eq!(letters, "abcdef");
    }

    #[test]
    fn cc3_formatting_keeps_one_decimal() {
        assert_eq!(format_cc3(4.0), "4.0");
        assert_eq!(format_cc3(3.6), "3.6");
        assert_eq!(format_cc3(5.25), "5.25");
    }
}
