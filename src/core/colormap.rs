//! core/colormap.rs — perceptual colormaps and value normalization.
//!
//! Maps are sampled at nine evenly spaced anchors and interpolated linearly in RGB.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 73, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (110, 206, 88),
    (253, 231, 37),
];

const PLASMA: [(u8, u8, u8); 9] = [
    (13, 8, 135),
    (76, 2, 161),
    (126, 3, 168),
    (169, 35, 149),
    (204, 71, 120),
    (229, 107, 93),
    (248, 148, 65),
    (253, 195, 40),
    (240, 249, 33),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    Viridis,
    ViridisR,
    Plasma,
    PlasmaR,
}

impl Colormap {
    fn anchors(self) -> &'static [(u8, u8, u8); 9] {
        match self {
            Colormap::Viridis | Colormap::ViridisR => &VIRIDIS,
            Colormap::Plasma | Colormap::PlasmaR => &PLASMA,
        }
    }

    fn reversed(self) -> bool {
        matches!(self, Colormap::ViridisR | Colormap::PlasmaR)
    }

    /// Color at `t` in [0, 1]; out-of-range `t` is clamped.
    pub fn at(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed() { 1.0 - t } else { t };
        let anchors = self.anchors();
        let pos = t * (anchors.len() - 1) as f64;
        let i0 = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - i0 as f64;
        let (r0, g0, b0) = anchors[i0];
        let (r1, g1, b1) = anchors[i0 + 1];
        let lerp = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * frac)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

/// Linear vmin..vmax → 0..1 mapping, clipped at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `v` in the range; a collapsed range maps everything to 0.
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        ((v - self.vmin) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, cmap: Colormap, v: f64) -> RGBColor {
        cmap.at(self.apply(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_anchor_colors() {
        assert_eq!(Colormap::Viridis.at(0.0), RGBColor(68, 1, 84));
        assert_eq!(Colormap::Viridis.at(1.0), RGBColor(253, 231, 37));
        assert_eq!(Colormap::PlasmaR.at(0.0), RGBColor(240, 249, 33));
        assert_eq!(Colormap::PlasmaR.at(1.0), RGBColor(13, 8, 135));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Colormap::Plasma.at(-3.0), Colormap::Plasma.at(0.0));
        assert_eq!(Colormap::Plasma.at(7.0), Colormap::Plasma.at(1.0));
    }

    #[test]
    fn midpoint_interpolates_between_anchors() {
        // t = 1/16 lies halfway between the first two viridis anchors.
        let c = Colormap::Viridis.at(1.0 / 16.0);
        assert_eq!(c, RGBColor(70, 21, 102));
    }

    #[test]
    fn normalize_clips_and_scales() {
        let n = Normalize::new(2.5, 4.8);
        assert_eq!(n.apply(2.5), 0.0);
        assert_eq!(n.apply(4.8), 1.0);
        assert_eq!(n.apply(1.0), 0.0);
        assert_eq!(n.apply(9.0), 1.0);
        assert!((n.apply(3.65) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn collapsed_range_maps_to_zero() {
        let n = Normalize::new(1.0, 1.0);
        assert_eq!(n.apply(1.0), 0.0);
        assert_eq!(n.apply(5.0), 0.0);
    }
}
