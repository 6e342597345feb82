//! Bound-statistics figure: CC4 contour lines with policies colored by their
//! uncertainty share, plus a shared colorbar.
//!
//! Writes `final_stdev_sharexy.png` and an SVG copy into the output directory.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PlotConfig;
use crate::core::contour::{IsoLine, default_levels, iso_lines};
use crate::core::surface::Surface;
use crate::data::BoundStats;
use crate::figure::layout::FigurePlan;
use crate::figure::render::Backdrop;
use crate::figure::{save_png, save_svg};

pub const OUTPUT_STEM: &str = "final_stdev_sharexy";

pub fn output_paths(out_dir: &Path) -> (PathBuf, PathBuf) {
    (
        out_dir.join(format!("{OUTPUT_STEM}.png")),
        out_dir.join(format!("{OUTPUT_STEM}.svg")),
    )
}

/// Contour lines of the masked surface for each configured CC3 value.
pub fn compute_contours(cfg: &PlotConfig) -> Vec<Vec<IsoLine>> {
    let mesh = cfg.mesh();
    let limits = cfg.c4_limits();
    let levels = default_levels();
    cfg.policy_space
        .cc3_values
        .iter()
        .map(|&cc3| {
            let surface = Surface::compute(&mesh, cc3, limits);
            let lines = iso_lines(&surface, &levels);
            debug!("CC3={cc3}: {} contour levels", lines.len());
            lines
        })
        .collect()
}

pub fn plot_uncertainty(
    bounds_path: &Path,
    out_dir: &Path,
    cfg: &PlotConfig,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    cfg.validate()?;
    let stats = BoundStats::load_json(bounds_path)?;
    info!("{} policies loaded from {}", stats.len(), bounds_path.display());
    if stats.share_range().is_none() {
        warn!("no finite uncertainty share; colorbar falls back to [0, 1]");
    }

    let plan = FigurePlan::uncertainty(&stats, cfg);
    let contours = compute_contours(cfg);
    let backdrops: Vec<Backdrop<'_>> = contours
        .iter()
        .map(|lines| Backdrop::Contours(lines.as_slice()))
        .collect();

    create_dir_all(out_dir)?;
    let (png, svg) = output_paths(out_dir);
    let size = (cfg.render.width, cfg.render.height);
    save_png(&png, size, &plan, &backdrops, cfg.render.font_size)?;
    save_svg(&svg, size, &plan, &backdrops, cfg.render.font_size)?;
    info!("Saved uncertainty figure to {} and {}", png.display(), svg.display());
    Ok(vec![png, svg])
}
