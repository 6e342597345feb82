//! Per-configuration figure: pseudocolor CC4 surface under the sampled policies.
//!
//! Reads `<dir>/policies_<name>.csv`, writes `<dir>/surface_<name>.png`.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::PlotConfig;
use crate::core::surface::Surface;
use crate::data::PolicySpace;
use crate::figure::layout::FigurePlan;
use crate::figure::render::Backdrop;
use crate::figure::save_png;

/// `<dir>/surface_<name>.png`
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("surface_{name}.png"))
}

/// One masked surface per configured CC3 value, in panel order.
pub fn compute_surfaces(cfg: &PlotConfig) -> Vec<Surface> {
    let mesh = cfg.mesh();
    let limits = cfg.c4_limits();
    cfg.policy_space
        .cc3_values
        .iter()
        .map(|&cc3| {
            let s = Surface::compute(&mesh, cc3, limits);
            debug!(
                "CC3={cc3}: {} of {} mesh points within CC4 limits",
                s.valid_count(),
                mesh.len()
            );
            s
        })
        .collect()
}

pub fn render(
    space: &PolicySpace,
    cfg: &PlotConfig,
    out_path: &Path,
) -> Result<FigurePlan, Box<dyn Error>> {
    let plan = FigurePlan::surface(space, cfg);
    let surfaces = compute_surfaces(cfg);
    let backdrops: Vec<Backdrop<'_>> = surfaces.iter().map(Backdrop::Pseudocolor).collect();
    save_png(
        out_path,
        (cfg.render.width, cfg.render.height),
        &plan,
        &backdrops,
        cfg.render.font_size,
    )?;
    Ok(plan)
}

/// Load the policies named `name` in `dir` and draw their surface figure next to them.
pub fn plot_surface(dir: &Path, name: &str, cfg: &PlotConfig) -> Result<PathBuf, Box<dyn Error>> {
    cfg.validate()?;
    let csv = PolicySpace::csv_path(dir, name);
    let space = PolicySpace::load_csv(&csv)?;
    info!("{} policies loaded from {}", space.len(), csv.display());

    let out_path = output_path(dir, name);
    let plan = render(&space, cfg, &out_path)?;
    for panel in &plan.panels {
        debug!(
            "panel {}: CC3={} with {} policies",
            panel.index,
            panel.cc3,
            panel.policy_count()
        );
    }
    info!("Saved surface figure to {}", out_path.display());
    Ok(out_path)
}
