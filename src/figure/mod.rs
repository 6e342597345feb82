pub mod layout;
pub mod render;
pub mod surface;
pub mod uncertainty;

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::figure::layout::FigurePlan;
use crate::figure::render::{Backdrop, draw_figure};

/// Render `plan` to a PNG at `path`.
pub fn save_png(
    path: &Path,
    size: (u32, u32),
    plan: &FigurePlan,
    backdrops: &[Backdrop<'_>],
    font_size: u32,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(&root, plan, backdrops, font_size)?;
    root.present()?;
    Ok(())
}

/// Render `plan` to an SVG at `path` (vector copy with editable text).
pub fn save_svg(
    path: &Path,
    size: (u32, u32),
    plan: &FigurePlan,
    backdrops: &[Backdrop<'_>],
    font_size: u32,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_figure(&root, plan, backdrops, font_size)?;
    root.present()?;
    Ok(())
}
