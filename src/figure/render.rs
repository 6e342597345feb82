//! Drawing for figure plans: panels, pseudocolor and contour backdrops, scatter
//! layers and the shared colorbar. Generic over the plotters backend so the same
//! plan can go to PNG and SVG.

use std::error::Error;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::core::contour::IsoLine;
use crate::core::surface::Surface;
use crate::figure::layout::{
    ANNOTATION_AT, COLS, ColorScale, FigurePlan, PanelPlan, ROWS, ScatterPoint,
};

const FONT: &str = "sans-serif";
/// Share of the canvas width given to the panel grid; the rest holds the colorbar.
const PANEL_WIDTH_FRAC: f64 = 0.85;
const COLORBAR_STEPS: usize = 256;
const SCATTER_RADIUS: i32 = 5;
const PANEL_PAD: u32 = 4;

/// What sits under the scatter layer of a panel.
#[derive(Clone, Copy, Debug)]
pub enum Backdrop<'a> {
    Pseudocolor(&'a Surface),
    Contours(&'a [IsoLine]),
}

/// Margins (left, right, top, bottom) that make the plotting area square inside
/// a `dim` pixel area after the label areas are reserved.
pub fn square_plot_margins(
    dim: (u32, u32),
    y_label_area: u32,
    x_label_area: u32,
    pad: u32,
) -> (u32, u32, u32, u32) {
    let (w, h) = dim;
    let avail_w = w.saturating_sub(y_label_area + 2 * pad);
    let avail_h = h.saturating_sub(x_label_area + 2 * pad);
    let side = avail_w.min(avail_h);
    let extra_w = avail_w - side;
    let extra_h = avail_h - side;
    (
        pad + extra_w / 2,
        pad + extra_w - extra_w / 2,
        pad + extra_h / 2,
        pad + extra_h - extra_h / 2,
    )
}

/// Pixel layout of one panel cell: a header strip for the title or the bold
/// letter, then the chart body whose plotting area is square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelFrame {
    pub header_h: u32,
    pub y_label_area: u32,
    pub x_label_area: u32,
    /// (left, right, top, bottom) of the chart inside the body.
    pub margins: (u32, u32, u32, u32),
    /// Side of the square plotting area.
    pub side: u32,
}

impl PanelFrame {
    pub fn new(cell: (u32, u32), font_size: u32) -> Self {
        let (w, h) = cell;
        let header_h = (font_size * 2).min(h);
        let y_label_area = font_size * 4;
        let x_label_area = font_size * 3;
        let body = (w, h - header_h);
        let margins = square_plot_margins(body, y_label_area, x_label_area, PANEL_PAD);
        let side = w.saturating_sub(y_label_area + margins.0 + margins.1);
        Self {
            header_h,
            y_label_area,
            x_label_area,
            margins,
            side,
        }
    }

    /// x of the plotting area's left edge, in cell pixels.
    #[inline]
    pub fn plot_left(&self) -> i32 {
        (self.y_label_area + self.margins.0) as i32
    }
}

/// Decimal places for colorbar tick labels over a value span.
pub fn tick_decimals(span: f64) -> usize {
    let span = span.abs();
    if span >= 10.0 {
        0
    } else if span >= 1.0 {
        1
    } else {
        2
    }
}

/// Points that get painted. A NaN value leaves the marker out, as a masked
/// scatter would.
#[inline]
pub fn is_painted(p: &ScatterPoint) -> bool {
    !p.value.is_some_and(f64::is_nan)
}

fn blank_label(_: &f64) -> String {
    String::new()
}

/// Draw the whole figure: 2x3 panels on the left, shared colorbar on the right.
///
/// `backdrops[k]` goes under panel `k`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plan: &FigurePlan,
    backdrops: &[Backdrop<'_>],
    font_size: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (w, _) = root.dim_in_pixel();
    let split = (w as f64 * PANEL_WIDTH_FRAC).round() as i32;
    let (grid_area, bar_area) = root.split_horizontally(split);
    let cells = grid_area.split_evenly((ROWS, COLS));

    for panel in &plan.panels {
        let cell = &cells[panel.row * COLS + panel.col];
        let backdrop = backdrops.get(panel.index).copied();
        draw_panel(cell, plan, panel, backdrop, font_size)?;
    }
    draw_colorbar(&bar_area, &plan.color, font_size)?;
    Ok(())
}

/// Chart for the body of a panel cell (the cell minus its header strip).
pub fn build_panel_chart<'a, DB: DrawingBackend>(
    body: &'a DrawingArea<DB, Shift>,
    frame: &PanelFrame,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (ml, mr, mt, mb) = frame.margins;
    let chart = ChartBuilder::on(body)
        .margin_left(ml as i32)
        .margin_right(mr as i32)
        .margin_top(mt as i32)
        .margin_bottom(mb as i32)
        .x_label_area_size(frame.x_label_area as i32)
        .y_label_area_size(frame.y_label_area as i32)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    Ok(chart)
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plan: &FigurePlan,
    panel: &PanelPlan,
    backdrop: Option<Backdrop<'_>>,
    font_size: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let fs = font_size as f64;
    let frame = PanelFrame::new(area.dim_in_pixel(), font_size);
    let (header, body) = area.split_vertically(frame.header_h as i32);
    let mut chart = build_panel_chart(&body, &frame, plan.x_range, plan.y_range)?;
    let (x0, x1) = plan.x_range;
    let (y0, y1) = plan.y_range;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(6)
            .y_labels(6)
            .label_style((FONT, fs));
        if !panel.x_tick_labels {
            mesh.x_label_formatter(&blank_label);
        }
        if !panel.y_tick_labels {
            mesh.y_label_formatter(&blank_label);
        }
        if let Some(desc) = panel.x_desc {
            mesh.x_desc(desc);
        }
        if let Some(desc) = panel.y_desc {
            mesh.y_desc(desc);
        }
        mesh.draw()?;
    }

    match backdrop {
        Some(Backdrop::Pseudocolor(surface)) => {
            draw_pseudocolor(&mut chart, surface, &plan.color)?;
        }
        Some(Backdrop::Contours(lines)) => {
            draw_contours(&mut chart, lines, fs)?;
        }
        None => {}
    }

    draw_scatter(&mut chart, &panel.points, &plan.color)?;

    if let Some((bx, by)) = panel.baseline {
        let d = (x1 - x0) * 0.012;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(bx - d, by - d), (bx + d, by + d)],
            BLACK.filled(),
        )))?;
    }

    if !panel.annotation.is_empty() {
        let line_dy = (y1 - y0) * (fs * 1.2) / frame.side.max(1) as f64;
        let (ax, ay) = ANNOTATION_AT;
        let n = panel.annotation.len();
        for (i, line) in panel.annotation.iter().enumerate() {
            // Stack upward so the last line sits on the anchor.
            let y = ay + line_dy * (n - i) as f64;
            chart.draw_series(std::iter::once(Text::new(
                line.clone(),
                (ax, y),
                (FONT, fs).into_font().color(&BLACK),
            )))?;
        }
    }

    let mid_y = (frame.header_h / 2) as i32;
    if let Some(title) = &panel.title {
        let cx = frame.plot_left() + (frame.side / 2) as i32;
        header.draw(&Text::new(
            title.clone(),
            (cx, mid_y),
            TextStyle::from((FONT, fs).into_font()).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
    }
    if let Some(letter) = panel.letter {
        header.draw(&Text::new(
            letter.to_string(),
            (frame.plot_left(), mid_y),
            TextStyle::from((FONT, fs).into_font().style(FontStyle::Bold))
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }
    Ok(())
}

fn draw_pseudocolor<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    surface: &Surface,
    scale: &ColorScale,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mesh = &surface.mesh;
    if mesh.nx() < 2 || mesh.ny() < 2 {
        return Ok(());
    }
    // One cell per (row, col) with its lower-left value; NaN cells stay blank.
    let cells = (0..mesh.ny() - 1).flat_map(|row| {
        (0..mesh.nx() - 1).filter_map(move |col| {
            let v = surface.at(row, col);
            if v.is_nan() {
                return None;
            }
            let color = scale.norm.color(scale.cmap, v);
            Some(Rectangle::new(
                [
                    (mesh.xs[col], mesh.ys[row]),
                    (mesh.xs[col + 1], mesh.ys[row + 1]),
                ],
                color.filled(),
            ))
        })
    });
    chart.draw_series(cells)?;
    Ok(())
}

fn draw_contours<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    lines: &[IsoLine],
    fs: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let style = ShapeStyle::from(&BLACK).stroke_width(1);
    for line in lines {
        chart.draw_series(
            line.segments
                .iter()
                .map(|seg| PathElement::new(vec![seg[0], seg[1]], style)),
        )?;
        if let Some(anchor) = line.label_anchor() {
            chart.draw_series(std::iter::once(Text::new(
                line.label(),
                anchor,
                (FONT, fs * 0.8).into_font().color(&BLACK),
            )))?;
        }
    }
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    points: &[ScatterPoint],
    scale: &ColorScale,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if points.is_empty() {
        return Ok(());
    }
    chart.draw_series(points.iter().filter(|p| is_painted(p)).map(|p| {
        let color = match p.value {
            Some(v) => scale.norm.color(scale.cmap, v),
            None => BLACK,
        };
        Circle::new((p.x, p.y), SCATTER_RADIUS, color.filled())
    }))?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: &ColorScale,
    font_size: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let fs = font_size as f64;
    let (w, h) = area.dim_in_pixel();
    let title_h = font_size * (scale.title.len() as u32 + 1) + font_size / 2;
    let vmin = scale.norm.vmin;
    let mut vmax = scale.norm.vmax;
    if (vmax - vmin).abs() < f64::EPSILON {
        vmax = vmin + 1.0;
    }
    let decimals = tick_decimals(vmax - vmin);

    let mut chart = ChartBuilder::on(area)
        .margin_top(title_h as i32)
        .margin_bottom((h / 10) as i32)
        .margin_right((w / 4) as i32)
        .y_label_area_size((font_size * 4) as i32)
        .build_cartesian_2d(0f64..1f64, vmin..vmax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .label_style((FONT, fs))
        .y_label_formatter(&|v| format!("{v:.decimals$}"))
        .draw()?;

    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = vmin + step * i as f64;
        let hi = lo + step;
        let color = scale.cmap.at((i as f64 + 0.5) / COLORBAR_STEPS as f64);
        Rectangle::new([(0.0, lo), (1.0, hi)], color.filled())
    }))?;

    draw_note_lines(area, &scale.title, 0.3, 0.02, (fs * 1.2).round() as i32, font_size)?;
    Ok(())
}

fn draw_note_lines<DB: DrawingBackend, CT: CoordTranslate>(
    area: &DrawingArea<DB, CT>,
    lines: &[String],
    x_frac: f32,
    y_frac: f32,
    line_height_px: i32,
    font_size: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let screen = area.strip_coord_spec();
    let (w, h) = screen.dim_in_pixel();
    let x = (w as f32 * x_frac).round() as i32;
    let mut y = (h as f32 * y_frac).round() as i32;
    for line in lines {
        screen.draw(&Text::new(
            line.clone(),
            (x, y),
            (FONT, font_size as f64).into_font(),
        ))?;
        y += line_height_px;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot_dim(cell: (u32, u32), font_size: u32) -> (u32, u32) {
        let (w, h) = cell;
        let mut buf = vec![0u8; (w * h * 3) as usize];
        let area = BitMapBackend::with_buffer(&mut buf, cell).into_drawing_area();
        let frame = PanelFrame::new(cell, font_size);
        let (_, body) = area.split_vertically(frame.header_h as i32);
        let chart = build_panel_chart(&body, &frame, (3.4, 8.4), (3.4, 8.4)).unwrap();
        chart.plotting_area().dim_in_pixel()
    }

    #[test]
    fn panel_plot_area_is_square() {
        // Cells of the default 1600x800 canvas, then a tall and a wide cell.
        for cell in [(454, 400), (453, 400), (300, 500), (700, 260)] {
            let (pw, ph) = plot_dim(cell, 14);
            assert_eq!(pw, ph, "cell={cell:?}");
            assert_eq!(pw, PanelFrame::new(cell, 14).side, "cell={cell:?}");
        }
    }

    #[test]
    fn letter_sits_above_the_plot() {
        let frame = PanelFrame::new((454, 400), 14);
        assert_eq!(frame.header_h, 28);
        assert_eq!(frame.plot_left(), (56 + frame.margins.0) as i32);
    }

    #[test]
    fn margins_never_underflow_on_tiny_areas() {
        let (l, r, t, b) = square_plot_margins((10, 10), 56, 42, 4);
        assert_eq!((l, r, t, b), (4, 4, 4, 4));
    }

    #[test]
    fn nan_values_are_not_painted() {
        let at = |value| ScatterPoint { x: 4.0, y: 4.0, value };
        assert!(is_painted(&at(None)));
        assert!(is_painted(&at(Some(320.0))));
        assert!(!is_painted(&at(Some(f64::NAN))));
    }

    #[test]
    fn tick_decimals_shrink_with_span() {
        assert_eq!(tick_decimals(960.0), 0);
        assert_eq!(tick_decimals(2.3), 1);
        assert_eq!(tick_decimals(0.4), 2);
    }
}
