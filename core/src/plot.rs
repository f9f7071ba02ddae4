//! 3D scatter chart of scenario timings.
//!
//! The image on disk is the durable artifact; opening a viewer afterwards is
//! best-effort and never fails the run.

use crate::scenario::ScenarioRecord;
use anyhow::{Context, Result};
use plotters_backend::BackendCoord;
use plotters::coord::CoordTranslate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_PLOT_PATH: &str = "execution_times.png";
pub const PLOT_TITLE: &str = "Execution Time Comparison: Regular vs Unrolled Loops";
pub const REGULAR_SERIES_LABEL: &str = "Regular Loop";
pub const UNROLLED_SERIES_LABEL: &str = "Unrolled Loop";

const PLOT_SIZE: (u32, u32) = (1024, 768);
const FONT_FAMILY: &str = "sans-serif";
// Pixel gap between an axis edge and its title, clear of the tick labels.
const AXIS_TITLE_GAP: i32 = 40;

/// Tick label for the time axis. Timings are usually well under a second.
pub fn format_seconds(secs: &f64) -> String {
    format!("{:.6}", secs)
}

/// The point drawn lower on screen. Of two parallel floor edges, the lower
/// one faces the viewer and is the one carrying tick labels.
pub(crate) fn lower_on_screen(a: BackendCoord, b: BackendCoord) -> BackendCoord {
    if b.1 > a.1 { b } else { a }
}

pub(crate) fn leftmost_on_screen(points: &[BackendCoord]) -> Option<BackendCoord> {
    points.iter().copied().min_by_key(|p| p.0)
}

/// Data range of `values` padded by a tenth of its span on each side.
///
/// Empty or non-finite input falls back to `0..1`; a zero-width span is
/// widened so the axis can still carry ticks. With `floor_at_zero` the lower
/// bound never goes below zero.
pub fn axis_range<I>(values: I, floor_at_zero: bool) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0));

    let span = hi - lo;
    let pad = if span > f64::EPSILON {
        span * 0.1
    } else {
        (hi.abs() * 0.1).max(if floor_at_zero { 1e-6 } else { 1.0 })
    };
    let start = if floor_at_zero { (lo - pad).max(0.0) } else { lo - pad };
    start..hi + pad
}

/// Renders regular and unrolled timings as two marker series against
/// (unrolling factor, elements per iteration) and writes a PNG to `path`,
/// replacing any existing file.
pub fn render_scatter(records: &[ScenarioRecord], path: &Path) -> Result<()> {
    let x_range = axis_range(records.iter().map(|r| r.params.factor as f64), false);
    let y_range = axis_range(
        records.iter().flat_map(|r| [r.regular_secs, r.unrolled_secs]),
        true,
    );
    let z_range = axis_range(records.iter().map(|r| r.params.elements as f64), false);
    let (x_lo, x_hi) = (x_range.start, x_range.end);
    let (y_lo, y_hi) = (y_range.start, y_range.end);
    let (z_lo, z_hi) = (z_range.start, z_range.end);

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("clear plot canvas for {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, (FONT_FAMILY, 28))
        .margin(30)
        .build_cartesian_3d(x_range, y_range, z_range)
        .context("build 3d chart")?;
    chart.with_projection(|mut pb| {
        pb.pitch = 0.35;
        pb.yaw = 0.65;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.12))
        .max_light_lines(3)
        .y_formatter(&format_seconds)
        .draw()
        .context("draw chart axes")?;

    let (x_mid, z_mid) = ((x_lo + x_hi) / 2.0, (z_lo + z_hi) / 2.0);
    let (factor_anchor, elements_anchor, time_anchor) = {
        let coord = chart.as_coord_spec();
        let factor_edge = lower_on_screen(
            coord.translate(&(x_mid, y_lo, z_lo)),
            coord.translate(&(x_mid, y_lo, z_hi)),
        );
        let elements_edge = lower_on_screen(
            coord.translate(&(x_lo, y_lo, z_mid)),
            coord.translate(&(x_hi, y_lo, z_mid)),
        );
        let time_edge = leftmost_on_screen(&[
            coord.translate(&(x_lo, y_hi, z_lo)),
            coord.translate(&(x_lo, y_hi, z_hi)),
            coord.translate(&(x_hi, y_hi, z_lo)),
            coord.translate(&(x_hi, y_hi, z_hi)),
        ])
        .unwrap_or((0, 0));
        (factor_edge, elements_edge, time_edge)
    };

    let label_style = (FONT_FAMILY, 18).into_font().color(&BLACK);
    let below = label_style.pos(Pos::new(HPos::Center, VPos::Top));
    let above = label_style.pos(Pos::new(HPos::Center, VPos::Bottom));
    for (title, anchor, style) in [
        ("Unrolling Factor", (factor_anchor.0, factor_anchor.1 + AXIS_TITLE_GAP), &below),
        ("Elements per Iteration", (elements_anchor.0, elements_anchor.1 + AXIS_TITLE_GAP), &below),
        ("Execution Time (seconds)", (time_anchor.0, time_anchor.1 - AXIS_TITLE_GAP / 2), &above),
    ] {
        root.draw(&Text::new(title, anchor, style.clone()))
            .with_context(|| format!("draw axis title {:?}", title))?;
    }

    chart
        .draw_series(records.iter().map(|r| {
            Circle::new(
                (r.params.factor as f64, r.regular_secs, r.params.elements as f64),
                6,
                BLUE.filled(),
            )
        }))
        .context("draw regular loop series")?
        .label(REGULAR_SERIES_LABEL)
        .legend(|(x, y)| Circle::new((x + 10, y), 6, BLUE.filled()));

    chart
        .draw_series(records.iter().map(|r| {
            TriangleMarker::new(
                (r.params.factor as f64, r.unrolled_secs, r.params.elements as f64),
                8,
                RED.filled(),
            )
        }))
        .context("draw unrolled loop series")?
        .label(UNROLLED_SERIES_LABEL)
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 8, RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .context("draw legend")?;

    root.present()
        .with_context(|| format!("write plot image {}", path.display()))?;
    tracing::debug!(target: "unroll::plot", path = %path.display(), points = records.len() * 2, "plot written");
    Ok(())
}

/// Opens `path` in the platform image viewer.
///
/// Returns `false` without error when no display is available or the viewer
/// cannot be launched; the saved file is unaffected either way.
pub fn show_plot(path: &Path) -> bool {
    if !display_available() {
        tracing::warn!(target: "unroll::plot", "no display available; skipping plot window");
        return false;
    }
    let mut cmd = viewer_command(path);
    match cmd.spawn() {
        // The viewer outlives this process; nothing waits on it.
        Ok(_child) => true,
        Err(err) => {
            tracing::warn!(target: "unroll::plot", "failed to launch image viewer for {}: {}", path.display(), err);
            false
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
