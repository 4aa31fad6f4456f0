use crate::surface::{Anchor, Label, Point, Rect, Stroke, Surface};
use graph_core::ViewMode;
use graph_theme::Theme;

/// Space between the canvas edge and the plot rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left:   f32,
    pub right:  f32,
    pub top:    f32,
    pub bottom: f32,
}

impl Margins {
    pub const DEFAULT: Self = Self { left: 45.0, right: 10.0, top: 24.0, bottom: 28.0 };
}

impl Default for Margins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Horizontal gridline percentages.
pub const Y_TICKS: [u32; 5] = [0, 25, 50, 75, 100];
/// Horizontal space reserved for one legend entry.
pub const LEGEND_ITEM_WIDTH: f32 = 70.0;
/// Vertical distance between legend rows.
pub const LEGEND_ROW_HEIGHT: f32 = 15.0;
/// Legend swatch edge length.
const SWATCH: f32 = 8.0;

const AXIS_FONT:   f32 = 9.0;
const LEGEND_FONT: f32 = 8.0;
const TITLE_FONT:  f32 = 11.0;

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    /// Overall usage, oldest → newest.
    pub overall: &'a [f32],
    /// One series per core, oldest → newest.
    pub per_core: &'a [Vec<f32>],
    pub view: ViewMode,
    /// Sampling interval, used to label the time axis.
    pub interval_ms: u64,
    /// Cores to draw in per-core view (`0` = all).
    pub max_cores: usize,
}

/// Plot rectangle for a canvas of `width × height`.
pub fn plot_area(width: f32, height: f32, margins: Margins) -> Rect {
    Rect {
        left:   margins.left,
        top:    margins.top,
        right:  width - margins.right,
        bottom: height - margins.bottom,
    }
}

/// y coordinate of a percentage: 0 → bottom, 100 → top.
pub fn y_for(area: &Rect, percent: f32) -> f32 {
    area.bottom - (percent.clamp(0.0, 100.0) / 100.0) * area.height()
}

/// Map a series onto the plot: index 0 at the left edge, the last index at
/// the right edge.  Fewer than two values produce no points.
pub fn series_points(area: &Rect, values: &[f32]) -> Vec<Point> {
    if values.len() < 2 {
        return Vec::new();
    }
    let last = (values.len() - 1) as f32;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new(area.left + (i as f32 / last) * area.width(), y_for(area, v)))
        .collect()
}

/// Seconds-ago values to label on the time axis for `points` samples.
///
/// Labels are at least 5 s apart and no more than about ten are produced.
pub fn time_ticks(points: usize, interval_ms: u64) -> Vec<u64> {
    let total_ms = points as u64 * interval_ms;
    if total_ms == 0 {
        return Vec::new();
    }
    let total_secs = total_ms / 1000;
    let step = (total_secs / 10).max(5);
    (0..=total_secs).step_by(step as usize).collect()
}

/// x coordinate of a tick `seconds` ago; now is at the right edge.
pub fn x_for_seconds_ago(area: &Rect, seconds: u64, points: usize, interval_ms: u64) -> f32 {
    let total_secs = points as f32 * interval_ms as f32 / 1000.0;
    area.right - (seconds as f32 / total_secs) * area.width()
}

/// Number of core series drawn: all of them, or at most `max_cores` when non-zero.
pub fn cores_to_display(available: usize, max_cores: usize) -> usize {
    if max_cores == 0 {
        available
    } else {
        available.min(max_cores)
    }
}

/// Top-left corners of the legend entries, wrapping onto new rows.
pub fn legend_positions(area: &Rect, count: usize) -> Vec<Point> {
    let per_row = ((area.width() / LEGEND_ITEM_WIDTH).floor() as usize).max(1);
    let start_y = area.top + 15.0;
    (0..count)
        .map(|i| {
            let (row, col) = (i / per_row, i % per_row);
            Point::new(
                area.left + col as f32 * LEGEND_ITEM_WIDTH,
                start_y + row as f32 * LEGEND_ROW_HEIGHT,
            )
        })
        .collect()
}

/// Draw a complete frame: grid, time axis, then the selected view.
///
/// Per-core view falls back to the overall view when no core series exist.
pub fn render_chart(surface: &mut impl Surface, area: Rect, input: &ChartInput<'_>, theme: &Theme) {
    draw_border_and_grid(surface, &area, theme);
    draw_time_axis(surface, &area, input.overall.len(), input.interval_ms, theme);

    match input.view {
        ViewMode::PerCore if !input.per_core.is_empty() => {
            draw_per_core(surface, &area, input.per_core, input.max_cores, theme)
        }
        _ => draw_overall(surface, &area, input.overall, theme),
    }
}

fn draw_border_and_grid(surface: &mut impl Surface, area: &Rect, theme: &Theme) {
    surface.rectangle(*area, Some(Stroke::solid(theme.border, 1.0)), None);

    for pct in Y_TICKS {
        let y = y_for(area, pct as f32);
        surface.polyline(
            &[Point::new(area.left, y), Point::new(area.right, y)],
            Stroke::dashed(theme.grid, 1.0),
        );
        surface.text(Label {
            content:  format!("{pct}%"),
            position: Point::new(area.left - 8.0, y),
            color:    theme.text,
            size:     AXIS_FONT,
            anchor:   Anchor::East,
            bold:     false,
        });
    }
}

fn draw_time_axis(surface: &mut impl Surface, area: &Rect, points: usize, interval_ms: u64, theme: &Theme) {
    for seconds in time_ticks(points, interval_ms) {
        let x = x_for_seconds_ago(area, seconds, points, interval_ms);
        surface.polyline(
            &[Point::new(x, area.bottom), Point::new(x, area.bottom + 4.0)],
            Stroke::solid(theme.border, 1.0),
        );
        surface.text(Label {
            content:  format!("{seconds}s"),
            position: Point::new(x, area.bottom + 8.0),
            color:    theme.text,
            size:     AXIS_FONT,
            anchor:   Anchor::North,
            bold:     false,
        });
    }
}

fn draw_overall(surface: &mut impl Surface, area: &Rect, values: &[f32], theme: &Theme) {
    let line = series_points(area, values);
    if !line.is_empty() {
        // Fill first so the line stays on top.
        let mut polygon = Vec::with_capacity(line.len() + 2);
        polygon.push(Point::new(area.left, area.bottom));
        polygon.extend_from_slice(&line);
        polygon.push(Point::new(area.right, area.bottom));
        surface.polygon(&polygon, theme.fill);
        surface.polyline(&line, Stroke::solid(theme.line, 2.0));
    }

    draw_title(surface, area, "CPU Utilization (%) - Overall".to_string(), theme);
}

fn draw_per_core(surface: &mut impl Surface, area: &Rect, cores: &[Vec<f32>], max_cores: usize, theme: &Theme) {
    let shown = cores_to_display(cores.len(), max_cores);

    for (index, series) in cores.iter().take(shown).enumerate() {
        let line = series_points(area, series);
        if !line.is_empty() {
            surface.polyline(&line, Stroke::solid(theme.core_color(index), 2.0));
        }
    }

    for (index, corner) in legend_positions(area, shown).into_iter().enumerate() {
        let color = theme.core_color(index);
        surface.rectangle(
            Rect {
                left:   corner.x,
                top:    corner.y,
                right:  corner.x + SWATCH,
                bottom: corner.y + SWATCH,
            },
            Some(Stroke::solid(color, 1.0)),
            Some(color),
        );
        surface.text(Label {
            content:  format!("Core {index}"),
            position: Point::new(corner.x + SWATCH + 4.0, corner.y + SWATCH / 2.0),
            color:    theme.text,
            size:     LEGEND_FONT,
            anchor:   Anchor::West,
            bold:     false,
        });
    }

    draw_title(surface, area, format!("CPU Utilization - Per Core ({shown} cores)"), theme);
}

fn draw_title(surface: &mut impl Surface, area: &Rect, title: String, theme: &Theme) {
    surface.text(Label {
        content:  title,
        position: Point::new((area.left + area.right) / 2.0, area.top - 4.0),
        color:    theme.title,
        size:     TITLE_FONT,
        anchor:   Anchor::South,
        bold:     true,
    });
}
