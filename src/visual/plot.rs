//! Time-domain trace and spectrogram mesh plots.
//!
//! Both plots share the same frame: a plot area inset by fixed margins, tick
//! marks with numeric labels on the left and bottom edges, and axis labels.
//! Everything that can fail (the transform, the logarithm) is computed before
//! the canvas is cleared, so an error leaves the previous plot on screen.

use crate::audio::AudioBuffer;
use crate::config::RenderConfig;
use crate::error::ViewerError;
use crate::session::{ViewMode, ViewState};
use crate::spectrogram::transform_with;
use crate::visual::canvas::{Canvas, BLACK};
use crate::visual::colormap::Colormap;
use crate::visual::font::{text_width, GLYPH_HEIGHT};
use image::Rgb;

pub const TIME_LABEL: &str = "Time (s)";
pub const AMPLITUDE_LABEL: &str = "Amplitude";
pub const FREQUENCY_LABEL: &str = "Frequency (Hz)";

const MARGIN_LEFT: u32 = 64;
const MARGIN_RIGHT: u32 = 16;
const MARGIN_TOP: u32 = 16;
const MARGIN_BOTTOM: u32 = 44;
const TICK_LEN: i32 = 4;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 1;
/// Aim for roughly one tick per this many pixels.
const TICK_SPACING_PX: f64 = 80.0;
/// Relative padding added above and below the trace.
const Y_MARGIN: f64 = 0.05;
const GRID: Rgb<u8> = Rgb([208, 208, 208]);

/// Bounds and labels of a drawn plot.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub grid: bool,
}

/// Linear map from a data interval onto a pixel interval. A degenerate data
/// interval maps everything onto the middle of the pixel interval.
#[derive(Clone, Copy, Debug)]
struct Scale {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Scale {
    fn to_px(&self, v: f64) -> f64 {
        let span = self.hi - self.lo;
        if span.abs() < f64::EPSILON * self.hi.abs().max(1.0) {
            return (self.px_lo + self.px_hi) / 2.0;
        }
        self.px_lo + (v - self.lo) / span * (self.px_hi - self.px_lo)
    }

    fn from_px(&self, px: f64) -> f64 {
        let span = self.px_hi - self.px_lo;
        self.lo + (px - self.px_lo) / span * (self.hi - self.lo)
    }
}

/// Pixel rectangle of the plot area, inclusive of its frame.
#[derive(Clone, Copy, Debug)]
struct PlotArea {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl PlotArea {
    fn of(canvas: &Canvas) -> Self {
        Self {
            left: MARGIN_LEFT as i32,
            top: MARGIN_TOP as i32,
            right: (canvas.width() - MARGIN_RIGHT) as i32,
            bottom: (canvas.height() - MARGIN_BOTTOM) as i32,
        }
    }

    fn x_scale(&self, range: (f64, f64)) -> Scale {
        Scale {
            lo: range.0,
            hi: range.1,
            px_lo: self.left as f64,
            px_hi: self.right as f64,
        }
    }

    fn y_scale(&self, range: (f64, f64)) -> Scale {
        Scale {
            lo: range.0,
            hi: range.1,
            px_lo: self.bottom as f64,
            px_hi: self.top as f64,
        }
    }

    fn columns(&self) -> usize {
        (self.right - self.left - 1).max(0) as usize
    }
}

/// Draw `buffer` onto `canvas` according to `view`.
pub fn render(
    canvas: &mut Canvas,
    view: &ViewState,
    buffer: &AudioBuffer,
    config: &RenderConfig,
) -> Result<(), ViewerError> {
    match view.mode {
        ViewMode::TimeDomain => render_time_domain(canvas, buffer, config),
        ViewMode::Spectrogram => render_spectrogram(canvas, buffer, view.colormap, config),
    }
}

/// Amplitude against time with the x-axis bounded to `[0, duration]`.
pub fn render_time_domain(
    canvas: &mut Canvas,
    buffer: &AudioBuffer,
    config: &RenderConfig,
) -> Result<(), ViewerError> {
    let samples = buffer.samples();
    let axes = Axes {
        x_range: (0.0, buffer.duration()),
        y_range: amplitude_range(samples),
        x_label: TIME_LABEL,
        y_label: AMPLITUDE_LABEL,
        grid: true,
    };
    canvas.clear();
    let area = PlotArea::of(canvas);
    draw_frame(canvas, &area, &axes);
    draw_trace(canvas, &area, &axes, samples, Rgb(config.trace));
    canvas.set_axes(axes);
    Ok(())
}

/// Log-magnitude pseudocolor mesh over time and frequency.
pub fn render_spectrogram(
    canvas: &mut Canvas,
    buffer: &AudioBuffer,
    colormap: Colormap,
    config: &RenderConfig,
) -> Result<(), ViewerError> {
    let spec = transform_with(buffer, &config.spectrogram)?;
    let logs = spec.log_magnitude(config.log_scale)?;
    let times = spec.time_bins();
    let freqs = spec.frequency_bins();
    let x_edges = cell_edges(times, buffer.duration());
    let y_edges = cell_edges(freqs, buffer.nyquist());
    let axes = Axes {
        x_range: (x_edges[0], x_edges[x_edges.len() - 1]),
        y_range: (y_edges[0], y_edges[y_edges.len() - 1]),
        x_label: TIME_LABEL,
        y_label: FREQUENCY_LABEL,
        grid: false,
    };

    canvas.clear();
    let area = PlotArea::of(canvas);
    if !spec.is_empty() {
        draw_mesh(canvas, &area, &axes, &x_edges, &y_edges, &logs, colormap);
    }
    draw_frame(canvas, &area, &axes);
    canvas.set_axes(axes);
    Ok(())
}

/// Y range of the trace: the sample extent padded by [`Y_MARGIN`], or
/// `value ± 1` for a constant (or empty) signal.
fn amplitude_range(samples: &[i16]) -> (f64, f64) {
    let (lo, hi) = samples
        .iter()
        .fold((i16::MAX, i16::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if samples.is_empty() {
        return (-1.0, 1.0);
    }
    let (lo, hi) = (lo as f64, hi as f64);
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * Y_MARGIN;
    (lo - pad, hi + pad)
}

/// Boundaries of cells centred on `centres`. Interior edges are midpoints;
/// the outer edges extend by half the neighbouring step. A single centre
/// spans `[0, 2 * centre]`, or `[0, fallback]` when that is empty.
fn cell_edges(centres: &[f64], fallback: f64) -> Vec<f64> {
    match centres {
        [] => vec![0.0, fallback],
        [c] if *c > 0.0 => vec![0.0, 2.0 * c],
        [_] => vec![0.0, fallback],
        _ => {
            let n = centres.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            for w in centres.windows(2) {
                edges.push((w[0] + w[1]) / 2.0);
            }
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}

/// Index of the cell containing `v`, clamped to the outer cells.
fn cell_index(edges: &[f64], v: f64) -> usize {
    let cells = edges.len() - 1;
    edges[1..edges.len() - 1]
        .partition_point(|&e| e <= v)
        .min(cells - 1)
}

fn draw_mesh(
    canvas: &mut Canvas,
    area: &PlotArea,
    axes: &Axes,
    x_edges: &[f64],
    y_edges: &[f64],
    logs: &[Vec<f64>],
    colormap: Colormap,
) {
    let (lo, hi) = logs
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    let xs = area.x_scale(axes.x_range);
    let ys = area.y_scale(axes.y_range);
    let cols: Vec<usize> = (area.left..=area.right)
        .map(|px| cell_index(x_edges, xs.from_px(px as f64 + 0.5)))
        .collect();
    for py in area.top..=area.bottom {
        let row = cell_index(y_edges, ys.from_px(py as f64 + 0.5));
        for (i, px) in (area.left..=area.right).enumerate() {
            let v = logs[row][cols[i]];
            let t = if span > 0.0 { (v - lo) / span } else { 0.0 };
            canvas.put(px, py, Rgb(colormap.map_color_u8(t as f32)));
        }
    }
}

fn draw_trace(canvas: &mut Canvas, area: &PlotArea, axes: &Axes, samples: &[i16], color: Rgb<u8>) {
    let n = samples.len();
    if n == 0 {
        return;
    }
    let xs = area.x_scale(axes.x_range);
    let ys = area.y_scale(axes.y_range);
    let (t0, t1) = axes.x_range;
    // Evenly spaced over the x range with the last sample on the right edge.
    let time_of = |i: usize| {
        if n == 1 {
            t0
        } else {
            t0 + i as f64 * (t1 - t0) / (n - 1) as f64
        }
    };
    let y_px = |s: i16| ys.to_px(s as f64).round() as i32;
    let columns = area.columns();

    if n <= columns.max(1) {
        let mut prev: Option<(i32, i32)> = None;
        for (i, &s) in samples.iter().enumerate() {
            let p = (xs.to_px(time_of(i)).round() as i32, y_px(s));
            match prev {
                Some((x0, y0)) => canvas.draw_line(x0, y0, p.0, p.1, color),
                None => canvas.put(p.0, p.1, color),
            }
            prev = Some(p);
        }
        return;
    }

    // More samples than pixel columns: draw the min/max envelope per column
    // and join neighbouring columns so steep edges stay connected.
    let mut prev: Option<(i32, i32, i32)> = None;
    for col in 0..=columns {
        let start = col * n / (columns + 1);
        let end = ((col + 1) * n / (columns + 1)).max(start + 1).min(n);
        let (lo, hi) = samples[start..end]
            .iter()
            .fold((i16::MAX, i16::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        let x = area.left + col as i32;
        let (y_hi, y_lo) = (y_px(hi), y_px(lo));
        canvas.draw_line(x, y_hi, x, y_lo, color);
        if let Some((px, p_hi, p_lo)) = prev {
            if p_lo < y_hi {
                canvas.draw_line(px, p_lo, x, y_hi, color);
            } else if p_hi > y_lo {
                canvas.draw_line(px, p_hi, x, y_lo, color);
            }
        }
        prev = Some((x, y_hi, y_lo));
    }
}

/// Frame, grid, ticks, tick labels and axis labels.
fn draw_frame(canvas: &mut Canvas, area: &PlotArea, axes: &Axes) {
    let xs = area.x_scale(axes.x_range);
    let ys = area.y_scale(axes.y_range);
    let x_ticks = ticks(axes.x_range, (area.right - area.left) as f64);
    let y_ticks = ticks(axes.y_range, (area.bottom - area.top) as f64);

    if axes.grid {
        for &t in &x_ticks {
            let x = xs.to_px(t).round() as i32;
            canvas.draw_line(x, area.top, x, area.bottom, GRID);
        }
        for &t in &y_ticks {
            let y = ys.to_px(t).round() as i32;
            canvas.draw_line(area.left, y, area.right, y, GRID);
        }
    }

    canvas.draw_line(area.left, area.top, area.right, area.top, BLACK);
    canvas.draw_line(area.left, area.bottom, area.right, area.bottom, BLACK);
    canvas.draw_line(area.left, area.top, area.left, area.bottom, BLACK);
    canvas.draw_line(area.right, area.top, area.right, area.bottom, BLACK);

    let x_step = step_of(&x_ticks);
    for &t in &x_ticks {
        let x = xs.to_px(t).round() as i32;
        canvas.draw_line(x, area.bottom, x, area.bottom + TICK_LEN, BLACK);
        let label = format_tick(t, x_step);
        let w = text_width(&label, TICK_SCALE) as i32;
        canvas.draw_text(x - w / 2, area.bottom + TICK_LEN + 2, &label, TICK_SCALE, BLACK);
    }
    let y_step = step_of(&y_ticks);
    for &t in &y_ticks {
        let y = ys.to_px(t).round() as i32;
        canvas.draw_line(area.left - TICK_LEN, y, area.left, y, BLACK);
        let label = format_tick(t, y_step);
        let w = text_width(&label, TICK_SCALE) as i32;
        let h = (GLYPH_HEIGHT * TICK_SCALE) as i32;
        canvas.draw_text(area.left - TICK_LEN - 2 - w, y - h / 2, &label, TICK_SCALE, BLACK);
    }

    let w = text_width(axes.x_label, LABEL_SCALE) as i32;
    let label_y = canvas.height() as i32 - (GLYPH_HEIGHT * LABEL_SCALE) as i32 - 6;
    canvas.draw_text((area.left + area.right - w) / 2, label_y, axes.x_label, LABEL_SCALE, BLACK);
    let h = text_width(axes.y_label, LABEL_SCALE) as i32;
    canvas.draw_text_vertical(4, (area.top + area.bottom + h) / 2, axes.y_label, LABEL_SCALE, BLACK);
}

/// Tick positions on a 1-2-5 progression covering `range`.
fn ticks(range: (f64, f64), length_px: f64) -> Vec<f64> {
    let (lo, hi) = range;
    let span = hi - lo;
    if span.is_nan() || span <= 0.0 || span.is_infinite() {
        return vec![lo];
    }
    let target = (length_px / TICK_SPACING_PX).max(1.0);
    let raw = span / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn step_of(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Format a tick value with as many decimals as its step needs.
fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let s = format!("{:.*}", decimals, v);
    // Avoid "-0" style labels.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}
