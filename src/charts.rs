//! Inline SVG charts for the report pages.

use crate::format::esc;
use std::f64::consts::PI;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 30.0;
const TICKS: usize = 4;

pub const PALETTE: [&str; 4] = ["#4F46E5", "#3B82F6", "#60A5FA", "#93C5FD"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Bar,
    Area,
    Line,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
    pub axis: Axis,
}

impl Series {
    pub fn new(name: impl Into<String>, color: &'static str, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
            axis: Axis::Left,
        }
    }

    pub fn on_right(mut self) -> Self {
        self.axis = Axis::Right;
        self
    }
}

#[derive(Debug, Clone)]
pub struct XyChart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub mark: Mark,
}

#[derive(Debug, Clone)]
pub struct Slice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    fn over<'a>(values: impl Iterator<Item = &'a f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;
        for value in values.filter(|v| v.is_finite()) {
            min = min.min(*value);
            max = max.max(*value);
            any = true;
        }
        if !any {
            return None;
        }
        min = min.min(0.0);
        max = max.max(0.0);
        if min == max {
            min -= 1.0;
            max += 1.0;
        }
        // Spans past f64::MAX cannot be plotted.
        if !(max - min).is_finite() {
            return None;
        }
        Some(Self { min, max })
    }

    fn y(&self, value: f64) -> f64 {
        let scale = (HEIGHT - TOP - PADDING_Y) / (self.max - self.min);
        HEIGHT - PADDING_Y - (value - self.min) * scale
    }

    fn tick(&self, index: usize) -> f64 {
        self.min + (self.max - self.min) * index as f64 / TICKS as f64
    }
}

fn svg_open(title: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{}">"#,
        esc(title)
    )
}

fn empty_chart(title: &str) -> String {
    format!(
        r#"{}<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#,
        svg_open(title)
    )
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn legend(series: &[Series]) -> String {
    let mut out = String::new();
    let mut x = PADDING_X;
    for item in series {
        out.push_str(&format!(
            r#"<rect x="{x:.1}" y="6" width="10" height="10" rx="2" fill="{}" /><text class="chart-label" x="{:.1}" y="15">{}</text>"#,
            item.color,
            x + 14.0,
            esc(&item.name)
        ));
        x += 24.0 + item.name.chars().count() as f64 * 6.5;
    }
    out
}

/// Bar, area or line chart with up to two value axes.
pub fn render_xy(chart: &XyChart) -> String {
    let count = chart.labels.len();
    let left = Scale::over(
        chart
            .series
            .iter()
            .filter(|s| s.axis == Axis::Left)
            .flat_map(|s| s.values.iter()),
    );
    let right = Scale::over(
        chart
            .series
            .iter()
            .filter(|s| s.axis == Axis::Right)
            .flat_map(|s| s.values.iter()),
    );
    let Some(primary) = left.as_ref().or(right.as_ref()) else {
        return empty_chart(&chart.title);
    };
    if count == 0 {
        return empty_chart(&chart.title);
    }

    let plot_width = WIDTH - PADDING_X * 2.0;
    let band = plot_width / count as f64;
    let x = |index: usize| -> f64 {
        match chart.mark {
            Mark::Bar => PADDING_X + band * (index as f64 + 0.5),
            Mark::Area | Mark::Line if count > 1 => {
                PADDING_X + index as f64 * plot_width / (count - 1) as f64
            }
            Mark::Area | Mark::Line => PADDING_X + plot_width / 2.0,
        }
    };

    let mut svg = svg_open(&chart.title);

    for tick in 0..=TICKS {
        let value = primary.tick(tick);
        let y = primary.y(value);
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" />"#,
            WIDTH - PADDING_X
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            PADDING_X - 8.0,
            y + 4.0,
            format_axis_value(value)
        ));
        if let (Some(left), Some(right)) = (left.as_ref(), right.as_ref()) {
            let value = right.tick(tick);
            let y = left.y(left.tick(tick));
            svg.push_str(&format!(
                r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="start">{}</text>"#,
                WIDTH - PADDING_X + 8.0,
                y + 4.0,
                format_axis_value(value)
            ));
        }
    }

    let zero_y = primary.y(0.0);
    svg.push_str(&format!(
        r#"<line class="chart-axis" x1="{PADDING_X}" y1="{zero_y:.2}" x2="{:.2}" y2="{zero_y:.2}" />"#,
        WIDTH - PADDING_X
    ));

    let bar_series = chart.series.len().max(1) as f64;
    let bar_width = (band * 0.8 / bar_series).min(40.0);

    for (series_idx, series) in chart.series.iter().enumerate() {
        let Some(scale) = (match series.axis {
            Axis::Left => left.as_ref(),
            Axis::Right => right.as_ref(),
        }) else {
            continue;
        };
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .take(count)
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(idx, value)| (x(idx), scale.y(*value)))
            .collect();
        if points.is_empty() {
            continue;
        }
        let base_y = scale.y(0.0);

        match chart.mark {
            Mark::Bar => {
                let offset = (series_idx as f64 - (bar_series - 1.0) / 2.0) * bar_width;
                for (px, py) in &points {
                    let top = py.min(base_y);
                    let height = (py - base_y).abs();
                    svg.push_str(&format!(
                        r#"<rect class="chart-bar" x="{:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}" rx="3" fill="{}" />"#,
                        px + offset - bar_width / 2.0,
                        series.color
                    ));
                }
            }
            Mark::Area | Mark::Line => {
                let path = points
                    .iter()
                    .enumerate()
                    .map(|(idx, (px, py))| {
                        format!("{} {px:.2} {py:.2}", if idx == 0 { 'M' } else { 'L' })
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                if chart.mark == Mark::Area {
                    let (first_x, _) = points[0];
                    let (last_x, _) = points[points.len() - 1];
                    svg.push_str(&format!(
                        r#"<path d="{path} L {last_x:.2} {base_y:.2} L {first_x:.2} {base_y:.2} Z" fill="{}" fill-opacity="0.1" stroke="none" />"#,
                        series.color
                    ));
                }
                svg.push_str(&format!(
                    r#"<path class="chart-line" d="{path}" stroke="{}" />"#,
                    series.color
                ));
                for (px, py) in &points {
                    svg.push_str(&format!(
                        r#"<circle class="chart-point" cx="{px:.2}" cy="{py:.2}" r="3.5" stroke="{}" />"#,
                        series.color
                    ));
                }
            }
        }
    }

    let label_every = if count > 8 { count.div_ceil(8) } else { 1 };
    for (idx, label) in chart.labels.iter().enumerate() {
        if idx % label_every != 0 {
            continue;
        }
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            x(idx),
            HEIGHT - PADDING_Y + 18.0,
            esc(label)
        ));
    }

    if chart.series.len() > 1 {
        svg.push_str(&legend(&chart.series));
    }

    svg.push_str("</svg>");
    svg
}

/// Donut chart; each slice is labelled with its rounded share.
pub fn render_donut(title: &str, slices: &[Slice]) -> String {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return empty_chart(title);
    }

    let (cx, cy) = (WIDTH / 2.0, 110.0);
    let radius = 65.0;
    let circumference = 2.0 * PI * radius;

    let mut svg = svg_open(title);
    let mut start = 0.0;
    for slice in slices {
        let share = slice.value.max(0.0) / total;
        if share <= 0.0 {
            continue;
        }
        let length = share * circumference;
        svg.push_str(&format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="none" stroke="{}" stroke-width="30" stroke-dasharray="{length:.3} {:.3}" stroke-dashoffset="{:.3}" transform="rotate(-90 {cx} {cy})" />"#,
            slice.color,
            circumference - length,
            -start * circumference
        ));

        let angle = (start + share / 2.0) * 2.0 * PI - PI / 2.0;
        let (lx, ly) = (cx + 100.0 * angle.cos(), cy + 100.0 * angle.sin());
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{lx:.2}" y="{:.2}" text-anchor="middle">{:.0}%</text>"#,
            ly + 4.0,
            share * 100.0
        ));
        start += share;
    }

    let slot = WIDTH / slices.len().max(1) as f64;
    for (idx, slice) in slices.iter().enumerate() {
        let x = slot * idx as f64 + slot / 2.0;
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="232" width="10" height="10" rx="2" fill="{}" /><text class="chart-label" x="{:.2}" y="241">{}</text>"#,
            x - 40.0,
            slice.color,
            x - 26.0,
            esc(&slice.name)
        ));
    }

    svg.push_str("</svg>");
    svg
}
