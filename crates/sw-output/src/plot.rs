//! SVG charts.
//!
//! | Chart       | X axis                          | Series                         |
//! |-------------|---------------------------------|--------------------------------|
//! | run         | wall-clock time                 | one line per entity            |
//! | comparison  | sample index, labelled by time  | run 1 dashed blue, run 2 orange |
//!
//! The comparison chart spaces samples evenly and labels at most
//! [`MAX_TICKS`] of them (see [`tick_indices`]), so long runs stay
//! readable.  Only horizontal grid lines are drawn there.

use std::ops::Range;
use std::path::Path;

use chrono::DateTime;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use sw_core::param::title_case;
use sw_core::time::format_label;
use sw_core::{EntityId, EntityKind, Timestamp};
use sw_table::{ComparisonRow, EntityTable};

use crate::{OutputError, OutputResult};

/// Most tick labels placed on a comparison chart's time axis.
pub const MAX_TICKS: usize = 8;

const RUN_SIZE: (u32, u32) = (1200, 600);
const COMPARISON_SIZE: (u32, u32) = (1400, 700);

const SIM1_COLOR: RGBColor = RGBColor(0, 0, 255);
const SIM2_COLOR: RGBColor = RGBColor(255, 127, 14);

const LINE_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

fn plot_err<E: std::fmt::Display>(e: E) -> OutputError {
    OutputError::Plot(e.to_string())
}

// ── Tick thinning ─────────────────────────────────────────────────────────────

/// Sample indices that get a time label.
///
/// Up to `max_ticks` samples are all labelled; beyond that every
/// `max(1, n / max_ticks)`-th sample is, starting at 0.
pub fn tick_indices(n: usize, max_ticks: usize) -> Vec<usize> {
    if n <= max_ticks {
        return (0..n).collect();
    }
    let step = (n / max_ticks.max(1)).max(1);
    (0..n).step_by(step).collect()
}

/// Evenly spaced sample positions whose key points are the thinned ticks.
#[derive(Debug, Clone)]
struct SampleAxis {
    len:   usize,
    ticks: Vec<usize>,
}

impl SampleAxis {
    fn new(len: usize, max_ticks: usize) -> Self {
        Self { len, ticks: tick_indices(len, max_ticks) }
    }

    fn last(&self) -> usize {
        self.len.saturating_sub(1).max(1)
    }
}

impl Ranged for SampleAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = usize;

    fn map(&self, value: &usize, limit: (i32, i32)) -> i32 {
        let frac = *value as f64 / self.last() as f64;
        limit.0 + (frac * f64::from(limit.1 - limit.0)).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<usize> {
        if hint.max_num_points() == 0 {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<usize> {
        0..self.last()
    }
}

// ── Ranges ────────────────────────────────────────────────────────────────────

/// `[min, max]` of `values` padded by 5%, or a unit band around a constant.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

fn epoch_secs(ts: &Timestamp) -> f64 {
    ts.and_utc().timestamp() as f64
}

fn label_at_secs(secs: f64) -> String {
    DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|d| format_label(&d.naive_utc()))
        .unwrap_or_default()
}

// ── Run chart ─────────────────────────────────────────────────────────────────

/// One line per entity for `parameter` over time.
///
/// Entities without any value for `parameter` are left out.
pub fn render_run_chart(path: &Path, table: &EntityTable, parameter: &str) -> OutputResult<()> {
    let column = table.require_column(parameter)?;
    let kind = table.kind();
    let title = title_case(parameter);

    let series: Vec<(&EntityId, Vec<(f64, f64)>)> = table
        .ids()
        .into_iter()
        .map(|id| {
            let pts: Vec<(f64, f64)> =
                table.points(id, column).iter().map(|(t, v)| (epoch_secs(t), *v)).collect();
            (id, pts)
        })
        .filter(|(_, pts)| !pts.is_empty())
        .collect();

    let mut x_range = value_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    if x_range.end - x_range.start <= 2.0 {
        // Single instant: show an hour either side.
        let mid = (x_range.start + x_range.end) / 2.0;
        x_range = (mid - 3600.0)..(mid + 3600.0);
    }
    let y_range = value_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    let root = SVGBackend::new(path, RUN_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{title} at {} Over Time", title_case(kind.plural())), ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc(title.as_str())
        .x_labels(MAX_TICKS)
        .x_label_formatter(&|x: &f64| label_at_secs(*x))
        .draw()
        .map_err(plot_err)?;

    for (i, (id, pts)) in series.into_iter().enumerate() {
        let style = LINE_COLORS[i % LINE_COLORS.len()].stroke_width(2);
        chart
            .draw_series(LineSeries::new(pts, style))
            .map_err(plot_err)?
            .label(format!("{} {id} {title}", kind.label()))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

// ── Comparison chart ──────────────────────────────────────────────────────────

/// Inputs of one per-entity comparison chart.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonChart<'a> {
    pub kind:      EntityKind,
    pub id:        &'a EntityId,
    pub parameter: &'a str,
    /// Time-ordered joined rows of this entity.
    pub rows:      &'a [ComparisonRow],
    pub run1:      &'a str,
    pub run2:      &'a str,
}

/// Both runs' values of one entity, plotted against sample index.
pub fn render_comparison_chart(path: &Path, chart_in: &ComparisonChart<'_>) -> OutputResult<()> {
    let ComparisonChart { kind, id, parameter, rows, run1, run2 } = *chart_in;
    let title = title_case(parameter);
    let labels: Vec<String> = rows.iter().map(|r| format_label(&r.time)).collect();

    let axis = SampleAxis::new(rows.len(), MAX_TICKS);
    let y_range = value_range(rows.iter().flat_map(|r| [r.sim1, r.sim2]));

    let root = SVGBackend::new(path, COMPARISON_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} {id} - {parameter} Comparison", kind.label()), ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(axis, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Time")
        .y_desc(title.as_str())
        .x_label_style(("sans-serif", 12).into_font())
        .x_label_formatter(&|i: &usize| labels.get(*i).cloned().unwrap_or_default())
        .draw()
        .map_err(plot_err)?;

    let sim1_style = SIM1_COLOR.stroke_width(3);
    let sim1: Vec<(usize, f64)> = rows.iter().enumerate().map(|(i, r)| (i, r.sim1)).collect();
    chart
        .draw_series(DashedLineSeries::new(sim1, 8, 5, sim1_style))
        .map_err(plot_err)?
        .label(format!("Simulation 1 ({run1})"))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], sim1_style));

    let sim2_style = SIM2_COLOR.stroke_width(1);
    let sim2: Vec<(usize, f64)> = rows.iter().enumerate().map(|(i, r)| (i, r.sim2)).collect();
    chart
        .draw_series(LineSeries::new(sim2, sim2_style))
        .map_err(plot_err)?
        .label(format!("Simulation 2 ({run2})"))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], sim2_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
