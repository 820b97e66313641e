//! Chart Builder Module
//! Turns observations and derived views into the four figure specifications.

use crate::charts::spec::{
    marker_sizes, palette_color, Annotation, Axis, ChartKind, ChartSpec, Frame, HoverMode, Point,
    RangeShortcut, Series, SeriesMode,
};
use crate::config::{ITEM_LCU, ITEM_SLC};
use crate::data::{Observation, YearMax, ANIMATION_YEARS};

const Y_AXIS_TITLE: &str = "Lebanese Currency Rate to USD";
const TALL_HEIGHT: f32 = 800.0;

/// Trend callouts, identical text on both annotated figures.
const TREND_UP_SLC: &str = "Upward trend (SLC)";
const FLUCTUATIONS_LCU: &str = "Fluctuations observed (LCU)";
const SPIKE_LCU: &str = "Spike observed (LCU)";

const SCATTER_ANNOTATIONS: [(f64, f64, &str); 3] = [
    (2021.5, 7000.0, TREND_UP_SLC),
    (1992.0, 4000.0, FLUCTUATIONS_LCU),
    (2023.0, 17000.0, SPIKE_LCU),
];

const BAR_ANNOTATIONS: [(f64, f64, &str); 3] = [
    (2021.5, 8000.0, TREND_UP_SLC),
    (1992.0, 2600.0, FLUCTUATIONS_LCU),
    (2023.0, 15500.0, SPIKE_LCU),
];

const SCATTER_SIZE_MAX: f64 = 20.0;
const ANIMATED_SIZE_MAX: f64 = 30.0;

/// Look-back windows offered on the line chart, in years.
pub const LOOKBACK_YEARS: [i64; 3] = [3, 10, 40];
pub const FULL_VIEW_LABEL: &str = "Full View";

/// Builds chart specifications. Every method is pure.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Figure 1: every observation, colored by item code and sized by value.
    pub fn scatter_by_item_code(rows: &[Observation]) -> ChartSpec {
        let mut spec = ChartSpec::new(
            ChartKind::Scatter,
            "Lebanese Currency Exchange Rate to USD Over the Years",
        );
        spec.x_axis = Axis::new("Year", Some([1985.0, 2026.0]));
        spec.y_axis = Axis::new(Y_AXIS_TITLE, None);
        spec.annotations = annotations(&SCATTER_ANNOTATIONS);

        let values: Vec<f64> = rows.iter().map(|o| o.value).collect();
        let sizes = marker_sizes(&values, SCATTER_SIZE_MAX);

        for (code_idx, code) in distinct(rows.iter().map(|o| o.item_code.as_str()))
            .into_iter()
            .enumerate()
        {
            let points = rows
                .iter()
                .zip(&sizes)
                .filter(|(o, _)| o.item_code == code)
                .map(|(o, &size)| Point {
                    x: o.year as f64,
                    y: o.value,
                    size: Some(size),
                    hover: Some(format!(
                        "{}\nCurrency: {}\nYear: {}\nValue: {}",
                        o.item, o.currency, o.year, o.value
                    )),
                })
                .collect();

            spec.series.push(Series {
                name: code.to_string(),
                mode: SeriesMode::Markers,
                color: palette_color(code_idx),
                points,
            });
        }

        spec
    }

    /// Figure 2: yearly maxima of both categories as grouped bars.
    pub fn max_per_year_bars(lcu: &[YearMax], slc: &[YearMax]) -> ChartSpec {
        let mut spec = ChartSpec::new(
            ChartKind::GroupedBar,
            "Lebanese Currency Exchange Rate to USD (Max Value per Year)",
        );
        spec.x_axis = Axis::new("Year", Some([1985.0, 2024.0]));
        spec.y_axis = Axis::new(Y_AXIS_TITLE, None);
        spec.height = Some(TALL_HEIGHT);
        spec.hover_mode = HoverMode::X;
        spec.annotations = annotations(&BAR_ANNOTATIONS);

        for (idx, (name, maxima)) in [(ITEM_LCU, lcu), (ITEM_SLC, slc)].into_iter().enumerate() {
            spec.series.push(Series {
                name: name.to_string(),
                mode: SeriesMode::Bars,
                color: palette_color(idx),
                points: maxima
                    .iter()
                    .map(|m| Point {
                        x: m.year as f64,
                        y: m.value,
                        size: None,
                        hover: Some(m.value.to_string()),
                    })
                    .collect(),
            });
        }

        spec
    }

    /// Figure 3: one frame per year, colored by item.
    ///
    /// Expects rows already restricted to [`ANIMATION_YEARS`]. Each frame carries
    /// one series per item, so colors and legend entries stay put while playing.
    pub fn animated_scatter(rows: &[Observation]) -> ChartSpec {
        let (lo, hi) = ANIMATION_YEARS;
        let mut spec = ChartSpec::new(
            ChartKind::AnimatedScatter,
            &format!("Lebanese Currency Exchange Rate to USD ({lo}-{hi})"),
        );
        spec.x_axis = Axis::new("Year", Some([lo as f64, hi as f64]));
        spec.y_axis = Axis::new(Y_AXIS_TITLE, Some([0.0, 16000.0]));
        spec.height = Some(TALL_HEIGHT);

        let values: Vec<f64> = rows.iter().map(|o| o.value).collect();
        let sizes = marker_sizes(&values, ANIMATED_SIZE_MAX);
        let items = distinct(rows.iter().map(|o| o.item.as_str()));

        let mut years: Vec<i64> = rows.iter().map(|o| o.year).collect();
        years.sort_unstable();
        years.dedup();

        spec.frames = years
            .iter()
            .map(|&year| Frame {
                name: year.to_string(),
                series: items
                    .iter()
                    .enumerate()
                    .map(|(item_idx, item)| Series {
                        name: item.to_string(),
                        mode: SeriesMode::Markers,
                        color: palette_color(item_idx),
                        points: rows
                            .iter()
                            .zip(&sizes)
                            .filter(|(o, _)| o.year == year && o.item == *item)
                            .map(|(o, &size)| Point {
                                x: o.year as f64,
                                y: o.value,
                                size: Some(size),
                                hover: Some(format!("{}\nYear: {}\nValue: {}", o.item, o.year, o.value)),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        if let Some(first) = spec.frames.first() {
            spec.series = first.series.clone();
        }

        spec
    }

    /// Figure 4: the SLC series as a line with look-back shortcuts.
    pub fn line_with_range_shortcuts(slc: &[Observation]) -> ChartSpec {
        let mut spec = ChartSpec::new(
            ChartKind::Line,
            "Lebanese Currency Exchange Rate to USD (Standard Local Currency Units)",
        );
        spec.x_axis = Axis::new("Year", None);
        spec.y_axis = Axis::new(Y_AXIS_TITLE, None);
        spec.height = Some(TALL_HEIGHT);

        let mut points: Vec<Point> = slc
            .iter()
            .map(|o| Point::new(o.year as f64, o.value))
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        spec.series.push(Series {
            name: ITEM_SLC.to_string(),
            mode: SeriesMode::Lines,
            color: palette_color(0),
            points,
        });

        let latest_year = slc.iter().map(|o| o.year).max();
        spec.range_shortcuts = Self::range_shortcuts(latest_year);

        spec
    }

    /// "Full View" followed by one `[latest - n, latest]` window per look-back.
    pub fn range_shortcuts(latest_year: Option<i64>) -> Vec<RangeShortcut> {
        let mut shortcuts = vec![RangeShortcut {
            label: FULL_VIEW_LABEL.to_string(),
            range: None,
        }];

        if let Some(latest) = latest_year {
            shortcuts.extend(LOOKBACK_YEARS.iter().map(|&n| RangeShortcut {
                label: format!("{n} Years Before"),
                range: Some([(latest - n) as f64, latest as f64]),
            }));
        }

        shortcuts
    }
}

fn annotations(entries: &[(f64, f64, &str)]) -> Vec<Annotation> {
    entries
        .iter()
        .map(|&(x, y, text)| Annotation {
            x,
            y,
            text: text.to_string(),
        })
        .collect()
}

/// Distinct values in order of first appearance.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}
