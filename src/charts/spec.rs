//! Chart Specification Module
//! Declarative description of a figure, independent of how it is drawn.

use serde::Serialize;

/// Color as RGB bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Qualitative palette, assigned to series in order of first appearance.
pub const PALETTE: [Rgb; 10] = [
    Rgb(99, 110, 250),  // Indigo
    Rgb(239, 85, 59),   // Red
    Rgb(0, 204, 150),   // Green
    Rgb(171, 99, 250),  // Purple
    Rgb(255, 161, 90),  // Orange
    Rgb(25, 211, 243),  // Cyan
    Rgb(255, 102, 146), // Pink
    Rgb(182, 232, 128), // Lime
    Rgb(255, 151, 255), // Magenta
    Rgb(254, 203, 82),  // Yellow
];

pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    GroupedBar,
    AnimatedScatter,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    Markers,
    Bars,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    #[default]
    Closest,
    X,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Marker diameter in pixels
    pub size: Option<f64>,
    pub hover: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: None,
            hover: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub mode: SeriesMode,
    pub color: Rgb,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    pub title: String,
    pub range: Option<[f64; 2]>,
}

impl Axis {
    pub fn new(title: &str, range: Option<[f64; 2]>) -> Self {
        Self {
            title: title.to_string(),
            range,
        }
    }
}

/// Text label pinned to a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One step of an animated chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub series: Vec<Series>,
}

/// Button that moves the x axis to a fixed window. `None` restores the full view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeShortcut {
    pub label: String,
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Preferred height in pixels
    pub height: Option<f32>,
    pub hover_mode: HoverMode,
    /// Series shown initially; for animated charts this is the first frame
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    pub frames: Vec<Frame>,
    pub range_shortcuts: Vec<RangeShortcut>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            height: None,
            hover_mode: HoverMode::default(),
            series: Vec::new(),
            annotations: Vec::new(),
            frames: Vec::new(),
            range_shortcuts: Vec::new(),
        }
    }

    pub fn is_animated(&self) -> bool {
        !self.frames.is_empty()
    }

    fn all_points(&self) -> impl Iterator<Item = &Point> {
        self.series
            .iter()
            .chain(self.frames.iter().flat_map(|f| f.series.iter()))
            .flat_map(|s| s.points.iter())
    }

    /// Extent of the data along x, over every series and frame.
    pub fn x_extent(&self) -> Option<[f64; 2]> {
        extent(self.all_points().map(|p| p.x))
    }

    /// Extent of y among points whose x lies in `[lo, hi]`.
    pub fn y_extent_within(&self, lo: f64, hi: f64) -> Option<[f64; 2]> {
        extent(
            self.all_points()
                .filter(|p| p.x >= lo && p.x <= hi)
                .map(|p| p.y),
        )
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some([v, v]),
            Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
        })
}

/// Scale values to marker diameters, by area, so the largest value gets `size_max`.
pub fn marker_sizes(values: &[f64], size_max: f64) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    values
        .iter()
        .map(|&v| {
            if max > 0.0 && v.is_finite() && v > 0.0 {
                size_max * (v / max).sqrt()
            } else {
                0.0
            }
        })
        .collect()
}
