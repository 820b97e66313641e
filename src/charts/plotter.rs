//! Chart Plotter Module
//! Draws chart specifications interactively using egui_plot.

use crate::charts::spec::{ChartSpec, RangeShortcut, Rgb, Series, SeriesMode};
use egui::{Align2, Color32, RichText, Vec2b};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi, Points, Text};
use std::time::Duration;

/// Height used when a chart has no preference
const DEFAULT_HEIGHT: f32 = 450.0;
/// Preferred heights are in page pixels; the window shows them a little smaller
const HEIGHT_SCALE: f32 = 0.6;
const MIN_MARKER_RADIUS: f32 = 1.5;
const DEFAULT_MARKER_RADIUS: f32 = 3.0;
/// Share of a year slot taken by one group of bars
const BAR_GROUP_WIDTH: f64 = 0.8;

/// Pending change to the plot view, applied on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    Bounds { x: [f64; 2], y: [f64; 2] },
    Auto,
}

/// Per-chart interaction state kept across frames.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    pub frame: usize,
    pub playing: bool,
    last_tick: Option<f64>,
    pub view_request: Option<ViewRequest>,
}

impl ChartState {
    /// Initial state; fixed axis ranges become the first view.
    pub fn for_spec(spec: &ChartSpec) -> Self {
        let view_request = if spec.x_axis.range.is_some() || spec.y_axis.range.is_some() {
            spec.x_axis
                .range
                .or_else(|| spec.x_extent())
                .map(|x| ViewRequest::Bounds {
                    x,
                    y: spec.y_axis.range.unwrap_or_else(|| fitted_y(spec, x)),
                })
        } else {
            None
        };

        Self {
            view_request,
            ..Default::default()
        }
    }

    pub fn apply_shortcut(&mut self, spec: &ChartSpec, shortcut: &RangeShortcut) {
        self.view_request = Some(match shortcut.range {
            Some(x) => ViewRequest::Bounds {
                x,
                y: fitted_y(spec, x),
            },
            None => ViewRequest::Auto,
        });
    }

    pub fn toggle_play(&mut self, frame_count: usize) {
        if self.playing {
            self.playing = false;
        } else if frame_count > 1 {
            if self.frame + 1 >= frame_count {
                self.frame = 0;
            }
            self.playing = true;
        }
        self.last_tick = None;
    }

    /// Advance playback; stops on the last frame.
    pub fn tick(&mut self, now: f64, interval: Duration, frame_count: usize) {
        if !self.playing {
            return;
        }

        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };

        if now - last >= interval.as_secs_f64() {
            if self.frame + 1 < frame_count {
                self.frame += 1;
                self.last_tick = Some(now);
            }
            if self.frame + 1 >= frame_count {
                self.playing = false;
                self.last_tick = None;
            }
        }
    }
}

/// Y range covering the points inside `x`, with a little headroom.
fn fitted_y(spec: &ChartSpec, x: [f64; 2]) -> [f64; 2] {
    match spec.y_extent_within(x[0], x[1]) {
        Some([lo, hi]) => {
            let lo = lo.min(0.0);
            let hi = if hi > lo { hi + (hi - lo) * 0.05 } else { lo + 1.0 };
            [lo, hi]
        }
        None => [0.0, 1.0],
    }
}

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one chart with its controls.
    pub fn draw_chart(
        ui: &mut egui::Ui,
        id: &str,
        spec: &ChartSpec,
        state: &mut ChartState,
        frame_interval: Duration,
    ) {
        ui.label(RichText::new(&spec.title).size(15.0).strong());
        ui.add_space(4.0);

        if !spec.range_shortcuts.is_empty() {
            ui.horizontal(|ui| {
                for shortcut in &spec.range_shortcuts {
                    if ui.button(&shortcut.label).clicked() {
                        state.apply_shortcut(spec, shortcut);
                    }
                }
            });
        }

        let series: &[Series] = if spec.is_animated() {
            Self::draw_animation_controls(ui, spec, state, frame_interval);
            spec.frames
                .get(state.frame)
                .map(|f| f.series.as_slice())
                .unwrap_or(&[])
        } else {
            &spec.series
        };

        let height = spec.height.unwrap_or(DEFAULT_HEIGHT) * HEIGHT_SCALE;
        let text_color = ui.visuals().text_color();

        Plot::new(id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(spec.x_axis.title.clone())
            .y_axis_label(spec.y_axis.title.clone())
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{name}\nYear: {:.0}\nValue: {:.2}", value.x, value.y)
                }
            })
            .show(ui, |plot_ui| {
                match state.view_request.take() {
                    Some(ViewRequest::Bounds { x, y }) => plot_ui
                        .set_plot_bounds(PlotBounds::from_min_max([x[0], y[0]], [x[1], y[1]])),
                    Some(ViewRequest::Auto) => plot_ui.set_auto_bounds(Vec2b::new(true, true)),
                    None => {}
                }

                let bar_count = series.iter().filter(|s| s.mode == SeriesMode::Bars).count();
                let mut bar_idx = 0;

                for s in series {
                    match s.mode {
                        SeriesMode::Markers => Self::draw_markers(plot_ui, s),
                        SeriesMode::Lines => Self::draw_line(plot_ui, s),
                        SeriesMode::Bars => {
                            Self::draw_bars(plot_ui, s, bar_idx, bar_count);
                            bar_idx += 1;
                        }
                    }
                }

                for annotation in &spec.annotations {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(annotation.x, annotation.y),
                            RichText::new(&annotation.text).size(11.0),
                        )
                        .color(text_color)
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }

    fn draw_animation_controls(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        state: &mut ChartState,
        frame_interval: Duration,
    ) {
        let frame_count = spec.frames.len();
        let now = ui.input(|i| i.time);
        state.tick(now, frame_interval, frame_count);
        if state.playing {
            ui.ctx().request_repaint_after(frame_interval);
        }

        ui.horizontal(|ui| {
            let label = if state.playing { "⏸ Pause" } else { "▶ Play" };
            if ui.button(label).clicked() {
                state.toggle_play(frame_count);
            }

            let last = frame_count.saturating_sub(1);
            let names: Vec<String> = spec.frames.iter().map(|f| f.name.clone()).collect();
            let slider = egui::Slider::new(&mut state.frame, 0..=last)
                .text("Year")
                .custom_formatter(move |n, _| {
                    names.get(n as usize).cloned().unwrap_or_default()
                });
            if ui.add(slider).changed() {
                state.playing = false;
            }
        });
    }

    fn draw_markers(plot_ui: &mut PlotUi, series: &Series) {
        let color = to_color32(series.color);

        if series.points.iter().all(|p| p.size.is_none()) {
            let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
            plot_ui.points(
                Points::new(points)
                    .radius(DEFAULT_MARKER_RADIUS)
                    .color(color)
                    .name(&series.name),
            );
            return;
        }

        // One item per point so each marker keeps its own size; the legend merges them by name
        for p in &series.points {
            let radius = p
                .size
                .map(|d| (d / 2.0) as f32)
                .unwrap_or(DEFAULT_MARKER_RADIUS)
                .max(MIN_MARKER_RADIUS);
            plot_ui.points(
                Points::new(vec![[p.x, p.y]])
                    .radius(radius)
                    .color(color.gamma_multiply(0.8))
                    .name(&series.name),
            );
        }
    }

    fn draw_line(plot_ui: &mut PlotUi, series: &Series) {
        let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
        plot_ui.line(
            Line::new(points)
                .color(to_color32(series.color))
                .width(2.0)
                .name(&series.name),
        );
    }

    fn draw_bars(plot_ui: &mut PlotUi, series: &Series, index: usize, count: usize) {
        let width = BAR_GROUP_WIDTH / count.max(1) as f64;
        let offset = (index as f64 - (count as f64 - 1.0) / 2.0) * width;

        let bars: Vec<Bar> = series
            .points
            .iter()
            .map(|p| {
                Bar::new(p.x + offset, p.y)
                    .width(width)
                    .name(format!("{} {}", p.x, series.name))
            })
            .collect();

        plot_ui.bar_chart(
            BarChart::new(bars)
                .color(to_color32(series.color))
                .name(&series.name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::{Axis, ChartKind, Point, PALETTE};

    fn line_spec() -> ChartSpec {
        let mut spec = ChartSpec::new(ChartKind::Line, "line");
        spec.series.push(Series {
            name: "s".to_string(),
            mode: SeriesMode::Lines,
            color: PALETTE[0],
            points: (2013..=2023)
                .map(|y| Point::new(y as f64, (y - 2000) as f64 * 100.0))
                .collect(),
        });
        spec
    }

    #[test]
    fn test_initial_view_uses_fixed_ranges() {
        let mut spec = line_spec();
        assert_eq!(ChartState::for_spec(&spec).view_request, None);

        spec.x_axis = Axis::new("Year", Some([1985.0, 2024.0]));
        spec.y_axis = Axis::new("Rate", Some([0.0, 16000.0]));
        assert_eq!(
            ChartState::for_spec(&spec).view_request,
            Some(ViewRequest::Bounds {
                x: [1985.0, 2024.0],
                y: [0.0, 16000.0]
            })
        );
    }

    #[test]
    fn test_shortcut_fits_y_to_window() {
        let spec = line_spec();
        let mut state = ChartState::for_spec(&spec);

        let shortcut = RangeShortcut {
            label: "3 Years Before".to_string(),
            range: Some([2020.0, 2023.0]),
        };
        state.apply_shortcut(&spec, &shortcut);
        match state.view_request {
            Some(ViewRequest::Bounds { x, y }) => {
                assert_eq!(x, [2020.0, 2023.0]);
                assert_eq!(y[0], 0.0);
                assert!(y[1] > 2300.0);
            }
            other => panic!("unexpected view request: {other:?}"),
        }

        let full = RangeShortcut {
            label: "Full View".to_string(),
            range: None,
        };
        state.apply_shortcut(&spec, &full);
        assert_eq!(state.view_request, Some(ViewRequest::Auto));
    }

    #[test]
    fn test_playback_stops_on_last_frame() {
        let interval = Duration::from_millis(500);
        let mut state = ChartState::default();

        state.toggle_play(3);
        assert!(state.playing);

        state.tick(10.0, interval, 3);
        assert_eq!(state.frame, 0);
        state.tick(10.2, interval, 3);
        assert_eq!(state.frame, 0);
        state.tick(10.5, interval, 3);
        assert_eq!(state.frame, 1);
        state.tick(11.0, interval, 3);
        assert_eq!(state.frame, 2);
        assert!(!state.playing);

        // Restart from the beginning once finished
        state.toggle_play(3);
        assert_eq!(state.frame, 0);
        assert!(state.playing);
    }

    #[test]
    fn test_single_frame_does_not_play() {
        let mut state = ChartState::default();
        state.toggle_play(1);
        assert!(!state.playing);
    }
}
