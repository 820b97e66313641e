//! Plotly Figure Renderer
//! Converts a chart specification into a Plotly figure (`data`, `layout`, `frames`).
//!
//! Layout:
//! 1. One trace per series (`scatter` markers/lines or `bar`)
//! 2. Axis titles and fixed ranges
//! 3. Annotations with arrows
//! 4. Range shortcuts as a `relayout` dropdown
//! 5. Animated charts: frames, a year slider and Play/Pause buttons

use crate::charts::spec::{ChartKind, ChartSpec, HoverMode, Series, SeriesMode};
use serde_json::{json, Map, Value};

const ANNOTATION_ARROWHEAD: u8 = 3;
const ANNOTATION_FONT_SIZE: u8 = 10;
const FRAME_DURATION_MS: u64 = 500;

pub struct PlotlyRenderer;

impl PlotlyRenderer {
    /// Full figure object ready for `Plotly.newPlot`.
    pub fn figure(spec: &ChartSpec) -> Value {
        let mut figure = json!({
            "data": spec.series.iter().map(Self::trace).collect::<Vec<_>>(),
            "layout": Self::layout(spec),
        });

        if spec.is_animated() {
            figure["frames"] = spec
                .frames
                .iter()
                .map(|frame| {
                    json!({
                        "name": frame.name,
                        "data": frame.series.iter().map(Self::trace).collect::<Vec<_>>(),
                    })
                })
                .collect();
        }

        figure
    }

    fn trace(series: &Series) -> Value {
        let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = series.points.iter().map(|p| p.y).collect();
        let color = series.color.hex();

        let mut trace = json!({
            "name": series.name,
            "x": xs,
            "y": ys,
        });

        match series.mode {
            SeriesMode::Markers => {
                trace["type"] = json!("scatter");
                trace["mode"] = json!("markers");
                let mut marker = json!({ "color": color });
                if series.points.iter().any(|p| p.size.is_some()) {
                    marker["size"] = series
                        .points
                        .iter()
                        .map(|p| json!(p.size.unwrap_or(0.0)))
                        .collect();
                    marker["sizemode"] = json!("diameter");
                }
                trace["marker"] = marker;
            }
            SeriesMode::Bars => {
                trace["type"] = json!("bar");
                trace["marker"] = json!({ "color": color });
            }
            SeriesMode::Lines => {
                trace["type"] = json!("scatter");
                trace["mode"] = json!("lines");
                trace["line"] = json!({ "color": color });
            }
        }

        if series.points.iter().any(|p| p.hover.is_some()) {
            trace["hovertext"] = series
                .points
                .iter()
                .map(|p| json!(p.hover.as_deref().unwrap_or("").replace('\n', "<br>")))
                .collect();
            trace["hoverinfo"] = json!("text");
        }

        trace
    }

    fn layout(spec: &ChartSpec) -> Value {
        let mut layout = Map::new();
        layout.insert("title".into(), json!({ "text": spec.title }));
        layout.insert("meta".into(), json!({ "kind": spec.kind }));
        layout.insert("xaxis".into(), Self::axis(&spec.x_axis.title, spec.x_axis.range));
        layout.insert("yaxis".into(), Self::axis(&spec.y_axis.title, spec.y_axis.range));
        layout.insert(
            "hovermode".into(),
            json!(match spec.hover_mode {
                HoverMode::Closest => "closest",
                HoverMode::X => "x",
            }),
        );

        if let Some(height) = spec.height {
            layout.insert("height".into(), json!(height));
        }
        if spec.kind == ChartKind::GroupedBar {
            layout.insert("barmode".into(), json!("group"));
        }

        if !spec.annotations.is_empty() {
            let annotations: Vec<Value> = spec
                .annotations
                .iter()
                .map(|a| {
                    json!({
                        "x": a.x,
                        "y": a.y,
                        "text": a.text,
                        "showarrow": true,
                        "arrowhead": ANNOTATION_ARROWHEAD,
                        "font": { "size": ANNOTATION_FONT_SIZE, "color": "black" },
                    })
                })
                .collect();
            layout.insert("annotations".into(), json!(annotations));
        }

        let mut menus: Vec<Value> = Vec::new();

        if !spec.range_shortcuts.is_empty() {
            let buttons: Vec<Value> = spec
                .range_shortcuts
                .iter()
                .map(|shortcut| {
                    let args = match shortcut.range {
                        Some(range) => json!({ "xaxis.range": range }),
                        None => json!({ "xaxis.autorange": true }),
                    };
                    json!({ "args": [args], "label": shortcut.label, "method": "relayout" })
                })
                .collect();
            menus.push(json!({
                "buttons": buttons,
                "direction": "down",
                "showactive": true,
                "x": 1.1,
                "xanchor": "left",
                "y": 1,
                "yanchor": "middle",
            }));
        }

        if spec.is_animated() {
            menus.push(json!({
                "type": "buttons",
                "showactive": false,
                "x": 0.0,
                "xanchor": "right",
                "y": 0.0,
                "yanchor": "top",
                "buttons": [
                    {
                        "label": "Play",
                        "method": "animate",
                        "args": [null, {
                            "frame": { "duration": FRAME_DURATION_MS, "redraw": true },
                            "transition": { "duration": 0 },
                            "fromcurrent": true,
                        }],
                    },
                    {
                        "label": "Pause",
                        "method": "animate",
                        "args": [[null], {
                            "mode": "immediate",
                            "frame": { "duration": 0, "redraw": false },
                            "transition": { "duration": 0 },
                        }],
                    },
                ],
            }));

            let steps: Vec<Value> = spec
                .frames
                .iter()
                .map(|frame| {
                    json!({
                        "label": frame.name,
                        "method": "animate",
                        "args": [[frame.name], {
                            "mode": "immediate",
                            "frame": { "duration": FRAME_DURATION_MS, "redraw": true },
                            "transition": { "duration": 0 },
                        }],
                    })
                })
                .collect();
            layout.insert(
                "sliders".into(),
                json!([{ "active": 0, "currentvalue": { "prefix": "Year=" }, "steps": steps }]),
            );
        }

        if !menus.is_empty() {
            layout.insert("updatemenus".into(), json!(menus));
        }

        Value::Object(layout)
    }

    fn axis(title: &str, range: Option<[f64; 2]>) -> Value {
        let mut axis = json!({ "title": { "text": title } });
        if let Some(range) = range {
            axis["range"] = json!(range);
        }
        axis
    }
}
