use eframe::egui::{self, Align2, Color32, RichText, Stroke};
use egui_plot::{
    AxisHints, Bar, BarChart, GridMark, HLine, HPlacement, Line, LineStyle, Plot, PlotPoint,
    PlotPoints, Polygon, Text,
};

use crate::config::PLOT_CONFIG;
use crate::domain::{AssetKey, Window};
use crate::models::movement::{average_step_movement, normalized_line};
use crate::models::{SeriesStore, WindowSummary};
use crate::ui::config::UI_TEXT;
use crate::ui::utils::{asset_color, format_percent};
use crate::utils::time_utils::epoch_ms_to_utc_date;

// Headroom above the normalised maximum
const OVERVIEW_Y_MAX: f64 = 1.05;

/// One asset on the overview chart. Built once per loaded store.
#[derive(Clone, Debug)]
pub struct OverviewLine {
    pub key: String,
    pub label: String,
    pub color: Color32,
    pub width: f32,
    pub points: Vec<[f64; 2]>,
}

impl OverviewLine {
    pub fn build_all(store: &SeriesStore) -> Vec<Self> {
        store
            .assets()
            .iter()
            .enumerate()
            .map(|(slot, key)| OverviewLine {
                key: key.clone(),
                label: AssetKey::display_name(key).to_string(),
                color: asset_color(slot),
                width: line_width_for(average_step_movement(store, slot)),
                points: normalized_line(store, slot),
            })
            .collect()
    }
}

/// Maps average step movement onto the configured line width range.
pub fn line_width_for(movement_pct: Option<f64>) -> f32 {
    let Some(movement) = movement_pct.filter(|m| m.is_finite()) else {
        return PLOT_CONFIG.min_line_width;
    };
    let t = (movement / PLOT_CONFIG.movement_for_max_width_pct).clamp(0.0, 1.0) as f32;
    PLOT_CONFIG.min_line_width + t * (PLOT_CONFIG.max_line_width - PLOT_CONFIG.min_line_width)
}

#[derive(Default)]
pub struct PlotView {
    // Plot x value where the current brush drag started
    brush_anchor: Option<f64>,
}

impl PlotView {
    pub fn new() -> Self {
        Self { brush_anchor: None }
    }

    /// Draws every asset line with the selected window shaded.
    /// Returns the window the user is dragging out, if any.
    pub fn show_overview(
        &mut self,
        ui: &mut egui::Ui,
        lines: &[OverviewLine],
        extent: Window,
        selected: Option<Window>,
        tracked: &[String],
    ) -> Option<Window> {
        let (x_min, x_max) = (extent.start_ms as f64, extent.end_ms as f64);
        let divisions = PLOT_CONFIG.plot_axis_divisions.max(1);

        let plot_response = Plot::new("overview_plot")
            .view_aspect(PLOT_CONFIG.overview_aspect_ratio)
            .custom_x_axes(vec![create_time_axis()])
            .custom_y_axes(vec![create_overview_y_axis()])
            .label_formatter(|_, _| String::new())
            .x_grid_spacer(move |input| {
                let (min, max) = input.bounds;
                let step_size = (max - min) / divisions as f64;
                (0..=divisions)
                    .map(|i| GridMark {
                        value: min + step_size * i as f64,
                        step_size,
                    })
                    .collect()
            })
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(x_min..=x_max);
                plot_ui.set_plot_bounds_y(0.0..=OVERVIEW_Y_MAX);

                if let Some(window) = selected {
                    let (start, end) = (window.start_ms as f64, window.end_ms as f64);
                    let shade = PlotPoints::new(vec![
                        [start, 0.0],
                        [end, 0.0],
                        [end, OVERVIEW_Y_MAX],
                        [start, OVERVIEW_Y_MAX],
                    ]);
                    plot_ui.polygon(
                        Polygon::new("window", shade)
                            .fill_color(PLOT_CONFIG.window_fill_color)
                            .stroke(Stroke::new(1.0, PLOT_CONFIG.window_stroke_color)),
                    );
                }

                for line in lines {
                    // Untracked assets stay visible but faded
                    let color = if tracked.contains(&line.key) {
                        line.color
                    } else {
                        line.color.gamma_multiply(0.25)
                    };
                    plot_ui.line(
                        Line::new(line.label.clone(), PlotPoints::new(line.points.clone()))
                            .color(color)
                            .width(line.width),
                    );
                }
            });

        let response = &plot_response.response;
        let pointer_x = response
            .interact_pointer_pos()
            .map(|pos| plot_response.transform.value_from_position(pos).x.clamp(x_min, x_max));

        if response.drag_started() {
            self.brush_anchor = pointer_x;
        }
        let mut brushed = None;
        if response.dragged() {
            if let (Some(anchor), Some(x)) = (self.brush_anchor, pointer_x) {
                brushed = Some(Window::new(anchor.round() as i64, x.round() as i64));
            }
        }
        if response.drag_stopped() {
            self.brush_anchor = None;
        }
        brushed
    }

    /// One bar per defined change, scaled to the summary's display domain.
    pub fn show_change_chart(&mut self, ui: &mut egui::Ui, summary: &WindowSummary) {
        let names: Vec<String> = summary
            .changes
            .iter()
            .map(|c| AssetKey::display_name(&c.key).to_string())
            .collect();
        let count = names.len();

        let bars: Vec<Bar> = summary
            .changes
            .iter()
            .zip(&names)
            .enumerate()
            .map(|(idx, (change, name))| {
                Bar::new(idx as f64, change.percent)
                    .name(name)
                    .width(PLOT_CONFIG.bar_width)
                    .fill(asset_color(change.slot))
            })
            .collect();

        let chart = BarChart::new(UI_TEXT.change_heading, bars).element_formatter(Box::new(
            |bar, _chart| format!("{}: {}", bar.name, format_percent(bar.value)),
        ));

        let domain = summary.domain;
        let label_offset = domain.half_width() * 0.02;
        let labels: Vec<(f64, f64, String)> = summary
            .changes
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx as f64, c.percent, format!("{:.1}%", c.percent)))
            .collect();

        Plot::new("change_plot")
            .custom_x_axes(vec![create_asset_axis(names)])
            .custom_y_axes(vec![create_percent_axis()])
            .label_formatter(|_, _| String::new())
            .x_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(-0.5..=(count as f64 - 0.5));
                plot_ui.set_plot_bounds_y(domain.min..=domain.max);

                plot_ui.hline(
                    HLine::new("zero", 0.0)
                        .color(PLOT_CONFIG.zero_line_color)
                        .width(1.0)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.bar_chart(chart);

                for (x, percent, text) in labels {
                    let (y, anchor) = if percent >= 0.0 {
                        (percent + label_offset, Align2::CENTER_BOTTOM)
                    } else {
                        (percent - label_offset, Align2::CENTER_TOP)
                    };
                    plot_ui.text(
                        Text::new(
                            text.clone(),
                            PlotPoint::new(x, y),
                            RichText::new(text).small(),
                        )
                        .anchor(anchor),
                    );
                }
            });
    }
}

fn create_time_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| epoch_ms_to_utc_date(grid_mark.value.round() as i64))
}

fn create_overview_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_overview_y_axis)
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}

fn create_asset_axis(names: Vec<String>) -> AxisHints<'static> {
    AxisHints::new_x().formatter(move |grid_mark, _range| {
        let idx = grid_mark.value.round();
        if idx < 0.0 || (grid_mark.value - idx).abs() > 1e-6 {
            return String::new();
        }
        names.get(idx as usize).cloned().unwrap_or_default()
    })
}

fn create_percent_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_change_y_axis)
        .formatter(|grid_mark, _range| format!("{:.1}%", grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetSchema, Observation};

    #[test]
    fn line_width_grows_with_movement() {
        assert_eq!(line_width_for(None), PLOT_CONFIG.min_line_width);
        assert_eq!(line_width_for(Some(0.0)), PLOT_CONFIG.min_line_width);
        assert_eq!(line_width_for(Some(1e9)), PLOT_CONFIG.max_line_width);
        let mid = line_width_for(Some(PLOT_CONFIG.movement_for_max_width_pct / 2.0));
        assert!(mid > PLOT_CONFIG.min_line_width && mid < PLOT_CONFIG.max_line_width);
    }

    #[test]
    fn overview_lines_follow_schema() {
        let schema = AssetSchema::new(vec!["BTCUSDT_Open".into(), "ETHUSDT_Open".into()]);
        let store = SeriesStore::new(
            schema,
            vec![
                Observation::new(0, vec![Some(10.0), Some(4.0)]),
                Observation::new(1, vec![Some(20.0), None]),
            ],
        )
        .unwrap();
        let lines = OverviewLine::build_all(&store);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "BTC");
        assert_eq!(lines[0].points, vec![[0.0, 0.5], [1.0, 1.0]]);
        assert_eq!(lines[1].points, vec![[0.0, 1.0]]);
        assert_eq!(lines[1].width, PLOT_CONFIG.min_line_width);
    }
}
