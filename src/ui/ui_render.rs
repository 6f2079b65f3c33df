use eframe::egui::{
    CentralPanel, Color32, Context, Frame, Grid, Key, Margin, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Ui, Window,
};

use crate::domain::AssetKey;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::shell_state::ChartDisplay;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{CoinPanel, DateRangeEvent, DateRangePanel, Panel, PlaybackPanel};
use crate::ui::utils::section_heading;

use super::app::PriceWindowApp;

impl PriceWindowApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical().id_salt("side_scroll").show(ui, |ui| {
                    let range_events = self.date_range_panel(ui);
                    let coin_events = self.coin_panel(ui);
                    let playback_events = self.playback_panel(ui);

                    for event in range_events {
                        match event {
                            DateRangeEvent::Preset(preset) => self.handle_preset(preset),
                            DateRangeEvent::CustomSubmitted => self.handle_custom_submit(),
                        }
                    }
                    for key in coin_events {
                        self.handle_asset_toggle(&key);
                    }
                    if !playback_events.is_empty() {
                        self.handle_playback_toggle();
                    }
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(8));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                let Some(extent) = self.data_state.store.extent() else {
                    ui.label_error(UI_TEXT.no_data);
                    return;
                };

                section_heading(ui, UI_TEXT.overview_heading);
                let brushed = self.plot_view.show_overview(
                    ui,
                    &self.data_state.overview_lines,
                    extent,
                    self.shell.window,
                    &self.shell.tracked_assets,
                );
                if let Some(window) = brushed {
                    self.handle_brush(window);
                }

                section_heading(ui, UI_TEXT.change_heading);
                self.render_change_chart(ui);
            });
    }

    fn render_change_chart(&mut self, ui: &mut Ui) {
        match &self.display {
            ChartDisplay::Summary(summary) => {
                if !summary.undefined.is_empty() {
                    let names: Vec<&str> = summary
                        .undefined
                        .iter()
                        .map(|k| AssetKey::display_name(k))
                        .collect();
                    ui.label_warning(format!("{} {}", UI_TEXT.excluded_prefix, names.join(", ")));
                }
                self.plot_view.show_change_chart(ui, summary);
            }
            ChartDisplay::NotEnoughData => {
                ui.label_warning(UI_TEXT.not_enough_data);
            }
            ChartDisplay::Empty => {
                ui.label_subdued(UI_TEXT.no_selection);
            }
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // 1. Window label
                    match (&self.display, self.shell.window) {
                        (ChartDisplay::NotEnoughData, _) => {
                            ui.label_warning(UI_TEXT.not_enough_data);
                        }
                        (_, Some(window)) => {
                            ui.label(
                                RichText::new(window.label())
                                    .small()
                                    .color(Color32::from_rgb(100, 200, 255)),
                            );
                        }
                        (_, None) => ui.label_subdued(UI_TEXT.no_selection),
                    }
                    ui.separator();

                    // 2. Rows behind the bars
                    if let Some(summary) = self.display.summary() {
                        ui.metric(
                            UI_TEXT.observations_label,
                            &summary.observation_count.to_string(),
                            Color32::from_rgb(180, 200, 255),
                        );
                        ui.separator();
                    }

                    // 3. Condition that kept the previous bars
                    if let Some(condition) = self.last_condition {
                        ui.label_subdued(condition.to_string());
                        ui.separator();
                    }

                    // 4. Data source
                    ui.metric(
                        UI_TEXT.source_label,
                        self.data_state.signature,
                        Color32::from_rgb(100, 200, 100),
                    );
                    ui.separator();
                    ui.label_subdued(self.shell.preset.to_string());
                });
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_title)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                let shortcuts = [
                    ("H", "Toggle this help panel"),
                    ("Space", "Play / pause"),
                    ("Esc", "Close help"),
                ];
                Grid::new("general_shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });
            });
    }

    fn date_range_panel(&mut self, ui: &mut Ui) -> Vec<DateRangeEvent> {
        let mut panel = DateRangePanel::new(self.shell.preset, &mut self.custom_inputs);
        panel.render(ui)
    }

    fn coin_panel(&mut self, ui: &mut Ui) -> Vec<String> {
        let mut panel = CoinPanel::new(
            self.data_state.store.assets(),
            &self.shell.tracked_assets,
            self.display.summary(),
        );
        panel.render(ui)
    }

    fn playback_panel(&mut self, ui: &mut Ui) -> Vec<()> {
        let mut panel = PlaybackPanel::new(self.shell.playing, self.shell.window.is_some());
        panel.render(ui)
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Leave keys alone while the user is typing a date
        if ctx.wants_keyboard_input() {
            return;
        }
        let (help, escape, space) = ctx.input(|i| {
            (
                i.key_pressed(Key::H),
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::Space),
            )
        });

        if help {
            self.show_help = !self.show_help;
        }
        if escape && self.show_help {
            self.show_help = false;
        }
        if space {
            self.handle_playback_toggle();
        }
    }
}
