use eframe::egui::{ComboBox, RichText, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::domain::{AssetKey, DateRangePreset};
use crate::models::WindowSummary;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{asset_color, change_color, format_percent, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Text typed into the custom range boxes, plus the last validation message.
#[derive(Default, Debug, Clone)]
pub struct CustomRangeInputs {
    pub start: String,
    pub end: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateRangeEvent {
    Preset(DateRangePreset),
    CustomSubmitted,
}

/// Preset selector and custom range inputs
pub struct DateRangePanel<'a> {
    preset: DateRangePreset,
    inputs: &'a mut CustomRangeInputs,
}

impl<'a> DateRangePanel<'a> {
    pub fn new(preset: DateRangePreset, inputs: &'a mut CustomRangeInputs) -> Self {
        Self { preset, inputs }
    }

    fn render_preset_selector(&mut self, ui: &mut Ui) -> Option<DateRangePreset> {
        let mut changed = None;
        ComboBox::from_id_salt("date_range_preset")
            .selected_text(self.preset.to_string())
            .show_ui(ui, |ui| {
                for preset in DateRangePreset::iter() {
                    if ui
                        .selectable_value(&mut self.preset, preset, preset.to_string())
                        .clicked()
                    {
                        changed = Some(preset);
                    }
                }
            });

        #[cfg(debug_assertions)]
        if let Some(preset) = changed {
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Date range preset selected: {}", preset);
            }
        }
        changed
    }

    fn render_custom_inputs(&mut self, ui: &mut Ui) -> bool {
        ui.label_subheader(UI_TEXT.custom_range_heading);
        let mut submitted = false;

        for (label, text) in [
            (UI_TEXT.custom_start_label, &mut self.inputs.start),
            (UI_TEXT.custom_end_label, &mut self.inputs.end),
        ] {
            ui.horizontal(|ui| {
                ui.label_subdued(label);
                let response = ui.add(
                    TextEdit::singleline(text)
                        .hint_text(UI_TEXT.custom_input_hint)
                        .desired_width(UI_CONFIG.custom_input_width),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter)) {
                    submitted = true;
                }
            });
        }

        if ui.button(UI_TEXT.custom_apply_button).clicked() {
            submitted = true;
        }
        if let Some(error) = &self.inputs.error {
            ui.label_error(error.as_str());
        }
        submitted
    }
}

impl<'a> Panel for DateRangePanel<'a> {
    type Event = DateRangeEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.date_range_heading);

        if let Some(preset) = self.render_preset_selector(ui) {
            events.push(DateRangeEvent::Preset(preset));
        }
        ui.add_space(5.0);
        if self.render_custom_inputs(ui) {
            events.push(DateRangeEvent::CustomSubmitted);
        }
        spaced_separator(ui);
        events
    }
}

/// Coin selector that doubles as the chart legend
pub struct CoinPanel<'a> {
    assets: &'a [String],
    tracked: &'a [String],
    summary: Option<&'a WindowSummary>,
}

impl<'a> CoinPanel<'a> {
    pub fn new(
        assets: &'a [String],
        tracked: &'a [String],
        summary: Option<&'a WindowSummary>,
    ) -> Self {
        Self {
            assets,
            tracked,
            summary,
        }
    }
}

impl<'a> Panel for CoinPanel<'a> {
    type Event = String; // Asset key whose checkbox was toggled

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.coins_heading);

        for (slot, key) in self.assets.iter().enumerate() {
            ui.horizontal(|ui| {
                let mut checked = self.tracked.contains(key);
                let name = RichText::new(AssetKey::display_name(key))
                    .strong()
                    .color(asset_color(slot));
                if ui.checkbox(&mut checked, name).changed() {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Toggled asset {} -> {}", key, checked);
                    }
                    events.push(key.clone());
                }

                if let Some(change) = self.summary.and_then(|s| s.change_for(key)) {
                    ui.label(
                        RichText::new(format_percent(change.percent))
                            .small()
                            .color(change_color(change.percent)),
                    );
                } else if self.summary.is_some_and(|s| s.undefined.contains(key)) {
                    ui.label(
                        RichText::new("n/a")
                            .small()
                            .color(UI_CONFIG.colors.excluded_asset),
                    );
                }
            });
        }

        spaced_separator(ui);
        events
    }
}

/// Play / pause control
pub struct PlaybackPanel {
    playing: bool,
    enabled: bool,
}

impl PlaybackPanel {
    pub fn new(playing: bool, enabled: bool) -> Self {
        Self { playing, enabled }
    }
}

impl Panel for PlaybackPanel {
    type Event = (); // Toggle requested

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.playback_heading);

        let label = if self.playing {
            UI_TEXT.pause_button
        } else {
            UI_TEXT.play_button
        };
        if ui
            .add_enabled(self.enabled, eframe::egui::Button::new(label))
            .clicked()
        {
            events.push(());
        }
        ui.add_space(10.0);
        events
    }
}
