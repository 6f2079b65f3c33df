//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Categorical palette indexed by schema slot (Tableau10)
    pub asset_palette: &'static [Color32],
    /// Colour of the shaded brush window on the overview
    pub window_fill_color: Color32,
    pub window_stroke_color: Color32,
    pub zero_line_color: Color32,
    /// Width of a bar as a fraction of the slot it occupies
    pub bar_width: f64,
    /// Overview line width bounds; average movement is mapped into this range
    pub min_line_width: f32,
    pub max_line_width: f32,
    /// Average movement (percent) that maps to `max_line_width`
    pub movement_for_max_width_pct: f64,
    /// Plot aspect ratio (width:height)
    pub overview_aspect_ratio: f32,
    /// Plot x axis divisions (split axis into n equal parts)
    pub plot_axis_divisions: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    asset_palette: &[
        Color32::from_rgb(0x4e, 0x79, 0xa7), // Blue
        Color32::from_rgb(0xf2, 0x8e, 0x2c), // Orange
        Color32::from_rgb(0xe1, 0x57, 0x59), // Red
        Color32::from_rgb(0x76, 0xb7, 0xb2), // Teal
        Color32::from_rgb(0x59, 0xa1, 0x4f), // Green
        Color32::from_rgb(0xed, 0xc9, 0x49), // Yellow
        Color32::from_rgb(0xaf, 0x7a, 0xa1), // Purple
        Color32::from_rgb(0xff, 0x9d, 0xa7), // Pink
        Color32::from_rgb(0x9c, 0x75, 0x5f), // Brown
        Color32::from_rgb(0xba, 0xb0, 0xab), // Grey
    ],
    window_fill_color: Color32::from_rgba_premultiplied(40, 40, 60, 60),
    window_stroke_color: Color32::from_rgb(140, 140, 170),
    zero_line_color: Color32::from_rgb(120, 120, 120),
    bar_width: 0.6,
    min_line_width: 1.0,
    max_line_width: 4.0,
    movement_for_max_width_pct: 5.0,
    overview_aspect_ratio: 3.0,
    plot_axis_divisions: 8,
};
