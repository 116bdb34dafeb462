use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::controller::{InteractionController, Mode, StatusLevel};
use crate::data::criteria::Range;
use crate::data::fetcher::FeedSource;

use super::plot::PlotView;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter controls.  Returns `true` when "Apply Filters" was
/// pressed this frame.
pub fn side_panel<F: FeedSource>(ui: &mut Ui, controller: &mut InteractionController<F>) -> bool {
    ui.heading("Filters");
    ui.separator();

    // Each slider edits a copy of the controller's displayed value; coupled
    // bounds come back through `controls()` on the next frame.  Rejected
    // values are already logged by the controller.
    let controls = controller.controls();

    egui::CollapsingHeader::new(RichText::new("Date Filter").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("View earthquakes within the past X days:");
            if let Some(days) = slider_edit(ui, controls.age_days, 1.0..=30.0, 1.0, " d") {
                controller.set_age_days(days).ok();
            }
        });

    egui::CollapsingHeader::new(RichText::new("Magnitude Range Filter").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Select minimum magnitude:");
            if let Some(min) = slider_edit(ui, controls.magnitude_min, 0.0..=10.0, 0.1, "") {
                controller.set_magnitude_min(min).ok();
            }

            ui.label("Select maximum magnitude:");
            if let Some(max) = slider_edit(ui, controls.magnitude_max, 0.0..=10.0, 0.1, "") {
                controller.set_magnitude_max(max).ok();
            }
        });

    egui::CollapsingHeader::new(RichText::new("Region").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let criteria = controller.criteria();
            ui.label(format!("Longitude {}", criteria.longitude()));
            ui.label(format!("Latitude {}", criteria.latitude()));
            let world = criteria.longitude() == Range::new(-180.0, 180.0)
                && criteria.latitude() == Range::new(-90.0, 90.0);
            if !world && ui.small_button("Whole world").clicked() {
                controller.set_longitude_range(-180.0, 180.0).ok();
                controller.set_latitude_range(-90.0, 90.0).ok();
            }
        });

    ui.separator();
    if controller.mode() == Mode::Prompted {
        ui.label(RichText::new("Started from terminal prompts").weak());
    }
    ui.vertical_centered(|ui: &mut Ui| ui.button("Apply Filters").clicked())
        .inner
}

/// Slider over a copy of `value`.  Yields the new value only when the
/// operator moved the slider: the widget snaps off-grid or out-of-range
/// values by itself, and that alone must not rewrite the criteria.
fn slider_edit(
    ui: &mut Ui,
    value: f64,
    range: RangeInclusive<f64>,
    step: f64,
    suffix: &str,
) -> Option<f64> {
    let mut edited = value;
    let response = ui.add(egui::Slider::new(&mut edited, range).step_by(step).suffix(suffix));
    let touched = response.dragged()
        || response.clicked()
        || response.has_focus()
        || response.lost_focus();
    (response.changed() && touched && edited != value).then_some(edited)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar: feed origin, plotted count and the last message.
pub fn top_bar<F: FeedSource>(ui: &mut Ui, controller: &InteractionController<F>, view: &PlotView) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new(controller.source().describe()).weak());

        ui.separator();

        if let Some(plotted) = &view.plotted {
            ui.label(format!("{} earthquakes plotted", plotted.selection.len()));
            ui.separator();
        }

        if let Some(status) = controller.status() {
            let color = match status.level {
                StatusLevel::Info => ui.visuals().text_color(),
                StatusLevel::Error => Color32::RED,
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}
