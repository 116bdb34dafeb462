use eframe::egui::{self, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, Points};

use crate::color::{marker_radius, MagnitudeScale};
use crate::controller::Renderer;
use crate::data::model::SelectionResult;

// ---------------------------------------------------------------------------
// Rendered selection (the plot's own state)
// ---------------------------------------------------------------------------

/// The last selection handed over by the controller.
pub struct PlottedEvents {
    pub selection: SelectionResult,
    pub title: String,
    pub scale: MagnitudeScale,
}

/// Holds whatever is currently on screen.  Replaced wholesale on every
/// successful cycle; failed cycles leave it untouched.
#[derive(Default)]
pub struct PlotView {
    pub plotted: Option<PlottedEvents>,
}

impl Renderer for PlotView {
    fn render(&mut self, selection: SelectionResult, plot_title: &str) {
        let (min, max) = selection.magnitude_extent().unwrap_or((0.0, 10.0));
        self.plotted = Some(PlottedEvents {
            selection,
            title: plot_title.to_string(),
            scale: MagnitudeScale::new(min, max),
        });
    }
}

/// Index of the event closest to `pos` in plot coordinates.
pub fn nearest_event(selection: &SelectionResult, pos: &PlotPoint) -> Option<usize> {
    selection
        .longitudes
        .iter()
        .zip(&selection.latitudes)
        .map(|(&lon, &lat)| (lon - pos.x).powi(2) + (lat - pos.y).powi(2))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Geographic scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the earthquake map in the central panel.
pub fn quake_map(ui: &mut Ui, view: &PlotView) {
    let Some(plotted) = &view.plotted else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Adjust the filters and press “Apply Filters”");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&plotted.title);
    });
    color_legend(ui, &plotted.scale);

    let selection = &plotted.selection;
    let max_mag = plotted.scale.range().1;

    Plot::new("quake_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, value| {
            match nearest_event(selection, value).and_then(|i| selection.get(i)) {
                Some(ev) => format!("{}\ntime: {}\nmagnitude: {:.1}", ev.title, ev.time, ev.magnitude),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            for ev in selection.iter() {
                let points = Points::new(vec![[ev.longitude, ev.latitude]])
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(ev.magnitude, max_mag))
                    .color(plotted.scale.color_for(ev.magnitude));
                plot_ui.points(points);
            }
        });
}

fn color_legend(ui: &mut Ui, scale: &MagnitudeScale) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Magnitude");
        for (label, color) in scale.legend_entries(6) {
            ui.label(egui::RichText::new(format!("● {label}")).color(color));
        }
    });
}
