use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::plot::PlotView;

// ---------------------------------------------------------------------------
// Event list (bottom panel)
// ---------------------------------------------------------------------------

/// Tabular view of the plotted events, in feed order.
pub fn event_table(ui: &mut Ui, view: &PlotView) {
    let Some(plotted) = &view.plotted else {
        ui.label("No events plotted yet.");
        return;
    };
    let selection = &plotted.selection;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in ["Mag", "Time", "Lon", "Lat", "Title"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, selection.len(), |mut row| {
                let Some(ev) = selection.get(row.index()) else {
                    return;
                };
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(format!("{:.1}", ev.magnitude))
                            .color(plotted.scale.color_for(ev.magnitude)),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.monospace(ev.time);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.3}", ev.longitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.3}", ev.latitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(ev.title);
                });
            });
        });
}
