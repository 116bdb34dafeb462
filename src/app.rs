use eframe::egui;

use crate::controller::InteractionController;
use crate::data::fetcher::FeedSource;
use crate::ui::plot::PlotView;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuakeViewApp {
    pub controller: InteractionController<Box<dyn FeedSource>>,
    pub view: PlotView,
    /// Run one cycle on the first frame.
    apply_pending: bool,
}

impl QuakeViewApp {
    pub fn new(controller: InteractionController<Box<dyn FeedSource>>, apply_on_start: bool) -> Self {
        Self {
            controller,
            view: PlotView::default(),
            apply_pending: apply_on_start,
        }
    }

    fn apply(&mut self) {
        let outcome = self.controller.on_apply_triggered(&mut self.view);
        log::debug!("cycle finished: {outcome:?}");
    }
}

impl eframe::App for QuakeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if std::mem::take(&mut self.apply_pending) {
            self.apply();
        }

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.controller, &self.view);
        });

        // ---- Left side panel: filters ----
        let apply_clicked = egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &mut self.controller))
            .inner;

        // ---- Bottom panel: event list ----
        egui::TopBottomPanel::bottom("event_table")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                table::event_table(ui, &self.view);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::quake_map(ui, &self.view);
        });

        // The fetch blocks this frame; the new plot shows on the next one.
        if apply_clicked {
            self.apply();
            ctx.request_repaint();
        }
    }
}
