use std::sync::Arc;

use eframe::egui::{self, Ui};

use crate::data::model::LaunchTable;
use crate::state::DashboardState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
}

impl LaunchDashApp {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        Self {
            state: DashboardState::new(table),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: scatter rows ----
        egui::TopBottomPanel::bottom("rows_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                let n = self.state.scatter().data.len();
                egui::CollapsingHeader::new(format!("Scatter rows ({n})"))
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        table::scatter_rows(ui, &self.state);
                    });
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let half = ui.available_height() * 0.45;
            ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui: &mut Ui| {
                plot::pie_chart(ui, &self.state);
            });
            plot::chart_divider(ui);
            plot::scatter_chart(ui, &self.state);
        });
    }
}
