use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::DashboardState;

const ROW_HEIGHT: f32 = 18.0;

/// List the rows currently plotted on the scatter chart.
pub fn scatter_rows(ui: &mut Ui, state: &DashboardState) {
    let points = &state.scatter().data.points;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("class");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    let color = state.booster_colors.color_for(&p.booster_category);
                    ui.label(RichText::new(&p.booster_category).color(color));
                });
            });
        });
}
