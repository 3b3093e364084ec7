use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::state::{DashboardState, InputEvent};

/// Bounds and step of the payload sliders, in kg.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the site selector and payload range selector.
///
/// Widgets edit local copies; a change is published as an [`InputEvent`].
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site selector ----
    ui.strong("Launch Site");
    let mut site = state.selected_site().clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(site.label().to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in SiteSelection::options() {
                let label = option.label().to_string();
                ui.selectable_value(&mut site, option, label);
            }
        });
    if site != *state.selected_site() {
        log::info!("site selected: {site}");
        state.dispatch(InputEvent::SiteChanged(site));
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range selector ----
    // Clamp only on edits: the default bounds come from the data and need
    // not sit on a step.
    ui.strong("Payload range (Kg)");
    let PayloadRange { mut low, mut high } = state.payload_range();
    let bounds = PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, bounds.clone())
                .step_by(PAYLOAD_SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, bounds)
                .step_by(PAYLOAD_SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("max"),
        )
        .changed();
    if low_changed || high_changed {
        log::info!("payload range selected: {low}..={high} kg");
        state.dispatch(InputEvent::PayloadRangeChanged(PayloadRange::new(low, high)));
    }

    if ui.small_button("Reset").clicked() {
        state.reset_payload_range();
    }

    if state.payload_range().is_inverted() {
        ui.label(
            RichText::new("Minimum exceeds maximum: no launches match.").color(Color32::YELLOW),
        );
    }

    ui.add_space(8.0);
    ui.separator();

    let table = state.table();
    if table.is_empty() {
        ui.label(RichText::new("The launch table has no rows.").color(Color32::YELLOW));
    }
    ui.weak(format!(
        "Data payload span: {:.0} – {:.0} kg",
        table.min_payload(),
        table.max_payload()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and record counts.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .strong()
                .size(20.0),
        );

        ui.separator();

        let table = state.table();
        ui.label(format!(
            "{} launches loaded, {} successful, {} on scatter",
            table.len(),
            table.success_count(),
            state.scatter().data.len()
        ));
    });
}
