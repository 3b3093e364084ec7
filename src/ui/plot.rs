use std::f32::consts::TAU;

use eframe::egui::{self, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::filter::PieDataset;
use crate::state::DashboardState;

/// Largest arc drawn as a single convex polygon.
const MAX_WEDGE: f32 = TAU / 16.0;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Start/end angle (radians, clockwise from 12 o'clock) of every slice.
pub fn slice_angles(pie: &PieDataset) -> Vec<(f32, f32)> {
    let total = pie.total();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    pie.slices
        .iter()
        .map(|s| {
            let end = start + TAU * s.value as f32 / total as f32;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Index of the slice under `pos`, if it lies within the disc.
fn slice_at(angles: &[(f32, f32)], center: Pos2, radius: f32, pos: Pos2) -> Option<usize> {
    let d = pos - center;
    if d.length() > radius {
        return None;
    }
    // Screen y grows downwards; measure clockwise from straight up.
    let angle = d.x.atan2(-d.y).rem_euclid(TAU);
    angles.iter().position(|&(a, b)| angle >= a && angle < b)
}

fn point_on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(angle.sin(), -angle.cos()) * radius
}

// ---------------------------------------------------------------------------
// Pie chart (upper half of the central panel)
// ---------------------------------------------------------------------------

/// Render the outcome pie chart with its legend.
pub fn pie_chart(ui: &mut Ui, state: &DashboardState) {
    let pie = &state.pie().data;
    ui.heading(&pie.title);

    if pie.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("No launches match the selected site.");
        });
        return;
    }

    let angles = slice_angles(pie);
    let total = pie.total();

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(80.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let rect: Rect = response.rect;
        let center = rect.center();
        let radius = side * 0.45;

        for (slice, &(start, end)) in pie.slices.iter().zip(&angles) {
            let color = state.slice_color(&slice.label);
            // Split into wedges narrow enough to stay convex.
            let n = ((end - start) / MAX_WEDGE).ceil().max(1.0) as usize;
            let step = (end - start) / n as f32;
            for k in 0..n {
                let a0 = start + step * k as f32;
                let mut points = vec![center];
                points.extend((0..=4).map(|j| {
                    point_on_circle(center, radius, a0 + step * j as f32 / 4.0)
                }));
                painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
            }
            if angles.len() > 1 {
                painter.line_segment(
                    [center, point_on_circle(center, radius, start)],
                    Stroke::new(1.5, ui.visuals().panel_fill),
                );
            }
        }

        if let Some(pos) = response.hover_pos() {
            if let Some(i) = slice_at(&angles, center, radius, pos) {
                let slice = &pie.slices[i];
                response.on_hover_text_at_pointer(format!(
                    "{}: {}",
                    state.slice_name(&slice.label),
                    slice.value
                ));
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &pie.slices {
                let pct = 100.0 * slice.value as f64 / total as f64;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, state.slice_color(&slice.label));
                    ui.label(format!(
                        "{}  {}  ({pct:.1}%)",
                        state.slice_name(&slice.label),
                        slice.value
                    ));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter plot (lower half of the central panel)
// ---------------------------------------------------------------------------

/// Render payload vs. outcome, one coloured series per booster category.
pub fn scatter_chart(ui: &mut Ui, state: &DashboardState) {
    let scatter = &state.scatter().data;
    ui.heading(&scatter.title);
    if scatter.is_empty() {
        ui.weak("No launches match the selected site and payload range.");
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, xy) in scatter.series() {
                let points = Points::new(PlotPoints::from(xy))
                    .name(category)
                    .color(state.booster_colors.color_for(category))
                    .radius(4.0)
                    .filled(true);
                plot_ui.points(points);
            }
        });
}

/// Light separator used between the two charts.
pub fn chart_divider(ui: &mut Ui) {
    ui.add(egui::Separator::default().spacing(12.0));
}
