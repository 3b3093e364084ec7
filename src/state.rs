use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{
    compute_pie_dataset, compute_scatter_dataset, PayloadRange, PieDataset, PieGrouping,
    ScatterDataset, SiteSelection, LAUNCH_SITES,
};
use crate::data::model::{LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Input events and output slots
// ---------------------------------------------------------------------------

/// A change reported by one of the two dashboard controls.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SiteChanged(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

/// Named chart outputs that input events recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSlot {
    PieChart,
    ScatterChart,
}

impl InputEvent {
    /// Outputs subscribed to this event.
    pub fn subscribers(&self) -> &'static [OutputSlot] {
        match self {
            InputEvent::SiteChanged(_) => &[OutputSlot::PieChart, OutputSlot::ScatterChart],
            InputEvent::PayloadRangeChanged(_) => &[OutputSlot::ScatterChart],
        }
    }
}

/// A computed chart dataset plus the number of times it has been recomputed.
#[derive(Debug, Clone)]
pub struct Output<T> {
    pub data: T,
    pub revision: u64,
}

impl<T> Output<T> {
    fn new(data: T) -> Self {
        Output { data, revision: 0 }
    }

    fn replace(&mut self, data: T) {
        self.data = data;
        self.revision += 1;
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    /// Loaded once at start-up, read-only afterwards.
    table: Arc<LaunchTable>,

    selected_site: SiteSelection,
    payload_range: PayloadRange,

    pie: Output<PieDataset>,
    scatter: Output<ScatterDataset>,

    /// Pie colours when grouped by site.
    pub site_colors: CategoryColors,
    /// Pie colours when grouped by outcome class.
    pub outcome_colors: CategoryColors,
    /// Scatter series colours.
    pub booster_colors: CategoryColors,
}

impl DashboardState {
    /// Seed the inputs with their defaults and compute both charts once.
    pub fn new(table: Arc<LaunchTable>) -> Self {
        let selected_site = SiteSelection::All;
        let payload_range = PayloadRange::full(&table);
        let pie = Output::new(compute_pie_dataset(&table, &selected_site));
        let scatter = Output::new(compute_scatter_dataset(&table, &selected_site, payload_range));

        let site_colors = CategoryColors::new(
            LAUNCH_SITES
                .iter()
                .copied()
                .chain(table.sites().iter().map(String::as_str)),
        );
        let outcome_colors = CategoryColors::new(["0", "1"]);
        let booster_colors =
            CategoryColors::new(table.booster_categories().iter().map(String::as_str));

        DashboardState {
            table,
            selected_site,
            payload_range,
            pie,
            scatter,
            site_colors,
            outcome_colors,
            booster_colors,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn selected_site(&self) -> &SiteSelection {
        &self.selected_site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn pie(&self) -> &Output<PieDataset> {
        &self.pie
    }

    pub fn scatter(&self) -> &Output<ScatterDataset> {
        &self.scatter
    }

    /// Apply an input change and recompute every subscribed output.
    ///
    /// Returns the slots that were recomputed; empty if the event carried the
    /// value the input already had.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<OutputSlot> {
        let changed = match &event {
            InputEvent::SiteChanged(site) => {
                let changed = *site != self.selected_site;
                self.selected_site = site.clone();
                changed
            }
            InputEvent::PayloadRangeChanged(range) => {
                let changed = *range != self.payload_range;
                self.payload_range = *range;
                changed
            }
        };
        if !changed {
            return Vec::new();
        }

        log::debug!("input event {event:?}");
        let slots = event.subscribers();
        for slot in slots {
            self.recompute(*slot);
        }
        slots.to_vec()
    }

    /// Restore the payload range to the table's full span.
    pub fn reset_payload_range(&mut self) -> Vec<OutputSlot> {
        let full = PayloadRange::full(&self.table);
        self.dispatch(InputEvent::PayloadRangeChanged(full))
    }

    fn recompute(&mut self, slot: OutputSlot) {
        match slot {
            OutputSlot::PieChart => {
                self.pie
                    .replace(compute_pie_dataset(&self.table, &self.selected_site));
                log::debug!(
                    "pie chart: {} slices, total {}",
                    self.pie.data.slices.len(),
                    self.pie.data.total()
                );
            }
            OutputSlot::ScatterChart => {
                self.scatter.replace(compute_scatter_dataset(
                    &self.table,
                    &self.selected_site,
                    self.payload_range,
                ));
                log::debug!("scatter chart: {} points", self.scatter.data.len());
            }
        }
    }

    /// Colour of a pie slice, depending on what the pie is grouped by.
    pub fn slice_color(&self, label: &str) -> eframe::egui::Color32 {
        match self.pie.data.grouping {
            PieGrouping::BySite => self.site_colors.color_for(label),
            PieGrouping::ByOutcome => self.outcome_colors.color_for(label),
        }
    }

    /// Human-readable name for a pie slice label.
    pub fn slice_name(&self, label: &str) -> String {
        match self.pie.data.grouping {
            PieGrouping::BySite => label.to_string(),
            PieGrouping::ByOutcome => match label {
                "0" => format!("{} (failure)", Outcome::Failure),
                "1" => format!("{} (success)", Outcome::Success),
                other => other.to_string(),
            },
        }
    }
}
