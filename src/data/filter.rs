use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchRecord, LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Selector inputs
// ---------------------------------------------------------------------------

/// Launch sites offered by the site selector, in display order.
pub const LAUNCH_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Value of the site selector: the "ALL" wildcard or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// The five selector options: "ALL" followed by every entry of [`LAUNCH_SITES`].
    pub fn options() -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(LAUNCH_SITES.iter().map(|s| SiteSelection::Site(s.to_string())))
            .collect()
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => record.site == *s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "ALL"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload interval in kilograms.
///
/// `low <= high` is not enforced: an inverted range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Default selector value: the table's full payload span.
    pub fn full(table: &LaunchTable) -> Self {
        PayloadRange::new(table.min_payload(), table.max_payload())
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

// ---------------------------------------------------------------------------
// Pie chart dataset
// ---------------------------------------------------------------------------

/// What the pie's category axis represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieGrouping {
    /// Success counts per launch site.
    BySite,
    /// Record counts per outcome class for a single site.
    ByOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieDataset {
    pub title: String,
    pub grouping: PieGrouping,
    pub slices: Vec<PieSlice>,
}

impl PieDataset {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Aggregate the table for the outcome pie chart.
///
/// * `All` → successful launches only, counted per site.
/// * `Site(s)` → every launch from `s`, counted per outcome class.
pub fn compute_pie_dataset(table: &LaunchTable, selected_site: &SiteSelection) -> PieDataset {
    match selected_site {
        SiteSelection::All => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for r in table.records().iter().filter(|r| r.outcome.is_success()) {
                *counts.entry(r.site.as_str()).or_default() += 1;
            }
            PieDataset {
                title: "Total success launches by site".to_string(),
                grouping: PieGrouping::BySite,
                slices: counts
                    .into_iter()
                    .map(|(site, value)| PieSlice { label: site.to_string(), value })
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for r in table.records().iter().filter(|r| r.site == *site) {
                *counts.entry(r.outcome).or_default() += 1;
            }
            PieDataset {
                title: format!("Total success launches for site {site}"),
                grouping: PieGrouping::ByOutcome,
                slices: counts
                    .into_iter()
                    .map(|(outcome, value)| PieSlice { label: outcome.to_string(), value })
                    .collect(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

impl ScatterPoint {
    /// Plot coordinates: payload on x, class on y.
    pub fn xy(&self) -> [f64; 2] {
        [self.payload_mass_kg, f64::from(self.outcome.class())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDataset {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterDataset {
    /// Points grouped by booster category, one series per category.
    pub fn series(&self) -> BTreeMap<&str, Vec<[f64; 2]>> {
        let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for p in &self.points {
            series.entry(p.booster_category.as_str()).or_default().push(p.xy());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Filter the table for the payload/outcome scatter plot. Rows keep table order.
pub fn compute_scatter_dataset(
    table: &LaunchTable,
    selected_site: &SiteSelection,
    payload_range: PayloadRange,
) -> ScatterDataset {
    let title = match selected_site {
        SiteSelection::All => {
            "Correlation between payload and success rate for all sites".to_string()
        }
        SiteSelection::Site(site) => {
            format!("Correlation between payload and success rate for site {site}")
        }
    };

    let points = table
        .records()
        .iter()
        .filter(|r| selected_site.matches(r))
        .filter(|r| payload_range.contains(r.payload_mass_kg))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_category: r.booster_category.clone(),
        })
        .collect();

    ScatterDataset { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, class: i64, payload: f64, booster: &str) -> LaunchRecord {
        LaunchRecord::try_new(0, site, class, payload, booster).unwrap()
    }

    fn scenario_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            rec("KSC LC-39A", 1, 500.0, "FT"),
            rec("KSC LC-39A", 0, 1500.0, "B4"),
            rec("CCAFS LC-40", 1, 3000.0, "FT"),
        ])
    }

    fn mixed_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            rec("CCAFS LC-40", 0, 0.0, "v1.0"),
            rec("CCAFS LC-40", 1, 525.0, "v1.1"),
            rec("VAFB SLC-4E", 0, 500.0, "v1.1"),
            rec("VAFB SLC-4E", 1, 9600.0, "FT"),
            rec("KSC LC-39A", 1, 2490.0, "FT"),
            rec("KSC LC-39A", 1, 5300.0, "B4"),
            rec("KSC LC-39A", 0, 4200.0, "FT"),
            rec("CCAFS SLC-40", 1, 3600.0, "B5"),
            rec("CCAFS SLC-40", 0, 7000.0, "FT"),
        ])
    }

    fn value_of(pie: &PieDataset, label: &str) -> Option<usize> {
        pie.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    fn site(s: &str) -> SiteSelection {
        SiteSelection::Site(s.to_string())
    }

    #[test]
    fn scenario_pie_all_counts_successes_per_site() {
        let pie = compute_pie_dataset(&scenario_table(), &SiteSelection::All);
        assert_eq!(pie.title, "Total success launches by site");
        assert_eq!(pie.grouping, PieGrouping::BySite);
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(value_of(&pie, "KSC LC-39A"), Some(1));
        assert_eq!(value_of(&pie, "CCAFS LC-40"), Some(1));
    }

    #[test]
    fn scenario_pie_single_site_counts_per_class() {
        let pie = compute_pie_dataset(&scenario_table(), &site("KSC LC-39A"));
        assert_eq!(pie.title, "Total success launches for site KSC LC-39A");
        assert_eq!(pie.grouping, PieGrouping::ByOutcome);
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "0".into(), value: 1 },
                PieSlice { label: "1".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn scenario_scatter_excludes_out_of_range_payload() {
        let scatter = compute_scatter_dataset(
            &scenario_table(),
            &SiteSelection::All,
            PayloadRange::new(0.0, 2000.0),
        );
        assert_eq!(scatter.len(), 2);
        assert!(scatter.points.iter().all(|p| p.payload_mass_kg <= 2000.0));
        assert_eq!(
            scatter.title,
            "Correlation between payload and success rate for all sites"
        );
    }

    #[test]
    fn pie_all_sums_to_total_successes() {
        let table = mixed_table();
        let pie = compute_pie_dataset(&table, &SiteSelection::All);
        assert_eq!(pie.total(), table.success_count());
        // VAFB, CCAFS LC-40, KSC, CCAFS SLC-40 each have at least one success.
        assert_eq!(pie.slices.len(), 4);
        assert_eq!(value_of(&pie, "KSC LC-39A"), Some(2));
    }

    #[test]
    fn pie_site_has_at_most_two_groups_summing_to_site_count() {
        let table = mixed_table();
        for name in LAUNCH_SITES {
            let pie = compute_pie_dataset(&table, &site(name));
            let expected = table.records().iter().filter(|r| r.site == name).count();
            assert!(pie.slices.len() <= 2);
            assert_eq!(pie.total(), expected, "site {name}");
        }
    }

    #[test]
    fn pie_for_unknown_site_is_empty() {
        let pie = compute_pie_dataset(&mixed_table(), &site("Boca Chica"));
        assert!(pie.is_empty());
        assert_eq!(pie.total(), 0);
    }

    #[test]
    fn scatter_rows_satisfy_site_and_range() {
        let table = mixed_table();
        let range = PayloadRange::new(500.0, 5300.0);
        for selection in SiteSelection::options() {
            let scatter = compute_scatter_dataset(&table, &selection, range);
            for p in &scatter.points {
                assert!(range.contains(p.payload_mass_kg));
            }
            if let SiteSelection::Site(name) = &selection {
                let site_payloads: Vec<f64> = table
                    .records()
                    .iter()
                    .filter(|r| r.site == *name && range.contains(r.payload_mass_kg))
                    .map(|r| r.payload_mass_kg)
                    .collect();
                let got: Vec<f64> = scatter.points.iter().map(|p| p.payload_mass_kg).collect();
                assert_eq!(got, site_payloads);
            }
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let table = mixed_table();
        let scatter =
            compute_scatter_dataset(&table, &site("KSC LC-39A"), PayloadRange::new(2490.0, 5300.0));
        assert_eq!(scatter.len(), 3);
    }

    #[test]
    fn default_range_keeps_full_base_set() {
        let table = mixed_table();
        let full = PayloadRange::full(&table);
        assert_eq!(compute_scatter_dataset(&table, &SiteSelection::All, full).len(), table.len());
        let vafb = compute_scatter_dataset(&table, &site("VAFB SLC-4E"), full);
        assert_eq!(vafb.len(), 2);
    }

    #[test]
    fn inverted_range_yields_empty_result() {
        let range = PayloadRange::new(6000.0, 1000.0);
        assert!(range.is_inverted());
        let scatter = compute_scatter_dataset(&mixed_table(), &SiteSelection::All, range);
        assert!(scatter.is_empty());
    }

    #[test]
    fn compute_functions_are_idempotent() {
        let table = mixed_table();
        let selection = site("CCAFS SLC-40");
        let range = PayloadRange::new(1000.0, 8000.0);
        assert_eq!(
            compute_pie_dataset(&table, &selection),
            compute_pie_dataset(&table, &selection)
        );
        assert_eq!(
            compute_scatter_dataset(&table, &selection, range),
            compute_scatter_dataset(&table, &selection, range)
        );
    }

    #[test]
    fn scatter_series_group_by_booster_category() {
        let table = mixed_table();
        let scatter = compute_scatter_dataset(&table, &SiteSelection::All, PayloadRange::full(&table));
        let series = scatter.series();
        assert_eq!(series.keys().copied().collect::<Vec<_>>(), vec!["B4", "B5", "FT", "v1.0", "v1.1"]);
        assert_eq!(series["FT"].len(), 4);
        assert_eq!(series["B5"], vec![[3600.0, 1.0]]);
    }

    #[test]
    fn selector_offers_all_plus_four_sites() {
        let options = SiteSelection::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], SiteSelection::All);
        assert_eq!(options[0].label(), "All Sites");
        assert_eq!(options[0].to_string(), "ALL");
        assert_eq!(options[3].label(), "KSC LC-39A");
    }
}
