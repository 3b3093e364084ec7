use std::collections::BTreeSet;
use std::fmt;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_CLASS: &str = "class";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Every column a launch table must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_CLASS, COL_PAYLOAD, COL_BOOSTER];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure = 0,
    Success = 1,
}

impl Outcome {
    /// Numeric class value as stored in the source table.
    pub fn class(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Interpret a raw class cell. Only `0` and `1` are valid.
    pub fn from_class(row: usize, value: i64) -> Result<Self, DataError> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DataError::InvalidClass {
                row,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub outcome: Outcome,
    pub payload_mass_kg: f64,
    /// Only used as a colour / grouping key on the scatter plot.
    pub booster_category: String,
}

impl LaunchRecord {
    /// Build a record from raw cell values, validating class and payload.
    pub fn try_new(
        row: usize,
        site: impl Into<String>,
        class: i64,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
    ) -> Result<Self, DataError> {
        let outcome = Outcome::from_class(row, class)?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DataError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }
        Ok(LaunchRecord {
            site: site.into(),
            outcome,
            payload_mass_kg,
            booster_category: booster_category.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable launch table with its derived payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
}

impl LaunchTable {
    /// Derive payload bounds and category sets from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let (min_payload, max_payload) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
            })
        };
        let sites = records.iter().map(|r| r.site.clone()).collect();
        let booster_categories = records.iter().map(|r| r.booster_category.clone()).collect();

        LaunchTable {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Distinct launch sites present in the table, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster categories present in the table, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, class: i64, payload: f64) -> LaunchRecord {
        LaunchRecord::try_new(0, site, class, payload, "FT").unwrap()
    }

    #[test]
    fn payload_bounds_are_derived_from_records() {
        let table = LaunchTable::from_records(vec![
            record("KSC LC-39A", 1, 2500.0),
            record("CCAFS LC-40", 0, 0.0),
            record("VAFB SLC-4E", 1, 9600.0),
        ]);
        assert_eq!(table.min_payload(), 0.0);
        assert_eq!(table.max_payload(), 9600.0);
        assert_eq!(table.success_count(), 2);
        assert_eq!(table.sites().len(), 3);
    }

    #[test]
    fn empty_table_has_zero_bounds() {
        let table = LaunchTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!((table.min_payload(), table.max_payload()), (0.0, 0.0));
    }

    #[test]
    fn class_must_be_binary() {
        assert_eq!(Outcome::from_class(3, 1), Ok(Outcome::Success));
        assert_eq!(
            Outcome::from_class(3, 2),
            Err(DataError::InvalidClass { row: 3, value: "2".into() })
        );
    }

    #[test]
    fn negative_or_nan_payload_is_rejected() {
        assert!(matches!(
            LaunchRecord::try_new(7, "KSC LC-39A", 1, -5.0, "B4"),
            Err(DataError::InvalidPayload { row: 7, .. })
        ));
        assert!(LaunchRecord::try_new(7, "KSC LC-39A", 1, f64::NAN, "B4").is_err());
    }
}
