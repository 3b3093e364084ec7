/// Data layer: launch records, loading, and the chart computations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, payload bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → PieDataset, ScatterDataset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
