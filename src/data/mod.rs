/// Data layer: core types, loading, caching, filtering and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalaryDataset (or DataLoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  once-initialised, process-wide handle
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + position → record indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  linear-interpolation quantiles
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
