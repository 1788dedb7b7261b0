/// Data layer: core types, loading, querying and statistics.
///
/// Architecture:
/// ```text
///  .txt / .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → validated Vec<Student>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Roster  │  ordered, read-only
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  query   │   │  stats   │  search / filter, aggregate averages
///   └──────────┘   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
pub mod stats;
