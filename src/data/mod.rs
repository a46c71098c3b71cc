/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse sheet → RegionTable (memoized)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RegionTable  │  Vec<RegionRecord>, id index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply per-column score ranges → filtered indices
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::DataLoadError;
pub use filter::{FilterSpec, ScoreRange};
pub use model::{RegionRecord, RegionTable, ScoreColumn};
