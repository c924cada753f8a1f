/// Data layer: table model, loading, and axis classification.
///
/// Architecture:
/// ```text
///  .csv / .tsv / stream
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse delimited text → Table (per-column type inference)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  ordered, equal-length, uniquely named columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  numeric columns → AxisSet
///   └──────────┘
/// ```

pub mod classify;
pub mod loader;
pub mod model;
