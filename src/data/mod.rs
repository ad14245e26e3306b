/// Data layer: core types, loading, and shaping for display.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, columns from the first record
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  shaper   │  classify columns, preview, chart rows, pie totals
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod shaper;
