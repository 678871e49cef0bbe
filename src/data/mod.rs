/// Data layer: core types, loading, and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → Dataset (kinds inferred)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  columns, typed rows, key column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  profile / rank_top / compare_two / project_for_map
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  profile → Indicator,Value CSV bytes
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod numeric;
pub mod query;
