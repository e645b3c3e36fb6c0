/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file, coerce cells → LoanTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ LoanTable │  Vec<LoanRecord>, distinct branches / borrowers / statuses
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterCriteria → matching records, table order
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  totals, status shares, yearly trend, pivot, preview
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
