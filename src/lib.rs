pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

pub use data::error::DashboardError;
pub use data::model::{CellValue, ColumnKind, Dataset};
pub use data::numeric::Numeric;
