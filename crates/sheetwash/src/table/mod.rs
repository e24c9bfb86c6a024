//! In-memory table model with explicit per-column type tags.

mod column;
mod frame;
mod types;

pub use column::{Column, ColumnProfile};
pub use frame::Table;
pub use types::{Cell, ColumnType};
