pub mod plan;

pub use plan::{plan_table, TableSpec, DATA_TYPE};
