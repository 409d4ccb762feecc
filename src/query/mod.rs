//! Local Query Execution
//!
//! Runs statements this node owns against its embedded store and turns the rows into a
//! transport-neutral table.
//!
//! ## Submodules
//! - **`store`**: The `DataStore` contract and its SQLite implementation.
//! - **`executor`**: `QueryExecutor`, which delegates statements verbatim and materializes rows.
//! - **`types`**: Dynamically typed cell values, rows and result tables.

pub mod executor;
pub mod store;
pub mod types;
