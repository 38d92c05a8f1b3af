pub mod local;
pub mod postgres;

use crate::value::Record;
use async_trait::async_trait;
use thiserror::Error;

pub use local::LocalConfigStore;
pub use postgres::PostgresConfigStore;

pub const DEFINITION_COLUMNS: [&str; 4] = [
    "analytical_view_name",
    "source_table_name",
    "processing_mode",
    "result_table_name",
];
pub const DIMENSION_COLUMNS: [&str; 3] =
    ["analytical_view_name", "dimension", "column_in_source_table"];
pub const MEASURE_COLUMNS: [&str; 3] = ["analytical_view_name", "measure", "column_in_source_table"];

/// ConfigStore reads the configuration tables of analytical views
///
/// Each fetch returns the rows belonging to `view_name`, in the order the
/// store yields them. Failures are returned as-is; there are no retries.
#[async_trait]
pub trait ConfigStore {
    /// Rows of the definition table. Normally exactly one.
    async fn fetch_definition(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError>;
    async fn fetch_dimensions(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError>;
    async fn fetch_measures(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError>;
}

#[derive(Error, Debug)]
pub enum DataStoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
}
