use crate::config::{PostgresConfig, TableConfig};
use crate::config_store::{
    ConfigStore, DataStoreError, DEFINITION_COLUMNS, DIMENSION_COLUMNS, MEASURE_COLUMNS,
};
use crate::value::Record;
use async_trait::async_trait;
use log::{debug, error};
use tokio_postgres::{Client, NoTls, Row};

pub struct PostgresConfigStore {
    client: Client,
    tables: TableConfig,
}

impl PostgresConfigStore {
    pub async fn new(config: PostgresConfig, tables: TableConfig) -> Result<Self, DataStoreError> {
        let (client, connection) = tokio_postgres::connect(&config.connection_string(), NoTls)
            .await
            .map_err(|e| DataStoreError::ConnectionError(e.to_string()))?;

        // Spawn a task to manage the connection
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("Connection error: {}", e);
            }
        });

        Ok(PostgresConfigStore { client, tables })
    }

    async fn select(
        &self,
        table: &str,
        columns: &[&str],
        order_by: Option<&str>,
        view_name: &str,
    ) -> Result<Vec<Record>, DataStoreError> {
        let sql = select_sql(table, columns, order_by);
        debug!("Executing: {} [$1 = {:?}]", sql, view_name);

        let rows = self
            .client
            .query(sql.as_str(), &[&view_name])
            .await
            .map_err(|e| DataStoreError::QueryError(e.to_string()))?;
        debug!("{} returned {} row(s)", table, rows.len());

        rows.iter().map(|row| row_to_record(row, columns)).collect()
    }
}

#[async_trait]
impl ConfigStore for PostgresConfigStore {
    async fn fetch_definition(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        self.select(&self.tables.definition_table, &DEFINITION_COLUMNS, None, view_name)
            .await
    }

    async fn fetch_dimensions(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        self.select(
            &self.tables.dimension_table,
            &DIMENSION_COLUMNS,
            Some("dimension"),
            view_name,
        )
        .await
    }

    async fn fetch_measures(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        self.select(
            &self.tables.measure_table,
            &MEASURE_COLUMNS,
            Some("measure"),
            view_name,
        )
        .await
    }
}

fn row_to_record(row: &Row, columns: &[&str]) -> Result<Record, DataStoreError> {
    let mut record = Record::new();
    for (idx, column) in columns.iter().enumerate() {
        let value: Option<String> = row
            .try_get(idx)
            .map_err(|e| DataStoreError::ColumnNotFound(format!("{}: {}", column, e)))?;
        record.insert(*column, value);
    }
    Ok(record)
}

/// Quote a possibly schema-qualified table name, e.g. `cfg.views` -> `"cfg"."views"`
fn quote_table_name(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn select_sql(table: &str, columns: &[&str], order_by: Option<&str>) -> String {
    let mut sql = format!(
        "SELECT {} FROM {} WHERE analytical_view_name = $1",
        columns.join(", "),
        quote_table_name(table)
    );
    if let Some(column) = order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(column);
    }
    sql
}
