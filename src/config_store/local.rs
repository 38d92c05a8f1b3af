use crate::config_store::{ConfigStore, DataStoreError};
use crate::value::Record;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config tables held in memory, for local runs and tests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalConfigStore {
    #[serde(default)]
    definitions: Vec<Record>,
    #[serde(default)]
    dimensions: Vec<Record>,
    #[serde(default)]
    measures: Vec<Record>,
}

impl LocalConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition(mut self, record: Record) -> Self {
        self.definitions.push(record);
        self
    }

    pub fn with_dimension(mut self, record: Record) -> Self {
        self.dimensions.push(record);
        self
    }

    pub fn with_measure(mut self, record: Record) -> Self {
        self.measures.push(record);
        self
    }

    /// Load `{"definitions": [...], "dimensions": [...], "measures": [...]}`
    pub fn from_json_str(json: &str) -> Result<Self, DataStoreError> {
        serde_json::from_str(json).map_err(|e| DataStoreError::InvalidJson(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataStoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| DataStoreError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let store = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} definition(s), {} dimension(s), {} measure(s) from {}",
            store.definitions.len(),
            store.dimensions.len(),
            store.measures.len(),
            path.display()
        );
        Ok(store)
    }
}

fn rows_for(table: &[Record], view_name: &str) -> Vec<Record> {
    table
        .iter()
        .filter(|record| record.get("analytical_view_name") == Some(view_name))
        .cloned()
        .collect()
}

#[async_trait]
impl ConfigStore for LocalConfigStore {
    async fn fetch_definition(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        Ok(rows_for(&self.definitions, view_name))
    }

    async fn fetch_dimensions(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        Ok(rows_for(&self.dimensions, view_name))
    }

    async fn fetch_measures(&self, view_name: &str) -> Result<Vec<Record>, DataStoreError> {
        Ok(rows_for(&self.measures, view_name))
    }
}
