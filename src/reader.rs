use crate::config_store::{ConfigStore, DataStoreError};
use crate::normalize::{normalize_with, NormalizeError, TextNormalizer};
use crate::value::Value;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigReaderError {
    #[error("Analytical view name must not be empty")]
    InvalidViewName,

    #[error("No definition found for analytical view {0}")]
    NotFound(String),

    #[error("Config store error: {0}")]
    DataSource(#[from] DataStoreError),

    #[error("Normalization error: {0}")]
    Transform(#[from] NormalizeError),
}

/// Read the definition, dimensions and measures of `view_name` and return
/// them as one normalized tree:
///
/// ```text
/// {"definition": {...}, "dimensions": [{...}, ...], "measures": [{...}, ...]}
/// ```
///
/// Every text leaf is passed through `normalizer`.
pub async fn retrieve_config<S, N>(
    store: &S,
    normalizer: &N,
    view_name: &str,
) -> Result<Value, ConfigReaderError>
where
    S: ConfigStore + ?Sized,
    N: TextNormalizer + ?Sized,
{
    retrieve_config_skipping(store, normalizer, view_name, &HashSet::new()).await
}

/// Same as [`retrieve_config`], leaving the values of `skipped_keys` as stored.
pub async fn retrieve_config_skipping<S, N>(
    store: &S,
    normalizer: &N,
    view_name: &str,
    skipped_keys: &HashSet<String>,
) -> Result<Value, ConfigReaderError>
where
    S: ConfigStore + ?Sized,
    N: TextNormalizer + ?Sized,
{
    if view_name.trim().is_empty() {
        return Err(ConfigReaderError::InvalidViewName);
    }

    let mut definitions = store.fetch_definition(view_name).await?;
    if definitions.len() > 1 {
        warn!(
            "{} definitions found for analytical view {}, using the first",
            definitions.len(),
            view_name
        );
    }
    if definitions.is_empty() {
        return Err(ConfigReaderError::NotFound(view_name.to_string()));
    }
    let definition = definitions.swap_remove(0);

    let dimensions = store.fetch_dimensions(view_name).await?;
    let measures = store.fetch_measures(view_name).await?;
    debug!(
        "Analytical view {}: {} dimension(s), {} measure(s)",
        view_name,
        dimensions.len(),
        measures.len()
    );

    let mut config = IndexMap::with_capacity(3);
    config.insert("definition".to_string(), Value::from(definition));
    config.insert(
        "dimensions".to_string(),
        Value::Array(dimensions.into_iter().map(Value::from).collect()),
    );
    config.insert(
        "measures".to_string(),
        Value::Array(measures.into_iter().map(Value::from).collect()),
    );

    Ok(normalize_with(
        &Value::Object(config),
        normalizer,
        skipped_keys,
    )?)
}
