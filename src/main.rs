use log::{error, info};
use std::process;

use analytical_view_config::{
    config::{Config, LocalStoreConfig, PostgresConfig, TableConfig},
    config_store::{ConfigStore, LocalConfigStore, PostgresConfigStore},
    retrieve_config, TrimUppercase,
};

async fn build_store(
    config: &Config,
) -> Result<Box<dyn ConfigStore + Send + Sync>, Box<dyn std::error::Error>> {
    match config.config_store.as_str() {
        "postgres" => {
            info!("Using PostgresConfigStore");
            let postgres_config = PostgresConfig::new().map_err(|e| {
                error!("Failed to initialize Postgres config: {}", e);
                e
            })?;
            let tables = TableConfig::new().map_err(|e| {
                error!("Failed to initialize table config: {}", e);
                e
            })?;
            let store = PostgresConfigStore::new(postgres_config, tables)
                .await
                .map_err(|e| {
                    error!("Failed to connect to the config db: {}", e);
                    e
                })?;
            Ok(Box::new(store))
        }
        "local" => {
            info!("Using LocalConfigStore");
            let local_config = LocalStoreConfig::new().map_err(|e| {
                error!("Failed to initialize local store config: {}", e);
                e
            })?;
            Ok(Box::new(LocalConfigStore::from_json_file(
                &local_config.json_path,
            )?))
        }
        val => Err(format!("Incorrect config store type: {}", val).into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::new().map_err(|e| {
        error!("Failed to initialize config: {}", e);
        e
    })?;

    let view_name = match std::env::args()
        .nth(1)
        .or_else(|| config.analytical_view_name.clone())
    {
        Some(name) => name,
        None => {
            error!("Usage: analytical-view-config <VIEW_NAME> (or set ANALYTICAL_VIEW_NAME)");
            process::exit(1);
        }
    };

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to create config store: {}", e);
            process::exit(1);
        }
    };

    let analytical_view = match retrieve_config(store.as_ref(), &TrimUppercase, &view_name).await {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to read configuration of {}: {}", view_name, e);
            process::exit(1);
        }
    };

    let output = if config.pretty_output {
        serde_json::to_string_pretty(&analytical_view)?
    } else {
        serde_json::to_string(&analytical_view)?
    };
    println!("{}", output);

    Ok(())
}
