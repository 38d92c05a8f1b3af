use envconfig::Envconfig;
use log::debug;

#[derive(Envconfig)]
pub struct Config {
    /// `postgres` or `local`
    #[envconfig(from = "CONFIG_STORE", default = "postgres")]
    pub config_store: String,

    #[envconfig(from = "ANALYTICAL_VIEW_NAME")]
    pub analytical_view_name: Option<String>,

    #[envconfig(from = "PRETTY_OUTPUT", default = "true")]
    pub pretty_output: bool,
}

impl Config {
    pub fn new() -> Result<Self, envconfig::Error> {
        let config = Self::init_from_env()?;
        debug!(
            "Config loaded: config_store={}, analytical_view_name={:?}, pretty_output={}",
            config.config_store, config.analytical_view_name, config.pretty_output
        );
        Ok(config)
    }
}

#[derive(Envconfig, Clone)]
pub struct PostgresConfig {
    #[envconfig(from = "POSTGRES_USER", default = "postgres")]
    pub user: String,
    #[envconfig(from = "POSTGRES_PASSWORD", default = "postgres")]
    pub password: String,
    #[envconfig(from = "POSTGRES_HOST", default = "localhost:5432")]
    pub host: String,
    #[envconfig(from = "POSTGRES_DB", default = "config_db")]
    pub dbname: String,
}

impl PostgresConfig {
    pub fn new() -> Result<Self, envconfig::Error> {
        let config = Self::init_from_env()?;
        debug!(
            "PostgresConfig loaded: user={}, host={}, dbname={}",
            config.user, config.host, config.dbname
        );
        Ok(config)
    }

    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.user, self.password, self.host, self.dbname
        )
    }
}

/// Names of the config tables, optionally schema-qualified.
#[derive(Envconfig, Clone, Debug)]
pub struct TableConfig {
    #[envconfig(from = "DEFINITION_TABLE", default = "analytical_view_definition")]
    pub definition_table: String,
    #[envconfig(from = "DIMENSION_TABLE", default = "analytical_view_dimension")]
    pub dimension_table: String,
    #[envconfig(from = "MEASURE_TABLE", default = "analytical_view_measure")]
    pub measure_table: String,
}

impl TableConfig {
    pub fn new() -> Result<Self, envconfig::Error> {
        let config = Self::init_from_env()?;
        debug!(
            "TableConfig loaded: definition_table={}, dimension_table={}, measure_table={}",
            config.definition_table, config.dimension_table, config.measure_table
        );
        Ok(config)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            definition_table: "analytical_view_definition".to_string(),
            dimension_table: "analytical_view_dimension".to_string(),
            measure_table: "analytical_view_measure".to_string(),
        }
    }
}

#[derive(Envconfig, Clone)]
pub struct LocalStoreConfig {
    #[envconfig(from = "JSON_PATH", default = "analytical_views.json")]
    pub json_path: String,
}

impl LocalStoreConfig {
    pub fn new() -> Result<Self, envconfig::Error> {
        let config = Self::init_from_env()?;
        debug!("LocalStoreConfig loaded: json_path={}", config.json_path);
        Ok(config)
    }
}
