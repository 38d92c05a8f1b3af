pub mod config;
pub mod config_store;
pub mod normalize;
pub mod reader;
pub mod value;

pub use normalize::{apply_func, TextNormalizer, TrimUppercase};
pub use reader::{retrieve_config, retrieve_config_skipping, ConfigReaderError};
pub use value::{Record, Value};
