//! Configuration file loading for smart-shuffle
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SHUFFLE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./shuffle.toml` or `./.shuffle.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/smart-shuffle/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCatalogConfig, FileConfig, FileEngineConfig, FileInteractionsConfig, FileOutputConfig,
    FileOutputFormat, FileViewerConfig,
};
pub use loader::ConfigLoader;
