//! Config file loading and command-line overrides.

use clap::Parser;
use collection_mvc::{AppConfig, Filter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Command-line flags. Flags win over the config file, which wins over
/// built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "collection-demo", version, about)]
pub struct Cli {
    /// TOML file with `capacity`, `filter`, `names` and `remove_index`.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of slots in the collection.
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Name the final filter keeps visible.
    #[arg(long)]
    pub filter: Option<String>,

    /// Log filter directive, e.g. `debug` or `slot_pool=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Resolve the final configuration.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load(path)?,
            None => AppConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(filter) = &self.filter {
            config.filter = Filter::by_name(filter.as_str());
        }
        Ok(config)
    }
}

/// Parse a TOML config file.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}
