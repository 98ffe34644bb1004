//! Loading a registry from a configuration file.
//!
//! ```yaml
//! version: 1
//! services:
//!   mailer: Mailer
//!   db: ConnectionFactory::connect
//!   cache.users: CacheFactory::for_name::
//! ```

use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::resolver::Resolver;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ServicesConfig {
  #[serde(default = "default_version")]
  pub version: u32,
  // Service names and their specification strings, validated when applied.
  #[serde(default)]
  pub services: BTreeMap<String, String>,
}

fn default_version() -> u32 {
  1
}

impl ServicesConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_json_str(source: &str) -> Result<Self> {
    serde_json::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  /// Reads a configuration file. Files ending in `.json` are parsed as JSON,
  /// anything else as YAML.
  pub fn from_file(path: &Path) -> Result<Self> {
    tracing::debug!(?path, "loading services configuration");
    let reader = io::BufReader::new(File::open(path)?);
    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
      serde_json::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    } else {
      serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    }
  }
}

impl Locator {
  /// Registers every service of `config`. Nothing is applied if any entry
  /// is malformed.
  pub fn configure(&self, config: &ServicesConfig) -> Result<()> {
    if config.version != default_version() {
      return Err(Error::ConfigParse(format!(
        "unsupported configuration version {}",
        config.version
      )));
    }
    self.add(&config.services)
  }

  /// Builds a new locator from a configuration.
  pub fn from_config(config: &ServicesConfig, resolver: Arc<Resolver>) -> Result<Self> {
    let locator = Locator::with_resolver(resolver);
    locator.configure(config)?;
    Ok(locator)
  }
}
