//! Registry snapshots and their JSON persistence.

use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::resolver::Resolver;
use crate::specification::Specification;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

const SNAPSHOT_VERSION: u32 = 1;

/// A serializable, point-in-time copy of a locator's registry.
///
/// Only specifications are captured. Built instances are not guaranteed to
/// be serializable and are left out, so a locator restored from a snapshot
/// starts with an empty instance cache.
///
/// It implements `Serialize` and `Deserialize`, allowing you to use any
/// `serde`-compatible format for persistence. [`Locator::serialize`] uses
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySnapshot {
  version: u32,
  registry: BTreeMap<String, Specification>,
}

impl RegistrySnapshot {
  pub fn registry(&self) -> &BTreeMap<String, Specification> {
    &self.registry
  }

  pub fn version(&self) -> u32 {
    self.version
  }

  fn check_version(&self) -> Result<()> {
    if self.version == SNAPSHOT_VERSION {
      Ok(())
    } else {
      Err(Error::Deserialize(format!(
        "unsupported snapshot version {} (expected {})",
        self.version, SNAPSHOT_VERSION
      )))
    }
  }
}

impl Locator {
  /// Creates a snapshot of the current registry.
  pub fn to_snapshot(&self) -> RegistrySnapshot {
    RegistrySnapshot {
      version: SNAPSHOT_VERSION,
      registry: self.registry().into_iter().collect(),
    }
  }

  /// Builds a new locator whose registry is taken from a snapshot.
  pub fn from_snapshot(snapshot: RegistrySnapshot, resolver: Arc<Resolver>) -> Result<Self> {
    snapshot.check_version()?;
    let locator = Locator::with_resolver(resolver);
    locator.replace_registry(snapshot.registry);
    Ok(locator)
  }

  /// Serializes the registry to a string.
  pub fn serialize(&self) -> Result<String> {
    serde_json::to_string(&self.to_snapshot()).map_err(|e| Error::Serialize(e.to_string()))
  }

  /// Builds a new locator from a string produced by [`Locator::serialize`].
  pub fn deserialize(serialized: &str, resolver: Arc<Resolver>) -> Result<Self> {
    Locator::from_snapshot(parse_snapshot(serialized)?, resolver)
  }

  /// Replaces this locator's registry with a serialized one and empties the
  /// instance cache. On error the locator is left untouched.
  pub fn restore(&self, serialized: &str) -> Result<()> {
    let snapshot = parse_snapshot(serialized)?;
    snapshot.check_version()?;
    self.replace_registry(snapshot.registry);
    Ok(())
  }
}

fn parse_snapshot(serialized: &str) -> Result<RegistrySnapshot> {
  serde_json::from_str(serialized).map_err(|e| Error::Deserialize(e.to_string()))
}
