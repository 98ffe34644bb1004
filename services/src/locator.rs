//! The `Locator` struct and its associated methods.

use crate::core::{empty_slot, filled_slot, ResolutionGuard, Slot};
use crate::error::{Error, Result};
use crate::instance::{Instance, Value};
use crate::resolver::Resolver;
use crate::specification::Specification;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// The service locator.
///
/// Holds two maps: the registry (service name to [`Specification`]) and the
/// instance cache (service name to built [`Instance`]). Services registered
/// with a specification are built by the [`Resolver`] on first [`get`] and
/// cached; services set to a ready-made value are served as is.
///
/// All methods take `&self`, so a `Locator` can be shared between threads.
/// Construction is deduplicated: concurrent `get` calls for the same name
/// build the service at most once.
///
/// [`get`]: Locator::get
pub struct Locator {
  resolver: Arc<Resolver>,
  registry: DashMap<String, Specification>,
  instances: DashMap<String, Slot>,
  // Serializes mutations of the registry/cache pair.
  writer: Mutex<()>,
}

impl Default for Locator {
  fn default() -> Self {
    Self::with_resolver(Arc::new(Resolver::new()))
  }
}

impl Locator {
  /// Creates a new, empty `Locator` with its own empty resolver.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a new, empty `Locator` building through `resolver`.
  pub fn with_resolver(resolver: Arc<Resolver>) -> Self {
    Self {
      resolver,
      registry: DashMap::new(),
      instances: DashMap::new(),
      writer: Mutex::new(()),
    }
  }

  pub fn resolver(&self) -> &Arc<Resolver> {
    &self.resolver
  }

  // --- PRIVATE HELPERS ---

  fn cached(&self, name: &str) -> Option<Instance> {
    self
      .instances
      .get(name)
      .and_then(|slot| slot.value().get().cloned())
  }

  fn evict(&self, name: &str) {
    self.registry.remove(name);
    self.instances.remove(name);
  }

  fn identity(&self) -> usize {
    self as *const Self as usize
  }

  pub(crate) fn replace_registry(&self, registry: impl IntoIterator<Item = (String, Specification)>) {
    let _writer = self.writer.lock();
    self.instances.clear();
    self.registry.clear();
    for (name, specification) in registry {
      self.registry.insert(name, specification);
    }
  }

  // --- Registration ---

  /// Registers a batch of specifications.
  ///
  /// Every value must be a specification string. The whole batch is checked
  /// first: if any entry is not a string (`InvalidSpecification`) or does not
  /// parse (`MalformedSpecification`), nothing is applied. Otherwise each
  /// entry replaces the registry entry of its name and evicts the instance
  /// built from the previous one.
  pub fn add<I, K, V>(&self, entries: I) -> Result<()>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    let parsed = entries
      .into_iter()
      .map(|(name, value)| -> Result<(String, Specification)> {
        let name: String = name.into();
        match value.into() {
          Value::Specification(spec) => Ok((name, Specification::parse(&spec)?)),
          other => Err(Error::InvalidSpecification {
            name,
            given: other.kind().to_owned(),
          }),
        }
      })
      .collect::<Result<Vec<_>>>()?;

    let _writer = self.writer.lock();
    for (name, specification) in parsed {
      tracing::debug!(service = %name, %specification, "adding service");
      self.instances.remove(&name);
      self.registry.insert(name, specification);
    }
    Ok(())
  }

  /// Sets a service, replacing whatever was registered or built under `name`.
  ///
  /// - `Value::Null` removes the service.
  /// - `Value::Specification` registers it to be built on first `get`.
  /// - `Value::Instance` is stored in the instance cache as is.
  pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
    match value.into() {
      Value::Null => {
        let _writer = self.writer.lock();
        tracing::debug!(service = name, "removing service");
        self.evict(name);
      }
      Value::Specification(spec) => {
        let specification = Specification::parse(&spec)?;
        let _writer = self.writer.lock();
        tracing::debug!(service = name, %specification, "setting service specification");
        self.evict(name);
        self.registry.insert(name.to_owned(), specification);
      }
      Value::Instance(instance) => {
        let _writer = self.writer.lock();
        tracing::debug!(service = name, type_name = instance.type_name(), "setting service instance");
        self.evict(name);
        self.instances.insert(name.to_owned(), filled_slot(instance));
      }
    }
    Ok(())
  }

  /// Stores a ready-made value under `name`.
  pub fn set_instance<T: Any + Send + Sync>(&self, name: &str, value: T) {
    let _writer = self.writer.lock();
    self.evict(name);
    self
      .instances
      .insert(name.to_owned(), filled_slot(Instance::new(value)));
  }

  /// Removes a service from both the registry and the instance cache.
  pub fn remove(&self, name: &str) {
    let _writer = self.writer.lock();
    tracing::debug!(service = name, "removing service");
    self.evict(name);
  }

  // --- Introspection ---

  /// Returns `true` if `name` is built or registered.
  pub fn has(&self, name: &str) -> bool {
    self.cached(name).is_some() || self.registry.contains_key(name)
  }

  /// A copy of the registry.
  pub fn registry(&self) -> HashMap<String, Specification> {
    self
      .registry
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect()
  }

  /// A copy of the instance cache. Services still being built are left out.
  pub fn instances(&self) -> HashMap<String, Instance> {
    self
      .instances
      .iter()
      .filter_map(|entry| entry.value().get().map(|i| (entry.key().clone(), i.clone())))
      .collect()
  }

  /// The names of all built or registered services, sorted.
  pub fn names(&self) -> Vec<String> {
    let mut names: BTreeSet<String> = self.registry.iter().map(|e| e.key().clone()).collect();
    names.extend(self.instances().into_keys());
    names.into_iter().collect()
  }

  pub fn len(&self) -> usize {
    self.names().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  // --- Resolution ---

  /// Gets a service, building and caching it on first access.
  ///
  /// Fails with `ServiceNotFound` if `name` is neither built nor registered,
  /// and with `CircularDependency` if the service is requested while this
  /// thread is already building it. Any error raised while building is
  /// returned as `BuildFailure`, with the original error as its source, and
  /// nothing is cached so a later `get` builds again.
  pub fn get(&self, name: &str) -> Result<Instance> {
    if let Some(instance) = self.cached(name) {
      tracing::trace!(service = name, "instance cache hit");
      return Ok(instance);
    }

    let _guard = ResolutionGuard::enter(self.identity(), name)?;

    let (specification, slot) = {
      let _writer = self.writer.lock();
      // A `set` may have moved `name` into the cache since the unlocked check.
      if let Some(instance) = self.cached(name) {
        tracing::trace!(service = name, "instance cache hit");
        return Ok(instance);
      }
      let specification = self
        .registry
        .get(name)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| Error::ServiceNotFound(name.to_owned()))?;
      let slot = Arc::clone(
        self
          .instances
          .entry(name.to_owned())
          .or_insert_with(empty_slot)
          .value(),
      );
      (specification, slot)
    };

    match slot.get_or_try_init(|| self.resolver.build(&specification, name)) {
      Ok(instance) => Ok(instance.clone()),
      Err(source) => {
        tracing::warn!(service = name, %specification, error = %source, "failed to build service");
        self.instances.remove_if(name, |_, current| {
          Arc::ptr_eq(current, &slot) && current.get().is_none()
        });
        Err(Error::BuildFailure {
          name: name.to_owned(),
          source: Box::new(source),
        })
      }
    }
  }

  /// Gets a service and downcasts it to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let instance = self.get(name)?;
    instance.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
      name: name.to_owned(),
      expected: type_name::<T>(),
      actual: instance.type_name(),
    })
  }

  /// Gets a service stored as the trait object `I`.
  pub fn get_trait<I: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<I>> {
    let instance = self.get(name)?;
    instance.downcast_trait::<I>().ok_or_else(|| Error::TypeMismatch {
      name: name.to_owned(),
      expected: type_name::<I>(),
      actual: instance.type_name(),
    })
  }

  /// Builds a new instance from a specification string without caching it.
  ///
  /// `service_name` is handed to abstract factories (`Owner::method::`).
  /// Errors are returned as raised by the resolver, not wrapped.
  pub fn build(&self, specification: &str, service_name: &str) -> Result<Instance> {
    let specification = Specification::parse(specification)?;
    self.resolver.build(&specification, service_name)
  }

  // --- Collections ---

  /// Overlays the registry and built instances of `source` onto this
  /// locator. Entries of `source` win on collision; `source` is left as is.
  ///
  /// A specification taken from `source` that differs from the one this
  /// locator had evicts the instance built from the old one, unless `source`
  /// brings its own instance for that name.
  pub fn merge(&self, source: &Locator) {
    if std::ptr::eq(self, source) {
      return;
    }

    let registry = source.registry();
    let instances = source.instances();

    let _writer = self.writer.lock();
    tracing::debug!(
      registry = registry.len(),
      instances = instances.len(),
      "merging services"
    );
    for (name, specification) in registry {
      let previous = self.registry.insert(name.clone(), specification.clone());
      if previous.is_some_and(|previous| previous != specification) {
        self.instances.remove(&name);
      }
    }
    for (name, instance) in instances {
      self.instances.insert(name, filled_slot(instance));
    }
  }
}
