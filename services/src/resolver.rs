//! The registration-based resolver behind every specification.

use crate::error::{BoxError, Error, Result};
use crate::instance::Instance;
use crate::specification::Specification;
use dashmap::DashMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type Constructor = Arc<dyn Fn() -> Instance + Send + Sync>;

#[derive(Clone)]
enum Method {
  /// `Owner::method()`
  Static(Arc<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>),
  /// `Owner::method(service_name)`
  Named(Arc<dyn Fn(&str) -> Result<Instance, BoxError> + Send + Sync>),
}

/// Maps the names used in specifications to the code that builds them.
///
/// Types are registered with a zero-argument constructor, factory methods
/// under an owner and a method name. A resolver is usually filled once at
/// startup and shared between locators through an `Arc`.
///
/// Registering the same name twice replaces the previous registration.
#[derive(Default)]
pub struct Resolver {
  types: DashMap<String, Constructor>,
  factories: DashMap<String, HashMap<String, Method>>,
}

impl Resolver {
  /// Creates a new, empty `Resolver`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn add_type_internal(&self, name: &str, constructor: Constructor) {
    tracing::debug!(type_name = name, "registering type");
    self.types.insert(name.to_owned(), constructor);
  }

  fn add_method_internal(&self, owner: &str, method: &str, callable: Method) {
    tracing::debug!(owner, method, "registering factory method");
    self
      .factories
      .entry(owner.to_owned())
      .or_default()
      .insert(method.to_owned(), callable);
  }

  fn lookup_method(&self, owner: &str, method: &str) -> Result<Method> {
    let not_callable = || Error::FactoryNotCallable {
      owner: owner.to_owned(),
      method: method.to_owned(),
    };
    let Some(methods) = self.factories.get(owner) else {
      // The owner exists as a type, it just has no such factory method.
      if self.types.contains_key(owner) {
        return Err(not_callable());
      }
      return Err(Error::FactoryNotFound(owner.to_owned()));
    };
    methods
      .get(method)
      .cloned()
      .ok_or_else(not_callable)
  }

  // --- PUBLIC API ---

  // --- Type Registration ---
  pub fn add_type<T: Default + Any + Send + Sync>(&self, name: &str) {
    self.add_type_internal(name, Arc::new(|| Instance::new(T::default())));
  }
  pub fn add_type_with<T: Any + Send + Sync>(
    &self,
    name: &str,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.add_type_internal(name, Arc::new(move || Instance::new(constructor())));
  }
  pub fn add_type_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    constructor: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.add_type_internal(name, Arc::new(move || Instance::from_trait(constructor())));
  }

  // --- Factory Registration ---
  pub fn add_factory<T, E>(
    &self,
    owner: &str,
    method: &str,
    factory: impl Fn() -> Result<T, E> + Send + Sync + 'static,
  ) where
    T: Any + Send + Sync,
    E: Into<BoxError>,
  {
    let callable = move || factory().map(Instance::new).map_err(Into::into);
    self.add_method_internal(owner, method, Method::Static(Arc::new(callable)));
  }
  pub fn add_abstract_factory<T, E>(
    &self,
    owner: &str,
    method: &str,
    factory: impl Fn(&str) -> Result<T, E> + Send + Sync + 'static,
  ) where
    T: Any + Send + Sync,
    E: Into<BoxError>,
  {
    let callable = move |name: &str| factory(name).map(Instance::new).map_err(Into::into);
    self.add_method_internal(owner, method, Method::Named(Arc::new(callable)));
  }

  // --- Trait Factory Registration ---
  pub fn add_factory_trait<I, E>(
    &self,
    owner: &str,
    method: &str,
    factory: impl Fn() -> Result<Arc<I>, E> + Send + Sync + 'static,
  ) where
    I: ?Sized + Any + Send + Sync,
    E: Into<BoxError>,
  {
    let callable = move || factory().map(Instance::from_trait).map_err(Into::into);
    self.add_method_internal(owner, method, Method::Static(Arc::new(callable)));
  }
  pub fn add_abstract_factory_trait<I, E>(
    &self,
    owner: &str,
    method: &str,
    factory: impl Fn(&str) -> Result<Arc<I>, E> + Send + Sync + 'static,
  ) where
    I: ?Sized + Any + Send + Sync,
    E: Into<BoxError>,
  {
    let callable = move |name: &str| factory(name).map(Instance::from_trait).map_err(Into::into);
    self.add_method_internal(owner, method, Method::Named(Arc::new(callable)));
  }

  // --- Introspection ---
  pub fn has_type(&self, name: &str) -> bool {
    self.types.contains_key(name)
  }
  pub fn has_factory(&self, owner: &str, method: &str) -> bool {
    self
      .factories
      .get(owner)
      .is_some_and(|methods| methods.contains_key(method))
  }

  // --- Building ---
  /// Builds a new instance from a specification.
  ///
  /// `service_name` is only used by abstract factories. Nothing is cached.
  /// No map guard is held while the constructor or factory runs, so it may
  /// use the resolver (or a locator sharing it) itself.
  pub fn build(&self, specification: &Specification, service_name: &str) -> Result<Instance> {
    tracing::debug!(%specification, service = service_name, "building service");

    let (owner, method, pass_name) = match specification {
      Specification::Type(name) => {
        let constructor = self
          .types
          .get(name)
          .map(|entry| Arc::clone(entry.value()))
          .ok_or_else(|| Error::ClassNotFound(name.clone()))?;
        return Ok(constructor());
      }
      Specification::Factory { owner, method } => (owner, method, false),
      Specification::AbstractFactory { owner, method } => (owner, method, true),
    };

    let built = match (self.lookup_method(owner, method)?, pass_name) {
      (Method::Static(factory), _) => factory(),
      (Method::Named(factory), true) => factory(service_name),
      // Needs the service name, which a plain factory specification does not pass.
      (Method::Named(_), false) => {
        return Err(Error::FactoryNotCallable {
          owner: owner.clone(),
          method: method.clone(),
        })
      }
    };

    built.map_err(|source| Error::FactoryFailed {
      specification: specification.to_string(),
      source,
    })
  }
}
