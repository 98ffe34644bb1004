//! Type-erased service instances and the values accepted by `set`/`add`.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A built service.
///
/// Any `Send + Sync` value can be a service, including scalars and trait
/// objects. Cloning an `Instance` is cheap and shares the same underlying
/// value, so `Instance::ptr_eq` tells whether two lookups returned the same
/// service.
#[derive(Clone)]
pub struct Instance {
  value: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Instance {
  /// Wraps a value.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an already shared value without reallocating it.
  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      value,
      type_name: type_name::<T>(),
    }
  }

  /// Wraps a trait object. Retrieve it with [`Instance::downcast_trait`].
  pub fn from_trait<I: ?Sized + Any + Send + Sync>(value: Arc<I>) -> Self {
    Self {
      value: Arc::new(value),
      type_name: type_name::<I>(),
    }
  }

  /// Returns the shared value if it is a `T`.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    Arc::clone(&self.value).downcast::<T>().ok()
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.value.downcast_ref::<T>()
  }

  /// Returns the trait object stored with [`Instance::from_trait`].
  pub fn downcast_trait<I: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<I>> {
    self.value.downcast_ref::<Arc<I>>().cloned()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.value.is::<T>()
  }

  /// The name of the stored type, as reported by `std::any::type_name`.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both handles point at the same service.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    Arc::ptr_eq(&a.value, &b.value)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Instance({})", self.type_name)
  }
}

/// A value handed to [`Locator::set`](crate::Locator::set) or
/// [`Locator::add`](crate::Locator::add).
///
/// Strings are build specifications, `Null` deletes a service, and anything
/// else is a ready-made instance.
#[derive(Debug, Clone)]
pub enum Value {
  Null,
  Specification(String),
  Instance(Instance),
}

impl Value {
  /// Wraps an arbitrary value as a pre-built instance.
  pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
    Value::Instance(Instance::new(value))
  }

  /// Describes the kind of value for error messages.
  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Specification(_) => "string",
      Value::Instance(instance) => instance.type_name(),
    }
  }
}

impl From<&str> for Value {
  fn from(spec: &str) -> Self {
    Value::Specification(spec.to_owned())
  }
}

impl From<String> for Value {
  fn from(spec: String) -> Self {
    Value::Specification(spec)
  }
}

impl From<&String> for Value {
  fn from(spec: &String) -> Self {
    Value::Specification(spec.clone())
  }
}

impl From<Instance> for Value {
  fn from(instance: Instance) -> Self {
    Value::Instance(instance)
  }
}

impl<V: Into<Value>> From<Option<V>> for Value {
  fn from(value: Option<V>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}
