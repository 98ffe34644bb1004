//! The process-wide locator and access functions.
//!
//! Prefer passing a [`Locator`] explicitly; this module is a convenience for
//! code that cannot thread one through.

use crate::locator::Locator;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

// Created empty on first access.
static CURRENT: Lazy<RwLock<Arc<Locator>>> = Lazy::new(|| RwLock::new(Arc::new(Locator::new())));

/// Returns the current process-wide locator.
///
/// # Examples
///
/// ```
/// use fibre_services::current;
///
/// current().set_instance("greeting", String::from("Hello from global!"));
/// assert!(current().has("greeting"));
/// ```
pub fn current() -> Arc<Locator> {
  Arc::clone(&CURRENT.read())
}

/// Replaces the process-wide locator, returning the previous one.
pub fn set_current(locator: Arc<Locator>) -> Arc<Locator> {
  std::mem::replace(&mut *CURRENT.write(), locator)
}

/// Standard access to the process-wide locator for types that use services.
///
/// ```
/// use fibre_services::{HasServices, Locator};
/// use std::sync::Arc;
///
/// struct Controller;
/// impl HasServices for Controller {}
///
/// let controller = Controller;
/// let locator = Arc::new(Locator::new());
/// controller.set_services(Arc::clone(&locator));
/// assert!(Arc::ptr_eq(&controller.services(), &locator));
/// ```
pub trait HasServices {
  fn services(&self) -> Arc<Locator> {
    current()
  }

  fn set_services(&self, services: Arc<Locator>) {
    set_current(services);
  }
}
