//! Core, non-public data structures for the locator.

use crate::error::{Error, Result};
use crate::instance::Instance;
use once_cell::sync::OnceCell;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

thread_local! {
  // The services currently being built on this thread, keyed by locator
  // address and service name, so a factory resolving its own service is
  // caught instead of deadlocking on the slot it is filling.
  static RESOLVING_STACK: RefCell<HashSet<(usize, String)>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking a service as "being built" on the current thread.
///
/// Creating a guard for a service that is already being built returns
/// `CircularDependency`. The mark is removed when the guard is dropped.
pub(crate) struct ResolutionGuard {
  key: (usize, String),
}

impl ResolutionGuard {
  pub(crate) fn enter(owner: usize, name: &str) -> Result<Self> {
    let key = (owner, name.to_owned());
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the key was already present.
      if stack.borrow_mut().insert(key.clone()) {
        Ok(Self { key })
      } else {
        Err(Error::CircularDependency(name.to_owned()))
      }
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// A cache slot. Empty while the service is being built (or after a failed
/// build), filled exactly once on success.
pub(crate) type Slot = Arc<OnceCell<Instance>>;

pub(crate) fn empty_slot() -> Slot {
  Arc::new(OnceCell::new())
}

pub(crate) fn filled_slot(instance: Instance) -> Slot {
  Arc::new(OnceCell::with_value(instance))
}
