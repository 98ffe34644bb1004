//! Public macros for ergonomic, typed service lookup.

/// Resolves a service from the current global locator.
///
/// It panics if the service is missing, fails to build, or has another type.
///
/// # Panics
///
/// This macro will panic if the service cannot be resolved. For a non-panicking
/// version, use [`maybe_resolve!`] or `current().get_as(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_services::{current, resolve};
///
/// current().set_instance("greeting", String::from("hello"));
///
/// let greeting = resolve!(String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
///
/// ```
/// use fibre_services::{current, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// current()
///   .resolver()
///   .add_type_trait::<dyn Greeter>("EnglishGreeter", || Arc::new(EnglishGreeter));
/// current().set("greeter", "EnglishGreeter").unwrap();
///
/// let greeter = resolve!(trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[cfg(feature = "global")]
#[macro_export]
macro_rules! resolve {
  // resolve!(trait MyTrait, "name")
  (trait $trait_ident:ident, $name:expr) => {
    $crate::resolve_from!($crate::current(), trait $trait_ident, $name)
  };

  // resolve!(MyService, "name")
  ($type:ty, $name:expr) => {
    $crate::resolve_from!($crate::current(), $type, $name)
  };
}

/// Like [`resolve!`], but returns `None` instead of panicking.
#[cfg(feature = "global")]
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident, $name:expr) => {
    $crate::maybe_resolve_from!($crate::current(), trait $trait_ident, $name)
  };

  ($type:ty, $name:expr) => {
    $crate::maybe_resolve_from!($crate::current(), $type, $name)
  };
}

/// Resolves a service from an explicit locator, panicking on failure.
///
/// ```
/// use fibre_services::{resolve_from, Locator};
///
/// let locator = Locator::new();
/// locator.set_instance("answer", 42u32);
/// assert_eq!(*resolve_from!(locator, u32, "answer"), 42);
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($locator:expr, trait $trait_ident:ident, $name:expr) => {
    $locator
      .get_trait::<dyn $trait_ident>($name)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service '{}' ({}): {}",
          $name,
          std::any::type_name::<dyn $trait_ident>(),
          err
        )
      })
  };

  ($locator:expr, $type:ty, $name:expr) => {
    $locator.get_as::<$type>($name).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service '{}' ({}): {}",
        $name,
        std::any::type_name::<$type>(),
        err
      )
    })
  };
}

/// Like [`resolve_from!`], but returns `None` instead of panicking.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($locator:expr, trait $trait_ident:ident, $name:expr) => {
    $locator.get_trait::<dyn $trait_ident>($name).ok()
  };

  ($locator:expr, $type:ty, $name:expr) => {
    $locator.get_as::<$type>($name).ok()
  };
}
