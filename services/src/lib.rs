//! # Fibre Services
//!
//! A thread-safe service locator for Rust.
//!
//! A [`Locator`] maps service names either to ready-made values or to build
//! specifications. Specified services are built on first access, cached, and
//! served from the cache afterwards. Construction is deduplicated: under
//! concurrent access a service is built at most once.
//!
//! ## Core Concepts
//!
//! - **Specification**: a string naming how to build a service:
//!   `"Type"` (zero-argument construction), `"Owner::method"` (factory method)
//!   or `"Owner::method::"` (abstract factory receiving the service name).
//!   Specifications are parsed once, when they are registered.
//! - **Resolver**: the table that gives those names meaning. Types and
//!   factory methods are registered with closures at startup.
//! - **Locator**: the registry of specifications plus the cache of built
//!   instances. Registries can be merged, loaded from configuration and
//!   serialized.
//! - **Global Locator**: an optional process-wide locator, accessible via
//!   [`current()`] (feature `global`, enabled by default).
//!
//! ## Quick Start
//!
//! ```
//! use fibre_services::{Locator, Resolver};
//! use std::sync::Arc;
//!
//! struct Mailer {
//!   transport: String,
//! }
//!
//! let resolver = Arc::new(Resolver::new());
//! resolver.add_factory("MailerFactory", "smtp", || {
//!   Ok::<_, std::io::Error>(Mailer { transport: "smtp".to_string() })
//! });
//! resolver.add_abstract_factory("Queues", "named", |name: &str| {
//!   Ok::<_, std::io::Error>(format!("queue for {name}"))
//! });
//!
//! let services = Locator::with_resolver(resolver);
//! services
//!   .add([
//!     ("mailer", "MailerFactory::smtp"),
//!     ("queue.emails", "Queues::named::"),
//!   ])
//!   .unwrap();
//!
//! let mailer = services.get_as::<Mailer>("mailer").unwrap();
//! assert_eq!(mailer.transport, "smtp");
//!
//! let queue = services.get_as::<String>("queue.emails").unwrap();
//! assert_eq!(*queue, "queue for queue.emails");
//! ```

mod config;
mod core;
mod error;
#[cfg(feature = "global")]
mod global;
mod instance;
mod locator;
mod macros;
mod resolver;
mod snapshot;
mod specification;

pub use config::ServicesConfig;
pub use error::{BoxError, Error, Result};
#[cfg(feature = "global")]
pub use global::{current, set_current, HasServices};
pub use instance::{Instance, Value};
pub use locator::Locator;
pub use resolver::Resolver;
pub use snapshot::RegistrySnapshot;
pub use specification::Specification;
