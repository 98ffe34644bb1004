use fibre_services::{Error, Instance, Locator, Resolver, Specification, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug, Default, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

fn locator_with_simple_service() -> Locator {
  let resolver = Arc::new(Resolver::new());
  resolver.add_type::<SimpleService>("SimpleService");
  Locator::with_resolver(resolver)
}

// --- Basic Tests ---

#[test]
fn test_set_instance_is_served_as_is() {
  // Arrange
  let locator = Locator::new();
  let instance = Instance::new(SimpleService { id: 7 });

  // Act
  locator.set("simple", instance.clone()).unwrap();

  // Assert
  assert!(locator.has("simple"));
  assert!(Instance::ptr_eq(&locator.get("simple").unwrap(), &instance));
  assert!(!locator.registry().contains_key("simple"));
  assert!(locator.instances().contains_key("simple"));
}

#[test]
fn test_set_scalar_instances() {
  let locator = Locator::new();
  locator.set("flag", Value::instance(false)).unwrap();
  locator.set_instance("limit", 100i64);
  locator.set_instance("tags", vec!["a".to_string()]);

  assert_eq!(*locator.get_as::<bool>("flag").unwrap(), false);
  assert_eq!(*locator.get_as::<i64>("limit").unwrap(), 100);
  assert_eq!(locator.get_as::<Vec<String>>("tags").unwrap().len(), 1);
  assert!(locator.registry().is_empty());
}

#[test]
fn test_set_specification_registers_without_building() {
  // Arrange
  let locator = locator_with_simple_service();

  // Act
  locator.set("simple", "SimpleService").unwrap();

  // Assert
  assert!(locator.has("simple"));
  assert_eq!(locator.registry()["simple"], "SimpleService");
  assert!(locator.instances().is_empty());
}

#[test]
fn test_get_builds_once_and_caches() {
  // Arrange
  static BUILDS: AtomicUsize = AtomicUsize::new(0);
  let locator = Locator::new();
  locator.resolver().add_type_with("Counted", || {
    BUILDS.fetch_add(1, Ordering::SeqCst);
    SimpleService { id: 1 }
  });
  locator.set("counted", "Counted").unwrap();

  // Act
  let r1 = locator.get("counted").unwrap();
  let r2 = locator.get("counted").unwrap();

  // Assert
  assert!(Instance::ptr_eq(&r1, &r2));
  assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
  // The specification stays registered next to the built instance.
  assert!(locator.registry().contains_key("counted"));
  assert!(locator.instances().contains_key("counted"));
}

#[test]
fn test_set_null_removes_from_both_maps() {
  let locator = locator_with_simple_service();
  locator.set("built", "SimpleService").unwrap();
  locator.get("built").unwrap();
  locator.set_instance("direct", 5u8);

  locator.set("built", Value::Null).unwrap();
  locator.set("direct", None::<&str>).unwrap();

  assert!(!locator.has("built"));
  assert!(!locator.has("direct"));
  assert!(locator.registry().is_empty());
  assert!(locator.instances().is_empty());
  assert!(locator.is_empty());
}

#[test]
fn test_remove_is_a_delete() {
  let locator = locator_with_simple_service();
  locator.set("simple", "SimpleService").unwrap();

  locator.remove("simple");

  assert!(!locator.has("simple"));
}

#[test]
fn test_set_replaces_previous_entry_of_other_kind() {
  let locator = locator_with_simple_service();
  locator.set_instance("simple", SimpleService { id: 9 });

  locator.set("simple", "SimpleService").unwrap();

  assert!(locator.instances().is_empty());
  assert_eq!(locator.get_as::<SimpleService>("simple").unwrap().id, 0);

  locator.set("simple", Value::instance(SimpleService { id: 3 })).unwrap();
  assert!(locator.registry().is_empty());
  assert_eq!(locator.get_as::<SimpleService>("simple").unwrap().id, 3);
}

#[test]
fn test_add_evicts_cached_instance() {
  // Arrange
  let locator = locator_with_simple_service();
  locator.resolver().add_type_with("OtherService", || SimpleService { id: 2 });
  locator.add([("simple", "SimpleService")]).unwrap();
  let first = locator.get("simple").unwrap();

  // Act
  locator.add([("simple", "OtherService")]).unwrap();

  // Assert
  assert!(!locator.instances().contains_key("simple"));
  let second = locator.get_as::<SimpleService>("simple").unwrap();
  assert_eq!(second.id, 2);
  assert!(!Instance::ptr_eq(&first, &locator.get("simple").unwrap()));
}

#[test]
fn test_add_evicts_directly_set_instance() {
  let locator = locator_with_simple_service();
  locator.set_instance("simple", SimpleService { id: 42 });

  locator.add([("simple", "SimpleService")]).unwrap();

  assert_eq!(locator.get_as::<SimpleService>("simple").unwrap().id, 0);
}

#[test]
fn test_add_rejects_non_string_and_applies_nothing() {
  // Arrange
  let locator = locator_with_simple_service();
  locator.set("existing", "SimpleService").unwrap();

  // Act
  let result = locator.add([
    ("first", Value::from("SimpleService")),
    ("bad", Value::instance(10u32)),
    ("last", Value::from("SimpleService")),
  ]);

  // Assert
  match result {
    Err(Error::InvalidSpecification { name, given }) => {
      assert_eq!(name, "bad");
      assert_eq!(given, "u32");
    }
    other => panic!("expected InvalidSpecification, got {other:?}"),
  }
  assert!(!locator.has("first"));
  assert!(!locator.has("last"));
  assert!(locator.has("existing"));
}

#[test]
fn test_add_rejects_null() {
  let locator = Locator::new();

  let err = locator.add([("gone", Value::Null)]).unwrap_err();

  assert!(matches!(err, Error::InvalidSpecification { ref given, .. } if given == "null"));
  assert_eq!(
    err.to_string(),
    "Invalid specification of service \"gone\"; expects string, \"null\" given"
  );
}

#[test]
fn test_malformed_specification_is_rejected_at_registration() {
  let locator = Locator::new();
  locator.set("kept", "Kept").unwrap();

  let set_err = locator.set("kept", "Owner::method::extra").unwrap_err();
  let add_err = locator.add([("other", "::method")]).unwrap_err();

  assert!(matches!(set_err, Error::MalformedSpecification { .. }));
  assert!(matches!(add_err, Error::MalformedSpecification { .. }));
  // A rejected `set` leaves the previous registration in place.
  assert_eq!(locator.registry()["kept"], "Kept");
  assert!(!locator.has("other"));
}

#[test]
fn test_get_unknown_service_is_not_wrapped() {
  let locator = Locator::new();

  let err = locator.get("missing").unwrap_err();

  assert!(matches!(err, Error::ServiceNotFound(ref name) if name == "missing"));
  assert_eq!(err.to_string(), "Not found; the service \"missing\" is unknown");
}

#[test]
fn test_get_unresolvable_type_is_build_failure() {
  // Arrange
  let locator = Locator::new();
  locator.set("ghost", "GhostService").unwrap();

  // Act
  let err = locator.get("ghost").unwrap_err();

  // Assert
  match &err {
    Error::BuildFailure { name, source } => {
      assert_eq!(name, "ghost");
      assert!(matches!(**source, Error::ClassNotFound(ref class) if class == "GhostService"));
    }
    other => panic!("expected BuildFailure, got {other:?}"),
  }
  assert!(std::error::Error::source(&err).is_some());
  assert!(matches!(err.build_cause(), Some(Error::ClassNotFound(_))));
  // Nothing was cached, the service is still only registered.
  assert!(locator.instances().is_empty());
  assert!(locator.has("ghost"));
}

#[test]
fn test_get_as_reports_type_mismatch() {
  let locator = Locator::new();
  locator.set_instance("number", 5u64);

  let err = locator.get_as::<String>("number").unwrap_err();

  match err {
    Error::TypeMismatch {
      name,
      expected,
      actual,
    } => {
      assert_eq!(name, "number");
      assert_eq!(expected, std::any::type_name::<String>());
      assert_eq!(actual, "u64");
    }
    other => panic!("expected TypeMismatch, got {other:?}"),
  }
}

#[test]
fn test_names_cover_both_maps() {
  let locator = locator_with_simple_service();
  locator.add([("b", "SimpleService"), ("a", "SimpleService")]).unwrap();
  locator.set_instance("c", 1u8);
  locator.get("a").unwrap();

  assert_eq!(locator.names(), vec!["a", "b", "c"]);
  assert_eq!(locator.len(), 3);
}

#[test]
fn test_registry_is_a_copy() {
  let locator = locator_with_simple_service();
  locator.set("simple", "SimpleService").unwrap();

  let mut registry = locator.registry();
  registry.insert(
    "injected".to_string(),
    Specification::Type("SimpleService".to_string()),
  );

  assert!(!locator.has("injected"));
}

#[test]
fn test_resolver_reports_its_registrations() {
  let resolver = Resolver::new();
  resolver.add_type::<SimpleService>("SimpleService");
  resolver.add_factory("Services", "simple", || Ok::<_, std::io::Error>(SimpleService { id: 7 }));

  assert!(resolver.has_type("SimpleService"));
  assert!(!resolver.has_type("Services"));
  assert!(resolver.has_factory("Services", "simple"));
  assert!(!resolver.has_factory("Services", "other"));
  assert!(!resolver.has_factory("SimpleService", "simple"));
}
