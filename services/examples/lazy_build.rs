use fibre_services::{Instance, Locator};
use std::sync::atomic::{AtomicUsize, Ordering};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let services = Locator::new();

  // --- Type Registration ---
  // The constructor runs whenever the resolver builds a `RequestTracker`.
  services.resolver().add_type_with("RequestTracker", || {
    println!("Creating RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });
  services.set("tracker", "RequestTracker").unwrap();

  println!("--- Resolving through the locator ---");
  // Built on first access, then served from the instance cache.
  let s1 = services.get_as::<RequestTracker>("tracker").unwrap();
  let s2 = services.get_as::<RequestTracker>("tracker").unwrap();
  println!("Service 1 ID: {}, Service 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  println!("Both lookups returned the cached instance, as expected.\n");

  println!("--- Building standalone ---");
  // `build` constructs a throwaway instance and never touches the cache.
  let t1 = services.build("RequestTracker", "").unwrap();
  let t2 = services.build("RequestTracker", "").unwrap();
  let (t1, t2) = (
    t1.downcast::<RequestTracker>().unwrap(),
    t2.downcast::<RequestTracker>().unwrap(),
  );
  println!("Built 1 ID: {}, Built 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);

  let cached = services.get("tracker").unwrap();
  assert!(Instance::ptr_eq(&cached, &services.get("tracker").unwrap()));
  println!("The cached instance is untouched by standalone builds.");
}
