use fibre_services::{Error, Locator};

fn main() {
  let services = Locator::new();
  services.set("ghost", "GhostService").unwrap();

  // --- A name that was never registered ---
  println!("Attempting to get a service that was never registered...");
  match services.get("unregistered") {
    Err(Error::ServiceNotFound(name)) => println!("Correctly received ServiceNotFound for '{}'.", name),
    other => panic!("Should not have found the service! {:?}", other),
  }

  // --- A registered name whose type the resolver does not know ---
  println!("\nNow, attempting to get a service whose type is unknown...");
  match services.get("ghost") {
    Err(err @ Error::BuildFailure { .. }) => {
      println!("{}", err);
      println!("  caused by: {}", err.build_cause().unwrap());
      assert!(matches!(err.build_cause(), Some(Error::ClassNotFound(_))));
    }
    other => panic!("Expected a build failure, got {:?}", other),
  }
}
