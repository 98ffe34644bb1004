use fibre_services::Locator;

// A function that configures dependencies and runs some logic.
// By accepting a `&Locator`, it can be tested with a controlled environment.
fn process_data(services: &Locator) -> String {
  // Register a data source ONLY within this locator.
  services.set_instance("data", "test data".to_string());

  let data = services
    .get_as::<String>("data")
    .expect("Data not found in locator");
  format!("Processed: {}", data.to_uppercase())
}

fn main() {
  // --- Test Scenario with a dedicated locator ---
  println!("--- Running with a dedicated locator ---");
  let test_services = Locator::new();
  let result = process_data(&test_services);

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Merging ---
  // Application defaults, overridden by whatever the test locator holds.
  let app_services = Locator::new();
  app_services.set_instance("data", "production data".to_string());
  app_services.set_instance("mode", "production".to_string());
  app_services.merge(&test_services);

  assert_eq!(*app_services.get_as::<String>("data").unwrap(), "test data");
  assert_eq!(*app_services.get_as::<String>("mode").unwrap(), "production");
  assert!(!test_services.has("mode"), "Merging must not touch the source!");

  println!("\nMerged the dedicated locator into the application one.");
}
