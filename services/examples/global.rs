use fibre_services::{current, resolve, HasServices};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. A type that reaches services through the process-wide locator.
struct ReportService;
impl HasServices for ReportService {}

impl ReportService {
  fn generate_report(&self) {
    let logger = self
      .services()
      .get_trait::<dyn Logger>("logger")
      .expect("logger is registered");
    logger.log("Starting report generation.");
    // ... logic to generate report ...
    logger.log("Finished report generation.");
  }
}

fn main() {
  // --- Registration ---
  current()
    .resolver()
    .add_type_trait::<dyn Logger>("ConsoleLogger", || Arc::new(ConsoleLogger));
  current().set("logger", "ConsoleLogger").unwrap();

  // --- Resolution and Usage ---
  println!("Using the service...");
  ReportService.generate_report();

  let logger = resolve!(trait Logger, "logger");
  logger.log("Resolved directly with resolve!.");
}
