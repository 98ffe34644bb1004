use fibre_services::{resolve_from, Locator};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  let services = Locator::new();

  // --- Registration ---
  // One abstract factory builds every sender; it branches on the service name.
  services
    .resolver()
    .add_abstract_factory_trait::<dyn MessageSender, String>("Senders", "for_channel", |name: &str| {
      match name {
        "sender.email" => Ok(Arc::new(EmailSender)),
        "sender.sms" => Ok(Arc::new(SmsSender)),
        other => Err(format!("no sender for {other}")),
      }
    });
  services
    .add([
      ("sender.email", "Senders::for_channel::"),
      ("sender.sms", "Senders::for_channel::"),
      ("sender.pigeon", "Senders::for_channel::"),
    ])
    .unwrap();

  // --- Resolution ---
  let email_notifier = resolve_from!(services, trait MessageSender, "sender.email");
  let sms_notifier = resolve_from!(services, trait MessageSender, "sender.sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));

  // The factory refused this one; the error names the service and keeps the cause.
  let err = services.get("sender.pigeon").unwrap_err();
  println!("{}: {:?}", err, err.build_cause());
  assert!(!services.instances().contains_key("sender.pigeon"));
}
