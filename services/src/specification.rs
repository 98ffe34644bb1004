//! Build specifications and their string grammar.
//!
//! ```text
//! Type               construct `Type` with zero arguments
//! Owner::method      call the factory method `Owner::method()`
//! Owner::method::    call the abstract factory `Owner::method(service_name)`
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DELIMITER: &str = "::";

/// A parsed build recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Specification {
  /// A type registered with the resolver, built with zero arguments.
  Type(String),
  /// A factory method invoked with no arguments.
  Factory { owner: String, method: String },
  /// A factory method invoked with the name of the service being built.
  AbstractFactory { owner: String, method: String },
}

impl Specification {
  pub fn parse(spec: &str) -> Result<Self> {
    let malformed = |reason| Error::MalformedSpecification {
      specification: spec.to_owned(),
      reason,
    };

    if spec.is_empty() {
      return Err(malformed("empty specification"));
    }

    let parts: Vec<&str> = spec.split(DELIMITER).collect();
    if parts.iter().any(|part| part.contains(':')) {
      return Err(malformed("stray ':' outside of a '::' delimiter"));
    }

    match parts.as_slice() {
      [type_name] => Ok(Specification::Type((*type_name).to_owned())),
      [owner, method] | [owner, method, ""] if owner.is_empty() || method.is_empty() => {
        Err(malformed("factory owner and method must not be empty"))
      }
      [owner, method] => Ok(Specification::Factory {
        owner: (*owner).to_owned(),
        method: (*method).to_owned(),
      }),
      [owner, method, ""] => Ok(Specification::AbstractFactory {
        owner: (*owner).to_owned(),
        method: (*method).to_owned(),
      }),
      _ => Err(malformed(
        "expected \"Type\", \"Owner::method\" or \"Owner::method::\"",
      )),
    }
  }

  /// The type or factory owner this specification refers to.
  pub fn owner(&self) -> &str {
    match self {
      Specification::Type(name) => name,
      Specification::Factory { owner, .. } | Specification::AbstractFactory { owner, .. } => owner,
    }
  }

  pub fn is_factory(&self) -> bool {
    !matches!(self, Specification::Type(_))
  }
}

impl fmt::Display for Specification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Specification::Type(name) => f.write_str(name),
      Specification::Factory { owner, method } => write!(f, "{owner}{DELIMITER}{method}"),
      Specification::AbstractFactory { owner, method } => {
        write!(f, "{owner}{DELIMITER}{method}{DELIMITER}")
      }
    }
  }
}

impl FromStr for Specification {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Specification::parse(s)
  }
}

impl TryFrom<String> for Specification {
  type Error = Error;

  fn try_from(spec: String) -> Result<Self> {
    Specification::parse(&spec)
  }
}

impl From<Specification> for String {
  fn from(spec: Specification) -> Self {
    spec.to_string()
  }
}

impl PartialEq<str> for Specification {
  fn eq(&self, other: &str) -> bool {
    Specification::parse(other).is_ok_and(|parsed| &parsed == self)
  }
}

impl PartialEq<&str> for Specification {
  fn eq(&self, other: &&str) -> bool {
    self == *other
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_plain_type() {
    assert_eq!(
      Specification::parse("Mailer").unwrap(),
      Specification::Type("Mailer".to_string())
    );
  }

  #[test]
  fn parses_factory_and_abstract_factory() {
    assert_eq!(
      Specification::parse("MailerFactory::make").unwrap(),
      Specification::Factory {
        owner: "MailerFactory".to_string(),
        method: "make".to_string(),
      }
    );
    assert_eq!(
      Specification::parse("MailerFactory::make::").unwrap(),
      Specification::AbstractFactory {
        owner: "MailerFactory".to_string(),
        method: "make".to_string(),
      }
    );
  }

  #[test]
  fn display_gives_back_the_wire_form() {
    for spec in ["Mailer", "MailerFactory::make", "MailerFactory::make::", "app.mailer"] {
      assert_eq!(Specification::parse(spec).unwrap().to_string(), spec);
    }
  }

  #[test]
  fn rejects_malformed_shapes() {
    for spec in [
      "",
      "::make",
      "Owner::",
      "Owner::::",
      "::",
      "Owner::make::extra",
      "Owner::make::::",
      "Owner:make",
      "Owner:::make",
    ] {
      assert!(
        matches!(
          Specification::parse(spec),
          Err(Error::MalformedSpecification { .. })
        ),
        "{spec:?} should be rejected"
      );
    }
  }

  #[test]
  fn serde_uses_the_string_form() {
    let spec = Specification::parse("Owner::make::").unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    assert_eq!(json, "\"Owner::make::\"");
    let back: Specification = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
    assert!(serde_json::from_str::<Specification>("\"a::b::c\"").is_err());
  }

  #[test]
  fn reports_owner_and_kind() {
    let plain = Specification::parse("Mailer").unwrap();
    assert_eq!(plain.owner(), "Mailer");
    assert!(!plain.is_factory());

    for spec in ["MailerFactory::make", "MailerFactory::make::"] {
      let factory = Specification::parse(spec).unwrap();
      assert_eq!(factory.owner(), "MailerFactory");
      assert!(factory.is_factory());
    }
  }

  #[test]
  fn compares_against_strings() {
    let spec = Specification::parse("Owner::make").unwrap();
    assert_eq!(spec, "Owner::make");
    assert_ne!(spec, "Owner::make::");
  }
}
