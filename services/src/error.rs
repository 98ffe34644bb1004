use thiserror::Error;

/// A boxed error returned by user-supplied factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the `fibre_services` library.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid specification of service \"{name}\"; expects string, \"{given}\" given")]
  InvalidSpecification { name: String, given: String },

  #[error("Malformed specification \"{specification}\": {reason}")]
  MalformedSpecification {
    specification: String,
    reason: &'static str,
  },

  #[error("Not found; the service \"{0}\" is unknown")]
  ServiceNotFound(String),

  #[error("Class \"{0}\" not found")]
  ClassNotFound(String),

  #[error("Factory \"{0}\" not found")]
  FactoryNotFound(String),

  #[error("Factory method \"{method}\" of \"{owner}\" is not callable")]
  FactoryNotCallable { owner: String, method: String },

  #[error("Factory \"{specification}\" failed: {source}")]
  FactoryFailed {
    specification: String,
    #[source]
    source: BoxError,
  },

  #[error("Circular dependency detected while resolving service \"{0}\"")]
  CircularDependency(String),

  #[error("Failed to create the service \"{name}\"")]
  BuildFailure {
    name: String,
    #[source]
    source: Box<Error>,
  },

  #[error("Service \"{name}\" is a \"{actual}\", not a \"{expected}\"")]
  TypeMismatch {
    name: String,
    expected: &'static str,
    actual: &'static str,
  },

  #[error("Failed to serialize registry: {0}")]
  Serialize(String),

  #[error("Failed to deserialize registry: {0}")]
  Deserialize(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

impl Error {
  /// Returns the wrapped build error if this is a `BuildFailure`.
  pub fn build_cause(&self) -> Option<&Error> {
    match self {
      Error::BuildFailure { source, .. } => Some(&**source),
      _ => None,
    }
  }
}

/// A specialized `Result` type for `fibre_services` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
