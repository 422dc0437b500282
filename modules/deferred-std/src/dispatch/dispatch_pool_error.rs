use std::{error::Error, fmt, io};

/// Errors raised while binding continuations to a tokio runtime.
#[derive(Debug)]
pub enum DispatchPoolError {
  /// The tokio runtime could not be built.
  RuntimeBuild(io::Error),
  /// No tokio runtime is running on the calling thread.
  NoAmbientRuntime,
}

impl fmt::Display for DispatchPoolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | DispatchPoolError::RuntimeBuild(error) => write!(f, "failed to build dispatch runtime: {error}"),
      | DispatchPoolError::NoAmbientRuntime => write!(f, "no tokio runtime is running on this thread"),
    }
  }
}

impl Error for DispatchPoolError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      | DispatchPoolError::RuntimeBuild(error) => Some(error),
      | DispatchPoolError::NoAmbientRuntime => None,
    }
  }
}

impl From<io::Error> for DispatchPoolError {
  fn from(error: io::Error) -> Self {
    DispatchPoolError::RuntimeBuild(error)
  }
}
