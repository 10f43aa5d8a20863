use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Which sink table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    File,
    Callback,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::File => write!(f, "logfiles"),
            SinkKind::Callback => write!(f, "callbacks"),
        }
    }
}

/// Failure of a sink registration or removal. Never raised by the emission path.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("max number of {kind} ({capacity}) reached")]
    CapacityExceeded { kind: SinkKind, capacity: usize },

    #[error("unable to open '{}': {source}", .path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no matching callback registered")]
    NotFound,

    #[error("logger is not initialized")]
    NotInitialized,
}

impl SinkError {
    /// Writes the `fanlog: ...` diagnostic line to stderr.
    pub fn report(self) -> Self {
        eprintln!("fanlog: {self}");
        self
    }
}

#[test]
fn test_error_messages() {
    let err = SinkError::CapacityExceeded {
        kind: SinkKind::File,
        capacity: 10,
    };
    assert_eq!(err.to_string(), "max number of logfiles (10) reached");
    let err = SinkError::CapacityExceeded {
        kind: SinkKind::Callback,
        capacity: 3,
    };
    assert_eq!(err.to_string(), "max number of callbacks (3) reached");
    let err = SinkError::OpenFailure {
        path: PathBuf::from("/nope/out.log"),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(
        err.to_string()
            .starts_with("unable to open '/nope/out.log'")
    );
}
