use std::fmt;
use std::path::PathBuf;

/// Errors that stop a running program.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The data pointer attempted to move left of cell 0 or beyond the last cell.
    #[error("data pointer out of bounds (ip={ip}, ptr={ptr})")]
    OutOfBounds { ip: usize, ptr: usize },

    /// A jump scan ran off the program before its counterpart was found.
    #[error("unmatched {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// Reading from the input channel or writing to the output channel failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },

    /// Execution was cancelled from outside, e.g. by ctrl+c.
    #[error("aborted")]
    Aborted,
}

impl RuntimeError {
    /// Process exit status for this error. A user abort still counts as a
    /// clean exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::Aborted => 0,
            _ => 1,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "["),
            BracketKind::Close => write!(f, "]"),
        }
    }
}

/// The program file could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("could not open {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_diagnostics() {
        let err = RuntimeError::OutOfBounds { ip: 4, ptr: 0 };
        assert_eq!(err.to_string(), "data pointer out of bounds (ip=4, ptr=0)");

        let err = RuntimeError::UnmatchedBracket { ip: 0, kind: BracketKind::Open };
        assert_eq!(err.to_string(), "unmatched [ at instruction 0");

        let err = RuntimeError::UnmatchedBracket { ip: 3, kind: BracketKind::Close };
        assert_eq!(err.to_string(), "unmatched ] at instruction 3");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(RuntimeError::OutOfBounds { ip: 0, ptr: 0 }.exit_code(), 1);
        assert_eq!(
            RuntimeError::UnmatchedBracket { ip: 0, kind: BracketKind::Open }.exit_code(),
            1
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(RuntimeError::Io { ip: 0, source: io }.exit_code(), 1);
        assert_eq!(RuntimeError::Aborted.exit_code(), 0);
    }
}
