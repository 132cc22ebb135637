//! Error types for hero

use std::io;
use thiserror::Error;

/// Result type alias for hero operations
pub type HeroResult<T> = Result<T, HeroError>;

/// Broad classes of failure, used when deciding how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed quoting or escaping in an input line
    Parse,
    /// Unknown command, alias, variable or executable
    Lookup,
    /// Not-found, permission-denied or other IO failure
    Filesystem,
    /// External program missing or failed to launch
    ChildProcess,
    /// Missing or malformed command arguments
    Usage,
}

/// Error types for hero shell operations
#[derive(Error, Debug)]
pub enum HeroError {
    /// Unterminated quote or trailing escape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Command not found in the registry
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// Executable not found on PATH
    #[error("{0} not found")]
    NotFound(String),

    /// IO error tied to the path that caused it
    #[error("{path}: {}", io_reason(.source))]
    Io { path: String, source: io::Error },

    /// External editor could not be launched
    #[error("Failed to launch {program}: {}", io_reason(.source))]
    Editor { program: String, source: io::Error },

    /// Usage line for a command invoked with missing arguments
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HeroError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::UnknownCommand(_)
            | Self::AliasNotFound(_)
            | Self::VariableNotFound(_)
            | Self::NotFound(_) => ErrorKind::Lookup,
            Self::Io { .. } => ErrorKind::Filesystem,
            Self::Editor { .. } => ErrorKind::ChildProcess,
            Self::Usage(_) | Self::InvalidArgument(_) => ErrorKind::Usage,
        }
    }
}

/// Short human-readable reason for an IO error, without the `(os error N)` suffix
/// for the common cases.
pub fn io_reason(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "No such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        io::ErrorKind::AlreadyExists => "File exists".to_string(),
        _ => match err.raw_os_error() {
            Some(20) => "Not a directory".to_string(),
            Some(21) => "Is a directory".to_string(),
            Some(39 | 66) => "Directory not empty".to_string(),
            _ => err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_render_path_and_reason() {
        let err = HeroError::io("missing.txt", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.to_string(), "missing.txt: No such file or directory");
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn lookup_kinds() {
        assert_eq!(HeroError::UnknownCommand("x".into()).kind(), ErrorKind::Lookup);
        assert_eq!(HeroError::AliasNotFound("x".into()).kind(), ErrorKind::Lookup);
        assert_eq!(HeroError::Parse("x".into()).kind(), ErrorKind::Parse);
    }

    #[test]
    fn editor_error_is_child_process() {
        let err = HeroError::Editor {
            program: "vim".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::ChildProcess);
        assert_eq!(err.to_string(), "Failed to launch vim: No such file or directory");
    }
}
