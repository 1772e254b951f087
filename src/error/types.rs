//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for holo operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HoloError {
    /// Wrong number of positional arguments for a command
    #[error("incorrect number of arguments (expected {expected}, got {actual})")]
    ArgumentCount { expected: usize, actual: usize },

    /// Required flag absent, or a flag given without its argument
    #[error("{message}")]
    MissingFlag { flag: String, message: String },

    /// Command name not present in the registry
    #[error("No matching command '{name}'")]
    UnknownCommand { name: String },

    /// Argument present but malformed
    #[error("{message}")]
    InvalidArgument { message: String },

    /// Any other command-line parse failure, already rendered by the parser
    #[error("{message}")]
    Parse { message: String },

    /// Configuration Error - missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Entity lookup failed
    #[error("{what} not found")]
    NotFound { what: String },

    /// Entity with the same name already exists
    #[error("{what} already exists")]
    AlreadyExists { what: String },

    /// Operation refused in the current catalog state
    #[error("{message}")]
    Conflict { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl HoloError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::UnknownCommand { .. } => 1,
            Self::ArgumentCount { .. }
            | Self::MissingFlag { .. }
            | Self::InvalidArgument { .. }
            | Self::Parse { .. } => 2,
            Self::Configuration { .. } => 3,
            Self::NotFound { .. } => 4,
            Self::AlreadyExists { .. } => 5,
            Self::Conflict { .. } => 6,
            Self::Filesystem { .. } => 7,
        }
    }

    /// Whether the error was caused by the shape of the command line
    ///
    /// Usage errors are reported together with the command's help text.
    #[must_use]
    #[inline]
    pub const fn is_usage(&self) -> bool {
        matches!(
            *self,
            Self::ArgumentCount { .. }
                | Self::MissingFlag { .. }
                | Self::UnknownCommand { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Create a missing-flag error for a flag that was never given
    #[inline]
    pub fn flag_required(flag: &str) -> Self {
        Self::MissingFlag {
            flag: flag.to_owned(),
            message: format!("--{flag} flag is required"),
        }
    }

    /// Create a missing-flag error for a flag that lost its argument
    #[inline]
    pub fn flag_needs_argument(flag: &str) -> Self {
        Self::MissingFlag {
            flag: flag.to_owned(),
            message: format!("--{flag} flag requires an argument"),
        }
    }

    /// Create an unknown-command error
    #[inline]
    pub fn unknown_command<S: Into<String>>(name: S) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Create an invalid-argument error
    #[inline]
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not-found error, `what` names the missing entity
    #[inline]
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create an already-exists error, `what` names the existing entity
    #[inline]
    pub fn already_exists<S: Into<String>>(what: S) -> Self {
        Self::AlreadyExists { what: what.into() }
    }

    /// Create a conflict error
    #[inline]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}
