//! Error types for mergington-core.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading or mutating the activity catalog.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No activity with the given name exists.
    #[error("Activity '{name}' not found")]
    ActivityNotFound {
        /// Requested activity name
        name: String,
    },

    /// The email is already on the activity's participant list.
    #[error("Student {email} is already signed up for {activity}")]
    AlreadySignedUp {
        /// Participant email
        email: String,
        /// Activity name
        activity: String,
    },

    /// The email is not on the activity's participant list.
    #[error("Student {email} is not registered for {activity}")]
    NotRegistered {
        /// Participant email
        email: String,
        /// Activity name
        activity: String,
    },

    /// Capacity enforcement is on and the activity has no free spots.
    #[error("Activity {activity} is full ({max_participants} participants)")]
    ActivityFull {
        /// Activity name
        activity: String,
        /// Configured capacity
        max_participants: u32,
    },

    /// Two catalog entries share a name.
    #[error("Duplicate activity in catalog: {name}")]
    DuplicateActivity {
        /// The repeated name
        name: String,
    },

    /// Catalog data failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error, optionally tied to a file.
    #[error("I/O error{}: {source}", .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for mergington-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Whether the error refers to an activity that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ActivityNotFound { .. })
    }

    /// Whether the error is a rejected participation change
    /// (duplicate signup, absent participant, full activity).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::AlreadySignedUp { .. } | Error::NotRegistered { .. } | Error::ActivityFull { .. }
        )
    }
}
