//! Unified error type for `OutcomeBuddy`.
//!
//! Every layer (core services, REST handlers, Discord commands) returns
//! [`Result`], so a failure in the database or in input validation travels
//! unchanged up to whichever surface reports it.

use thiserror::Error;

/// All errors the application can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Error returned by `SeaORM` / the underlying driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No outcome with the given id
    #[error("Outcome not found: {id}")]
    OutcomeNotFound {
        /// Id that was looked up
        id: String,
    },

    /// No output with the given id
    #[error("Output not found: {id}")]
    OutputNotFound {
        /// Id that was looked up
        id: String,
    },

    /// No job with the given id or title
    #[error("Job not found: {id}")]
    JobNotFound {
        /// Id or title that was looked up
        id: String,
    },

    /// No mapping with the given id
    #[error("Mapping not found: {id}")]
    MappingNotFound {
        /// Id that was looked up
        id: String,
    },

    /// Rejected user input (empty names, non-finite numbers, bad ranges)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// I/O failure (config file, socket bind)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while building a text response
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Request body or query string that could not be decoded
    #[error("Bad request: {message}")]
    BadRequest {
        /// Decoder message
        message: String,
    },

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Builds an [`Error::InvalidInput`] from anything displayable.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether this error means "the thing you asked for does not exist".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OutcomeNotFound { .. }
                | Self::OutputNotFound { .. }
                | Self::JobNotFound { .. }
                | Self::MappingNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(
            Error::JobNotFound {
                id: "j1".to_string()
            }
            .is_not_found()
        );
        assert!(!Error::invalid_input("bad").is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::OutcomeNotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Outcome not found: abc");

        let err = Error::invalid_input("name cannot be empty");
        assert_eq!(err.to_string(), "Invalid input: name cannot be empty");
    }
}
