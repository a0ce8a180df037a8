//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Job listing and completion commands
pub mod jobs;

/// Progress chart command
pub mod progress;

// Export commands
pub use general::*;
pub use jobs::*;
pub use progress::*;
