//! Shared types for the keep-tecdsa provisioning workspace
//!
//! Contains the step identifiers used to tag log output, the tracing
//! setup shared by every binary, and the common error type.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
