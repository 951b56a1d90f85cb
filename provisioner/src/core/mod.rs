//! Core business logic modules
//!
//! Pure helpers with no I/O dependencies.

pub mod amounts;
pub mod delegation;

pub use amounts::{ether, format_amount, is_funded};
pub use delegation::delegation_payload;
