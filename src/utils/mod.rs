//! Utility modules for the item service
//!
//! - **error**: Error types and their HTTP mapping
//! - **logging**: Tracing subscriber setup
//! - **validation**: Boundary validation helpers

pub mod error;
pub mod logging;
pub mod validation;

pub use validation::{is_valid_email, validate_email};
