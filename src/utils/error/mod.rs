//! Error handling for the item service
//!
//! This module defines the service error type, its HTTP mapping and helper constructors.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, ServiceError};
