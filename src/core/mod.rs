//! Core domain logic
//!
//! - **models**: the item entity and its request payloads
//! - **batch**: the concurrent "process all items" operation

pub mod batch;
pub mod models;
