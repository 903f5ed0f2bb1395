//! Domain models

pub mod item;

pub use item::{Item, ItemId, ItemPayload, ItemStatus};
