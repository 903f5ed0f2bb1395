//! Item entity and request payloads

use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::validate_email;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned item identifier
pub type ItemId = i64;

/// Processing status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    New,
    Processed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::New => "NEW",
            ItemStatus::Processed => "PROCESSED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NEW" => Ok(ItemStatus::New),
            "PROCESSED" => Ok(ItemStatus::Processed),
            other => Err(ServiceError::Validation(format!(
                "Unknown item status: {}",
                other
            ))),
        }
    }
}

/// A tracked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, `None` until the store assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ItemStatus,
    pub email: String,
}

impl Item {
    /// Create an unsaved item with status `NEW`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            status: ItemStatus::New,
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_processed(&self) -> bool {
        self.status == ItemStatus::Processed
    }

    /// Transition to `PROCESSED`
    pub fn mark_processed(&mut self) {
        self.status = ItemStatus::Processed;
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPayload {
    /// Honoured on create as an upsert; ignored on update
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    pub email: String,
}

impl ItemPayload {
    /// Validate the payload at the HTTP boundary
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)
    }

    /// Validate and convert into an item destined for `id`
    pub fn into_item(self, id: Option<ItemId>) -> Result<Item> {
        self.validate()?;
        Ok(Item {
            id,
            name: self.name,
            description: self.description,
            status: self.status.unwrap_or_default(),
            email: self.email,
        })
    }
}
