use crate::core::models::{Item, ItemStatus};
use crate::utils::error::ServiceError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Item ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Processing status (`NEW`, `PROCESSED`)
    pub status: String,

    /// Contact email
    pub email: String,
}

/// Item entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Item {
    type Error = ServiceError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status: ItemStatus = model.status.parse().map_err(|_| {
            ServiceError::storage(format!(
                "Item {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Item {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            status,
            email: model.email,
        })
    }
}
