use crate::core::models::{Item, ItemId};
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, item};
use super::types::{DatabaseBackendType, SeaOrmDatabase};

/// Moves the BIGSERIAL sequence past ids written explicitly
const ADVANCE_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('items', 'id'), \
     (SELECT MAX(id) FROM items))";

impl SeaOrmDatabase {
    /// Explicit ids bypass `nextval`, so later generated ids could collide
    async fn advance_id_sequence(&self) -> Result<()> {
        self.db
            .execute_unprepared(ADVANCE_ID_SEQUENCE)
            .await
            .map_err(ServiceError::Database)?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for SeaOrmDatabase {
    async fn list_ids(&self) -> Result<Vec<ItemId>> {
        entities::ItemEntity::find()
            .select_only()
            .column(item::Column::Id)
            .order_by_asc(item::Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        let models = entities::ItemEntity::find()
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        models.into_iter().map(Item::try_from).collect()
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        entities::ItemEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::Database)?
            .map(Item::try_from)
            .transpose()
    }

    async fn save(&self, item: Item) -> Result<Item> {
        match item.id {
            None => {
                debug!("Inserting new item: {}", item.name);

                let active_model = item::ActiveModel {
                    id: NotSet,
                    name: Set(item.name),
                    description: Set(item.description),
                    status: Set(item.status.as_str().to_string()),
                    email: Set(item.email),
                };

                let model = active_model
                    .insert(&self.db)
                    .await
                    .map_err(ServiceError::Database)?;
                Item::try_from(model)
            }
            Some(id) => {
                debug!(item_id = id, "Upserting item");

                let active_model = item::ActiveModel {
                    id: Set(id),
                    name: Set(item.name.clone()),
                    description: Set(item.description.clone()),
                    status: Set(item.status.as_str().to_string()),
                    email: Set(item.email.clone()),
                };

                entities::ItemEntity::insert(active_model)
                    .on_conflict(
                        OnConflict::column(item::Column::Id)
                            .update_columns([
                                item::Column::Name,
                                item::Column::Description,
                                item::Column::Status,
                                item::Column::Email,
                            ])
                            .to_owned(),
                    )
                    .exec(&self.db)
                    .await
                    .map_err(ServiceError::Database)?;

                if self.backend_type == DatabaseBackendType::PostgreSQL {
                    self.advance_id_sequence().await?;
                }

                Ok(item)
            }
        }
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        debug!(item_id = id, "Deleting item");

        entities::ItemEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(ServiceError::Database)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
