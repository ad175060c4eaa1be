use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{self, DbPool},
    entities::stock::{self, Entity as Stock, DEFAULT_UNIDAD},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "stocks";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockInput {
    pub producto: Uuid,
    #[validate(custom = "crate::services::not_blank")]
    pub tienda_id: String,
    /// Defaults to 0
    #[schema(value_type = Option<String>, example = "10")]
    pub cantidad: Option<Decimal>,
    /// Defaults to `ud`
    #[validate(custom = "crate::services::not_blank")]
    pub unidad: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockInput {
    #[schema(value_type = Option<String>)]
    pub cantidad: Option<Decimal>,
    #[validate(custom = "crate::services::not_blank")]
    pub unidad: Option<String>,
}

/// Body of the (tienda, producto) upsert
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStockInput {
    #[schema(value_type = String, example = "7.5")]
    pub cantidad: Decimal,
    #[validate(custom = "crate::services::not_blank")]
    pub unidad: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    pub tienda_id: Option<String>,
    pub producto: Option<Uuid>,
}

/// Result of an upsert; `created` is false when an existing row was updated.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub stock: stock::Model,
    pub created: bool,
}

/// Service for per-store stock levels
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateStockInput) -> Result<stock::Model, ServiceError> {
        input.validate()?;
        let tienda_id = required(&input.tienda_id);
        if self.find_pair(input.producto, &tienda_id).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "stock de producto {} en tienda '{}' ya existe",
                input.producto, tienda_id
            )));
        }

        let created = self
            .insert_row(
                input.producto,
                tienda_id,
                input.cantidad.unwrap_or(Decimal::ZERO),
                optional(input.unidad),
            )
            .await?;
        self.emit(&created, true).await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<stock::Model, ServiceError> {
        Stock::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Stock {} no encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: StockFilter,
        page: PageRequest,
    ) -> Result<Page<stock::Model>, ServiceError> {
        let mut query = Stock::find();
        if let Some(tienda_id) = optional(filter.tienda_id) {
            query = query.filter(stock::Column::TiendaId.eq(tienda_id));
        }
        if let Some(producto) = filter.producto {
            query = query.filter(stock::Column::Producto.eq(producto));
        }

        fetch_page(
            query
                .order_by_asc(stock::Column::TiendaId)
                .order_by_asc(stock::Column::Producto),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateStockInput,
    ) -> Result<stock::Model, ServiceError> {
        input.validate()?;
        let existing = self.get(id).await?;
        let updated = self
            .apply_update(existing, input.cantidad, optional(input.unidad))
            .await?;
        self.emit(&updated, false).await;
        Ok(updated)
    }

    /// Sets the quantity of a product at a store, creating the row when absent.
    #[instrument(skip(self))]
    pub async fn upsert(
        &self,
        tienda_id: &str,
        producto: Uuid,
        input: UpsertStockInput,
    ) -> Result<UpsertOutcome, ServiceError> {
        input.validate()?;
        let tienda_id = required(tienda_id);
        if tienda_id.is_empty() {
            return Err(ServiceError::ValidationError(
                "tiendaId: must not be blank".to_string(),
            ));
        }
        let unidad = optional(input.unidad);

        let outcome = match self.find_pair(producto, &tienda_id).await? {
            Some(existing) => UpsertOutcome {
                stock: self
                    .apply_update(existing, Some(input.cantidad), unidad)
                    .await?,
                created: false,
            },
            None => {
                match self
                    .insert_row(producto, tienda_id.clone(), input.cantidad, unidad.clone())
                    .await
                {
                    Ok(stock) => UpsertOutcome {
                        stock,
                        created: true,
                    },
                    // Lost a race against a concurrent insert of the same pair
                    Err(ServiceError::Conflict(_)) => {
                        let existing =
                            self.find_pair(producto, &tienda_id).await?.ok_or_else(|| {
                                ServiceError::InternalError(
                                    "stock row vanished during upsert".to_string(),
                                )
                            })?;
                        UpsertOutcome {
                            stock: self
                                .apply_update(existing, Some(input.cantidad), unidad)
                                .await?,
                            created: false,
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        self.emit(&outcome.stock, outcome.created).await;
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let result = existing.delete(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result?;

        self.event_sender.send_or_log(Event::StockDeleted(id)).await;
        info!(stock_id = %id, "stock deleted");
        Ok(())
    }

    async fn find_pair(
        &self,
        producto: Uuid,
        tienda_id: &str,
    ) -> Result<Option<stock::Model>, ServiceError> {
        Ok(Stock::find()
            .filter(stock::Column::Producto.eq(producto))
            .filter(stock::Column::TiendaId.eq(tienda_id))
            .one(&*self.db_pool)
            .await?)
    }

    async fn insert_row(
        &self,
        producto: Uuid,
        tienda_id: String,
        cantidad: Decimal,
        unidad: Option<String>,
    ) -> Result<stock::Model, ServiceError> {
        let model = stock::ActiveModel {
            producto: Set(producto),
            tienda_id: Set(tienda_id),
            cantidad: Set(cantidad),
            unidad: Set(unidad.unwrap_or_else(|| DEFAULT_UNIDAD.to_string())),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result.map_err(|e| ServiceError::from_db_write(e, "stock"))
    }

    async fn apply_update(
        &self,
        existing: stock::Model,
        cantidad: Option<Decimal>,
        unidad: Option<String>,
    ) -> Result<stock::Model, ServiceError> {
        let mut model: stock::ActiveModel = existing.into();
        if let Some(cantidad) = cantidad {
            model.cantidad = Set(cantidad);
        }
        if let Some(unidad) = unidad {
            model.unidad = Set(unidad);
        }

        let result = model.update(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        Ok(result?)
    }

    async fn emit(&self, stock: &stock::Model, created: bool) {
        let event = if created {
            Event::StockCreated {
                stock_id: stock.id,
                producto: stock.producto,
                tienda_id: stock.tienda_id.clone(),
                cantidad: stock.cantidad,
            }
        } else {
            Event::StockUpdated {
                stock_id: stock.id,
                producto: stock.producto,
                tienda_id: stock.tienda_id.clone(),
                cantidad: stock.cantidad,
            }
        };
        self.event_sender.send_or_log(event).await;
    }
}
