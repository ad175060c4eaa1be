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
    entities::receta::{self, Entity as Receta, Ingrediente, Ingredientes},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "recetas";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredienteInput {
    pub producto: Uuid,
    #[validate(custom = "crate::services::positive")]
    #[schema(value_type = String, example = "0.250")]
    pub cantidad: Decimal,
    #[validate(custom = "crate::services::not_blank")]
    pub unidad: String,
}

impl From<IngredienteInput> for Ingrediente {
    fn from(input: IngredienteInput) -> Self {
        Ingrediente {
            producto: input.producto,
            cantidad: input.cantidad,
            unidad: required(&input.unidad),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecetaInput {
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: String,
    pub producto_final: Uuid,
    #[serde(default)]
    #[validate]
    pub ingredientes: Vec<IngredienteInput>,
}

/// Partial update. A supplied ingredient list replaces the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecetaInput {
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: Option<String>,
    pub producto_final: Option<Uuid>,
    pub ingredientes: Option<Vec<IngredienteInput>>,
}

#[derive(Debug, Clone, Default)]
pub struct RecetaFilter {
    pub search: Option<String>,
    pub producto_final: Option<Uuid>,
}

fn into_ingredientes(items: Vec<IngredienteInput>) -> Ingredientes {
    items.into_iter().map(Ingrediente::from).collect::<Vec<_>>().into()
}

/// Service for managing recipes
#[derive(Clone)]
pub struct RecetaService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl RecetaService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateRecetaInput) -> Result<receta::Model, ServiceError> {
        input.validate()?;
        let nombre = required(&input.nombre);
        self.ensure_unique_nombre(&nombre, None).await?;

        let model = receta::ActiveModel {
            nombre: Set(nombre),
            producto_final: Set(input.producto_final),
            ingredientes: Set(into_ingredientes(input.ingredientes)),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let created = result.map_err(|e| ServiceError::from_db_write(e, "receta"))?;

        self.event_sender
            .send_or_log(Event::RecetaCreated(created.id))
            .await;
        info!(
            receta_id = %created.id,
            ingredientes = created.ingredientes.0.len(),
            "receta created"
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<receta::Model, ServiceError> {
        Receta::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Receta {} no encontrada", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_nombre(&self, nombre: &str) -> Result<receta::Model, ServiceError> {
        Receta::find()
            .filter(receta::Column::Nombre.eq(nombre.trim()))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Receta '{}' no encontrada", nombre)))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: RecetaFilter,
        page: PageRequest,
    ) -> Result<Page<receta::Model>, ServiceError> {
        let mut query = Receta::find();
        if let Some(term) = optional(filter.search) {
            query = query.filter(receta::Column::Nombre.contains(&term));
        }
        if let Some(producto_final) = filter.producto_final {
            query = query.filter(receta::Column::ProductoFinal.eq(producto_final));
        }

        fetch_page(
            query.order_by_asc(receta::Column::Nombre),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateRecetaInput,
    ) -> Result<receta::Model, ServiceError> {
        input.validate()?;
        if let Some(items) = &input.ingredientes {
            for item in items {
                item.validate()?;
            }
        }
        let existing = self.get(id).await?;

        let mut model: receta::ActiveModel = existing.into();
        if let Some(nombre) = input.nombre.as_deref().map(required) {
            self.ensure_unique_nombre(&nombre, Some(id)).await?;
            model.nombre = Set(nombre);
        }
        if let Some(producto_final) = input.producto_final {
            model.producto_final = Set(producto_final);
        }
        if let Some(items) = input.ingredientes {
            model.ingredientes = Set(into_ingredientes(items));
        }

        let result = model.update(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let updated = result.map_err(|e| ServiceError::from_db_write(e, "receta"))?;

        self.event_sender
            .send_or_log(Event::RecetaUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let result = existing.delete(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result?;

        self.event_sender.send_or_log(Event::RecetaDeleted(id)).await;
        info!(receta_id = %id, "receta deleted");
        Ok(())
    }

    async fn ensure_unique_nombre(
        &self,
        nombre: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Receta::find().filter(receta::Column::Nombre.eq(nombre));
        if let Some(id) = exclude_id {
            query = query.filter(receta::Column::Id.ne(id));
        }

        if query.one(&*self.db_pool).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "receta '{}' ya existe",
                nombre
            )));
        }
        Ok(())
    }
}
