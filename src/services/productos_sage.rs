use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{self, DbPool},
    entities::producto_sage::{self, Entity as ProductoSage},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "productos_sage";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductoSageInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: String,
    pub codigo_sage: Option<String>,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: String,
    pub descripcion: Option<String>,
    /// Defaults to 0
    #[validate(custom = "crate::services::non_negative")]
    #[schema(value_type = Option<String>, example = "12.50")]
    pub precio: Option<Decimal>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductoSageInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: Option<String>,
    pub codigo_sage: Option<String>,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(custom = "crate::services::non_negative")]
    #[schema(value_type = Option<String>)]
    pub precio: Option<Decimal>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductoSageFilter {
    /// Matches codigo, codigoSage or nombre
    pub search: Option<String>,
    pub activo: Option<bool>,
}

/// Service for the product catalog mirrored from Sage
#[derive(Clone)]
pub struct ProductoSageService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductoSageService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CreateProductoSageInput,
    ) -> Result<producto_sage::Model, ServiceError> {
        input.validate()?;
        let codigo = required(&input.codigo);
        self.ensure_unique_codigo(&codigo, None).await?;

        let model = producto_sage::ActiveModel {
            codigo: Set(codigo),
            codigo_sage: Set(optional(input.codigo_sage)),
            nombre: Set(required(&input.nombre)),
            descripcion: Set(optional(input.descripcion)),
            precio: Set(input.precio.unwrap_or(Decimal::ZERO)),
            activo: Set(input.activo.unwrap_or(true)),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let created = result.map_err(|e| ServiceError::from_db_write(e, "producto"))?;

        self.event_sender
            .send_or_log(Event::ProductoSageCreated(created.id))
            .await;
        info!(producto_id = %created.id, codigo = %created.codigo, "producto created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<producto_sage::Model, ServiceError> {
        ProductoSage::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Producto {} no encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_codigo(&self, codigo: &str) -> Result<producto_sage::Model, ServiceError> {
        ProductoSage::find()
            .filter(producto_sage::Column::Codigo.eq(codigo.trim()))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Producto con codigo '{}' no encontrado", codigo))
            })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ProductoSageFilter,
        page: PageRequest,
    ) -> Result<Page<producto_sage::Model>, ServiceError> {
        let mut query = ProductoSage::find();
        if let Some(term) = optional(filter.search) {
            query = query.filter(
                Condition::any()
                    .add(producto_sage::Column::Codigo.contains(&term))
                    .add(producto_sage::Column::CodigoSage.contains(&term))
                    .add(producto_sage::Column::Nombre.contains(&term)),
            );
        }
        if let Some(activo) = filter.activo {
            query = query.filter(producto_sage::Column::Activo.eq(activo));
        }

        fetch_page(
            query.order_by_asc(producto_sage::Column::Codigo),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductoSageInput,
    ) -> Result<producto_sage::Model, ServiceError> {
        input.validate()?;
        let existing = self.get(id).await?;

        let mut model: producto_sage::ActiveModel = existing.into();
        if let Some(codigo) = input.codigo.as_deref().map(required) {
            self.ensure_unique_codigo(&codigo, Some(id)).await?;
            model.codigo = Set(codigo);
        }
        if input.codigo_sage.is_some() {
            model.codigo_sage = Set(optional(input.codigo_sage));
        }
        if let Some(nombre) = input.nombre.as_deref() {
            model.nombre = Set(required(nombre));
        }
        if input.descripcion.is_some() {
            model.descripcion = Set(optional(input.descripcion));
        }
        if let Some(precio) = input.precio {
            model.precio = Set(precio);
        }
        if let Some(activo) = input.activo {
            model.activo = Set(activo);
        }

        let result = model.update(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let updated = result.map_err(|e| ServiceError::from_db_write(e, "producto"))?;

        self.event_sender
            .send_or_log(Event::ProductoSageUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let result = existing.delete(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result?;

        self.event_sender
            .send_or_log(Event::ProductoSageDeleted(id))
            .await;
        info!(producto_id = %id, "producto deleted");
        Ok(())
    }

    async fn ensure_unique_codigo(
        &self,
        codigo: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = ProductoSage::find().filter(producto_sage::Column::Codigo.eq(codigo));
        if let Some(id) = exclude_id {
            query = query.filter(producto_sage::Column::Id.ne(id));
        }

        if query.one(&*self.db_pool).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "producto con codigo '{}' ya existe",
                codigo
            )));
        }
        Ok(())
    }
}
