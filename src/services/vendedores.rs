use std::sync::Arc;

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
    entities::vendedor::{self, Entity as Vendedor},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "vendedores";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendedorInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: String,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: String,
    #[validate(custom = "crate::services::email_or_blank")]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendedorInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: Option<String>,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: Option<String>,
    #[validate(custom = "crate::services::email_or_blank")]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct VendedorFilter {
    pub search: Option<String>,
    pub activo: Option<bool>,
}

/// Service for managing sellers
#[derive(Clone)]
pub struct VendedorService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl VendedorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateVendedorInput) -> Result<vendedor::Model, ServiceError> {
        input.validate()?;
        let codigo = required(&input.codigo);
        self.ensure_unique_codigo(&codigo, None).await?;

        let model = vendedor::ActiveModel {
            codigo: Set(codigo),
            nombre: Set(required(&input.nombre)),
            email: Set(optional(input.email)),
            telefono: Set(optional(input.telefono)),
            activo: Set(input.activo.unwrap_or(true)),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let created = result.map_err(|e| ServiceError::from_db_write(e, "vendedor"))?;

        self.event_sender
            .send_or_log(Event::VendedorCreated(created.id))
            .await;
        info!(vendedor_id = %created.id, codigo = %created.codigo, "vendedor created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<vendedor::Model, ServiceError> {
        Vendedor::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendedor {} no encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_codigo(&self, codigo: &str) -> Result<vendedor::Model, ServiceError> {
        Vendedor::find()
            .filter(vendedor::Column::Codigo.eq(codigo.trim()))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Vendedor con codigo '{}' no encontrado", codigo))
            })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: VendedorFilter,
        page: PageRequest,
    ) -> Result<Page<vendedor::Model>, ServiceError> {
        let mut query = Vendedor::find();
        if let Some(term) = optional(filter.search) {
            query = query.filter(
                Condition::any()
                    .add(vendedor::Column::Codigo.contains(&term))
                    .add(vendedor::Column::Nombre.contains(&term)),
            );
        }
        if let Some(activo) = filter.activo {
            query = query.filter(vendedor::Column::Activo.eq(activo));
        }

        fetch_page(
            query.order_by_asc(vendedor::Column::Codigo),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateVendedorInput,
    ) -> Result<vendedor::Model, ServiceError> {
        input.validate()?;
        let existing = self.get(id).await?;

        let mut model: vendedor::ActiveModel = existing.into();
        if let Some(codigo) = input.codigo.as_deref().map(required) {
            self.ensure_unique_codigo(&codigo, Some(id)).await?;
            model.codigo = Set(codigo);
        }
        if let Some(nombre) = input.nombre.as_deref() {
            model.nombre = Set(required(nombre));
        }
        if input.email.is_some() {
            model.email = Set(optional(input.email));
        }
        if input.telefono.is_some() {
            model.telefono = Set(optional(input.telefono));
        }
        if let Some(activo) = input.activo {
            model.activo = Set(activo);
        }

        let result = model.update(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let updated = result.map_err(|e| ServiceError::from_db_write(e, "vendedor"))?;

        self.event_sender
            .send_or_log(Event::VendedorUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let result = existing.delete(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result?;

        self.event_sender.send_or_log(Event::VendedorDeleted(id)).await;
        info!(vendedor_id = %id, "vendedor deleted");
        Ok(())
    }

    async fn ensure_unique_codigo(
        &self,
        codigo: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Vendedor::find().filter(vendedor::Column::Codigo.eq(codigo));
        if let Some(id) = exclude_id {
            query = query.filter(vendedor::Column::Id.ne(id));
        }

        if query.one(&*self.db_pool).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "vendedor con codigo '{}' ya existe",
                codigo
            )));
        }
        Ok(())
    }
}
