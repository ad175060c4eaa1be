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
    entities::forma_pago::{self, Entity as FormaPago},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "formas_pago";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormaPagoInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: String,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: String,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormaPagoInput {
    #[validate(custom = "crate::services::not_blank")]
    pub codigo: Option<String>,
    #[validate(custom = "crate::services::not_blank")]
    pub nombre: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct FormaPagoFilter {
    pub search: Option<String>,
    pub activo: Option<bool>,
}

/// Service for managing payment methods
#[derive(Clone)]
pub struct FormaPagoService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl FormaPagoService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CreateFormaPagoInput,
    ) -> Result<forma_pago::Model, ServiceError> {
        input.validate()?;
        let codigo = required(&input.codigo);
        self.ensure_unique_codigo(&codigo, None).await?;

        let model = forma_pago::ActiveModel {
            codigo: Set(codigo),
            nombre: Set(required(&input.nombre)),
            activo: Set(input.activo.unwrap_or(true)),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let created = result.map_err(|e| ServiceError::from_db_write(e, "forma de pago"))?;

        self.event_sender
            .send_or_log(Event::FormaPagoCreated(created.id))
            .await;
        info!(forma_pago_id = %created.id, codigo = %created.codigo, "forma de pago created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<forma_pago::Model, ServiceError> {
        FormaPago::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Forma de pago {} no encontrada", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_codigo(&self, codigo: &str) -> Result<forma_pago::Model, ServiceError> {
        FormaPago::find()
            .filter(forma_pago::Column::Codigo.eq(codigo.trim()))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Forma de pago con codigo '{}' no encontrada",
                    codigo
                ))
            })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: FormaPagoFilter,
        page: PageRequest,
    ) -> Result<Page<forma_pago::Model>, ServiceError> {
        let mut query = FormaPago::find();
        if let Some(term) = optional(filter.search) {
            query = query.filter(
                Condition::any()
                    .add(forma_pago::Column::Codigo.contains(&term))
                    .add(forma_pago::Column::Nombre.contains(&term)),
            );
        }
        if let Some(activo) = filter.activo {
            query = query.filter(forma_pago::Column::Activo.eq(activo));
        }

        fetch_page(
            query.order_by_asc(forma_pago::Column::Codigo),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateFormaPagoInput,
    ) -> Result<forma_pago::Model, ServiceError> {
        input.validate()?;
        let existing = self.get(id).await?;

        let mut model: forma_pago::ActiveModel = existing.into();
        if let Some(codigo) = input.codigo.as_deref().map(required) {
            self.ensure_unique_codigo(&codigo, Some(id)).await?;
            model.codigo = Set(codigo);
        }
        if let Some(nombre) = input.nombre.as_deref() {
            model.nombre = Set(required(nombre));
        }
        if let Some(activo) = input.activo {
            model.activo = Set(activo);
        }

        let result = model.update(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let updated = result.map_err(|e| ServiceError::from_db_write(e, "forma de pago"))?;

        self.event_sender
            .send_or_log(Event::FormaPagoUpdated(updated.id))
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
            .send_or_log(Event::FormaPagoDeleted(id))
            .await;
        info!(forma_pago_id = %id, "forma de pago deleted");
        Ok(())
    }

    async fn ensure_unique_codigo(
        &self,
        codigo: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = FormaPago::find().filter(forma_pago::Column::Codigo.eq(codigo));
        if let Some(id) = exclude_id {
            query = query.filter(forma_pago::Column::Id.ne(id));
        }

        if query.one(&*self.db_pool).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "forma de pago con codigo '{}' ya existe",
                codigo
            )));
        }
        Ok(())
    }
}
