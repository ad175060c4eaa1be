use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{self, DbPool},
    entities::historial_proveedor_individual::{
        self, Entity as Historial, LineaHistorial, LineasHistorial,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{fetch_page, optional, required, Page, PageRequest},
};

const COLLECTION: &str = "historial_proveedor_individual";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineaHistorialInput {
    #[validate(custom = "crate::services::not_blank")]
    pub producto: String,
    pub descripcion: Option<String>,
    #[validate(custom = "crate::services::positive")]
    #[schema(value_type = String, example = "4")]
    pub cantidad: Decimal,
    pub unidad: Option<String>,
}

impl From<LineaHistorialInput> for LineaHistorial {
    fn from(input: LineaHistorialInput) -> Self {
        LineaHistorial {
            producto: required(&input.producto),
            descripcion: optional(input.descripcion),
            cantidad: input.cantidad,
            unidad: optional(input.unidad),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistorialInput {
    #[validate(custom = "crate::services::not_blank")]
    pub tienda_id: String,
    #[validate(custom = "crate::services::not_blank")]
    pub tienda_nombre: String,
    #[validate(custom = "crate::services::not_blank")]
    pub proveedor: String,
    /// Defaults to the time of the request
    pub fecha_pedido: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate]
    pub lineas: Vec<LineaHistorialInput>,
}

/// Listing of one store's history, newest order first
#[derive(Debug, Clone, Default)]
pub struct HistorialFilter {
    pub tienda_id: String,
    pub proveedor: Option<String>,
    pub desde: Option<DateTime<Utc>>,
    pub hasta: Option<DateTime<Utc>>,
}

/// Service for the per-store supplier order history
#[derive(Clone)]
pub struct HistorialProveedorService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl HistorialProveedorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Appends an entry. Identical entries are accepted.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CreateHistorialInput,
    ) -> Result<historial_proveedor_individual::Model, ServiceError> {
        input.validate()?;

        let lineas: LineasHistorial = input
            .lineas
            .into_iter()
            .map(LineaHistorial::from)
            .collect::<Vec<_>>()
            .into();

        let model = historial_proveedor_individual::ActiveModel {
            tienda_id: Set(required(&input.tienda_id)),
            tienda_nombre: Set(required(&input.tienda_nombre)),
            proveedor: Set(required(&input.proveedor)),
            fecha_pedido: Set(input.fecha_pedido.unwrap_or_else(Utc::now)),
            lineas: Set(lineas),
            ..Default::default()
        };

        let result = model.insert(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        let created = result?;

        self.event_sender
            .send_or_log(Event::HistorialRecorded {
                historial_id: created.id,
                tienda_id: created.tienda_id.clone(),
                proveedor: created.proveedor.clone(),
                fecha_pedido: created.fecha_pedido,
            })
            .await;
        info!(
            historial_id = %created.id,
            tienda_id = %created.tienda_id,
            lineas = created.lineas.0.len(),
            "historial entry recorded"
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<historial_proveedor_individual::Model, ServiceError> {
        Historial::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Historial {} no encontrado", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_for_tienda(
        &self,
        filter: HistorialFilter,
        page: PageRequest,
    ) -> Result<Page<historial_proveedor_individual::Model>, ServiceError> {
        let tienda_id = required(&filter.tienda_id);
        if tienda_id.is_empty() {
            return Err(ServiceError::ValidationError(
                "tiendaId: must not be blank".to_string(),
            ));
        }
        if let (Some(desde), Some(hasta)) = (filter.desde, filter.hasta) {
            if desde > hasta {
                return Err(ServiceError::InvalidInput(
                    "desde must not be later than hasta".to_string(),
                ));
            }
        }

        let mut query = Historial::find()
            .filter(historial_proveedor_individual::Column::TiendaId.eq(tienda_id));
        if let Some(proveedor) = optional(filter.proveedor) {
            query = query.filter(historial_proveedor_individual::Column::Proveedor.eq(proveedor));
        }
        if let Some(desde) = filter.desde {
            query = query.filter(historial_proveedor_individual::Column::FechaPedido.gte(desde));
        }
        if let Some(hasta) = filter.hasta {
            query = query.filter(historial_proveedor_individual::Column::FechaPedido.lte(hasta));
        }

        fetch_page(
            query
                .order_by_desc(historial_proveedor_individual::Column::FechaPedido)
                .order_by_desc(historial_proveedor_individual::Column::CreatedAt),
            &self.db_pool,
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let result = existing.delete(&*self.db_pool).await;
        db::record_write(COLLECTION, result.is_ok());
        result?;

        self.event_sender
            .send_or_log(Event::HistorialDeleted(id))
            .await;
        Ok(())
    }
}
