use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single line of a supplier order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineaHistorial {
    /// Supplier product code
    pub producto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[schema(value_type = String, example = "4")]
    pub cantidad: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineasHistorial(pub Vec<LineaHistorial>);

impl From<Vec<LineaHistorial>> for LineasHistorial {
    fn from(items: Vec<LineaHistorial>) -> Self {
        LineasHistorial(items)
    }
}

/// Historical log entry of an order a store placed with one supplier.
///
/// Entries are append-only records; duplicates are allowed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "historial_proveedor_individual")]
#[serde(rename_all = "camelCase")]
#[schema(as = HistorialProveedorIndividual)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tienda_id: String,

    pub tienda_nombre: String,

    pub fecha_pedido: DateTime<Utc>,

    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<LineaHistorial>)]
    pub lineas: LineasHistorial,

    pub proveedor: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.id {
                active_model.id = Set(Uuid::new_v4());
            }
            if let ActiveValue::NotSet = active_model.fecha_pedido {
                active_model.fecha_pedido = Set(now);
            }
            if let ActiveValue::NotSet = active_model.lineas {
                active_model.lineas = Set(LineasHistorial::default());
            }
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
