use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unit used when a stock row is created without one
pub const DEFAULT_UNIDAD: &str = "ud";

/// Quantity of a product held at a store.
///
/// The pair (`producto`, `tienda_id`) is unique; the migration backs it with a
/// compound index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "stocks")]
#[serde(rename_all = "camelCase")]
#[schema(as = Stock)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub producto: Uuid,

    pub tienda_id: String,

    #[sea_orm(column_type = "Decimal(Some((14, 4)))")]
    #[schema(value_type = String, example = "12.5")]
    pub cantidad: Decimal,

    pub unidad: String,

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
            if let ActiveValue::NotSet = active_model.cantidad {
                active_model.cantidad = Set(Decimal::ZERO);
            }
            if let ActiveValue::NotSet = active_model.unidad {
                active_model.unidad = Set(DEFAULT_UNIDAD.to_string());
            }
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
