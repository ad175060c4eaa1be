use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product as known to the Sage accounting system
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "productos_sage")]
#[serde(rename_all = "camelCase")]
#[schema(as = ProductoSage)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Internal product code, unique
    #[sea_orm(unique)]
    pub codigo: String,

    /// Code of the same article inside Sage
    pub codigo_sage: Option<String>,

    pub nombre: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub descripcion: Option<String>,

    /// Unit price, never negative
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub precio: Decimal,

    pub activo: bool,

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
            if let ActiveValue::NotSet = active_model.activo {
                active_model.activo = Set(true);
            }
            if let ActiveValue::NotSet = active_model.precio {
                active_model.precio = Set(Decimal::ZERO);
            }
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
