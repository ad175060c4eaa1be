use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Warehouse or factory location
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "almacenes")]
#[serde(rename_all = "camelCase")]
#[schema(as = Almacen)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Business key, unique across warehouses
    #[sea_orm(unique)]
    pub codigo: String,

    pub nombre: String,

    pub direccion: Option<String>,

    pub telefono: Option<String>,

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
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
