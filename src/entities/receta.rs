use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One component of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingrediente {
    /// Id of the ingredient product
    pub producto: Uuid,
    /// Quantity per unit of the final product, strictly positive
    #[schema(value_type = String, example = "0.250")]
    pub cantidad: Decimal,
    pub unidad: String,
}

/// Ingredient list stored as a single JSON column
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Ingredientes(pub Vec<Ingrediente>);

impl From<Vec<Ingrediente>> for Ingredientes {
    fn from(items: Vec<Ingrediente>) -> Self {
        Ingredientes(items)
    }
}

/// Recipe mapping a finished product to its ingredients
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "recetas")]
#[serde(rename_all = "camelCase")]
#[schema(as = Receta)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub nombre: String,

    pub producto_final: Uuid,

    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<Ingrediente>)]
    pub ingredientes: Ingredientes,

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
            if let ActiveValue::NotSet = active_model.ingredientes {
                active_model.ingredientes = Set(Ingredientes::default());
            }
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
