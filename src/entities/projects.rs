//! SeaORM Entity for projects table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub number: String,
    pub name: String,
    pub basin: String,
    pub crew: Option<String>,
    /// `ProjectConfiguration` as JSON text
    #[sea_orm(column_type = "Text")]
    pub configuration: String,
    /// Selected `Personnel` as JSON text
    #[sea_orm(column_type = "Text")]
    pub personnel: String,
    pub selected_completion_type: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wells::Entity")]
    Wells,
    #[sea_orm(has_many = "super::operations::Entity")]
    Operations,
}

impl Related<super::wells::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wells.def()
    }
}

impl Related<super::operations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
