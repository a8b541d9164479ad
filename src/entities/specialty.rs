use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "specialties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::vet::Entity> for Entity {
    fn to() -> RelationDef {
        super::vet_specialty::Relation::Vet.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::vet_specialty::Relation::Specialty.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
