use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::domain::PetType;
use crate::entities::pet_type;

/// All pet types, ordered by name for the selection list.
pub async fn find_pet_types(db: &DatabaseConnection) -> Result<Vec<PetType>, DbErr> {
    let types = pet_type::Entity::find()
        .order_by_asc(pet_type::Column::Name)
        .all(db)
        .await?;
    Ok(types
        .into_iter()
        .map(|t| PetType { id: t.id, name: t.name })
        .collect())
}
