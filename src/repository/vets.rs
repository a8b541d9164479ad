use sea_orm::{DatabaseConnection, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryOrder};

use crate::domain::{EntityId, Page, PageRequest, Person, Specialty, Vet};
use crate::entities::{specialty, vet, vet_specialty};

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Vet>, DbErr> {
    let models = vet::Entity::find()
        .order_by_asc(vet::Column::Id)
        .all(db)
        .await?;
    with_specialties(db, models).await
}

pub async fn find_all_paginated(
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<Vet>, DbErr> {
    let paginator = vet::Entity::find()
        .order_by_asc(vet::Column::Id)
        .paginate(db, request.size);

    let total_elements = paginator.num_items().await?;
    let models = if request.within(total_elements) {
        paginator.fetch_page(request.page).await?
    } else {
        Vec::new()
    };

    Ok(Page {
        content: with_specialties(db, models).await?,
        request,
        total_elements,
    })
}

async fn with_specialties(db: &DatabaseConnection, models: Vec<vet::Model>) -> Result<Vec<Vet>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let specialties = models
        .load_many_to_many(specialty::Entity, vet_specialty::Entity, db)
        .await?;

    Ok(models
        .into_iter()
        .zip(specialties)
        .map(|(model, specialties)| {
            Vet::new(
                EntityId::Persisted(model.id),
                Person::new(model.first_name, model.last_name),
                specialties
                    .into_iter()
                    .map(|s| Specialty { id: s.id, name: s.name })
                    .collect(),
            )
        })
        .collect())
}
