//! Persistence for the owner aggregate.
//!
//! Owners are always read together with their pets (ordered by name), each
//! pet's type and each pet's visits, and are always written back as a whole
//! inside one transaction.

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{EntityId, Owner, Page, PageRequest, Person, Pet, PetType, Visit};
use crate::entities::{owner, pet, pet_type, visit};

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Owner>, DbErr> {
    let Some(model) = owner::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    Ok(load_aggregates(db, vec![model]).await?.pop())
}

/// Owners whose last name starts with `last_name`, taken literally; an empty
/// prefix matches everyone.
pub async fn find_by_last_name_starting_with(
    db: &DatabaseConnection,
    last_name: &str,
    request: PageRequest,
) -> Result<Page<Owner>, DbErr> {
    let prefix = LikeExpr::new(format!("{}%", escape_like(last_name))).escape('\\');
    let paginator = owner::Entity::find()
        .filter(Expr::col((owner::Entity, owner::Column::LastName)).like(prefix))
        .order_by_asc(owner::Column::Id)
        .paginate(db, request.size);

    let total_elements = paginator.num_items().await?;
    let models = if request.within(total_elements) {
        paginator.fetch_page(request.page).await?
    } else {
        Vec::new()
    };

    Ok(Page {
        content: load_aggregates(db, models).await?,
        request,
        total_elements,
    })
}

/// Writes the owner, its pets and any new visits, then reads the aggregate back
/// so every record carries its assigned id.
pub async fn save(db: &DatabaseConnection, owner: &Owner) -> Result<Owner, DbErr> {
    let txn = db.begin().await?;

    let owner_id = write_owner(&txn, owner).await?;
    for pet in owner.pets() {
        let pet_id = write_pet(&txn, owner_id, pet).await?;
        for new_visit in pet.visits().into_iter().filter(|v| v.is_new()) {
            visit::ActiveModel {
                pet_id: Set(pet_id),
                visit_date: Set(new_visit.date),
                description: Set(new_visit.description.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    tracing::debug!(owner_id, pets = owner.pets().len(), "owner aggregate saved");

    find_by_id(db, owner_id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("owner {owner_id} vanished after save")))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    owner::Entity::find().count(db).await
}

async fn write_owner<C: ConnectionTrait>(db: &C, owner: &Owner) -> Result<i32, DbErr> {
    let mut active = owner::ActiveModel {
        first_name: Set(owner.person.first_name.clone()),
        last_name: Set(owner.person.last_name.clone()),
        address: Set(owner.address.clone()),
        city: Set(owner.city.clone()),
        telephone: Set(owner.telephone.clone()),
        ..Default::default()
    };
    let saved = match owner.id {
        EntityId::Unsaved => active.insert(db).await?,
        EntityId::Persisted(id) => {
            active.id = Set(id);
            active.update(db).await?
        }
    };
    Ok(saved.id)
}

async fn write_pet<C: ConnectionTrait>(db: &C, owner_id: i32, pet: &Pet) -> Result<i32, DbErr> {
    let type_id = pet
        .pet_type
        .as_ref()
        .map(|t| t.id)
        .ok_or_else(|| DbErr::Custom(format!("pet '{}' has no type", pet.name)))?;

    let mut active = pet::ActiveModel {
        name: Set(pet.name.clone()),
        birth_date: Set(pet.birth_date),
        type_id: Set(type_id),
        owner_id: Set(owner_id),
        ..Default::default()
    };
    let saved = match pet.id {
        EntityId::Unsaved => active.insert(db).await?,
        EntityId::Persisted(id) => {
            active.id = Set(id);
            active.update(db).await?
        }
    };
    Ok(saved.id)
}

/// Eagerly loads pets, pet types and visits for a batch of owners.
async fn load_aggregates(
    db: &DatabaseConnection,
    owners: Vec<owner::Model>,
) -> Result<Vec<Owner>, DbErr> {
    if owners.is_empty() {
        return Ok(Vec::new());
    }
    let pets_per_owner = owners
        .load_many(pet::Entity::find().order_by_asc(pet::Column::Name), db)
        .await?;

    let all_pets: Vec<pet::Model> = pets_per_owner.iter().flatten().cloned().collect();
    let (types, visits) = if all_pets.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let types = all_pets.load_one(pet_type::Entity, db).await?;
        let visits = all_pets
            .load_many(
                visit::Entity::find()
                    .order_by_asc(visit::Column::VisitDate)
                    .order_by_asc(visit::Column::Id),
                db,
            )
            .await?;
        (types, visits)
    };

    let mut loaded = types.into_iter().zip(visits);
    let mut aggregates = Vec::with_capacity(owners.len());
    for (model, pets) in owners.into_iter().zip(pets_per_owner) {
        let mut owner = Owner::new(
            Person::new(model.first_name, model.last_name),
            model.address,
            model.city,
            model.telephone,
        );
        owner.id = EntityId::Persisted(model.id);

        for pet_model in pets {
            let (pet_type, visits) = loaded.next().unwrap_or_default();
            owner.push_loaded_pet(to_pet(pet_model, pet_type, visits));
        }
        aggregates.push(owner);
    }
    Ok(aggregates)
}

// `%` and `_` are LIKE wildcards; `\` is the escape character declared above.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_pet(model: pet::Model, pet_type: Option<pet_type::Model>, visits: Vec<visit::Model>) -> Pet {
    let mut pet = Pet::new(model.name).with_id(EntityId::Persisted(model.id));
    pet.birth_date = model.birth_date;
    pet.pet_type = pet_type.map(|t| PetType { id: t.id, name: t.name });

    for v in visits {
        pet.add_visit(Visit {
            id: EntityId::Persisted(v.id),
            date: v.visit_date,
            description: v.description,
        });
    }
    pet
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("Davis"), "Davis");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
