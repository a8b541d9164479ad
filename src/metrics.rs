use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::{owner, pet, visit};

/// Seeds the clinic gauges from the current table sizes.
pub async fn init_metrics(db: &DatabaseConnection) {
    let owner_count = owner::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("petclinic_owners_total").set(owner_count as f64);

    let pet_count = pet::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("petclinic_pets_total").set(pet_count as f64);

    let visit_count = visit::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("petclinic_visits_total").set(visit_count as f64);

    tracing::info!(
        "Initialized metrics: Owners={}, Pets={}, Visits={}",
        owner_count,
        pet_count,
        visit_count
    );
}

pub fn increment_owners_created() {
    metrics::counter!("petclinic_owners_created_total").increment(1);
    metrics::gauge!("petclinic_owners_total").increment(1.0);
}

pub fn increment_pets_added() {
    metrics::counter!("petclinic_pets_added_total").increment(1);
    metrics::gauge!("petclinic_pets_total").increment(1.0);
}

pub fn increment_visits_booked() {
    metrics::counter!("petclinic_visits_booked_total").increment(1);
    metrics::gauge!("petclinic_visits_total").increment(1.0);
}
