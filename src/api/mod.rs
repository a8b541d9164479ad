use std::sync::Arc;

use axum::{middleware, response::Redirect, routing::get, Extension, Router};
use sea_orm::{DatabaseConnection, DbErr};
use tower_cookies::CookieManagerLayer;

use crate::domain::Owner;
use crate::error::AppError;
use crate::i18n::locale_middleware;
use crate::repository::owners;
use crate::views::Views;

pub mod owner;
pub mod pet;
pub mod system;
pub mod vet;
pub mod visit;

/// Every clinic route. The server binary wraps this with tracing and Prometheus.
pub fn router(db: DatabaseConnection, views: Arc<Views>) -> Router {
    Router::new()
        .route("/", get(system::welcome))
        .route("/health", get(system::health_check))
        .route("/oups", get(system::trigger_crash))
        .route("/resources/petclinic.css", get(system::stylesheet))
        .route(
            "/owners/new",
            get(owner::init_creation_form).post(owner::process_creation_form),
        )
        .route("/owners/find", get(owner::init_find_form))
        .route("/owners", get(owner::process_find_form))
        .route("/owners/:owner_id", get(owner::show_owner))
        .route(
            "/owners/:owner_id/edit",
            get(owner::init_update_form).post(owner::process_update_form),
        )
        .route(
            "/owners/:owner_id/pets/new",
            get(pet::init_creation_form).post(pet::process_creation_form),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/edit",
            get(pet::init_update_form).post(pet::process_update_form),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/visits/new",
            get(visit::init_new_visit_form).post(visit::process_new_visit_form),
        )
        .route("/vets.html", get(vet::show_vet_list))
        .route("/vets", get(vet::show_resources_vet_list))
        .layer(middleware::from_fn(locale_middleware))
        .layer(Extension(db))
        .layer(Extension(views))
        .layer(CookieManagerLayer::new())
}

pub(crate) async fn load_owner(db: &DatabaseConnection, owner_id: i32) -> Result<Owner, AppError> {
    owners::find_by_id(db, owner_id)
        .await?
        .ok_or(AppError::OwnerNotFound(owner_id))
}

pub(crate) fn redirect_to_owner(owner: &Owner) -> Result<Redirect, AppError> {
    let id = owner.id.value().ok_or(DbErr::RecordNotInserted)?;
    Ok(Redirect::to(&format!("/owners/{id}")))
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
