use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    response::{Html, IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use tower_cookies::Cookies;

use super::{load_owner, redirect_to_owner, today};
use crate::domain::validation::VisitForm;
use crate::error::AppError;
use crate::i18n::Locale;
use crate::metrics;
use crate::repository::owners;
use crate::views::{Flash, ViewModel, Views, VISIT_FORM};

pub async fn init_new_visit_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let owner = load_owner(&db, owner_id).await?;
    let pet = owner.pet(pet_id).ok_or(AppError::PetNotFound(pet_id))?;

    let model = ViewModel::new(locale, Flash::take(&cookies))
        .with("owner", &owner)
        .with("pet", pet)
        .with("visit", VisitForm::for_today(today()));
    views.render(VISIT_FORM, &model)
}

/// Books a visit for one of the owner's pets and saves the whole owner.
pub async fn process_new_visit_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<VisitForm>,
) -> Result<Response, AppError> {
    let mut owner = load_owner(&db, owner_id).await?;
    let visit = match form.bind(today()) {
        Ok(visit) => visit,
        Err(errors) => {
            let pet = owner.pet(pet_id).ok_or(AppError::PetNotFound(pet_id))?;
            tracing::Span::current()
                .record("table", "visits")
                .record("action", "book_visit_rejected")
                .record("owner_id", owner_id)
                .record("pet_id", pet_id);
            let model = ViewModel::new(locale, None)
                .with("owner", &owner)
                .with("pet", pet)
                .with("visit", &form)
                .with_errors(&errors);
            return Ok(views.render(VISIT_FORM, &model)?.into_response());
        }
    };

    if owner.pet(pet_id).is_none() {
        return Err(AppError::PetNotFound(pet_id));
    }
    owner.add_visit(Some(pet_id), visit)?;
    let owner = owners::save(&db, &owner).await?;

    tracing::Span::current()
        .record("table", "visits")
        .record("action", "book_visit")
        .record("owner_id", owner_id)
        .record("pet_id", pet_id)
        .record("business_event", "Visit booked");
    metrics::increment_visits_booked();

    Flash::message("flash.visitBooked").set(&cookies);
    Ok(redirect_to_owner(&owner)?.into_response())
}
