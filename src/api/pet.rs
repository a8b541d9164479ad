use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    response::{Html, IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use tower_cookies::Cookies;

use super::{load_owner, redirect_to_owner, today};
use crate::domain::validation::{
    check_birth_date, check_edited_pet_name, check_new_pet_name, FieldErrors, PetForm,
};
use crate::domain::{Owner, Pet, PetType};
use crate::error::AppError;
use crate::i18n::Locale;
use crate::metrics;
use crate::repository::{owners, pet_types};
use crate::views::{Flash, ViewModel, Views, PET_FORM};

fn pet_form_view(
    views: &Views,
    model: ViewModel,
    owner: &Owner,
    form: &PetForm,
    types: &[PetType],
    is_new: bool,
) -> Result<Html<String>, AppError> {
    let model = model
        .with("owner", owner)
        .with("pet", form)
        .with("types", types)
        .with("isNew", is_new);
    views.render(PET_FORM, &model)
}

pub async fn init_creation_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path(owner_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let owner = load_owner(&db, owner_id).await?;
    let types = pet_types::find_pet_types(&db).await?;
    let model = ViewModel::new(locale, Flash::take(&cookies));
    pet_form_view(&views, model, &owner, &PetForm::default(), &types, true)
}

pub async fn process_creation_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path(owner_id): Path<i32>,
    Form(form): Form<PetForm>,
) -> Result<Response, AppError> {
    let mut owner = load_owner(&db, owner_id).await?;
    let types = pet_types::find_pet_types(&db).await?;

    let (input, mut errors) = form.bind(&types, true);
    check_new_pet_name(&owner, &input.name, &mut errors);
    check_birth_date(input.birth_date, today(), &mut errors);

    if !errors.is_empty() {
        tracing::Span::current()
            .record("table", "pets")
            .record("action", "create_pet_rejected")
            .record("owner_id", owner_id);
        return rerender(&views, locale, &owner, &form, &types, true, &errors);
    }

    let mut pet = Pet::new(input.name);
    pet.birth_date = input.birth_date;
    pet.pet_type = input.pet_type;
    owner.add_pet(pet);
    let owner = owners::save(&db, &owner).await?;

    tracing::Span::current()
        .record("table", "pets")
        .record("action", "create_pet")
        .record("owner_id", owner_id)
        .record("business_event", "Pet added");
    metrics::increment_pets_added();

    Flash::message("flash.petAdded").set(&cookies);
    Ok(redirect_to_owner(&owner)?.into_response())
}

pub async fn init_update_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let owner = load_owner(&db, owner_id).await?;
    let pet = owner.pet(pet_id).ok_or(AppError::PetNotFound(pet_id))?;
    let types = pet_types::find_pet_types(&db).await?;
    let model = ViewModel::new(locale, Flash::take(&cookies));
    pet_form_view(&views, model, &owner, &PetForm::from_pet(pet), &types, false)
}

pub async fn process_update_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<PetForm>,
) -> Result<Response, AppError> {
    let mut owner = load_owner(&db, owner_id).await?;
    if owner.pet(pet_id).is_none() {
        return Err(AppError::PetNotFound(pet_id));
    }
    let types = pet_types::find_pet_types(&db).await?;

    let (input, mut errors) = form.bind(&types, false);
    check_edited_pet_name(&owner, pet_id, &input.name, &mut errors);
    check_birth_date(input.birth_date, today(), &mut errors);

    if !errors.is_empty() {
        tracing::Span::current()
            .record("table", "pets")
            .record("action", "update_pet_rejected")
            .record("owner_id", owner_id)
            .record("pet_id", pet_id);
        let form = PetForm {
            id: Some(pet_id),
            ..form
        };
        return rerender(&views, locale, &owner, &form, &types, false, &errors);
    }

    let pet = owner.pet_mut(pet_id).ok_or(AppError::PetNotFound(pet_id))?;
    pet.name = input.name;
    pet.birth_date = input.birth_date;
    if let Some(pet_type) = input.pet_type {
        pet.pet_type = Some(pet_type);
    }
    let owner = owners::save(&db, &owner).await?;

    tracing::Span::current()
        .record("table", "pets")
        .record("action", "update_pet")
        .record("owner_id", owner_id)
        .record("pet_id", pet_id)
        .record("business_event", "Pet edited");

    Flash::message("flash.petEdited").set(&cookies);
    Ok(redirect_to_owner(&owner)?.into_response())
}

fn rerender(
    views: &Views,
    locale: Locale,
    owner: &Owner,
    form: &PetForm,
    types: &[PetType],
    is_new: bool,
    errors: &FieldErrors,
) -> Result<Response, AppError> {
    let model = ViewModel::new(locale, None).with_errors(errors);
    Ok(pet_form_view(views, model, owner, form, types, is_new)?.into_response())
}
