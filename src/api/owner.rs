use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path, Query},
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::field::display;

use super::{load_owner, redirect_to_owner};
use crate::domain::validation::{FieldErrors, OwnerForm, NOT_FOUND};
use crate::domain::{PageRequest, PAGE_SIZE};
use crate::error::AppError;
use crate::i18n::Locale;
use crate::metrics;
use crate::repository::owners;
use crate::views::{Flash, ViewModel, Views, FIND_OWNERS, OWNERS_LIST, OWNER_DETAILS, OWNER_FORM};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnerSearch {
    last_name: String,
    page: Option<i64>,
}

pub async fn init_creation_form(
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let model = ViewModel::new(locale, Flash::take(&cookies))
        .with("owner", OwnerForm::default())
        .with("isNew", true);
    views.render(OWNER_FORM, &model)
}

pub async fn process_creation_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Form(form): Form<OwnerForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        tracing::Span::current()
            .record("table", "owners")
            .record("action", "create_owner_rejected");
        let model = ViewModel::new(locale, Some(Flash::error("flash.ownerCreateFailed")))
            .with("owner", &form)
            .with("isNew", true)
            .with_errors(&errors);
        return Ok(views.render(OWNER_FORM, &model)?.into_response());
    }

    let owner = owners::save(&db, &form.into_owner()).await?;

    tracing::Span::current()
        .record("table", "owners")
        .record("action", "create_owner")
        .record("owner_id", owner.id.value())
        .record("business_event", "Owner registered");
    metrics::increment_owners_created();

    Flash::message("flash.ownerCreated").set(&cookies);
    Ok(redirect_to_owner(&owner)?.into_response())
}

pub async fn init_find_form(
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let model = ViewModel::new(locale, Flash::take(&cookies)).with("lastName", "");
    views.render(FIND_OWNERS, &model)
}

/// Owner search by last name prefix. A single hit goes straight to the owner;
/// an empty page (no hit, or a page past the last) sends the user back to the search form.
pub async fn process_find_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Query(search): Query<OwnerSearch>,
) -> Result<Response, AppError> {
    let last_name = search.last_name.as_str();
    let request = PageRequest::from_one_based(search.page.unwrap_or(1), PAGE_SIZE);
    let results = owners::find_by_last_name_starting_with(&db, last_name, request).await?;

    tracing::Span::current()
        .record("table", "owners")
        .record("action", "find_owners")
        .record("business_event", display(format!("{} owners matched", results.total_elements)));

    if results.is_empty() {
        let mut errors = FieldErrors::default();
        errors.reject("lastName", NOT_FOUND);
        let model = ViewModel::new(locale, Flash::take(&cookies))
            .with("lastName", last_name)
            .with_errors(&errors);
        return Ok(views.render(FIND_OWNERS, &model)?.into_response());
    }

    if results.total_elements == 1 {
        if let Some(owner) = results.content.first() {
            return Ok(redirect_to_owner(owner)?.into_response());
        }
    }

    let page_url = format!(
        "/owners?{}&page=",
        serde_urlencoded::to_string([("lastName", last_name)]).unwrap_or_default()
    );
    let model = ViewModel::new(locale, Flash::take(&cookies))
        .with("listOwners", &results.content)
        .with("pagination", results.pagination())
        .with("pageUrl", page_url);
    Ok(views.render(OWNERS_LIST, &model)?.into_response())
}

pub async fn show_owner(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path(owner_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let owner = load_owner(&db, owner_id).await?;
    tracing::Span::current()
        .record("table", "owners")
        .record("action", "show_owner")
        .record("owner_id", owner_id);

    let model = ViewModel::new(locale, Flash::take(&cookies)).with("owner", &owner);
    views.render(OWNER_DETAILS, &model)
}

pub async fn init_update_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path(owner_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let owner = load_owner(&db, owner_id).await?;
    let model = ViewModel::new(locale, Flash::take(&cookies))
        .with("owner", OwnerForm::from_owner(&owner))
        .with("isNew", false);
    views.render(OWNER_FORM, &model)
}

pub async fn process_update_form(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Path(owner_id): Path<i32>,
    Form(form): Form<OwnerForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        tracing::Span::current()
            .record("table", "owners")
            .record("action", "update_owner_rejected")
            .record("owner_id", owner_id);
        let model = ViewModel::new(locale, Some(Flash::error("flash.ownerUpdateFailed")))
            .with("owner", &form)
            .with("isNew", false)
            .with_errors(&errors);
        return Ok(views.render(OWNER_FORM, &model)?.into_response());
    }

    if form.id.is_some_and(|id| id != owner_id) {
        tracing::Span::current()
            .record("table", "owners")
            .record("action", "update_owner_rejected")
            .record("owner_id", owner_id)
            .record("error", "owner_id_mismatch");
        Flash::error("flash.ownerIdMismatch").set(&cookies);
        return Ok(Redirect::to(&format!("/owners/{owner_id}/edit")).into_response());
    }

    let mut owner = load_owner(&db, owner_id).await?;
    form.apply_to(&mut owner);
    let owner = owners::save(&db, &owner).await?;

    tracing::Span::current()
        .record("table", "owners")
        .record("action", "update_owner")
        .record("owner_id", owner_id)
        .record("business_event", "Owner updated");

    Flash::message("flash.ownerUpdated").set(&cookies);
    Ok(redirect_to_owner(&owner)?.into_response())
}
