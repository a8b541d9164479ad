use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Html,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::domain::{PageRequest, Vets, PAGE_SIZE};
use crate::error::AppError;
use crate::i18n::Locale;
use crate::repository::vets;
use crate::views::{Flash, ViewModel, Views, VET_LIST};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    page: Option<i64>,
}

pub async fn show_vet_list(
    Extension(db): Extension<DatabaseConnection>,
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let request = PageRequest::from_one_based(query.page.unwrap_or(1), PAGE_SIZE);
    let page = vets::find_all_paginated(&db, request).await?;

    tracing::Span::current()
        .record("table", "vets")
        .record("action", "list_vets");

    let model = ViewModel::new(locale, Flash::take(&cookies))
        .with("listVets", &page.content)
        .with("pagination", page.pagination())
        .with("pageUrl", "/vets.html?page=");
    views.render(VET_LIST, &model)
}

/// Machine-readable vet list, unpaginated.
pub async fn show_resources_vet_list(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<Json<Vets>, AppError> {
    let vet_list = vets::find_all(&db).await?;
    tracing::Span::current()
        .record("table", "vets")
        .record("action", "export_vets");
    Ok(Json(Vets { vet_list }))
}
