use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{Html, IntoResponse},
};
use tower_cookies::Cookies;

use crate::error::AppError;
use crate::i18n::Locale;
use crate::views::{Flash, ViewModel, Views, WELCOME};

const STYLESHEET: &str = include_str!("../../resources/petclinic.css");

pub async fn welcome(
    Extension(views): Extension<Arc<Views>>,
    Extension(locale): Extension<Locale>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    views.render(WELCOME, &ViewModel::new(locale, Flash::take(&cookies)))
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Always fails, to show what the error page looks like.
pub async fn trigger_crash() -> Result<Html<String>, AppError> {
    Err(AppError::Crash)
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
