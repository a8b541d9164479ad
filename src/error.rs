use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::domain::OwnerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Owner not found with id: {0}. Please ensure the ID is correct and the owner exists in the database.")]
    OwnerNotFound(i32),

    #[error("Pet not found with id: {0}. Please ensure the ID is correct.")]
    PetNotFound(i32),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Expected: controller used to showcase what happens when an exception is thrown")]
    Crash,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl From<OwnerError> for AppError {
    fn from(err: OwnerError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::OwnerNotFound(_) | AppError::PetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Crash | AppError::Database(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        tracing::Span::current().record("error", tracing::field::display(&self));

        (status, Html(error_page(status, &self.to_string()))).into_response()
    }
}

// Rendered without the template registry so that template failures still produce a page.
fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>PetClinic :: Error</title>
    <link rel="stylesheet" href="/resources/petclinic.css">
</head>
<body>
    <div class="container">
        <h2>Something happened...</h2>
        <p class="status">{status}</p>
        <p class="message">{message}</p>
        <p><a href="/">Home</a></p>
    </div>
</body>
</html>
"#,
        status = status,
        message = handlebars::html_escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_the_id() {
        let err = AppError::OwnerNotFound(42);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn owner_errors_are_invalid_arguments() {
        let err: AppError = OwnerError::UnknownPet(3).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_page_escapes_the_message() {
        let page = error_page(StatusCode::BAD_REQUEST, "<script>");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
