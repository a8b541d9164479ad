#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use petclinic_server::{api, database, sea_orm::DatabaseConnection, views::Views};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `name=value` pairs from every Set-Cookie header, ready to send back.
    pub fn cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::to_string)
            .collect()
    }
}

/// Fresh in-memory database with the seed data, and the full router on top.
pub async fn spawn_app() -> TestApp {
    let db = database::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let views = Arc::new(Views::new().expect("templates compile"));
    TestApp {
        router: api::router(db.clone(), views),
        db,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_cookies(uri, &[]).await
    }

    pub async fn get_with_cookies(&self, uri: &str, cookies: &[String]) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if !cookies.is_empty() {
            request = request.header(header::COOKIE, cookies.join("; "));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).unwrap();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/// Number of owner rows in a rendered owners list.
pub fn owner_rows(body: &str) -> usize {
    body.matches("<td><a href=\"/owners/").count()
}
