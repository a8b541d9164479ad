mod common;

use axum::http::{header, StatusCode};
use common::spawn_app;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn vets_resource_lists_every_vet() {
    let app = spawn_app().await;

    let response = app.get("/vets").await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.headers.get(header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type, "application/json");

    let body: Value = serde_json::from_str(&response.body).unwrap();
    let vets = body["vetList"].as_array().unwrap();
    assert_eq!(vets.len(), 6);
    assert_eq!(
        vets[2],
        json!({
            "id": 3,
            "firstName": "Linda",
            "lastName": "Douglas",
            "specialties": [
                { "id": 3, "name": "dentistry" },
                { "id": 2, "name": "surgery" }
            ],
            "nrOfSpecialties": 2
        })
    );
    assert_eq!(vets[0]["nrOfSpecialties"], 0);
}

#[tokio::test]
async fn vet_page_is_paginated() {
    let app = spawn_app().await;

    let first = app.get("/vets.html").await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body.contains("James Carter"));
    assert!(first.body.contains("none"));
    assert!(!first.body.contains("Sharon Jenkins"));
    assert!(first.body.contains("href=\"/vets.html?page=2\""));

    let second = app.get("/vets.html?page=2").await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.body.contains("Sharon Jenkins"));
    assert!(!second.body.contains("James Carter"));
}

#[tokio::test]
async fn vet_page_lists_specialties() {
    let app = spawn_app().await;

    let response = app.get("/vets.html").await;

    assert!(response.body.contains("dentistry surgery"));
    assert!(response.body.contains("radiology"));
}

#[tokio::test]
async fn huge_page_number_renders_an_empty_vet_page() {
    let app = spawn_app().await;

    let response = app.get("/vets.html?page=9223372036854775807").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("James Carter"));
    assert!(!response.body.contains("Sharon Jenkins"));
}
