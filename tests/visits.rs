mod common;

use axum::http::StatusCode;
use chrono::Local;
use common::spawn_app;
use petclinic_server::repository::owners;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn visit_form_shows_the_pet_and_its_history() {
    let app = spawn_app().await;

    let response = app.get("/owners/6/pets/7/visits/new").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Samantha"));
    assert!(response.body.contains("Jean Coleman"));
    assert!(response.body.contains("rabies shot"));
    assert!(response.body.contains("spayed"));
    let today = Local::now().date_naive().to_string();
    assert!(response.body.contains(&format!("value=\"{today}\"")));
}

#[tokio::test]
async fn booking_a_visit_adds_it_to_the_pet() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/owners/6/pets/7/visits/new",
            &[("date", "2013-01-02"), ("description", "checkup")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/owners/6"));

    let owner = owners::find_by_id(&app.db, 6).await.unwrap().unwrap();
    let descriptions: Vec<&str> = owner
        .pet(7)
        .unwrap()
        .visits()
        .into_iter()
        .map(|v| v.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["rabies shot", "checkup", "spayed"]);

    let details = app.get_with_cookies("/owners/6", &response.cookies()).await;
    assert!(details.body.contains("Your visit has been booked"));
}

#[tokio::test]
async fn blank_date_books_the_visit_for_today() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/owners/1/pets/1/visits/new",
            &[("date", ""), ("description", "first visit")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let owner = owners::find_by_id(&app.db, 1).await.unwrap().unwrap();
    let visits = owner.pet(1).unwrap().visits();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].date, Local::now().date_naive());
}

#[tokio::test]
async fn visit_needs_a_description_and_a_real_date() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/owners/6/pets/7/visits/new",
            &[("date", "yesterday"), ("description", " ")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("is required"));
    assert!(response.body.contains("invalid date"));

    let owner = owners::find_by_id(&app.db, 6).await.unwrap().unwrap();
    assert_eq!(owner.pet(7).unwrap().visits().len(), 2);
}

#[tokio::test]
async fn visit_for_another_owners_pet_is_not_found() {
    let app = spawn_app().await;

    let form = app.get("/owners/1/pets/7/visits/new").await;
    assert_eq!(form.status, StatusCode::NOT_FOUND);

    let booking = app
        .post_form(
            "/owners/1/pets/7/visits/new",
            &[("date", "2013-01-02"), ("description", "checkup")],
        )
        .await;
    assert_eq!(booking.status, StatusCode::NOT_FOUND);
}
