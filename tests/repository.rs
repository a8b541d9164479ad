mod common;

use chrono::NaiveDate;
use common::spawn_app;
use petclinic_server::domain::{
    EntityId, Owner, PageRequest, Person, Pet, Visit, PAGE_SIZE,
};
use petclinic_server::repository::{owners, pet_types, vets};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn saving_a_new_owner_cascades_to_pets_and_visits() {
    let app = spawn_app().await;
    let types = pet_types::find_pet_types(&app.db).await.unwrap();
    let dog = types.iter().find(|t| t.name == "dog").cloned().unwrap();

    let mut owner = Owner::new(
        Person::new("Sam", "Schultz"),
        "4, Evans Street",
        "Wollongong",
        "4444444444",
    );
    let mut pet = Pet::new("Bowser").born(date(2019, 5, 1)).of_type(dog);
    pet.add_visit(Visit::on(date(2020, 1, 1), "vaccination"));
    owner.add_pet(pet);

    let saved = owners::save(&app.db, &owner).await.unwrap();

    assert!(!saved.is_new());
    let bowser = &saved.pets()[0];
    assert!(!bowser.is_new());
    assert_eq!(bowser.visits().len(), 1);
    assert!(!bowser.visits()[0].is_new());
    assert_eq!(owners::count(&app.db).await.unwrap(), 11);
}

#[tokio::test]
async fn saving_twice_does_not_duplicate_visits() {
    let app = spawn_app().await;
    let mut owner = owners::find_by_id(&app.db, 6).await.unwrap().unwrap();
    owner
        .add_visit(Some(8), Visit::on(date(2013, 2, 1), "follow-up"))
        .unwrap();

    let saved = owners::save(&app.db, &owner).await.unwrap();
    let again = owners::save(&app.db, &saved).await.unwrap();

    let max = again.pet(8).unwrap();
    assert_eq!(max.visits().len(), 3);
    assert_eq!(max.visits()[2].description, "follow-up");
}

#[tokio::test]
async fn visits_for_unknown_pets_are_refused() {
    let app = spawn_app().await;
    let mut owner = owners::find_by_id(&app.db, 1).await.unwrap().unwrap();

    assert!(owner.add_visit(None, Visit::new("checkup")).is_err());
    assert!(owner.add_visit(Some(7), Visit::new("checkup")).is_err());
}

#[tokio::test]
async fn pets_load_in_name_order_with_types() {
    let app = spawn_app().await;

    let owner = owners::find_by_id(&app.db, 6).await.unwrap().unwrap();

    let names: Vec<&str> = owner.pets().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Max", "Samantha"]);
    assert!(owner
        .pets()
        .iter()
        .all(|p| p.pet_type.as_ref().map(|t| t.name.as_str()) == Some("cat")));
}

#[tokio::test]
async fn last_name_search_pages_through_matches() {
    let app = spawn_app().await;

    let all = owners::find_by_last_name_starting_with(
        &app.db,
        "",
        PageRequest::from_one_based(2, PAGE_SIZE),
    )
    .await
    .unwrap();
    assert_eq!(all.total_elements, 10);
    assert_eq!(all.total_pages(), 2);
    assert_eq!(all.content[0].id, EntityId::Persisted(6));

    let none = owners::find_by_last_name_starting_with(
        &app.db,
        "Nobody",
        PageRequest::from_one_based(1, PAGE_SIZE),
    )
    .await
    .unwrap();
    assert!(none.is_empty());
    assert_eq!(none.total_pages(), 0);
}

#[tokio::test]
async fn pet_types_come_sorted_by_name() {
    let app = spawn_app().await;

    let names: Vec<String> = pet_types::find_pet_types(&app.db)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(names, vec!["bird", "cat", "dog", "hamster", "lizard", "snake"]);
}

#[tokio::test]
async fn vets_are_paginated_with_specialties() {
    let app = spawn_app().await;

    let all = vets::find_all(&app.db).await.unwrap();
    assert_eq!(all.len(), 6);
    let douglas = &all[2];
    let specialties: Vec<&str> = douglas.specialties().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(specialties, vec!["dentistry", "surgery"]);

    let second = vets::find_all_paginated(&app.db, PageRequest::from_one_based(2, PAGE_SIZE))
        .await
        .unwrap();
    assert_eq!(second.content.len(), 1);
    assert_eq!(second.total_elements, 6);
}

#[tokio::test]
async fn last_name_prefix_is_matched_literally() {
    let app = spawn_app().await;
    let first_page = PageRequest::from_one_based(1, PAGE_SIZE);

    let davis = owners::find_by_last_name_starting_with(&app.db, "Dav", first_page)
        .await
        .unwrap();
    assert_eq!(davis.total_elements, 2);

    for term in ["%", "_", "D_v", "\\"] {
        let found = owners::find_by_last_name_starting_with(&app.db, term, first_page)
            .await
            .unwrap();
        assert_eq!(found.total_elements, 0, "{term}");
    }
}

#[tokio::test]
async fn pages_past_the_end_come_back_empty() {
    let app = spawn_app().await;

    let past = owners::find_by_last_name_starting_with(
        &app.db,
        "",
        PageRequest::from_one_based(i64::MAX, PAGE_SIZE),
    )
    .await
    .unwrap();
    assert!(past.is_empty());
    assert_eq!(past.total_elements, 10);

    let vet_page = vets::find_all_paginated(&app.db, PageRequest::from_one_based(3, PAGE_SIZE))
        .await
        .unwrap();
    assert!(vet_page.content.is_empty());
    assert_eq!(vet_page.total_elements, 6);
}
