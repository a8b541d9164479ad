use serde::Serialize;
use thiserror::Error;

use super::{EntityId, Person, Pet, Visit};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnerError {
    #[error("Pet identifier must not be null!")]
    MissingPetId,
    #[error("Invalid Pet identifier: {0}")]
    UnknownPet(i32),
}

/// Aggregate root for pets and their visits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: EntityId,
    #[serde(flatten)]
    pub person: Person,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new(
        person: Person,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::Unsaved,
            person,
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Appends the pet only while it is unsaved; persisted pets already belong somewhere.
    pub fn add_pet(&mut self, pet: Pet) {
        if pet.is_new() {
            self.pets.push(pet);
        }
    }

    /// Case-insensitive name lookup. With `ignore_new`, unsaved pets never match.
    pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        self.pets
            .iter()
            .filter(|pet| pet.name.to_lowercase() == name.to_lowercase())
            .find(|pet| !ignore_new || !pet.is_new())
    }

    /// Id lookup over persisted pets only.
    pub fn pet(&self, id: i32) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == EntityId::Persisted(id))
    }

    pub fn pet_mut(&mut self, id: i32) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|pet| pet.id == EntityId::Persisted(id))
    }

    pub fn add_visit(&mut self, pet_id: Option<i32>, visit: Visit) -> Result<(), OwnerError> {
        let pet_id = pet_id.ok_or(OwnerError::MissingPetId)?;
        let pet = self.pet_mut(pet_id).ok_or(OwnerError::UnknownPet(pet_id))?;
        pet.add_visit(visit);
        Ok(())
    }

    pub(crate) fn push_loaded_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn owner() -> Owner {
        Owner::new(
            Person::new("George", "Franklin"),
            "110 W. Liberty St.",
            "Madison",
            "6085551023",
        )
    }

    fn persisted(name: &str, id: i32) -> Pet {
        Pet::new(name).with_id(EntityId::Persisted(id))
    }

    #[test]
    fn new_pet_is_added_and_found_by_name() {
        let mut owner = owner();
        owner.add_pet(Pet::new("Leo"));

        let found = owner.pet_by_name("leo", false).expect("pet added");
        assert_eq!(found.name, "Leo");
    }

    #[test]
    fn persisted_pet_is_not_added() {
        let mut owner = owner();
        owner.add_pet(persisted("Leo", 1));

        assert!(owner.pets().is_empty());
        assert!(owner.pet_by_name("Leo", false).is_none());
    }

    #[test]
    fn ignore_new_skips_unsaved_pets() {
        let mut owner = owner();
        owner.push_loaded_pet(persisted("Basil", 2));
        owner.add_pet(Pet::new("Rosy"));

        assert!(owner.pet_by_name("Rosy", true).is_none());
        assert!(owner.pet_by_name("Rosy", false).is_some());
        assert_eq!(owner.pet_by_name("BASIL", true).map(|p| p.id), Some(EntityId::Persisted(2)));
    }

    #[test]
    fn id_lookup_never_matches_new_pets() {
        let mut owner = owner();
        owner.push_loaded_pet(persisted("Basil", 2));
        owner.add_pet(Pet::new("Rosy"));

        assert_eq!(owner.pet(2).map(|p| p.name.as_str()), Some("Basil"));
        assert!(owner.pet(0).is_none());
        assert!(owner.pet(3).is_none());
    }

    #[test]
    fn visit_requires_pet_id() {
        let mut owner = owner();
        owner.push_loaded_pet(persisted("Basil", 2));

        assert_eq!(owner.add_visit(None, Visit::new("checkup")), Err(OwnerError::MissingPetId));
    }

    #[test]
    fn visit_requires_known_pet() {
        let mut owner = owner();
        owner.push_loaded_pet(persisted("Basil", 2));
        owner.add_pet(Pet::new("Rosy"));

        assert_eq!(owner.add_visit(Some(9), Visit::new("checkup")), Err(OwnerError::UnknownPet(9)));
    }

    #[test]
    fn visit_is_attached_to_pet() {
        let mut owner = owner();
        owner.push_loaded_pet(persisted("Basil", 2));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        owner.add_visit(Some(2), Visit::on(date, "rabies shot")).unwrap();

        let visits = owner.pet(2).unwrap().visits();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].description, "rabies shot");
    }
}
