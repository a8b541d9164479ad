use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

use super::{EntityId, Visit};

/// Reference data naming the kind of animal (cat, dog, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PetType {
    pub id: i32,
    pub name: String,
}

impl PetType {
    /// Resolves a submitted type name against the known types. Matching is exact.
    pub fn parse<'a>(text: &str, types: &'a [PetType]) -> Option<&'a PetType> {
        types.iter().find(|t| t.name == text)
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    #[serde(serialize_with = "by_date")]
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::Unsaved,
            name: name.into(),
            birth_date: None,
            pet_type: None,
            visits: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn born(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn of_type(mut self, pet_type: PetType) -> Self {
        self.pet_type = Some(pet_type);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    /// Adds a visit unless a persisted visit with the same id is already present.
    pub fn add_visit(&mut self, visit: Visit) {
        let already_present = !visit.is_new() && self.visits.iter().any(|v| v.id == visit.id);
        if !already_present {
            self.visits.push(visit);
        }
    }

    /// Visits in ascending date order; visits on the same day keep insertion order.
    pub fn visits(&self) -> Vec<&Visit> {
        sorted_by_date(&self.visits)
    }
}

fn sorted_by_date(visits: &[Visit]) -> Vec<&Visit> {
    let mut sorted: Vec<&Visit> = visits.iter().collect();
    sorted.sort_by_key(|v| v.date);
    sorted
}

fn by_date<S: Serializer>(visits: &[Visit], serializer: S) -> Result<S::Ok, S::Error> {
    sorted_by_date(visits).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn visits_read_back_in_date_order() {
        let mut pet = Pet::new("Leo");
        pet.add_visit(Visit::on(day(9), "rabies shot"));
        pet.add_visit(Visit::on(day(2), "neutered"));
        pet.add_visit(Visit::on(day(9), "spayed"));

        let descriptions: Vec<&str> = pet.visits().iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, vec!["neutered", "rabies shot", "spayed"]);
    }

    #[test]
    fn persisted_visit_is_not_added_twice() {
        let mut pet = Pet::new("Leo");
        let mut visit = Visit::on(day(1), "checkup");
        visit.id = EntityId::Persisted(4);
        pet.add_visit(visit.clone());
        pet.add_visit(visit);
        pet.add_visit(Visit::on(day(1), "checkup"));

        assert_eq!(pet.visits().len(), 2);
    }

    #[test]
    fn serialized_visits_are_sorted() {
        let mut pet = Pet::new("Leo");
        pet.add_visit(Visit::on(day(5), "later"));
        pet.add_visit(Visit::on(day(1), "earlier"));

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["visits"][0]["description"], "earlier");
        assert_eq!(json["visits"][1]["description"], "later");
        assert_eq!(json["id"], serde_json::Value::Null);
    }

    #[test]
    fn type_parses_by_exact_name() {
        let types = vec![
            PetType { id: 1, name: "cat".into() },
            PetType { id: 2, name: "dog".into() },
        ];
        assert_eq!(PetType::parse("dog", &types).map(|t| t.id), Some(2));
        assert!(PetType::parse("Dog", &types).is_none());
        assert_eq!(types[0].to_string(), "cat");
    }
}
