use serde::Serialize;

use super::{EntityId, Person};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vet {
    pub id: EntityId,
    pub person: Person,
    specialties: Vec<Specialty>,
}

impl Vet {
    pub fn new(id: EntityId, person: Person, mut specialties: Vec<Specialty>) -> Self {
        specialties.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            id,
            person,
            specialties,
        }
    }

    /// Specialties sorted by name.
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }
}

impl Serialize for Vet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Vet", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("firstName", &self.person.first_name)?;
        state.serialize_field("lastName", &self.person.last_name)?;
        state.serialize_field("specialties", &self.specialties)?;
        state.serialize_field("nrOfSpecialties", &self.nr_of_specialties())?;
        state.end()
    }
}

/// Wrapper for the machine-readable vet list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vets {
    pub vet_list: Vec<Vet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialties_are_sorted_and_counted() {
        let vet = Vet::new(
            EntityId::Persisted(3),
            Person::new("Linda", "Douglas"),
            vec![
                Specialty { id: 2, name: "surgery".into() },
                Specialty { id: 3, name: "dentistry".into() },
            ],
        );

        let json = serde_json::to_value(Vets { vet_list: vec![vet] }).unwrap();
        let vet = &json["vetList"][0];
        assert_eq!(vet["firstName"], "Linda");
        assert_eq!(vet["nrOfSpecialties"], 2);
        assert_eq!(vet["specialties"][0]["name"], "dentistry");
        assert_eq!(vet["specialties"][1]["name"], "surgery");
    }
}
