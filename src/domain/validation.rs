//! Form binding and validation rules.
//!
//! Validation failures are collected as [`FieldErrors`] (field name to message
//! code) so handlers can redisplay the form. They never become `AppError`s.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::{EntityId, Owner, Person, PetType, Visit};
use crate::i18n::Locale;

pub const REQUIRED: &str = "required";
pub const NOT_FOUND: &str = "notFound";
pub const DUPLICATE: &str = "duplicate";
pub const TELEPHONE_INVALID: &str = "telephone.invalid";
pub const TYPE_MISMATCH: &str = "typeMismatch";
pub const TYPE_MISMATCH_DATE: &str = "typeMismatch.date";
pub const TYPE_MISMATCH_BIRTH_DATE: &str = "typeMismatch.birthDate";

const DATE_FORMAT: &str = "%Y-%m-%d";

static TELEPHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid telephone pattern"));

/// First rejection per field, keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn reject(&mut self, field: &'static str, code: &'static str) {
        self.0.entry(field).or_insert(code);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Error messages for display, translated into `locale`.
    pub fn localized(&self, locale: Locale) -> BTreeMap<&'static str, &'static str> {
        self.0
            .iter()
            .map(|(field, code)| (*field, locale.message(*code)))
            .collect()
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

// Hidden id inputs arrive as empty strings on forms for new records.
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnerForm {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerForm {
    pub fn from_owner(owner: &Owner) -> Self {
        Self {
            id: owner.id.value(),
            first_name: owner.person.first_name.clone(),
            last_name: owner.person.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("telephone", &self.telephone),
        ] {
            if blank(value) {
                errors.reject(field, REQUIRED);
            }
        }
        if !blank(&self.telephone) && !TELEPHONE.is_match(&self.telephone) {
            errors.reject("telephone", TELEPHONE_INVALID);
        }
        errors
    }

    /// Copies the form's values onto `owner`, leaving its identity and pets alone.
    pub fn apply_to(&self, owner: &mut Owner) {
        owner.person = Person::new(self.first_name.trim(), self.last_name.trim());
        owner.address = self.address.trim().to_string();
        owner.city = self.city.trim().to_string();
        owner.telephone = self.telephone.trim().to_string();
    }

    pub fn into_owner(self) -> Owner {
        let mut owner = Owner::default();
        self.apply_to(&mut owner);
        owner
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetForm {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: String,
    #[serde(rename = "type")]
    pub pet_type: String,
}

/// Values bound from a [`PetForm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetInput {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
}

impl PetForm {
    pub fn from_pet(pet: &super::Pet) -> Self {
        Self {
            id: pet.id.value(),
            name: pet.name.clone(),
            birth_date: pet
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            pet_type: pet.pet_type.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        }
    }

    /// Parses the submitted values and applies the required-field rules.
    /// The type is only required for a pet that has not been saved yet.
    pub fn bind(&self, types: &[PetType], is_new: bool) -> (PetInput, FieldErrors) {
        let mut errors = FieldErrors::default();

        let birth_date = if blank(&self.birth_date) {
            errors.reject("birthDate", REQUIRED);
            None
        } else {
            match NaiveDate::parse_from_str(self.birth_date.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.reject("birthDate", TYPE_MISMATCH_BIRTH_DATE);
                    None
                }
            }
        };

        let pet_type = if blank(&self.pet_type) {
            if is_new {
                errors.reject("type", REQUIRED);
            }
            None
        } else {
            let parsed = PetType::parse(self.pet_type.trim(), types).cloned();
            if parsed.is_none() {
                errors.reject("type", TYPE_MISMATCH);
            }
            parsed
        };

        if blank(&self.name) {
            errors.reject("name", REQUIRED);
        }

        let input = PetInput {
            name: self.name.trim().to_string(),
            birth_date,
            pet_type,
        };
        (input, errors)
    }
}

/// Creating a pet: only persisted siblings can clash with the new name.
pub fn check_new_pet_name(owner: &Owner, name: &str, errors: &mut FieldErrors) {
    if !blank(name) && owner.pet_by_name(name, true).is_some() {
        errors.reject("name", DUPLICATE);
    }
}

/// Editing a pet: any sibling with the name clashes unless it is the edited pet itself.
pub fn check_edited_pet_name(owner: &Owner, pet_id: i32, name: &str, errors: &mut FieldErrors) {
    if blank(name) {
        return;
    }
    if let Some(existing) = owner.pet_by_name(name, false) {
        if existing.id != EntityId::Persisted(pet_id) {
            errors.reject("name", DUPLICATE);
        }
    }
}

pub fn check_birth_date(birth_date: Option<NaiveDate>, today: NaiveDate, errors: &mut FieldErrors) {
    if birth_date.is_some_and(|date| date > today) {
        errors.reject("birthDate", TYPE_MISMATCH_BIRTH_DATE);
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VisitForm {
    pub date: String,
    pub description: String,
}

impl VisitForm {
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            description: String::new(),
        }
    }

    /// Binds a new visit. A blank date means today.
    pub fn bind(&self, today: NaiveDate) -> Result<Visit, FieldErrors> {
        let mut errors = FieldErrors::default();
        let date = if blank(&self.date) {
            Some(today)
        } else {
            NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
        };
        if date.is_none() {
            errors.reject("date", TYPE_MISMATCH_DATE);
        }
        if blank(&self.description) {
            errors.reject("description", REQUIRED);
        }
        match date {
            Some(date) if errors.is_empty() => Ok(Visit::on(date, self.description.trim())),
            _ => Err(errors),
        }
    }
}
