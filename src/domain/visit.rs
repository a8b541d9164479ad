use chrono::NaiveDate;
use serde::Serialize;

use super::EntityId;

/// A dated note attached to a pet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub id: EntityId,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    /// A new visit dated today.
    pub fn new(description: impl Into<String>) -> Self {
        Self::on(chrono::Local::now().date_naive(), description)
    }

    pub fn on(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: EntityId::Unsaved,
            date,
            description: description.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }
}
