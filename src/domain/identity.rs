use serde::{Serialize, Serializer};

/// Identity of a domain record.
///
/// A record starts out `Unsaved` and only the repository moves it to
/// `Persisted` when the owning aggregate is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityId {
    #[default]
    Unsaved,
    Persisted(i32),
}

impl EntityId {
    pub fn is_new(&self) -> bool {
        matches!(self, EntityId::Unsaved)
    }

    pub fn value(&self) -> Option<i32> {
        match self {
            EntityId::Unsaved => None,
            EntityId::Persisted(id) => Some(*id),
        }
    }
}

impl From<i32> for EntityId {
    fn from(id: i32) -> Self {
        EntityId::Persisted(id)
    }
}

// Views and JSON consumers see a plain nullable id.
impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// First and last name shared by owners and vets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_is_new_and_has_no_value() {
        assert!(EntityId::Unsaved.is_new());
        assert_eq!(EntityId::Unsaved.value(), None);
        assert!(!EntityId::Persisted(7).is_new());
        assert_eq!(EntityId::from(7).value(), Some(7));
    }

    #[test]
    fn serializes_as_nullable_number() {
        assert_eq!(serde_json::to_string(&EntityId::Unsaved).unwrap(), "null");
        assert_eq!(serde_json::to_string(&EntityId::Persisted(3)).unwrap(), "3");
    }
}
