use im::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an item or a team.
pub type EntryId = String;

/// Fresh identifier, never reused.
pub fn new_id() -> EntryId {
    Uuid::new_v4().to_string()
}

/// A single selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntryId,
    pub text: String,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
        }
    }
}

/// A named, ordered pool of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub items: Vector<Item>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            items: Vector::new(),
        }
    }

    pub fn with_items(name: impl Into<String>, items: Vector<Item>) -> Self {
        Self {
            items,
            ..Self::new(name)
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Read-only view of a team for listings: `name (count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: EntryId,
    pub name: String,
    pub item_count: usize,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Item::new("Pizza");
        let b = Item::new("Pizza");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_team_json_shape() {
        let team = Team::with_items("Lunch", Vector::unit(Item::new("Tacos")));
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["name"], "Lunch");
        assert_eq!(json["items"][0]["text"], "Tacos");
        assert!(json["id"].is_string());
    }

    #[test]
    fn test_team_without_items_field_deserializes() {
        let team: Team = serde_json::from_str(r#"{"id":"t1","name":"Solo"}"#).unwrap();
        assert!(team.items.is_empty());
    }
}
