//! Answer Store: the mapping from question keys to user-entered text.
//!
//! Each recognized input field has exactly one backing key. Values are
//! overwritten verbatim on every input event; nothing is trimmed or
//! validated, and nothing is persisted across sessions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The fixed set of question keys, one per input field.
///
/// Serialized names match the original field ids so the CLI event wire
/// format can address fields the way the markup did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerKey {
    WorksheetName,
    Closest,
    Furthest,
    RedBall,
    Curtain,
    Sunlight,
    Owner,
    HidingSpot,
    Surprised,
    LikedPlace,
    Wish,
}

impl AnswerKey {
    /// All keys in field order.
    pub fn all() -> [AnswerKey; 11] {
        [
            AnswerKey::WorksheetName,
            AnswerKey::Closest,
            AnswerKey::Furthest,
            AnswerKey::RedBall,
            AnswerKey::Curtain,
            AnswerKey::Sunlight,
            AnswerKey::Owner,
            AnswerKey::HidingSpot,
            AnswerKey::Surprised,
            AnswerKey::LikedPlace,
            AnswerKey::Wish,
        ]
    }

    /// The field id this key is bound to.
    pub fn field_id(self) -> &'static str {
        match self {
            AnswerKey::WorksheetName => "worksheetName",
            AnswerKey::Closest => "closest",
            AnswerKey::Furthest => "furthest",
            AnswerKey::RedBall => "redBall",
            AnswerKey::Curtain => "curtain",
            AnswerKey::Sunlight => "sunlight",
            AnswerKey::Owner => "owner",
            AnswerKey::HidingSpot => "hidingSpot",
            AnswerKey::Surprised => "surprised",
            AnswerKey::LikedPlace => "likedPlace",
            AnswerKey::Wish => "wish",
        }
    }

    /// Resolve a field id back to its key.
    pub fn from_field_id(id: &str) -> Option<AnswerKey> {
        AnswerKey::all().into_iter().find(|k| k.field_id() == id)
    }

    /// Whether this field drives a live character-count display.
    pub fn has_char_counter(self) -> bool {
        matches!(
            self,
            AnswerKey::Surprised | AnswerKey::LikedPlace | AnswerKey::Wish
        )
    }
}

/// In-memory store of all answers, mirrored 1:1 with the input fields.
#[derive(Debug, Default)]
pub struct AnswerStore {
    values: HashMap<AnswerKey, String>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the value for `key` with the field's current text verbatim.
    pub fn set(&mut self, key: AnswerKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    /// Current value for `key`; empty string when never set.
    pub fn get(&self, key: AnswerKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Live character count for counted fields, in Unicode scalar values.
    pub fn char_count(&self, key: AnswerKey) -> usize {
        self.get(key).chars().count()
    }

    /// Whether every answer is empty.
    pub fn is_empty(&self) -> bool {
        AnswerKey::all().iter().all(|k| self.get(*k).is_empty())
    }

    /// Clear all keys to empty string. Counters derived from the values
    /// return to zero with them.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_verbatim() {
        let mut store = AnswerStore::new();
        store.set(AnswerKey::Closest, "  ソファ  ");
        assert_eq!(store.get(AnswerKey::Closest), "  ソファ  ");
        store.set(AnswerKey::Closest, "");
        assert_eq!(store.get(AnswerKey::Closest), "");
    }

    #[test]
    fn unset_keys_read_empty() {
        let store = AnswerStore::new();
        for key in AnswerKey::all() {
            assert_eq!(store.get(key), "");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn char_count_follows_value() {
        let mut store = AnswerStore::new();
        store.set(AnswerKey::Wish, "ねこになる");
        assert_eq!(store.char_count(AnswerKey::Wish), 5);
        store.set(AnswerKey::Wish, "");
        assert_eq!(store.char_count(AnswerKey::Wish), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = AnswerStore::new();
        for key in AnswerKey::all() {
            store.set(key, "x");
        }
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.char_count(AnswerKey::Surprised), 0);
    }

    #[test]
    fn field_ids_round_trip() {
        for key in AnswerKey::all() {
            assert_eq!(AnswerKey::from_field_id(key.field_id()), Some(key));
        }
        assert_eq!(AnswerKey::from_field_id("minimap"), None);
    }

    #[test]
    fn only_three_fields_are_counted() {
        let counted: Vec<_> = AnswerKey::all()
            .into_iter()
            .filter(|k| k.has_char_counter())
            .collect();
        assert_eq!(
            counted,
            vec![AnswerKey::Surprised, AnswerKey::LikedPlace, AnswerKey::Wish]
        );
    }
}
