use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Client-supplied todo identifier.
///
/// Kept in whatever JSON representation the client sent: integers stay
/// numbers, anything else stays a string. Lookups compare the string form,
/// so `1` and `"1"` address the same record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(i64),
    Text(String),
}

impl TodoId {
    /// Whether this id's string form equals `key` (a path segment).
    pub fn matches(&self, key: &str) -> bool {
        match self {
            TodoId::Number(n) => n.to_string() == key,
            TodoId::Text(s) => s == key,
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self { TodoId::Number(n) }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self { TodoId::Text(s) }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self { TodoId::Text(s.to_string()) }
}

/// One task entry, persisted as `{ "id", "title", "isCompleted" }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub is_completed: bool,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), is_completed: false }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let TodoId::Text(s) = &self.id {
            if s.trim().is_empty() {
                return Err(ModelError::Validation("id must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Copy with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self { is_completed: !self.is_completed, ..self.clone() }
    }
}

/// Body returned by a delete: the id that was requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTodo {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todo_uses_camel_case_wire_names() {
        let t = Todo { id: TodoId::Number(1), title: "a".into(), is_completed: false };
        assert_eq!(serde_json::to_value(&t).unwrap(), json!({"id": 1, "title": "a", "isCompleted": false}));
    }

    #[test]
    fn id_keeps_client_representation() {
        let num: Todo = serde_json::from_value(json!({"id": 7, "title": "x", "isCompleted": true})).unwrap();
        assert_eq!(num.id, TodoId::Number(7));
        let text: Todo = serde_json::from_value(json!({"id": "V1StGXR8", "title": "x", "isCompleted": true})).unwrap();
        assert_eq!(text.id, TodoId::Text("V1StGXR8".into()));
        assert_eq!(serde_json::to_value(&text).unwrap()["id"], json!("V1StGXR8"));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(serde_json::from_value::<Todo>(json!({"id": 1, "title": "x"})).is_err());
        assert!(serde_json::from_value::<Todo>(json!({"title": "x", "isCompleted": false})).is_err());
        assert!(serde_json::from_value::<Todo>(json!({"id": 1, "title": "x", "isCompleted": "no"})).is_err());
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let t: Todo = serde_json::from_value(json!({"id": 1, "title": "x", "isCompleted": false, "extra": 3})).unwrap();
        assert_eq!(serde_json::to_value(&t).unwrap(), json!({"id": 1, "title": "x", "isCompleted": false}));
    }

    #[test]
    fn ids_match_by_string_form() {
        assert!(TodoId::Number(1).matches("1"));
        assert!(!TodoId::Number(1).matches("01"));
        assert!(!TodoId::Number(1).matches("2"));
        assert!(TodoId::Text("1".into()).matches("1"));
        assert!(TodoId::Text("abc".into()).matches("abc"));
        assert!(!TodoId::Text("abc".into()).matches("ABC"));
    }

    #[test]
    fn validate_rejects_blank_text_id_only() {
        assert!(Todo::new("", "x").validate().is_err());
        assert!(Todo::new(" ", "x").validate().is_err());
        assert!(Todo::new(1i64, "x").validate().is_ok());
        // the browser form can submit an empty title
        assert!(Todo::new("abc", "").validate().is_ok());
    }

    #[test]
    fn toggled_flips_only_completion() {
        let t = Todo::new("a", "title");
        let u = t.toggled();
        assert!(u.is_completed);
        assert_eq!(u.id, t.id);
        assert_eq!(u.title, t.title);
    }
}
