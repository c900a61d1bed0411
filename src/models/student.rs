use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned identifier. Kept exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
    Number(u64),
    Text(String),
}

impl StudentId {
    /// Compares against a raw path segment, e.g. `/students/{id}/edit`.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            StudentId::Number(n) => n.to_string() == raw,
            StudentId::Text(s) => s == raw,
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentId::Number(n) => write!(f, "{}", n),
            StudentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for StudentId {
    fn from(value: u64) -> Self {
        StudentId::Number(value)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        StudentId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(deserialize_with = "age_from_number_or_text")]
    pub age: u32,
    pub email: String,
    pub course: String,
}

/// Body of `POST /students` and `PUT /students/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub course: String,
}

impl StudentPayload {
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            course: self.course,
        }
    }
}

// Older clients posted raw form values, so some backends hold the age as "20".
fn age_from_number_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(u32),
        Text(String),
    }

    match RawAge::deserialize(deserializer)? {
        RawAge::Number(n) => Ok(n),
        RawAge::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid age: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_round_trip_untouched() {
        let students: Vec<Student> = serde_json::from_str(
            r#"[
                {"id": 7, "name": "Ana", "age": 20, "email": "ana@uni.edu", "course": "Math"},
                {"id": "a1f", "name": "Ben", "age": "21", "email": "ben@uni.edu", "course": "Art"}
            ]"#,
        )
        .unwrap();

        assert_eq!(students[0].id, StudentId::Number(7));
        assert_eq!(students[1].id, StudentId::Text("a1f".to_string()));
        assert_eq!(students[1].age, 21);
        assert_eq!(serde_json::to_value(&students[0].id).unwrap(), serde_json::json!(7));
    }

    #[test]
    fn rejects_non_numeric_age() {
        let parsed = serde_json::from_str::<Student>(
            r#"{"id": 1, "name": "Ana", "age": "old", "email": "a@b.c", "course": "Math"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn id_matches_path_segment() {
        assert!(StudentId::Number(12).matches("12"));
        assert!(!StudentId::Number(12).matches("012x"));
        assert!(!StudentId::Number(12).matches("0012"));
        assert!(!StudentId::Number(12).matches("+12"));
        assert!(StudentId::from("abc").matches("abc"));
        assert!(!StudentId::from("abc").matches("ABC"));
    }
}
