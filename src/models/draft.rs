use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Student, StudentId, StudentPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Age,
    Email,
    Course,
}

/// Form contents as typed by the user. Nothing here has been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub name: String,
    pub age: String,
    pub email: String,
    pub course: String,
}

/// Draft of an existing student, open for inline editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDraft {
    pub id: StudentId,
    pub draft: Draft,
}

impl Draft {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.to_string(),
            email: student.email.clone(),
            course: student.course.clone(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Age => &self.age,
            DraftField::Email => &self.email,
            DraftField::Course => &self.course,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Age => self.age = value,
            DraftField::Email => self.email = value,
            DraftField::Course => self.course = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks required fields and parses the age.
    pub fn to_payload(&self) -> Result<StudentPayload, AppError> {
        let name = required(&self.name, "Name")?;
        let age_text = required(&self.age, "Age")?;
        let email = required(&self.email, "Email")?;
        let course = required(&self.course, "Course")?;

        let age = age_text.parse::<u32>().map_err(|_| {
            AppError::Validation(format!("Age must be a whole number, got {:?}", age_text))
        })?;

        Ok(StudentPayload {
            name: name.to_string(),
            age,
            email: email.to_string(),
            course: course.to_string(),
        })
    }
}

fn required<'a>(value: &'a str, label: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", label)));
    }
    Ok(trimmed)
}
