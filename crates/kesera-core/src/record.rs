//! Projection of the results JSON into a [`StudentRecord`].
//!
//! Pure and side-effect free. Absent fields stay `None` and render as
//! [`NOT_AVAILABLE`]; only a missing `student` object means "no data".

use serde::Serialize;
use serde_json::{Map, Value};

/// Placeholder rendered for any absent field.
pub const NOT_AVAILABLE: &str = "N/A";

/// One entry of the response's `courses` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Course {
    pub name: Option<String>,
}

impl Course {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// A student's details as returned by the results site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub name: Option<String>,
    pub age: Option<String>,
    pub school: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub language: Option<String>,
    pub zone: Option<String>,
    pub woreda: Option<String>,
    pub photo: Option<String>,
    /// In server order.
    pub courses: Vec<Course>,
}

impl StudentRecord {
    /// Projects `{ "student": {...}, "courses": [...] }`.
    ///
    /// Returns `None` when `student` is missing or not an object.
    pub fn from_response(response: &Value) -> Option<Self> {
        let student = response.get("student")?.as_object()?;
        let courses = response
            .get("courses")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(course).collect())
            .unwrap_or_default();

        Some(Self {
            name: text(student, "name"),
            age: text(student, "age"),
            school: text(student, "school"),
            gender: text(student, "gender"),
            nationality: text(student, "nationality"),
            language: text(student, "language"),
            zone: text(student, "zone"),
            woreda: text(student, "woreda"),
            photo: text(student, "photo").filter(|p| !p.trim().is_empty()),
            courses,
        })
    }

    /// Labelled detail fields in display order, absent ones as [`NOT_AVAILABLE`].
    pub fn details(&self) -> [(&'static str, &str); 8] {
        [
            ("Name", display(&self.name)),
            ("Age", display(&self.age)),
            ("School", display(&self.school)),
            ("Gender", display(&self.gender)),
            ("Nationality", display(&self.nationality)),
            ("Language", display(&self.language)),
            ("Zone", display(&self.zone)),
            ("Woreda", display(&self.woreda)),
        ]
    }
}

fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn course(item: &Value) -> Course {
    Course {
        name: item.as_object().and_then(|o| text(o, "name")),
    }
}

/// Scalar field as text. Numbers and booleans keep their JSON spelling; null counts as absent.
fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
