//! Class (student group) model.

use serde::{Deserialize, Serialize};

use super::Subject;

/// A group of students following one curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Unique class identifier (e.g. "3A").
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub student_count: u32,
    /// Curriculum: each subject carries its weekly quota for this class.
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl ClassGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            student_count: 0,
            subjects: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = count;
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Total periods per week required by the curriculum.
    pub fn weekly_hours(&self) -> u32 {
        self.subjects.iter().map(|s| s.weekly_hours).sum()
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
