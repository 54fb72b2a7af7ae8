//! Input validation for timetabling problems.
//!
//! Checks structural integrity of classes, teachers, and rooms before any
//! demand is built. Detects:
//! - Duplicate class, teacher, or room IDs
//! - Duplicate subject names within one class
//! - Zero weekly quotas and zero daily caps
//! - Availability entries that name a period outside the time grid
//!
//! Every problem is collected; the caller decides whether to abort. The
//! assignment engine treats any error here as fatal because duplicate keys
//! would corrupt the per-resource occupancy indices.

use crate::models::{Availability, ClassGroup, Room, Teacher, TimeGrid};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Two classes, teachers, or rooms share the same ID.
    DuplicateId,
    /// A class lists the same subject twice.
    DuplicateSubject,
    /// A weekly quota or daily cap is zero.
    InvalidQuota,
    /// An availability entry names a period the grid does not have.
    AvailabilityOutOfRange,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates classes, teachers, and rooms against `grid`.
///
/// Checks:
/// 1. No duplicate class, teacher, or room IDs
/// 2. Subject names are unique within each class
/// 3. Every subject has `weekly_hours > 0` and `max_periods_per_day > 0`
/// 4. Teacher and room availability only mention periods `1..=daily_periods`
///
/// Availability on weekdays outside the active week is allowed; it simply
/// never matches a generated slot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    grid: &TimeGrid,
    classes: &[ClassGroup],
    teachers: &[Teacher],
    rooms: &[Room],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique_ids("class", classes.iter().map(|c| c.id.as_str()), &mut errors);
    check_unique_ids("teacher", teachers.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique_ids("room", rooms.iter().map(|r| r.id.as_str()), &mut errors);

    for class in classes {
        let mut names = HashSet::new();
        for subject in &class.subjects {
            if !names.insert(subject.name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSubject,
                    format!("Class '{}' lists subject '{}' twice", class.id, subject.name),
                ));
            }
            if subject.weekly_hours == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidQuota,
                    format!(
                        "Subject '{}' in class '{}' has zero weekly hours",
                        subject.name, class.id
                    ),
                ));
            }
            if subject.max_periods_per_day == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidQuota,
                    format!(
                        "Subject '{}' in class '{}' has a zero daily cap",
                        subject.name, class.id
                    ),
                ));
            }
        }
    }

    for teacher in teachers {
        check_availability(grid, "teacher", &teacher.id, &teacher.availability, &mut errors);
    }
    for room in rooms {
        check_availability(grid, "room", &room.id, &room.availability, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique_ids<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
}

fn check_availability(
    grid: &TimeGrid,
    label: &str,
    id: &str,
    availability: &Availability,
    errors: &mut Vec<ValidationError>,
) {
    for key in availability.mentioned() {
        if !grid.is_valid_period(key.period) {
            errors.push(ValidationError::new(
                ValidationErrorKind::AvailabilityOutOfRange,
                format!(
                    "Availability of {label} '{id}' names {key}, outside periods 1..={}",
                    grid.daily_periods
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subject, Weekday};

    fn sample_classes() -> Vec<ClassGroup> {
        vec![
            ClassGroup::new("1A")
                .with_subject(Subject::new("Math", 4))
                .with_subject(Subject::new("Art", 2)),
            ClassGroup::new("1B").with_subject(Subject::new("Math", 4)),
        ]
    }

    fn sample_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("T1").with_subject("Math"),
            Teacher::new("T2")
                .with_subject("Art")
                .with_availability(Availability::always().with_blocked(Weekday::Monday, 8)),
        ]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let grid = TimeGrid::default();
        assert!(validate_input(&grid, &sample_classes(), &sample_teachers(), &[]).is_ok());
    }

    #[test]
    fn test_duplicate_class_id() {
        let mut classes = sample_classes();
        classes.push(ClassGroup::new("1A"));
        let errors =
            validate_input(&TimeGrid::default(), &classes, &sample_teachers(), &[]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateId]);
        assert!(errors[0].message.contains("class"));
    }

    #[test]
    fn test_duplicate_room_id() {
        let rooms = vec![Room::new("R1", "lab", 30), Room::new("R1", "gym", 60)];
        let grid = TimeGrid::default();
        let errors =
            validate_input(&grid, &sample_classes(), &sample_teachers(), &rooms).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_duplicate_subject() {
        let classes = vec![ClassGroup::new("1A")
            .with_subject(Subject::new("Math", 2))
            .with_subject(Subject::new("Math", 3))];
        let errors =
            validate_input(&TimeGrid::default(), &classes, &sample_teachers(), &[]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateSubject]);
    }

    #[test]
    fn test_zero_quotas() {
        let classes = vec![ClassGroup::new("1A")
            .with_subject(Subject::new("Math", 0))
            .with_subject(Subject::new("Art", 2).with_max_per_day(0))];
        let errors =
            validate_input(&TimeGrid::default(), &classes, &sample_teachers(), &[]).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![ValidationErrorKind::InvalidQuota, ValidationErrorKind::InvalidQuota]
        );
    }

    #[test]
    fn test_availability_out_of_range() {
        let teachers = vec![Teacher::new("T1")
            .with_subject("Math")
            .with_availability(Availability::always().with_open(Weekday::Monday, 9))];
        let rooms = vec![Room::new("R1", "classroom", 40)
            .with_availability(Availability::always().with_blocked(Weekday::Friday, 0))];
        let errors =
            validate_input(&TimeGrid::default(), &sample_classes(), &teachers, &rooms).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::AvailabilityOutOfRange));
    }

    #[test]
    fn test_inactive_weekday_availability_allowed() {
        let teachers = vec![Teacher::new("T1")
            .with_subject("Math")
            .with_availability(Availability::always().with_open(Weekday::Sunday, 3))];
        assert!(validate_input(&TimeGrid::default(), &sample_classes(), &teachers, &[]).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let classes = vec![
            ClassGroup::new("1A").with_subject(Subject::new("Math", 0)),
            ClassGroup::new("1A"),
        ];
        let teachers = vec![Teacher::new("T1"), Teacher::new("T1")];
        let errors = validate_input(&TimeGrid::default(), &classes, &teachers, &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
