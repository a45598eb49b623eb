//! Input validation for school data.
//!
//! Checks structural integrity of the entity graph before activities are
//! built. Detects:
//! - Missing mandatory entities (teachers, rooms, classes)
//! - Duplicate IDs
//! - References to unknown teachers, groups, rooms and courses
//! - Lessons that cannot fit into the week grid
//!
//! A graph that passes these checks builds without
//! [`UnknownReference`](crate::error::TimetableError::UnknownReference)
//! errors.

use crate::models::{SchoolData, WeekGrid};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A mandatory entity list is empty.
    MissingEntities,
    /// Two entities share the same ID.
    DuplicateId,
    /// A course references an unknown teacher, group or room.
    InvalidReference,
    /// A lesson references an unknown course.
    InvalidCourse,
    /// A lesson's duration or slot does not fit the grid.
    InvalidLessonSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a school against the week grid.
///
/// Checks:
/// 1. Teachers, rooms and classes are present
/// 2. No ID is defined twice (across all entity kinds)
/// 3. Course teacher, group and room references resolve
/// 4. Room groups name existing rooms
/// 5. Lesson courses resolve
/// 6. Lesson durations are positive and fit in a day
/// 7. Pre-assigned slots are legal starts
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_school(school: &SchoolData, grid: &WeekGrid) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, empty) in [
        ("teachers", school.teachers.is_empty()),
        ("rooms", school.rooms.is_empty()),
        ("classes", school.classes.is_empty()),
    ] {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingEntities,
                format!("No {name}"),
            ));
        }
    }

    let mut ids = HashSet::new();
    let all_ids = school
        .teachers
        .iter()
        .map(|t| &t.id)
        .chain(school.subjects.iter().map(|s| &s.id))
        .chain(school.rooms.iter().map(|r| &r.id))
        .chain(school.room_groups.iter().map(|r| &r.id))
        .chain(school.room_choice_groups.iter().map(|r| &r.id))
        .chain(school.classes.iter().map(|c| &c.id))
        .chain(school.groups.iter().map(|g| &g.id))
        .chain(school.courses.iter().map(|c| &c.id))
        .chain(school.lessons.iter().map(|l| &l.id));
    for id in all_ids {
        if !ids.insert(id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Element Id defined more than once: {id}"),
            ));
        }
    }

    let teachers: HashSet<&str> = school.teachers.iter().map(|t| t.id.as_str()).collect();
    let rooms: HashSet<&str> = school.rooms.iter().map(|r| r.id.as_str()).collect();
    let groups: HashSet<&str> = school
        .classes
        .iter()
        .map(|c| c.id.as_str())
        .chain(
            school
                .classes
                .iter()
                .flat_map(|c| c.divisions.iter())
                .flat_map(|d| d.groups.iter().map(|g| g.as_str())),
        )
        .collect();

    for rg in &school.room_groups {
        for r in &rg.rooms {
            if !rooms.contains(r.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Room group '{}' references unknown room '{r}'", rg.id),
                ));
            }
        }
    }
    for rc in &school.room_choice_groups {
        for r in &rc.rooms {
            if !rooms.contains(r.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Room choice group '{}' references unknown room '{r}'", rc.id),
                ));
            }
        }
    }

    for course in &school.courses {
        for t in &course.teachers {
            if !teachers.contains(t.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Course '{}' references unknown teacher '{t}'", course.id),
                ));
            }
        }
        for g in &course.groups {
            if !groups.contains(g.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Course '{}' references unknown group '{g}'", course.id),
                ));
            }
        }
        if let Some(room) = &course.room {
            if school.room_spec(room).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Course '{}' references unknown room '{room}'", course.id),
                ));
            }
        }
    }

    let courses: HashSet<&str> = school.courses.iter().map(|c| c.id.as_str()).collect();
    for lesson in &school.lessons {
        if !courses.contains(lesson.course.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCourse,
                format!(
                    "Lesson '{}' references unknown course '{}'",
                    lesson.id, lesson.course
                ),
            ));
        }
        if lesson.duration == 0 || lesson.duration > grid.hours_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLessonSlot,
                format!(
                    "Lesson '{}' has duration {} (day has {} hours)",
                    lesson.id, lesson.duration, grid.hours_per_day
                ),
            ));
            continue;
        }
        if let Some(slot) = lesson.slot {
            let legal = grid
                .slot_index(slot)
                .is_some_and(|s| grid.fits_in_day(s, lesson.duration));
            if !legal {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidLessonSlot,
                    format!(
                        "Lesson '{}' cannot start at day {}, hour {}",
                        lesson.id, slot.day, slot.hour
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Division, Lesson, ResourceIndexMap};
    use crate::placement::TimetableBuilder;

    fn grid() -> WeekGrid {
        WeekGrid::new(5, 6)
    }

    fn sample_school() -> SchoolData {
        SchoolData::new()
            .with_teacher("T1")
            .with_room("R1")
            .with_room("R2")
            .with_room_group("RG", vec!["R1".into(), "R2".into()])
            .with_class(
                "1A",
                vec![Division::new("D", vec!["1A.G".into(), "1A.B".into()])],
            )
            .with_course(
                Course::new("C1")
                    .with_teacher("T1")
                    .with_group("1A.G")
                    .with_room("RG"),
            )
            .with_lesson(Lesson::new("L1", "C1", 2).fixed_at(0, 0))
            .with_lesson(Lesson::new("L2", "C1", 1))
    }

    fn kinds(school: &SchoolData) -> Vec<ValidationErrorKind> {
        validate_school(school, &grid())
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_school(&sample_school(), &grid()).is_ok());
    }

    #[test]
    fn test_valid_input_builds_cleanly() {
        let school = sample_school();
        let resources = ResourceIndexMap::from_school(&school);
        let mut sink = crate::diagnostics::CollectingSink::new();
        let tt = TimetableBuilder::new(&school, &resources, grid())
            .build(&mut sink)
            .unwrap();
        assert_eq!(tt.activities().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_entities() {
        let school = SchoolData::new();
        let k = kinds(&school);
        assert_eq!(
            k.iter()
                .filter(|k| **k == ValidationErrorKind::MissingEntities)
                .count(),
            3
        );
    }

    #[test]
    fn test_duplicate_id_across_kinds() {
        let school = sample_school().with_room("T1");
        let errors = validate_school(&school, &grid()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("T1")));
    }

    #[test]
    fn test_invalid_course_references() {
        let school = sample_school().with_course(
            Course::new("C2")
                .with_teacher("ghost")
                .with_group("2B")
                .with_room("nowhere"),
        );
        let k = kinds(&school);
        assert_eq!(
            k.iter()
                .filter(|k| **k == ValidationErrorKind::InvalidReference)
                .count(),
            3
        );
    }

    #[test]
    fn test_room_group_unknown_room() {
        let school = sample_school().with_room_group("RX", vec!["R9".into()]);
        assert!(kinds(&school).contains(&ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_invalid_lesson_course() {
        let school = sample_school().with_lesson(Lesson::new("L9", "C9", 1));
        assert!(kinds(&school).contains(&ValidationErrorKind::InvalidCourse));
    }

    #[test]
    fn test_invalid_lesson_slots() {
        let school = sample_school()
            .with_lesson(Lesson::new("L3", "C1", 0))
            .with_lesson(Lesson::new("L4", "C1", 7))
            .with_lesson(Lesson::new("L5", "C1", 2).at(0, 5))
            .with_lesson(Lesson::new("L6", "C1", 1).fixed_at(5, 0));
        let k = kinds(&school);
        assert_eq!(
            k.iter()
                .filter(|k| **k == ValidationErrorKind::InvalidLessonSlot)
                .count(),
            4
        );
    }

    #[test]
    fn test_multiple_errors() {
        let school = SchoolData::new()
            .with_teacher("T1")
            .with_lesson(Lesson::new("L1", "C1", 1));
        let errors = validate_school(&school, &grid()).unwrap_err();
        assert!(errors.len() >= 3); // no rooms, no classes, unknown course
    }
}
