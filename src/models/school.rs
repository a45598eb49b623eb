//! Resolved school entities.
//!
//! The input collaborator parses the raw timetable schema and hands over
//! this graph with references already resolved: every lesson points to a
//! course, and every course carries its own teachers, student groups and
//! room specification. Super-courses arrive flattened into [`Course`]
//! entries, so a lesson never needs to look further than its course.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Slot;

/// Element reference (the domain identifier of any entity).
pub type Ref = String;

/// A teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Ref,
    #[serde(default)]
    pub name: String,
}

/// A subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Ref,
    #[serde(default)]
    pub name: String,
}

/// A single room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Ref,
    #[serde(default)]
    pub name: String,
}

/// A set of rooms that are all needed at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomGroup {
    pub id: Ref,
    pub rooms: Vec<Ref>,
}

/// A set of rooms of which any one may be chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomChoiceGroup {
    pub id: Ref,
    pub rooms: Vec<Ref>,
}

/// A student group belonging to a class division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Ref,
    #[serde(default)]
    pub tag: String,
}

/// A partition of a class into groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: Ref,
    pub groups: Vec<Ref>,
}

/// A school class, possibly split by one or more divisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: Ref,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub divisions: Vec<Division>,
}

/// A course: what is taught, by whom, to whom and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Ref,
    #[serde(default)]
    pub subjects: Vec<Ref>,
    #[serde(default)]
    pub teachers: Vec<Ref>,
    /// Class or group references.
    #[serde(default)]
    pub groups: Vec<Ref>,
    /// A `Room`, `RoomGroup` or `RoomChoiceGroup` reference.
    #[serde(default)]
    pub room: Option<Ref>,
}

impl Course {
    pub fn new(id: impl Into<Ref>) -> Self {
        Self {
            id: id.into(),
            subjects: Vec::new(),
            teachers: Vec::new(),
            groups: Vec::new(),
            room: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<Ref>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn with_teacher(mut self, teacher: impl Into<Ref>) -> Self {
        self.teachers.push(teacher.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<Ref>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<Ref>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// One lesson of a course: a block of consecutive periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Ref,
    pub course: Ref,
    /// Number of consecutive periods.
    pub duration: usize,
    /// Pre-assigned slot, if any.
    #[serde(default)]
    pub slot: Option<Slot>,
    /// Whether the pre-assigned slot is mandatory.
    #[serde(default)]
    pub fixed: bool,
    /// Rooms chosen for this particular lesson.
    #[serde(default)]
    pub rooms: Vec<Ref>,
}

impl Lesson {
    pub fn new(id: impl Into<Ref>, course: impl Into<Ref>, duration: usize) -> Self {
        Self {
            id: id.into(),
            course: course.into(),
            duration,
            slot: None,
            fixed: false,
            rooms: Vec::new(),
        }
    }

    /// Pre-assigns a slot without fixing it.
    pub fn at(mut self, day: usize, hour: usize) -> Self {
        self.slot = Some(Slot::new(day, hour));
        self
    }

    /// Pre-assigns a mandatory slot.
    pub fn fixed_at(mut self, day: usize, hour: usize) -> Self {
        self.slot = Some(Slot::new(day, hour));
        self.fixed = true;
        self
    }
}

/// What a course's room reference points at.
#[derive(Debug, Clone, Copy)]
pub enum RoomSpec<'a> {
    Room(&'a Room),
    Group(&'a RoomGroup),
    Choice(&'a RoomChoiceGroup),
}

impl<'a> RoomSpec<'a> {
    /// Rooms that must all be occupied. Choice groups contribute none:
    /// picking one of their rooms is left to a solver.
    pub fn compulsory_rooms(&self) -> Vec<&'a str> {
        match *self {
            RoomSpec::Room(r) => vec![r.id.as_str()],
            RoomSpec::Group(g) => g.rooms.iter().map(|r| r.as_str()).collect(),
            RoomSpec::Choice(_) => Vec::new(),
        }
    }

    /// Alternative rooms of a choice group.
    pub fn room_choices(&self) -> Vec<&'a str> {
        match *self {
            RoomSpec::Choice(c) => c.rooms.iter().map(|r| r.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// The resolved entity graph of one school.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolData {
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub rooms: Vec<Room>,
    pub room_groups: Vec<RoomGroup>,
    pub room_choice_groups: Vec<RoomChoiceGroup>,
    pub classes: Vec<Class>,
    pub groups: Vec<Group>,
    pub courses: Vec<Course>,
    pub lessons: Vec<Lesson>,
}

impl SchoolData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teacher(mut self, id: impl Into<Ref>) -> Self {
        self.teachers.push(Teacher {
            id: id.into(),
            name: String::new(),
        });
        self
    }

    pub fn with_subject(mut self, id: impl Into<Ref>) -> Self {
        self.subjects.push(Subject {
            id: id.into(),
            name: String::new(),
        });
        self
    }

    pub fn with_room(mut self, id: impl Into<Ref>) -> Self {
        self.rooms.push(Room {
            id: id.into(),
            name: String::new(),
        });
        self
    }

    pub fn with_room_group(mut self, id: impl Into<Ref>, rooms: Vec<Ref>) -> Self {
        self.room_groups.push(RoomGroup {
            id: id.into(),
            rooms,
        });
        self
    }

    pub fn with_room_choice_group(mut self, id: impl Into<Ref>, rooms: Vec<Ref>) -> Self {
        self.room_choice_groups.push(RoomChoiceGroup {
            id: id.into(),
            rooms,
        });
        self
    }

    /// Adds a class. Groups named in its divisions are registered too.
    pub fn with_class(mut self, id: impl Into<Ref>, divisions: Vec<Division>) -> Self {
        for d in &divisions {
            for g in &d.groups {
                if !self.groups.iter().any(|x| &x.id == g) {
                    self.groups.push(Group {
                        id: g.clone(),
                        tag: String::new(),
                    });
                }
            }
        }
        self.classes.push(Class {
            id: id.into(),
            name: String::new(),
            divisions,
        });
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Course lookup table (id → course).
    pub fn course_map(&self) -> HashMap<&str, &Course> {
        self.courses.iter().map(|c| (c.id.as_str(), c)).collect()
    }

    /// Resolves a room reference of a course.
    pub fn room_spec(&self, reference: &str) -> Option<RoomSpec<'_>> {
        if let Some(r) = self.rooms.iter().find(|r| r.id == reference) {
            return Some(RoomSpec::Room(r));
        }
        if let Some(g) = self.room_groups.iter().find(|g| g.id == reference) {
            return Some(RoomSpec::Group(g));
        }
        self.room_choice_groups
            .iter()
            .find(|c| c.id == reference)
            .map(RoomSpec::Choice)
    }

    /// Lessons belonging to a course, in lesson-list order.
    pub fn lessons_of<'a>(&'a self, course: &'a str) -> impl Iterator<Item = &'a Lesson> + 'a {
        self.lessons.iter().filter(move |l| l.course == course)
    }
}

impl Division {
    pub fn new(id: impl Into<Ref>, groups: Vec<Ref>) -> Self {
        Self {
            id: id.into(),
            groups,
        }
    }
}
