//! Scheduling constraints.
//!
//! Declarative rules over courses and subjects, collected while the input
//! is read and handed unchanged to a downstream solver. Nothing here
//! touches the occupancy matrix, and construction never checks that the
//! referenced courses exist or are structurally compatible.
//!
//! # Weights
//! Every constraint has a weight in `1..=100`. [`MAX_WEIGHT`] marks a hard
//! constraint that no valid timetable may violate; anything lower is a
//! soft preference of that relative importance.

use serde::{Deserialize, Serialize};

use super::school::Ref;

/// Weight of a hard constraint.
pub const MAX_WEIGHT: u8 = 100;

/// Constraint importance, clamped to `1..=MAX_WEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Weight(u8);

impl Weight {
    /// A hard constraint.
    pub const HARD: Weight = Weight(MAX_WEIGHT);

    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, MAX_WEIGHT))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_hard(self) -> bool {
        self.0 == MAX_WEIGHT
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::HARD
    }
}

impl From<u8> for Weight {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Weight> for u8 {
    fn from(w: Weight) -> Self {
        w.0
    }
}

/// A scheduling rule.
///
/// Serialised with its variant name in a `"constraint"` field, which is
/// also what [`Constraint::tag`] returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "constraint")]
pub enum Constraint {
    /// All lessons of the course end at the end of the day.
    LessonsEndDay { weight: Weight, course: Ref },

    /// Lessons of the courses lie strictly before `hour`, or strictly
    /// after it when `after` is set.
    BeforeAfterHour {
        weight: Weight,
        courses: Vec<Ref>,
        after: bool,
        hour: usize,
    },

    /// Lessons of every multi-lesson course fall on different days,
    /// unless a `DaysBetween` covers the course. When absent, this rule
    /// applies as a hard constraint.
    AutomaticDifferentDays {
        weight: Weight,
        consecutive_if_same_day: bool,
    },

    /// Minimum day gap between lessons within each of the courses (or
    /// super-courses). The courses are not linked to each other.
    DaysBetween {
        weight: Weight,
        courses: Vec<Ref>,
        days_between: usize,
        consecutive_if_same_day: bool,
    },

    /// Minimum day gap between every lesson of `course1` and every
    /// lesson of `course2`.
    DaysBetweenJoin {
        weight: Weight,
        course1: Ref,
        course2: Ref,
        days_between: usize,
        consecutive_if_same_day: bool,
    },

    /// Lessons of these subjects do not all land on one day.
    NotOnSameDay { weight: Weight, subjects: Vec<Ref> },

    /// Corresponding lessons of the courses share a slot. The courses are
    /// expected to have the same number and lengths of lessons; checking
    /// that is the solver's business.
    ParallelCourses { weight: Weight, courses: Vec<Ref> },
}

impl Constraint {
    pub fn lessons_end_day(course: impl Into<Ref>, weight: Weight) -> Self {
        Self::LessonsEndDay {
            weight,
            course: course.into(),
        }
    }

    pub fn before_hour(courses: Vec<Ref>, hour: usize, weight: Weight) -> Self {
        Self::BeforeAfterHour {
            weight,
            courses,
            after: false,
            hour,
        }
    }

    pub fn after_hour(courses: Vec<Ref>, hour: usize, weight: Weight) -> Self {
        Self::BeforeAfterHour {
            weight,
            courses,
            after: true,
            hour,
        }
    }

    pub fn automatic_different_days(consecutive_if_same_day: bool, weight: Weight) -> Self {
        Self::AutomaticDifferentDays {
            weight,
            consecutive_if_same_day,
        }
    }

    pub fn days_between(courses: Vec<Ref>, days_between: usize, weight: Weight) -> Self {
        Self::DaysBetween {
            weight,
            courses,
            days_between,
            consecutive_if_same_day: false,
        }
    }

    pub fn days_between_join(
        course1: impl Into<Ref>,
        course2: impl Into<Ref>,
        days_between: usize,
        weight: Weight,
    ) -> Self {
        Self::DaysBetweenJoin {
            weight,
            course1: course1.into(),
            course2: course2.into(),
            days_between,
            consecutive_if_same_day: false,
        }
    }

    pub fn not_on_same_day(subjects: Vec<Ref>, weight: Weight) -> Self {
        Self::NotOnSameDay { weight, subjects }
    }

    pub fn parallel_courses(courses: Vec<Ref>, weight: Weight) -> Self {
        Self::ParallelCourses { weight, courses }
    }

    /// Variant name, as used for serialisation.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LessonsEndDay { .. } => "LessonsEndDay",
            Self::BeforeAfterHour { .. } => "BeforeAfterHour",
            Self::AutomaticDifferentDays { .. } => "AutomaticDifferentDays",
            Self::DaysBetween { .. } => "DaysBetween",
            Self::DaysBetweenJoin { .. } => "DaysBetweenJoin",
            Self::NotOnSameDay { .. } => "NotOnSameDay",
            Self::ParallelCourses { .. } => "ParallelCourses",
        }
    }

    pub fn weight(&self) -> Weight {
        match self {
            Self::LessonsEndDay { weight, .. }
            | Self::BeforeAfterHour { weight, .. }
            | Self::AutomaticDifferentDays { weight, .. }
            | Self::DaysBetween { weight, .. }
            | Self::DaysBetweenJoin { weight, .. }
            | Self::NotOnSameDay { weight, .. }
            | Self::ParallelCourses { weight, .. } => *weight,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.weight().is_hard()
    }

    /// Course references named by this constraint (none for the global
    /// and subject-based variants).
    pub fn courses(&self) -> Vec<&str> {
        match self {
            Self::LessonsEndDay { course, .. } => vec![course.as_str()],
            Self::BeforeAfterHour { courses, .. }
            | Self::DaysBetween { courses, .. }
            | Self::ParallelCourses { courses, .. } => {
                courses.iter().map(|c| c.as_str()).collect()
            }
            Self::DaysBetweenJoin {
                course1, course2, ..
            } => vec![course1.as_str(), course2.as_str()],
            Self::AutomaticDifferentDays { .. } | Self::NotOnSameDay { .. } => Vec::new(),
        }
    }
}

/// Ordered, append-only collection of constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constraint and returns it for further filling.
    pub fn add(&mut self, constraint: Constraint) -> &mut Constraint {
        self.constraints.push(constraint);
        let last = self.constraints.len() - 1;
        &mut self.constraints[last]
    }

    /// Builder: registers a constraint and returns self.
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.add(constraint);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Constraints of one variant, in registration order.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Constraint> + 'a {
        self.constraints.iter().filter(move |c| c.tag() == tag)
    }

    /// The global different-days rule, if one was given. The first
    /// registered wins.
    pub fn automatic_different_days(&self) -> Option<&Constraint> {
        self.by_tag("AutomaticDifferentDays").next()
    }

    /// The `DaysBetween` constraint covering a course, if any.
    pub fn days_between_for(&self, course: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| match c {
            Constraint::DaysBetween { courses, .. } => courses.iter().any(|x| x == course),
            _ => false,
        })
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_clamping() {
        assert_eq!(Weight::new(0).value(), 1);
        assert_eq!(Weight::new(250).value(), MAX_WEIGHT);
        assert!(Weight::new(100).is_hard());
        assert!(!Weight::new(99).is_hard());
        assert_eq!(Weight::default(), Weight::HARD);
    }

    #[test]
    fn test_constraint_tags() {
        let c = Constraint::lessons_end_day("C1", Weight::HARD);
        assert_eq!(c.tag(), "LessonsEndDay");
        assert!(c.is_hard());
        assert_eq!(c.courses(), vec!["C1"]);

        let c = Constraint::after_hour(vec!["C1".into(), "C2".into()], 3, Weight::new(40));
        match &c {
            Constraint::BeforeAfterHour { after, hour, .. } => {
                assert!(*after);
                assert_eq!(*hour, 3);
            }
            _ => panic!("wrong variant"),
        }
        assert_eq!(c.tag(), "BeforeAfterHour");
        assert!(!c.is_hard());

        let c = Constraint::not_on_same_day(vec!["Ma".into(), "Ph".into()], Weight::new(50));
        assert!(c.courses().is_empty());
    }

    #[test]
    fn test_days_between_join_courses() {
        let c = Constraint::days_between_join("C1", "C2", 2, Weight::HARD);
        assert_eq!(c.courses(), vec!["C1", "C2"]);
        assert_eq!(c.tag(), "DaysBetweenJoin");
    }

    #[test]
    fn test_set_registration_order() {
        let mut set = ConstraintSet::new();
        set.add(Constraint::parallel_courses(
            vec!["C1".into(), "C2".into()],
            Weight::HARD,
        ));
        set.add(Constraint::days_between(vec!["C3".into()], 2, Weight::new(80)));
        set.add(Constraint::parallel_courses(vec!["C4".into()], Weight::new(10)));

        assert_eq!(set.len(), 3);
        let tags: Vec<_> = set.iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["ParallelCourses", "DaysBetween", "ParallelCourses"]);
        assert_eq!(set.by_tag("ParallelCourses").count(), 2);
        assert!(set.days_between_for("C3").is_some());
        assert!(set.days_between_for("C1").is_none());
        assert!(set.automatic_different_days().is_none());
    }

    #[test]
    fn test_add_returns_mutable_entry() {
        let mut set = ConstraintSet::new();
        if let Constraint::DaysBetween {
            consecutive_if_same_day,
            ..
        } = set.add(Constraint::days_between(vec!["C1".into()], 1, Weight::HARD))
        {
            *consecutive_if_same_day = true;
        }
        let first = set.iter().next();
        match first {
            Some(Constraint::DaysBetween {
                consecutive_if_same_day,
                ..
            }) => assert!(*consecutive_if_same_day),
            _ => panic!("wrong variant"),
        };
    }

    #[test]
    fn test_serialization_tagged() {
        let set = ConstraintSet::new()
            .with(Constraint::automatic_different_days(true, Weight::new(90)))
            .with(Constraint::lessons_end_day("C1", Weight::HARD));

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["constraint"], "AutomaticDifferentDays");
        assert_eq!(json[0]["weight"], 90);
        assert_eq!(json[0]["consecutive_if_same_day"], true);
        assert_eq!(json[1]["constraint"], "LessonsEndDay");
        assert_eq!(json[1]["course"], "C1");

        let back: ConstraintSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_deserialized_weight_is_clamped() {
        let c: Constraint =
            serde_json::from_str(r#"{"constraint":"NotOnSameDay","weight":0,"subjects":[]}"#)
                .unwrap();
        assert_eq!(c.weight().value(), 1);
    }
}
