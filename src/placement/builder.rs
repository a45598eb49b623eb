//! Activity building and pre-assigned placement.
//!
//! # Algorithm
//!
//! 1. For each lesson, in order, build an activity (index = position + 1)
//!    whose resources are the course's teachers, the atomic groups of its
//!    student groups, and its compulsory rooms.
//! 2. Fixed lessons with a slot are placed immediately. A conflict demotes
//!    the activity to unfixed and unplaced and is reported as an error.
//! 3. Candidate start slots are recorded for every activity that is not
//!    placed and fixed.
//! 4. Non-fixed lessons with a slot are placed, in lesson order. A
//!    conflict leaves the activity unplaced and is reported as a warning.
//! 5. Different-days peers are recorded from the constraint set.
//!
//! Fixed placements are all committed before any non-fixed attempt, so a
//! fixed lesson always wins a contended cell.
//!
//! # Complexity
//! O(activities × resources × duration); greedy, no backtracking.

use std::collections::{HashMap, HashSet};

use crate::config::PlacementConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity};
use crate::error::{ReferenceKind, Result, TimetableError};
use crate::models::{
    Activity, ActivityIndex, Constraint, ConstraintSet, Course, Lesson, ResourceIndexMap,
    SchoolData, SlotIndex, WeekGrid,
};

use super::OccupancyMatrix;

/// Activities with their resource sets, placements and the occupancy
/// matrix they were placed in.
#[derive(Debug, Clone)]
pub struct Timetable {
    grid: WeekGrid,
    activities: Vec<Activity>,
    occupancy: OccupancyMatrix,
    constraints: ConstraintSet,
}

impl Timetable {
    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    /// All activities; `activities()[i].index == i + 1`.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activity by 1-based index.
    pub fn activity(&self, index: ActivityIndex) -> Option<&Activity> {
        index.checked_sub(1).and_then(|i| self.activities.get(i))
    }

    pub fn occupancy(&self) -> &OccupancyMatrix {
        &self.occupancy
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Whether an unplaced activity could start at `slot`: the slot is a
    /// legal start for its duration and all needed cells are free. Always
    /// `false` for an activity that already holds a slot.
    pub fn test_placement(&self, index: ActivityIndex, slot: SlotIndex) -> bool {
        match self.activity(index) {
            Some(a) if !a.is_placed() => {
                self.grid.fits_in_day(slot, a.duration) && self.occupancy.test_placement(a, slot)
            }
            _ => false,
        }
    }

    /// Commits an unplaced activity at `slot`. Only valid right after
    /// [`test_placement`](Self::test_placement) returned `true` for the
    /// same pair; cells are not re-checked. A placed activity is left
    /// where it is.
    pub fn place_activity(&mut self, index: ActivityIndex, slot: SlotIndex) {
        let Some(a) = index.checked_sub(1).and_then(|i| self.activities.get_mut(i)) else {
            return;
        };
        if a.is_placed() {
            return;
        }
        self.occupancy.place_activity(a, slot);
        a.placement = Some(slot);
    }

    /// Releases the cells of a placed, non-fixed activity. Returns whether
    /// anything was released; fixed activities never move.
    pub fn unplace_activity(&mut self, index: ActivityIndex) -> bool {
        let Some(a) = index.checked_sub(1).and_then(|i| self.activities.get_mut(i)) else {
            return false;
        };
        match a.placement {
            Some(p) if !a.fixed => {
                self.occupancy.clear_activity(a, p);
                a.placement = None;
                true
            }
            _ => false,
        }
    }
}

/// Builds a [`Timetable`] from resolved school data.
///
/// # Example
///
/// ```
/// use u_timetable::diagnostics::CollectingSink;
/// use u_timetable::models::{Course, Lesson, ResourceIndexMap, SchoolData, WeekGrid};
/// use u_timetable::placement::TimetableBuilder;
///
/// let school = SchoolData::new()
///     .with_teacher("T1")
///     .with_class("1A", vec![])
///     .with_course(Course::new("C1").with_teacher("T1").with_group("1A"))
///     .with_lesson(Lesson::new("L1", "C1", 1).fixed_at(0, 0))
///     .with_lesson(Lesson::new("L2", "C1", 1).fixed_at(0, 0));
/// let resources = ResourceIndexMap::from_school(&school);
///
/// let mut sink = CollectingSink::new();
/// let tt = TimetableBuilder::new(&school, &resources, WeekGrid::new(5, 6))
///     .build(&mut sink)
///     .unwrap();
///
/// assert_eq!(tt.activity(1).unwrap().placement, Some(0));
/// assert_eq!(tt.activity(2).unwrap().placement, None);
/// assert_eq!(sink.len(), 1);
/// ```
pub struct TimetableBuilder<'a> {
    school: &'a SchoolData,
    resources: &'a ResourceIndexMap,
    grid: WeekGrid,
    constraints: ConstraintSet,
    options: PlacementConfig,
}

impl<'a> TimetableBuilder<'a> {
    pub fn new(school: &'a SchoolData, resources: &'a ResourceIndexMap, grid: WeekGrid) -> Self {
        Self {
            school,
            resources,
            grid,
            constraints: ConstraintSet::new(),
            options: PlacementConfig::default(),
        }
    }

    /// Sets the constraint catalogue passed through to the timetable.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_options(mut self, options: PlacementConfig) -> Self {
        self.options = options;
        self
    }

    /// Builds activities and commits pre-assigned placements.
    ///
    /// # Errors
    ///
    /// [`TimetableError::UnknownReference`] when a lesson names a course,
    /// teacher, group or room the index map does not know. Placement
    /// conflicts are not errors; they go to `sink`.
    pub fn build(self, sink: &mut dyn DiagnosticSink) -> Result<Timetable> {
        let courses = self.school.course_map();
        let mut occupancy =
            OccupancyMatrix::new(self.resources.resource_count(), self.grid.slots_per_week());
        let mut activities = Vec::with_capacity(self.school.lessons.len());
        let mut warned: HashSet<&str> = HashSet::new();
        let mut to_place: Vec<ActivityIndex> = Vec::new();

        tracing::debug!(
            event = "build_start",
            lessons = self.school.lessons.len(),
            resources = self.resources.resource_count(),
            slots = self.grid.slots_per_week(),
        );

        for (i, lesson) in self.school.lessons.iter().enumerate() {
            let index = i + 1;
            let course = courses.get(lesson.course.as_str()).copied().ok_or_else(|| {
                unknown(lesson, ReferenceKind::Course, &lesson.course)
            })?;

            let mut activity = Activity::new(index, lesson.id.clone(), course.id.clone())
                .with_duration(lesson.duration);
            activity.fixed = lesson.fixed;
            self.collect_resources(lesson, course, &mut activity, &mut warned, sink)?;

            if let Some(slot) = lesson.slot {
                match self
                    .grid
                    .slot_index(slot)
                    .filter(|&s| self.grid.fits_in_day(s, lesson.duration))
                {
                    Some(p) => activity.placement = Some(p),
                    None => {
                        activity.fixed = false;
                        let severity = if lesson.fixed {
                            Severity::Error
                        } else {
                            Severity::Warning
                        };
                        sink.emit(Diagnostic::new(
                            severity,
                            DiagnosticKind::IllegalSlot {
                                activity: index,
                                course: course.id.clone(),
                            },
                            format!(
                                "Activity {index} ({}) cannot start at day {}, hour {} \
                                 with duration {}",
                                lesson.id, slot.day, slot.hour, lesson.duration
                            ),
                        ));
                    }
                }
            }

            if let Some(p) = activity.placement {
                if activity.fixed {
                    match occupancy.first_conflict(&activity, p) {
                        None => occupancy.place_activity(&activity, p),
                        Some((blocker, _)) => {
                            sink.emit(Diagnostic::new(
                                Severity::Error,
                                DiagnosticKind::FixedPlacementConflict {
                                    activity: index,
                                    slot: p,
                                    course: course.id.clone(),
                                    blocked_by: Some(blocker),
                                },
                                format!(
                                    "Placement of fixed activity {index} @ {p} failed \
                                     (blocked by activity {blocker}): course {}",
                                    course.id
                                ),
                            ));
                            activity.unplace();
                        }
                    }
                } else {
                    to_place.push(index);
                }
            }

            activities.push(activity);
        }

        for a in activities.iter_mut().filter(|a| !(a.fixed && a.is_placed())) {
            a.possible_slots = self.grid.legal_starts(a.duration);
        }

        for index in to_place {
            let a = &mut activities[index - 1];
            let Some(p) = a.placement else { continue };
            if !self.options.place_preassigned {
                a.placement = None;
                continue;
            }
            match occupancy.first_conflict(a, p) {
                None => occupancy.place_activity(a, p),
                Some((blocker, _)) => {
                    sink.emit(Diagnostic::new(
                        Severity::Warning,
                        DiagnosticKind::PlacementConflict {
                            activity: index,
                            slot: p,
                            course: a.course_id.clone(),
                            blocked_by: Some(blocker),
                        },
                        format!(
                            "Placement of activity {index} @ {p} failed \
                             (blocked by activity {blocker}): course {}",
                            a.course_id
                        ),
                    ));
                    a.placement = None;
                }
            }
        }

        link_different_days(&mut activities, &self.constraints);

        let placed = activities.iter().filter(|a| a.is_placed()).count();
        tracing::info!(
            event = "build_end",
            activities = activities.len(),
            placed,
            unplaced = activities.len() - placed,
        );

        Ok(Timetable {
            grid: self.grid,
            activities,
            occupancy,
            constraints: self.constraints,
        })
    }

    /// Teachers, then atomic groups, then compulsory rooms.
    fn collect_resources(
        &self,
        lesson: &Lesson,
        course: &'a Course,
        activity: &mut Activity,
        warned: &mut HashSet<&'a str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for t in &course.teachers {
            let ix = self
                .resources
                .teacher(t)
                .ok_or_else(|| unknown(lesson, ReferenceKind::Teacher, t))?;
            activity.add_resource(ix);
        }

        for g in &course.groups {
            let atomic = self
                .resources
                .group(g)
                .ok_or_else(|| unknown(lesson, ReferenceKind::Group, g))?;
            for &ag in atomic {
                if !activity.add_resource(ag) && warned.insert(course.id.as_str()) {
                    sink.emit(Diagnostic::new(
                        Severity::Warning,
                        DiagnosticKind::RepeatedAtomicGroup {
                            course: course.id.clone(),
                        },
                        format!("Lesson with repeated atomic group in course {}", course.id),
                    ));
                }
            }
        }

        if let Some(room) = &course.room {
            let spec = self
                .school
                .room_spec(room)
                .ok_or_else(|| unknown(lesson, ReferenceKind::Room, room))?;
            for r in spec.compulsory_rooms() {
                let ix = self
                    .resources
                    .room(r)
                    .ok_or_else(|| unknown(lesson, ReferenceKind::Room, r))?;
                activity.add_resource(ix);
            }
        }
        Ok(())
    }
}

fn unknown(lesson: &Lesson, kind: ReferenceKind, reference: &str) -> TimetableError {
    TimetableError::UnknownReference {
        lesson: lesson.id.clone(),
        kind,
        reference: reference.to_string(),
    }
}

/// Records, for every multi-lesson course under a hard different-days
/// rule, the course's other activities as peers.
///
/// A `DaysBetween` naming the course replaces the global rule; otherwise
/// `AutomaticDifferentDays` applies, hard when absent.
fn link_different_days(activities: &mut [Activity], constraints: &ConstraintSet) {
    let mut by_course: HashMap<String, Vec<ActivityIndex>> = HashMap::new();
    for a in activities.iter() {
        by_course.entry(a.course_id.clone()).or_default().push(a.index);
    }

    let global_hard = constraints
        .automatic_different_days()
        .map_or(true, Constraint::is_hard);

    for (course, members) in by_course {
        if members.len() < 2 {
            continue;
        }
        let hard = match constraints.days_between_for(&course) {
            Some(Constraint::DaysBetween {
                weight,
                days_between,
                ..
            }) => weight.is_hard() && *days_between >= 1,
            _ => global_hard,
        };
        if !hard {
            continue;
        }
        for &ix in &members {
            activities[ix - 1].different_days =
                members.iter().copied().filter(|&m| m != ix).collect();
        }
    }
}
