//! Activity model.
//!
//! An activity is the schedulable unit derived from one lesson: a set of
//! resources that are all occupied together for `duration` consecutive
//! slots of one day.

use serde::{Deserialize, Serialize};

use super::calendar::SlotIndex;
use super::resource::ResourceIndex;
use super::school::Ref;

/// Dense activity identifier, 1-based. 0 means "no activity".
pub type ActivityIndex = usize;

/// A lesson translated into resource terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Position in the lesson list + 1.
    pub index: ActivityIndex,
    /// Source lesson.
    pub lesson_id: Ref,
    /// Course of the source lesson.
    pub course_id: Ref,
    /// Consecutive slots required (same day).
    pub duration: usize,
    /// Resources occupied for the whole duration, without duplicates.
    pub resources: Vec<ResourceIndex>,
    /// Whether the placement may not be moved.
    pub fixed: bool,
    /// Start slot, or `None` while unplaced.
    pub placement: Option<SlotIndex>,
    /// Candidate start slots for an unplaced activity.
    pub possible_slots: Vec<SlotIndex>,
    /// Activities that must not share a day with this one.
    pub different_days: Vec<ActivityIndex>,
}

impl Activity {
    pub fn new(index: ActivityIndex, lesson_id: impl Into<Ref>, course_id: impl Into<Ref>) -> Self {
        Self {
            index,
            lesson_id: lesson_id.into(),
            course_id: course_id.into(),
            duration: 1,
            resources: Vec::new(),
            fixed: false,
            placement: None,
            possible_slots: Vec::new(),
            different_days: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: usize) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_resources(mut self, resources: Vec<ResourceIndex>) -> Self {
        self.resources = resources;
        self
    }

    /// Adds a resource unless it is already present. Returns whether it
    /// was added.
    pub fn add_resource(&mut self, resource: ResourceIndex) -> bool {
        if self.resources.contains(&resource) {
            false
        } else {
            self.resources.push(resource);
            true
        }
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Drops the placement and the fixed flag.
    pub fn unplace(&mut self) {
        self.placement = None;
        self.fixed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_builder() {
        let a = Activity::new(3, "L3", "C1")
            .with_duration(2)
            .with_resources(vec![1, 4]);
        assert_eq!(a.index, 3);
        assert_eq!(a.lesson_id, "L3");
        assert_eq!(a.course_id, "C1");
        assert_eq!(a.duration, 2);
        assert_eq!(a.resources, vec![1, 4]);
        assert!(!a.fixed);
        assert!(!a.is_placed());
    }

    #[test]
    fn test_add_resource_deduplicates() {
        let mut a = Activity::new(1, "L1", "C1");
        assert!(a.add_resource(5));
        assert!(!a.add_resource(5));
        assert!(a.add_resource(2));
        assert_eq!(a.resources, vec![5, 2]);
    }

    #[test]
    fn test_unplace_clears_fixed() {
        let mut a = Activity::new(1, "L1", "C1");
        a.fixed = true;
        a.placement = Some(7);
        a.unplace();
        assert!(!a.fixed);
        assert_eq!(a.placement, None);
    }
}
