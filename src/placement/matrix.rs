//! Resource × slot occupancy matrix.
//!
//! One flat table of `resource_count * slots_per_week` cells; cell
//! `(r, s)` lives at `r * slots_per_week + s` and holds the index of the
//! activity occupying resource `r` at slot `s`, or 0 when free.
//!
//! # Placement Protocol
//! [`test_placement`](OccupancyMatrix::test_placement) must succeed for an
//! `(activity, slot)` pair immediately before
//! [`place_activity`](OccupancyMatrix::place_activity) is called with the
//! same pair. Placing does not re-check and will overwrite other
//! activities' cells if the protocol is broken. Both operations assume
//! `slot .. slot + duration` lies within one day.
//!
//! # Complexity
//! O(resources × duration) per test or placement.

use crate::models::{Activity, ActivityIndex, ResourceIndex, SlotIndex};

/// Which activity holds each resource at each slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMatrix {
    resource_count: usize,
    slots_per_week: usize,
    cells: Vec<ActivityIndex>,
}

impl OccupancyMatrix {
    /// Creates an empty matrix.
    pub fn new(resource_count: usize, slots_per_week: usize) -> Self {
        Self {
            resource_count,
            slots_per_week,
            cells: vec![0; resource_count * slots_per_week],
        }
    }

    #[inline]
    fn offset(&self, resource: ResourceIndex, slot: SlotIndex) -> usize {
        resource * self.slots_per_week + slot
    }

    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    pub fn slots_per_week(&self) -> usize {
        self.slots_per_week
    }

    /// Activity at `(resource, slot)`; 0 if free.
    #[inline]
    pub fn get(&self, resource: ResourceIndex, slot: SlotIndex) -> ActivityIndex {
        self.cells[self.offset(resource, slot)]
    }

    #[inline]
    pub fn is_free(&self, resource: ResourceIndex, slot: SlotIndex) -> bool {
        self.get(resource, slot) == 0
    }

    /// Whether every cell the activity would need from `slot` on is free.
    pub fn test_placement(&self, activity: &Activity, slot: SlotIndex) -> bool {
        self.first_conflict(activity, slot).is_none()
    }

    /// First occupied cell blocking a placement, as `(occupant, resource)`.
    pub fn first_conflict(
        &self,
        activity: &Activity,
        slot: SlotIndex,
    ) -> Option<(ActivityIndex, ResourceIndex)> {
        for &r in &activity.resources {
            let base = self.offset(r, slot);
            for &occupant in &self.cells[base..base + activity.duration] {
                if occupant != 0 {
                    return Some((occupant, r));
                }
            }
        }
        None
    }

    /// Writes the activity's index into all its cells from `slot` on.
    pub fn place_activity(&mut self, activity: &Activity, slot: SlotIndex) {
        for &r in &activity.resources {
            let base = self.offset(r, slot);
            self.cells[base..base + activity.duration].fill(activity.index);
        }
    }

    /// Frees the cells an activity holds from `slot` on.
    pub fn clear_activity(&mut self, activity: &Activity, slot: SlotIndex) {
        for &r in &activity.resources {
            let base = self.offset(r, slot);
            for cell in &mut self.cells[base..base + activity.duration] {
                if *cell == activity.index {
                    *cell = 0;
                }
            }
        }
    }

    /// Every `(resource, slot)` cell held by an activity.
    pub fn cells_of(&self, activity: ActivityIndex) -> Vec<(ResourceIndex, SlotIndex)> {
        if activity == 0 || self.slots_per_week == 0 {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a == activity)
            .map(|(i, _)| (i / self.slots_per_week, i % self.slots_per_week))
            .collect()
    }

    /// Number of occupied slots of a resource.
    pub fn busy_slots(&self, resource: ResourceIndex) -> usize {
        let base = self.offset(resource, 0);
        self.cells[base..base + self.slots_per_week]
            .iter()
            .filter(|&&a| a != 0)
            .count()
    }
}
