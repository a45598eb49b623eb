//! Placement summary metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed | Activities holding a slot |
//! | Fixed | Placed activities that may not move |
//! | Unplaced | Activities left for a solver |
//! | Utilisation | Busy slots / slots per week, per resource |

use crate::models::ResourceIndex;

use super::Timetable;

/// Counts and per-resource load after a build.
#[derive(Debug, Clone)]
pub struct PlacementSummary {
    pub activity_count: usize,
    pub placed: usize,
    pub fixed: usize,
    pub unplaced: usize,
    /// Busy slots per resource, indexed by resource (entry 0 unused).
    pub busy_slots: Vec<usize>,
    /// Mean utilisation over resources 1.. (0.0..1.0).
    pub avg_utilization: f64,
}

impl PlacementSummary {
    pub fn calculate(timetable: &Timetable) -> Self {
        let activities = timetable.activities();
        let placed = activities.iter().filter(|a| a.is_placed()).count();
        let fixed = activities
            .iter()
            .filter(|a| a.is_placed() && a.fixed)
            .count();

        let m = timetable.occupancy();
        let busy_slots: Vec<usize> = (0..m.resource_count()).map(|r| m.busy_slots(r)).collect();

        let real = m.resource_count().saturating_sub(1);
        let avg_utilization = if real == 0 || m.slots_per_week() == 0 {
            0.0
        } else {
            let busy: usize = busy_slots.iter().skip(1).sum();
            busy as f64 / (real * m.slots_per_week()) as f64
        };

        Self {
            activity_count: activities.len(),
            placed,
            fixed,
            unplaced: activities.len() - placed,
            busy_slots,
            avg_utilization,
        }
    }

    /// Share of the week a resource is busy. `None` if out of range.
    pub fn utilization(&self, resource: ResourceIndex, slots_per_week: usize) -> Option<f64> {
        if slots_per_week == 0 || resource == 0 {
            return None;
        }
        self.busy_slots
            .get(resource)
            .map(|&b| b as f64 / slots_per_week as f64)
    }
}
