//! Weekly slot grid.
//!
//! A school week is a fixed number of days, each with the same number of
//! teaching hours. Every `(day, hour)` pair is one [`Slot`]; internally
//! slots are linearised to a [`SlotIndex`] so that the occupancy matrix
//! can be addressed arithmetically.
//!
//! # Time Model
//! Slot index `s = day * hours_per_day + hour`. An activity of duration
//! `d` started at `s` occupies `s..s + d`, which must stay inside one day.

use serde::{Deserialize, Serialize};

/// Linear slot index (`day * hours_per_day + hour`).
pub type SlotIndex = usize;

/// One teaching period, identified by day and hour (both 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day of the week (0-based).
    pub day: usize,
    /// Hour within the day (0-based).
    pub hour: usize,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: usize, hour: usize) -> Self {
        Self { day, hour }
    }
}

/// The weekly grid of teaching periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Number of school days.
    pub days: usize,
    /// Teaching hours per day.
    pub hours_per_day: usize,
    /// Hours forming the midday break (sorted, contiguous).
    pub midday_break: Vec<usize>,
    /// First hour counted as afternoon. `None` = no afternoon boundary.
    pub first_afternoon_hour: Option<usize>,
}

impl WeekGrid {
    /// Creates a grid without midday break or afternoon boundary.
    pub fn new(days: usize, hours_per_day: usize) -> Self {
        Self {
            days,
            hours_per_day,
            midday_break: Vec::new(),
            first_afternoon_hour: None,
        }
    }

    /// Sets the midday break hours. They are stored sorted.
    pub fn with_midday_break(mut self, mut hours: Vec<usize>) -> Self {
        hours.sort_unstable();
        hours.dedup();
        self.midday_break = hours;
        self
    }

    /// Sets the first afternoon hour.
    pub fn with_first_afternoon_hour(mut self, hour: usize) -> Self {
        self.first_afternoon_hour = Some(hour);
        self
    }

    /// Total number of slots in the week.
    #[inline]
    pub fn slots_per_week(&self) -> usize {
        self.days * self.hours_per_day
    }

    /// Linear index of a slot, or `None` if it lies outside the grid.
    pub fn slot_index(&self, slot: Slot) -> Option<SlotIndex> {
        if slot.day < self.days && slot.hour < self.hours_per_day {
            Some(slot.day * self.hours_per_day + slot.hour)
        } else {
            None
        }
    }

    /// Inverse of [`slot_index`](Self::slot_index). `None` if `index` lies
    /// outside the grid (always the case for an empty grid).
    pub fn slot_at(&self, index: SlotIndex) -> Option<Slot> {
        if index >= self.slots_per_week() {
            return None;
        }
        Some(Slot::new(
            index / self.hours_per_day,
            index % self.hours_per_day,
        ))
    }

    /// Whether an activity of `duration` slots may start at `start`:
    /// the whole run stays inside the grid and inside a single day.
    pub fn fits_in_day(&self, start: SlotIndex, duration: usize) -> bool {
        if duration == 0 || self.hours_per_day == 0 || start >= self.slots_per_week() {
            return false;
        }
        start % self.hours_per_day + duration <= self.hours_per_day
    }

    /// All legal start slots for an activity of `duration` slots, in
    /// ascending order.
    pub fn legal_starts(&self, duration: usize) -> Vec<SlotIndex> {
        (0..self.slots_per_week())
            .filter(|&s| self.fits_in_day(s, duration))
            .collect()
    }

    /// Whether the midday break hours form one contiguous run.
    pub fn midday_break_is_contiguous(&self) -> bool {
        match (self.midday_break.first(), self.midday_break.last()) {
            (Some(first), Some(last)) => last - first < self.midday_break.len(),
            _ => true,
        }
    }

    /// Whether `hour` belongs to the afternoon.
    pub fn is_afternoon(&self, hour: usize) -> bool {
        self.first_afternoon_hour.is_some_and(|h| hour >= h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_linearisation() {
        let grid = WeekGrid::new(5, 8);
        assert_eq!(grid.slots_per_week(), 40);
        assert_eq!(grid.slot_index(Slot::new(0, 0)), Some(0));
        assert_eq!(grid.slot_index(Slot::new(2, 3)), Some(19));
        assert_eq!(grid.slot_at(19), Some(Slot::new(2, 3)));
        assert_eq!(grid.slot_at(40), None);
        assert_eq!(grid.slot_index(Slot::new(5, 0)), None);
        assert_eq!(grid.slot_index(Slot::new(0, 8)), None);
    }

    #[test]
    fn test_empty_grid_has_no_slots() {
        let grid = WeekGrid::new(5, 0);
        assert_eq!(grid.slots_per_week(), 0);
        assert_eq!(grid.slot_at(0), None);
        assert_eq!(grid.slot_at(7), None);
        assert!(!grid.fits_in_day(0, 1));
        assert!(grid.legal_starts(1).is_empty());
    }

    #[test]
    fn test_fits_in_day() {
        let grid = WeekGrid::new(2, 4);
        assert!(grid.fits_in_day(0, 4));
        assert!(grid.fits_in_day(2, 2));
        assert!(!grid.fits_in_day(3, 2)); // would wrap into day 1
        assert!(grid.fits_in_day(7, 1));
        assert!(!grid.fits_in_day(8, 1)); // outside the week
        assert!(!grid.fits_in_day(0, 0));
    }

    #[test]
    fn test_legal_starts() {
        let grid = WeekGrid::new(2, 3);
        assert_eq!(grid.legal_starts(1), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.legal_starts(2), vec![0, 1, 3, 4]);
        assert_eq!(grid.legal_starts(3), vec![0, 3]);
        assert!(grid.legal_starts(4).is_empty());
    }

    #[test]
    fn test_midday_break_contiguity() {
        let grid = WeekGrid::new(5, 8).with_midday_break(vec![5, 4]);
        assert_eq!(grid.midday_break, vec![4, 5]);
        assert!(grid.midday_break_is_contiguous());

        let broken = WeekGrid::new(5, 8).with_midday_break(vec![3, 5]);
        assert!(!broken.midday_break_is_contiguous());

        assert!(WeekGrid::new(5, 8).midday_break_is_contiguous());
    }

    #[test]
    fn test_afternoon() {
        let grid = WeekGrid::new(5, 8).with_first_afternoon_hour(6);
        assert!(!grid.is_afternoon(5));
        assert!(grid.is_afternoon(6));
        assert!(!WeekGrid::new(5, 8).is_afternoon(7));
    }
}
