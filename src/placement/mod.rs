//! Activity building and conflict-free placement.
//!
//! Lessons become activities occupying dense resource indices; fixed and
//! pre-assigned lessons are committed to a flat occupancy matrix if, and
//! only if, every cell they need is free.
//!
//! # Algorithm
//!
//! Greedy commit-or-reject in lesson order, fixed lessons first. There is
//! no search: an activity that cannot take its nominal slot is left
//! unplaced, with its candidate slots recorded for a later solver.

mod builder;
mod matrix;
mod summary;

pub use builder::{Timetable, TimetableBuilder};
pub use matrix::OccupancyMatrix;
pub use summary::PlacementSummary;
