//! School timetable placement core for the U-Engine ecosystem.
//!
//! Turns a resolved school entity graph (teachers, rooms, classes,
//! courses, lessons) into uniform activities occupying dense resource
//! indices at linear week slots, commits pre-fixed placements without
//! resource conflicts, and carries the constraint catalogue a solver
//! needs for everything else.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`WeekGrid`, `SchoolData`, `Activity`,
//!   `ResourceIndexMap`, `Constraint`, `ConstraintSet`)
//! - **`placement`**: `OccupancyMatrix`, `TimetableBuilder`, `Timetable`,
//!   `PlacementSummary`
//! - **`diagnostics`**: Severity-levelled diagnostic sinks
//! - **`validation`**: Input integrity checks (duplicate IDs, references,
//!   lesson slots)
//! - **`config`**: TOML configuration
//!
//! # Example
//!
//! ```
//! use u_timetable::diagnostics::TracingSink;
//! use u_timetable::models::{Course, Lesson, ResourceIndexMap, SchoolData, WeekGrid};
//! use u_timetable::placement::TimetableBuilder;
//! use u_timetable::validation::validate_school;
//!
//! let school = SchoolData::new()
//!     .with_teacher("T1")
//!     .with_room("R1")
//!     .with_class("1A", vec![])
//!     .with_course(Course::new("C1").with_teacher("T1").with_group("1A").with_room("R1"))
//!     .with_lesson(Lesson::new("L1", "C1", 2).fixed_at(0, 0));
//! let grid = WeekGrid::new(5, 8);
//!
//! validate_school(&school, &grid).unwrap();
//! let resources = ResourceIndexMap::from_school(&school);
//! let tt = TimetableBuilder::new(&school, &resources, grid)
//!     .build(&mut TracingSink)
//!     .unwrap();
//!
//! assert_eq!(tt.occupancy().get(1, 1), 1);
//! ```
//!
//! # Architecture
//!
//! This crate sits beside `u-schedule` at Layer 3 (Frameworks). Input
//! parsing and timetable rendering live outside; a solver consumes the
//! resulting activities, occupancy matrix and constraints.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod placement;
pub mod validation;

pub use error::{Result, TimetableError};
