//! Timetable domain models.
//!
//! Provides the types shared by the placement engine and its consumers:
//! the weekly slot grid, the resolved school entities, dense resource
//! indexing, activities and the constraint catalogue.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Placement matrix |
//! |-------------|--------|------------------|
//! | Slot | (day, hour) period | Column |
//! | Resource | Teacher / Room / Atomic group | Row |
//! | Activity | Lesson | Cell contents |
//! | Constraint | Scheduling rule | Solver input |

mod activity;
mod calendar;
mod constraint;
mod resource;
mod school;

pub use activity::{Activity, ActivityIndex};
pub use calendar::{Slot, SlotIndex, WeekGrid};
pub use constraint::{Constraint, ConstraintSet, Weight, MAX_WEIGHT};
pub use resource::{ResourceIndex, ResourceIndexMap, ResourceKind};
pub use school::{
    Class, Course, Division, Group, Lesson, Ref, Room, RoomChoiceGroup, RoomGroup, RoomSpec,
    SchoolData, Subject, Teacher,
};
