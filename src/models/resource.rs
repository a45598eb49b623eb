//! Resources and the resource index map.
//!
//! A resource is anything that can be exclusively occupied at a slot: a
//! teacher, a room, or an atomic student group. Resources are numbered
//! densely once, up front, so that the occupancy matrix can be a flat
//! array; domain references are translated to indices only when
//! activities are built.
//!
//! # Atomic Groups
//! A class split by divisions `D1 = {A, B}` and `D2 = {X, Y}` has the
//! atomic groups `AX, AY, BX, BY`: the cross product of its divisions.
//! The class reference covers all four; group `A` covers `AX` and `AY`.
//! A class without divisions is a single atomic group.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::school::{Ref, SchoolData};

/// Dense resource index. 0 is reserved and never assigned.
pub type ResourceIndex = usize;

/// What a resource index stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Teacher(Ref),
    Room(Ref),
    /// Indivisible student subgroup of a class, named by the division
    /// groups it belongs to (empty for an undivided class).
    AtomicGroup { class: Ref, groups: Vec<Ref> },
}

/// Translation from domain references to dense resource indices.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndexMap {
    teachers: HashMap<Ref, ResourceIndex>,
    rooms: HashMap<Ref, ResourceIndex>,
    groups: HashMap<Ref, Vec<ResourceIndex>>,
    /// Kind of resource `i` at position `i - 1`.
    kinds: Vec<ResourceKind>,
}

impl ResourceIndexMap {
    /// Creates an empty map. The first assigned index will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers every teacher, room and atomic group of a school, in that
    /// order.
    pub fn from_school(school: &SchoolData) -> Self {
        let mut map = Self::new();
        for t in &school.teachers {
            map.add_teacher(t.id.clone());
        }
        for r in &school.rooms {
            map.add_room(r.id.clone());
        }
        for class in &school.classes {
            let divisions: Vec<&Vec<Ref>> = class
                .divisions
                .iter()
                .map(|d| &d.groups)
                .filter(|g| !g.is_empty())
                .collect();

            let mut combos: Vec<Vec<Ref>> = vec![Vec::new()];
            for groups in divisions {
                combos = combos
                    .iter()
                    .flat_map(|prefix| {
                        groups.iter().map(move |g| {
                            let mut next = prefix.clone();
                            next.push(g.clone());
                            next
                        })
                    })
                    .collect();
            }

            let mut class_indices = Vec::with_capacity(combos.len());
            for combo in combos {
                let members = combo.clone();
                let ix = map.add_atomic_group(class.id.clone(), combo);
                for g in members {
                    map.groups.entry(g).or_default().push(ix);
                }
                class_indices.push(ix);
            }
            map.map_group(class.id.clone(), class_indices);
        }
        map
    }

    fn push(&mut self, kind: ResourceKind) -> ResourceIndex {
        self.kinds.push(kind);
        self.kinds.len()
    }

    /// Assigns the next index to a teacher.
    pub fn add_teacher(&mut self, reference: impl Into<Ref>) -> ResourceIndex {
        let reference = reference.into();
        let ix = self.push(ResourceKind::Teacher(reference.clone()));
        self.teachers.insert(reference, ix);
        ix
    }

    /// Assigns the next index to a room.
    pub fn add_room(&mut self, reference: impl Into<Ref>) -> ResourceIndex {
        let reference = reference.into();
        let ix = self.push(ResourceKind::Room(reference.clone()));
        self.rooms.insert(reference, ix);
        ix
    }

    /// Assigns the next index to an atomic group. The group is not
    /// reachable by reference until [`map_group`](Self::map_group) names it.
    pub fn add_atomic_group(&mut self, class: impl Into<Ref>, groups: Vec<Ref>) -> ResourceIndex {
        self.push(ResourceKind::AtomicGroup {
            class: class.into(),
            groups,
        })
    }

    /// Maps a class or group reference to its atomic groups.
    pub fn map_group(&mut self, reference: impl Into<Ref>, atomic: Vec<ResourceIndex>) {
        self.groups.insert(reference.into(), atomic);
    }

    pub fn teacher(&self, reference: &str) -> Option<ResourceIndex> {
        self.teachers.get(reference).copied()
    }

    pub fn room(&self, reference: &str) -> Option<ResourceIndex> {
        self.rooms.get(reference).copied()
    }

    /// Atomic groups covered by a class or group reference.
    pub fn group(&self, reference: &str) -> Option<&[ResourceIndex]> {
        self.groups.get(reference).map(|v| v.as_slice())
    }

    /// Number of matrix rows, including the reserved index 0.
    pub fn resource_count(&self) -> usize {
        self.kinds.len() + 1
    }

    /// What a resource index stands for. `None` for 0 or out of range.
    pub fn kind_of(&self, index: ResourceIndex) -> Option<&ResourceKind> {
        index.checked_sub(1).and_then(|i| self.kinds.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::school::Division;

    #[test]
    fn test_index_zero_reserved() {
        let mut map = ResourceIndexMap::new();
        assert_eq!(map.resource_count(), 1);
        let t = map.add_teacher("T1");
        let r = map.add_room("R1");
        assert_eq!(t, 1);
        assert_eq!(r, 2);
        assert_eq!(map.resource_count(), 3);
        assert!(map.kind_of(0).is_none());
        assert_eq!(map.kind_of(1), Some(&ResourceKind::Teacher("T1".into())));
        assert_eq!(map.kind_of(2), Some(&ResourceKind::Room("R1".into())));
        assert!(map.kind_of(3).is_none());
    }

    #[test]
    fn test_lookup_missing() {
        let map = ResourceIndexMap::new();
        assert!(map.teacher("T1").is_none());
        assert!(map.room("R1").is_none());
        assert!(map.group("G1").is_none());
    }

    #[test]
    fn test_from_school_order() {
        let school = SchoolData::new()
            .with_teacher("T1")
            .with_teacher("T2")
            .with_room("R1")
            .with_class("1A", vec![]);
        let map = ResourceIndexMap::from_school(&school);

        assert_eq!(map.teacher("T1"), Some(1));
        assert_eq!(map.teacher("T2"), Some(2));
        assert_eq!(map.room("R1"), Some(3));
        assert_eq!(map.group("1A"), Some(&[4][..]));
        assert_eq!(map.resource_count(), 5);
    }

    #[test]
    fn test_atomic_group_cross_product() {
        let school = SchoolData::new().with_class(
            "1A",
            vec![
                Division::new("D1", vec!["A".into(), "B".into()]),
                Division::new("D2", vec!["X".into(), "Y".into()]),
            ],
        );
        let map = ResourceIndexMap::from_school(&school);

        // AX, AY, BX, BY
        assert_eq!(map.group("1A"), Some(&[1, 2, 3, 4][..]));
        assert_eq!(map.group("A"), Some(&[1, 2][..]));
        assert_eq!(map.group("B"), Some(&[3, 4][..]));
        assert_eq!(map.group("X"), Some(&[1, 3][..]));
        assert_eq!(map.group("Y"), Some(&[2, 4][..]));
        assert_eq!(
            map.kind_of(2),
            Some(&ResourceKind::AtomicGroup {
                class: "1A".into(),
                groups: vec!["A".into(), "Y".into()],
            })
        );
    }

    #[test]
    fn test_empty_division_ignored() {
        let school = SchoolData::new().with_class(
            "2B",
            vec![
                Division::new("D1", vec![]),
                Division::new("D2", vec!["G".into(), "H".into()]),
            ],
        );
        let map = ResourceIndexMap::from_school(&school);
        assert_eq!(map.group("2B"), Some(&[1, 2][..]));
        assert_eq!(map.group("G"), Some(&[1][..]));
    }
}
