//! Base-shape points and their stable identities.

use std::fmt;

use glam::DVec3;

/// Stable identity of a base-shape point, handed out by a
/// [`PointRegistry`](crate::PointRegistry).
///
/// Corner matching between zones compares these ids, never coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl PointId {
    /// Position of this id in its registry's point list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root_{}", self.0)
    }
}

/// An immutable point in world space with an optional stable identity.
///
/// Points without an id are anonymous: zones built from them can still be
/// subdivided, but their corners never match corners of other zones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// World-space position.
    pub position: DVec3,
    /// Registry identity, if the point was interned.
    pub id: Option<PointId>,
}

impl Point {
    /// An anonymous point.
    #[must_use]
    pub fn new(position: DVec3) -> Self {
        Self { position, id: None }
    }

    /// A point carrying a registry identity.
    #[must_use]
    pub fn named(id: PointId, position: DVec3) -> Self {
        Self {
            position,
            id: Some(id),
        }
    }

    /// True when every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }

    /// Human-readable name (`root_<n>`) of a named point.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl From<DVec3> for Point {
    fn from(position: DVec3) -> Self {
        Self::new(position)
    }
}
