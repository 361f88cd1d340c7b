//! Zones: triangular faces of the base shape.
//!
//! A zone's corners are ordered `(root, row, col)`. The row axis interpolates
//! from the root toward the row corner; the col axis steps from the row axis
//! toward the col corner. Every subdivision of the zone uses that basis.

use std::fmt;

use crate::{
    DivideOptions, IcosphereError, Lattice, Point, PointId, PointRegistry, Triangulation,
};

/// Position of a zone in its owning arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

impl ZoneId {
    /// Index into the arena's zone list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone_{}", self.0)
    }
}

/// The three corners of a zone, in orientation-significant order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ZoneCorner {
    /// Lattice `(0, 0)`.
    Root = 0,
    /// Lattice `(N, 0)`.
    Row = 1,
    /// Lattice `(N, N)`.
    Col = 2,
}

impl ZoneCorner {
    /// All corners in canonical order.
    pub const ALL: [ZoneCorner; 3] = [ZoneCorner::Root, ZoneCorner::Row, ZoneCorner::Col];

    /// Corner index in `0..3`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lattice `(row, col)` of this corner in a zone divided `divisions` times.
    #[must_use]
    pub fn lattice_coord(self, divisions: u32) -> (u32, u32) {
        match self {
            ZoneCorner::Root => (0, 0),
            ZoneCorner::Row => (divisions, 0),
            ZoneCorner::Col => (divisions, divisions),
        }
    }
}

/// A triangular face of the base shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    id: ZoneId,
    corners: [Point; 3],
    parent: Option<ZoneId>,
}

impl Zone {
    /// Create a zone from exactly three finite, distinct corners.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::CornerCount`], [`IcosphereError::NonFiniteCorner`] or
    /// [`IcosphereError::DegenerateCorners`] for malformed corner input.
    pub fn new(
        id: ZoneId,
        corners: &[Point],
        parent: Option<ZoneId>,
    ) -> Result<Self, IcosphereError> {
        let corners: [Point; 3] = corners
            .try_into()
            .map_err(|_| IcosphereError::CornerCount(corners.len()))?;

        if let Some(corner) = corners.iter().position(|p| !p.is_finite()) {
            return Err(IcosphereError::NonFiniteCorner { corner });
        }

        let same = |a: &Point, b: &Point| {
            a.position == b.position || (a.id.is_some() && a.id == b.id)
        };
        if same(&corners[0], &corners[1])
            || same(&corners[0], &corners[2])
            || same(&corners[1], &corners[2])
        {
            return Err(IcosphereError::DegenerateCorners);
        }

        Ok(Self {
            id,
            corners,
            parent,
        })
    }

    /// This zone's arena id.
    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// The zone this one was split from, `None` for root zones.
    #[must_use]
    pub fn parent(&self) -> Option<ZoneId> {
        self.parent
    }

    /// Corners in `(root, row, col)` order.
    #[must_use]
    pub fn corners(&self) -> &[Point; 3] {
        &self.corners
    }

    /// A single corner.
    #[must_use]
    pub fn corner(&self, corner: ZoneCorner) -> &Point {
        &self.corners[corner.index()]
    }

    /// Registry id of a corner, if the corner is named.
    #[must_use]
    pub fn corner_id(&self, corner: ZoneCorner) -> Option<PointId> {
        self.corner(corner).id
    }

    /// Which corner of this zone is the base point `id`.
    #[must_use]
    pub fn corner_of(&self, id: PointId) -> Option<ZoneCorner> {
        ZoneCorner::ALL
            .into_iter()
            .find(|&c| self.corner_id(c) == Some(id))
    }

    /// Build this zone's lattice. Depends only on the corners, `divisions`
    /// and `options`.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::TooManyDivisions`] above [`MAX_DIVISIONS`](crate::MAX_DIVISIONS),
    /// [`IcosphereError::InvalidRadius`] for a projection radius that is not
    /// finite and positive, and [`IcosphereError::DegenerateProjection`] when
    /// a projected vertex lies at the origin.
    pub fn subdivide(
        &self,
        divisions: u32,
        options: &DivideOptions,
    ) -> Result<Lattice, IcosphereError> {
        Lattice::build(self, divisions, options)
    }

    /// Split this zone into one child zone per diamond-lattice face.
    ///
    /// Lattice positions are interned in `registry` in vertex order, so
    /// children sharing a location share a [`PointId`]. Child ids are
    /// assigned consecutively from `first_id`.
    ///
    /// # Errors
    ///
    /// Propagates [`Zone::new`] errors, which only occur for a degenerate
    /// lattice (e.g. a registry quantum coarser than the lattice spacing).
    pub fn child_zones(
        &self,
        lattice: &Lattice,
        registry: &mut PointRegistry,
        first_id: ZoneId,
    ) -> Result<Vec<Zone>, IcosphereError> {
        let points: Vec<Point> = lattice
            .vertices()
            .iter()
            .map(|v| registry.intern_point(v.position))
            .collect();

        lattice
            .faces_for(Triangulation::Diamond)
            .iter()
            .enumerate()
            .map(|(i, &face)| {
                let corners = face.map(|index| points[index as usize]);
                Zone::new(ZoneId(first_id.0 + i as u32), &corners, Some(self.id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;

    fn corners() -> [Point; 3] {
        [
            Point::named(PointId(0), DVec3::new(0.0, 0.0, 10.0)),
            Point::named(PointId(1), DVec3::new(10.0, 0.0, 0.0)),
            Point::named(PointId(2), DVec3::new(10.0, 0.0, 10.0)),
        ]
    }

    #[test]
    fn test_corner_accessors() {
        let zone = Zone::new(ZoneId(0), &corners(), None).unwrap();
        assert_eq!(zone.corner(ZoneCorner::Root).position, DVec3::new(0.0, 0.0, 10.0));
        assert_eq!(zone.corner(ZoneCorner::Row).position, DVec3::new(10.0, 0.0, 0.0));
        assert_eq!(zone.corner(ZoneCorner::Col).position, DVec3::new(10.0, 0.0, 10.0));
        assert_eq!(zone.corner_of(PointId(2)), Some(ZoneCorner::Col));
        assert_eq!(zone.corner_of(PointId(9)), None);
        assert_eq!(zone.parent(), None);
    }

    #[test]
    fn test_wrong_corner_count_is_rejected() {
        let c = corners();
        assert_eq!(
            Zone::new(ZoneId(0), &c[..2], None),
            Err(IcosphereError::CornerCount(2))
        );
        let four = [c[0], c[1], c[2], c[0]];
        assert_eq!(
            Zone::new(ZoneId(0), &four, None),
            Err(IcosphereError::CornerCount(4))
        );
    }

    #[test]
    fn test_non_finite_corner_is_rejected() {
        let mut c = corners();
        c[1] = Point::new(DVec3::new(1.0, f64::NAN, 0.0));
        assert_eq!(
            Zone::new(ZoneId(0), &c, None),
            Err(IcosphereError::NonFiniteCorner { corner: 1 })
        );
    }

    #[test]
    fn test_repeated_corner_is_rejected() {
        let c = corners();
        assert_eq!(
            Zone::new(ZoneId(0), &[c[0], c[1], c[0]], None),
            Err(IcosphereError::DegenerateCorners)
        );
        let same_id = Point::named(PointId(0), DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(
            Zone::new(ZoneId(0), &[c[0], c[1], same_id], None),
            Err(IcosphereError::DegenerateCorners)
        );
    }

    #[test]
    fn test_child_zones_follow_diamond_faces() {
        let mut registry = PointRegistry::new();
        let named: Vec<Point> = corners()
            .iter()
            .map(|p| registry.intern_point(p.position))
            .collect();
        let zone = Zone::new(ZoneId(0), &named, None).unwrap();
        let lattice = zone.subdivide(2, &DivideOptions::default()).unwrap();

        let children = zone.child_zones(&lattice, &mut registry, ZoneId(0)).unwrap();
        let ids: Vec<[u32; 3]> = children
            .iter()
            .map(|z| z.corners().map(|p| p.id.map_or(u32::MAX, |id| id.0)))
            .collect();
        assert_eq!(ids, vec![[0, 3, 4], [3, 1, 5], [3, 5, 4], [4, 5, 2]]);

        let positions: Vec<[f64; 3]> = registry.positions().iter().map(|p| p.to_array()).collect();
        assert_eq!(
            positions,
            vec![
                [0.0, 0.0, 10.0],
                [10.0, 0.0, 0.0],
                [10.0, 0.0, 10.0],
                [5.0, 0.0, 5.0],
                [5.0, 0.0, 10.0],
                [10.0, 0.0, 5.0],
            ]
        );
        assert!(children.iter().all(|z| z.parent() == Some(ZoneId(0))));
    }
}
