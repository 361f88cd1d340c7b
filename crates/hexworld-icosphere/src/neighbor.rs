//! Neighbour sets that span zone boundaries.
//!
//! A vertex's neighbours are the lattice neighbours of every copy of its
//! physical point (itself plus its peers). Each copy is identified by a
//! canonical [`VertexRef`], the smallest ref among the vertex and its peers,
//! so duplicates collapse and the point itself never counts as its own
//! neighbour.

use std::collections::BTreeSet;

use crate::edge::VertexRole;
use crate::{Icosphere, IcosphereError, Lattice, Vertex, VertexRef};

/// `(row, col)` steps to the six lattice neighbours.
pub const LATTICE_OFFSETS: [(i64, i64); 6] = [(1, 0), (1, 1), (0, 1), (0, -1), (-1, -1), (-1, 0)];

/// In-zone neighbours of `vertex`; out-of-range offsets are skipped.
pub fn local_neighbors<'a>(
    lattice: &'a Lattice,
    vertex: &Vertex,
) -> impl Iterator<Item = &'a Vertex> + use<'a> {
    let (row, col) = (i64::from(vertex.row), i64::from(vertex.col));
    LATTICE_OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| lattice.vertex_at(row + dr, col + dc))
}

/// Computes cross-zone neighbour sets over an [`Icosphere`] arena.
///
/// Peer lists come from the sphere's cache; neighbour lists are recomputed on
/// every call. [`Icosphere::neighbors`] caches them.
#[derive(Clone, Copy, Debug)]
pub struct NeighborFinder<'a> {
    sphere: &'a Icosphere,
}

impl<'a> NeighborFinder<'a> {
    /// Finder over `sphere`.
    pub fn new(sphere: &'a Icosphere) -> Self {
        Self { sphere }
    }

    /// Sorted canonical refs of every physical point adjacent to `v`.
    ///
    /// # Errors
    ///
    /// Any peer-resolution error for `v` or for the boundary vertices around it.
    pub fn neighbors(&self, v: VertexRef) -> Result<Vec<VertexRef>, IcosphereError> {
        let own = self.sphere.canonical(v)?;
        let peers = self.sphere.resolve_peers(v)?;

        let mut found = BTreeSet::new();
        for copy in std::iter::once(v).chain(peers.iter().copied()) {
            let (Some(lattice), Some(vertex)) =
                (self.sphere.lattice(copy.zone), self.sphere.vertex(copy))
            else {
                return Err(IcosphereError::UnknownVertex(copy));
            };
            for next in local_neighbors(lattice, vertex) {
                found.insert(self.sphere.canonical(VertexRef::new(copy.zone, next.index))?);
            }
        }
        found.remove(&own);

        tracing::trace!(vertex = %v, count = found.len(), "neighbours");
        Ok(found.into_iter().collect())
    }

    /// Valence `v` must have on a closed sphere: one per zone meeting at a
    /// corner's base point, 6 everywhere else.
    ///
    /// # Errors
    ///
    /// As for [`Icosphere::resolve_peers`].
    pub fn expected_valence(&self, v: VertexRef) -> Result<usize, IcosphereError> {
        let vertex = self
            .sphere
            .vertex(v)
            .ok_or(IcosphereError::UnknownVertex(v))?;
        Ok(match vertex.role {
            VertexRole::Corner(_) => self.sphere.resolve_peers(v)?.len() + 1,
            VertexRole::Edge { .. } | VertexRole::Interior => 6,
        })
    }

    /// Check every physical point's neighbour count against its expected
    /// valence.
    ///
    /// # Errors
    ///
    /// The first peer-resolution error encountered.
    pub fn valence_report(&self) -> Result<ValenceReport, IcosphereError> {
        let mut report = ValenceReport::default();
        for v in self.sphere.vertex_refs() {
            if self.sphere.canonical(v)? != v {
                continue;
            }
            let found = self.sphere.neighbors(v)?.len();
            let expected = self.expected_valence(v)?;
            report.points += 1;
            match found {
                5 => report.pentagons += 1,
                6 => report.hexagons += 1,
                _ => {}
            }
            if found != expected {
                report.violations.push(ValenceViolation {
                    vertex: v,
                    expected,
                    found,
                });
            }
        }
        Ok(report)
    }
}

/// A point whose neighbour count differs from its expected valence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValenceViolation {
    /// Canonical ref of the point.
    pub vertex: VertexRef,
    pub expected: usize,
    pub found: usize,
}

/// Summary of neighbour counts over all physical points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValenceReport {
    /// Distinct physical points checked.
    pub points: usize,
    /// Points with 5 neighbours.
    pub pentagons: usize,
    /// Points with 6 neighbours.
    pub hexagons: usize,
    pub violations: Vec<ValenceViolation>,
}

impl ValenceReport {
    /// True when no point violates its expected valence.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::{BaseShape, DivideOptions, Point, Triangulation, Zone, ZoneId};

    fn flat(divisions: u32) -> Lattice {
        Zone::new(
            ZoneId(0),
            &[
                Point::new(DVec3::ZERO),
                Point::new(DVec3::X),
                Point::new(DVec3::Y),
            ],
            None,
        )
        .unwrap()
        .subdivide(divisions, &DivideOptions::default())
        .unwrap()
    }

    #[test]
    fn test_interior_vertex_has_six_local_neighbors() {
        let lattice = flat(4);
        let v = lattice.vertex_at(2, 1).unwrap();
        let mut coords: Vec<(u32, u32)> =
            local_neighbors(&lattice, v).map(|n| (n.row, n.col)).collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(1, 0), (1, 1), (2, 0), (2, 2), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_boundary_vertices_lose_out_of_range_offsets() {
        let lattice = flat(4);
        let root = lattice.vertex_at(0, 0).unwrap();
        assert_eq!(local_neighbors(&lattice, root).count(), 2);
        let row_corner = lattice.vertex_at(4, 0).unwrap();
        assert_eq!(local_neighbors(&lattice, row_corner).count(), 2);
        let edge = lattice.vertex_at(4, 2).unwrap();
        assert_eq!(local_neighbors(&lattice, edge).count(), 4);
    }

    #[test]
    fn test_edge_vertex_neighbors_span_both_zones() {
        let sphere = BaseShape::build(1.0, 0)
            .unwrap()
            .into_icosphere(3, Triangulation::Diamond)
            .unwrap();
        let v = VertexRef::new(ZoneId(0), crate::lattice_index(3, 1));
        let neighbors = sphere.neighbors(v).unwrap();
        assert_eq!(neighbors.len(), 6);

        let peer = sphere.resolve_peers(v).unwrap()[0];
        assert_ne!(peer.zone, v.zone);
        assert_eq!(sphere.neighbors(peer).unwrap(), neighbors);
    }

    #[test]
    fn test_expected_valence() {
        let sphere = BaseShape::build(1.0, 0)
            .unwrap()
            .into_icosphere(2, Triangulation::Diamond)
            .unwrap();
        let finder = NeighborFinder::new(&sphere);
        assert_eq!(finder.expected_valence(VertexRef::new(ZoneId(0), 0)), Ok(5));
        assert_eq!(finder.expected_valence(VertexRef::new(ZoneId(0), 1)), Ok(6));
    }

    #[test]
    fn test_report_counts_the_icosahedron_corners() {
        let sphere = BaseShape::build(1.0, 0)
            .unwrap()
            .into_icosphere(3, Triangulation::Diamond)
            .unwrap();
        let report = NeighborFinder::new(&sphere).valence_report().unwrap();
        assert!(report.is_valid(), "{:?}", report.violations);
        assert_eq!(report.pentagons, 12);
        assert_eq!(report.points, 10 * 9 + 2);
        assert_eq!(report.hexagons, report.points - 12);
    }
}
