//! Cross-zone vertex correspondence.
//!
//! Every zone builds its own lattice, so a physical point on a shared corner
//! or edge exists once per zone touching it. [`ZoneAdjacency`] indexes which
//! zones share which base points and edges; [`AdjacencyResolver`] uses it to
//! map a boundary vertex to its duplicates (peers) in the other zones.

use rustc_hash::FxHashMap;

use crate::edge::VertexRole;
use crate::{
    EdgeIdentity, IcosphereError, Lattice, PointId, Vertex, VertexRef, Zone, ZoneCorner, ZoneId,
};

/// An edge as seen by one zone: which zone, which of its edges, and the base
/// point at that edge's first corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EdgeSide {
    zone: ZoneId,
    edge: EdgeIdentity,
    first: PointId,
}

/// The zone across an edge and how its copy of the edge is oriented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MirrorEdge {
    /// The other zone.
    pub zone: ZoneId,
    /// The other zone's identity for the shared edge.
    pub edge: EdgeIdentity,
    /// True when the mirror lists the shared corners in the opposite order,
    /// so position `p` on one side is `N - p` on the other.
    pub reversed: bool,
}

/// Lookup tables from base points and base edges to the zones using them.
///
/// Zones with anonymous corners are only partially indexed: a corner without
/// a [`PointId`] matches nothing.
#[derive(Clone, Debug, Default)]
pub struct ZoneAdjacency {
    corners: FxHashMap<PointId, Vec<(ZoneId, ZoneCorner)>>,
    edges: FxHashMap<(PointId, PointId), Vec<EdgeSide>>,
}

fn edge_key(a: PointId, b: PointId) -> (PointId, PointId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl ZoneAdjacency {
    /// Index the corners and edges of `zones`.
    pub fn build(zones: &[Zone]) -> Self {
        let mut adjacency = Self::default();
        for zone in zones {
            for corner in ZoneCorner::ALL {
                if let Some(id) = zone.corner_id(corner) {
                    adjacency
                        .corners
                        .entry(id)
                        .or_default()
                        .push((zone.id(), corner));
                }
            }
            for edge in EdgeIdentity::ALL {
                let (first, second) = edge.corners();
                if let (Some(a), Some(b)) = (zone.corner_id(first), zone.corner_id(second)) {
                    adjacency.edges.entry(edge_key(a, b)).or_default().push(EdgeSide {
                        zone: zone.id(),
                        edge,
                        first: a,
                    });
                }
            }
        }
        tracing::debug!(
            points = adjacency.corners.len(),
            edges = adjacency.edges.len(),
            "indexed zone adjacency"
        );
        adjacency
    }

    /// Zones (and which of their corners) meeting at base point `id`.
    pub fn zones_at(&self, id: PointId) -> &[(ZoneId, ZoneCorner)] {
        self.corners.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single other zone sharing `edge` of `zone`.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::MirrorZoneNotFound`] when no other zone shares the
    /// edge (or the edge has an anonymous corner), and
    /// [`IcosphereError::NonManifoldEdge`] when several do.
    pub fn mirror_edge(
        &self,
        zone: &Zone,
        edge: EdgeIdentity,
    ) -> Result<MirrorEdge, IcosphereError> {
        let not_found = IcosphereError::MirrorZoneNotFound {
            zone: zone.id(),
            edge,
        };
        let (first, second) = edge.corners();
        let (Some(a), Some(b)) = (zone.corner_id(first), zone.corner_id(second)) else {
            return Err(not_found);
        };

        let mut others = self
            .edges
            .get(&edge_key(a, b))
            .into_iter()
            .flatten()
            .filter(|side| side.zone != zone.id());
        let Some(side) = others.next() else {
            return Err(not_found);
        };
        let extra = others.count();
        if extra > 0 {
            return Err(IcosphereError::NonManifoldEdge {
                zone: zone.id(),
                edge,
                count: extra + 1,
            });
        }

        Ok(MirrorEdge {
            zone: side.zone,
            edge: side.edge,
            reversed: side.first != a,
        })
    }
}

/// Maps boundary vertices to the vertices representing the same point in
/// neighbouring zones.
///
/// Borrows the whole arena: zones and lattices are indexed by [`ZoneId`].
#[derive(Clone, Copy, Debug)]
pub struct AdjacencyResolver<'a> {
    zones: &'a [Zone],
    lattices: &'a [Lattice],
    adjacency: &'a ZoneAdjacency,
}

impl<'a> AdjacencyResolver<'a> {
    /// Resolver over an arena where `zones[i]` and `lattices[i]` both
    /// belong to `ZoneId(i)`.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::LatticeCount`] when the slices differ in length and
    /// [`IcosphereError::ZoneIdMismatch`] for the first zone or lattice out
    /// of place.
    pub fn new(
        zones: &'a [Zone],
        lattices: &'a [Lattice],
        adjacency: &'a ZoneAdjacency,
    ) -> Result<Self, IcosphereError> {
        if zones.len() != lattices.len() {
            return Err(IcosphereError::LatticeCount {
                zones: zones.len(),
                lattices: lattices.len(),
            });
        }
        for (position, (zone, lattice)) in zones.iter().zip(lattices).enumerate() {
            for id in [zone.id(), lattice.zone()] {
                if id.index() != position {
                    return Err(IcosphereError::ZoneIdMismatch { position, id });
                }
            }
        }
        Ok(Self::over_arena(zones, lattices, adjacency))
    }

    /// Resolver over slices already known to be indexed by [`ZoneId`].
    pub(crate) fn over_arena(
        zones: &'a [Zone],
        lattices: &'a [Lattice],
        adjacency: &'a ZoneAdjacency,
    ) -> Self {
        Self {
            zones,
            lattices,
            adjacency,
        }
    }

    /// The lattice of `zone`.
    pub fn lattice(&self, zone: ZoneId) -> Option<&'a Lattice> {
        self.lattices.get(zone.index())
    }

    /// Look up a vertex.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::UnknownVertex`] when `v` is outside the arena.
    pub fn vertex(&self, v: VertexRef) -> Result<&'a Vertex, IcosphereError> {
        self.lattice(v.zone)
            .and_then(|lattice| lattice.vertex(v.index))
            .ok_or(IcosphereError::UnknownVertex(v))
    }

    /// Every vertex in another zone at the same physical point as `v`.
    ///
    /// Corners get one peer per other zone meeting at their base point, edge
    /// vertices get exactly one, interior vertices none.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::UnknownVertex`] for a bad reference, and the
    /// [`ZoneAdjacency::mirror_edge`] and [`IcosphereError::DivisionMismatch`]
    /// errors for edge vertices.
    pub fn resolve_peers(&self, v: VertexRef) -> Result<Vec<VertexRef>, IcosphereError> {
        let peers = match self.vertex(v)?.role {
            VertexRole::Corner(corner) => self.corner_peers(v.zone, corner),
            VertexRole::Edge { edge, position } => vec![self.edge_peer(v.zone, edge, position)?],
            VertexRole::Interior => Vec::new(),
        };
        tracing::trace!(vertex = %v, peers = peers.len(), "resolved peers");
        Ok(peers)
    }

    /// Corner vertices of the other zones sharing `corner`'s base point.
    pub fn corner_peers(&self, zone: ZoneId, corner: ZoneCorner) -> Vec<VertexRef> {
        let Some(id) = self.zones.get(zone.index()).and_then(|z| z.corner_id(corner)) else {
            return Vec::new();
        };
        self.adjacency
            .zones_at(id)
            .iter()
            .filter(|(other, _)| *other != zone)
            .filter_map(|&(other, other_corner)| {
                let lattice = self.lattice(other)?;
                Some(VertexRef::new(other, lattice.corner(other_corner).index))
            })
            .collect()
    }

    /// The vertex `position` steps along `edge` of `zone`, seen from the
    /// mirror zone.
    ///
    /// # Errors
    ///
    /// See [`resolve_peers`](Self::resolve_peers).
    pub fn edge_peer(
        &self,
        zone: ZoneId,
        edge: EdgeIdentity,
        position: u32,
    ) -> Result<VertexRef, IcosphereError> {
        let (Some(owner), Some(lattice)) = (self.zones.get(zone.index()), self.lattice(zone)) else {
            return Err(IcosphereError::UnknownVertex(VertexRef::new(zone, 0)));
        };
        let mirror = self.adjacency.mirror_edge(owner, edge)?;
        let n = lattice.divisions();
        let Some(other) = self.lattice(mirror.zone) else {
            return Err(IcosphereError::MirrorZoneNotFound { zone, edge });
        };
        if other.divisions() != n {
            return Err(IcosphereError::DivisionMismatch {
                zone: mirror.zone,
                expected: n,
                found: other.divisions(),
            });
        }

        let mirrored = if mirror.reversed { n - position } else { position };
        let (row, col) = mirror.edge.lattice_coord(mirrored, n);
        Ok(VertexRef::new(mirror.zone, crate::lattice_index(row, col)))
    }
}
