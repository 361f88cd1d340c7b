//! The zone arena of a subdivided sphere.
//!
//! Construction happens in two phases. Phase 1 builds every zone's lattice
//! from its own corners alone. Phase 2 resolves peers and neighbours lazily
//! over the finished arena; results land in write-once cells, so any number
//! of threads may query a shared `&Icosphere`.

use std::sync::OnceLock;

use crate::edge::VertexRole;
use crate::{
    AdjacencyResolver, ClosestPointFinder, DivideOptions, ExportOptions, IcosphereError, Lattice,
    MeshExport, NeighborFinder, ValenceReport, Vertex, VertexRef, Zone, ZoneAdjacency, ZoneId,
};

/// A set of zones, their lattices, and cached cross-zone adjacency.
#[derive(Debug)]
pub struct Icosphere {
    zones: Vec<Zone>,
    lattices: Vec<Lattice>,
    adjacency: ZoneAdjacency,
    /// Flat cache slot of each zone's vertex 0.
    offsets: Vec<usize>,
    peers: Vec<OnceLock<Vec<VertexRef>>>,
    neighbors: Vec<OnceLock<Vec<VertexRef>>>,
}

impl Icosphere {
    /// Subdivide `zones` and index their adjacency.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::ZoneIdMismatch`] unless `zones[i].id()` is `ZoneId(i)`,
    /// and any [`Zone::subdivide`] error.
    pub fn new(
        zones: Vec<Zone>,
        divisions: u32,
        options: DivideOptions,
    ) -> Result<Self, IcosphereError> {
        if let Some((position, zone)) = zones
            .iter()
            .enumerate()
            .find(|(i, z)| z.id().index() != *i)
        {
            return Err(IcosphereError::ZoneIdMismatch {
                position,
                id: zone.id(),
            });
        }
        Self::from_ordered_zones(zones, divisions, options)
    }

    pub(crate) fn from_ordered_zones(
        zones: Vec<Zone>,
        divisions: u32,
        options: DivideOptions,
    ) -> Result<Self, IcosphereError> {
        let lattices = zones
            .iter()
            .map(|zone| zone.subdivide(divisions, &options))
            .collect::<Result<Vec<Lattice>, _>>()?;

        let mut offsets = Vec::with_capacity(lattices.len());
        let mut total = 0;
        for lattice in &lattices {
            offsets.push(total);
            total += lattice.vertices().len();
        }

        let adjacency = ZoneAdjacency::build(&zones);
        tracing::debug!(
            zones = zones.len(),
            divisions,
            vertices = total,
            "subdivided zones"
        );

        Ok(Self {
            zones,
            lattices,
            adjacency,
            offsets,
            peers: (0..total).map(|_| OnceLock::new()).collect(),
            neighbors: (0..total).map(|_| OnceLock::new()).collect(),
        })
    }

    /// All zones, indexed by [`ZoneId`].
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// A zone by id.
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    /// All lattices, parallel to [`zones`](Self::zones).
    pub fn lattices(&self) -> &[Lattice] {
        &self.lattices
    }

    /// The lattice of a zone.
    pub fn lattice(&self, id: ZoneId) -> Option<&Lattice> {
        self.lattices.get(id.index())
    }

    /// Corner and edge sharing tables.
    pub fn adjacency(&self) -> &ZoneAdjacency {
        &self.adjacency
    }

    /// A vertex by reference; `None` outside the arena.
    pub fn vertex(&self, v: VertexRef) -> Option<&Vertex> {
        self.lattice(v.zone)?.vertex(v.index)
    }

    /// Total vertices over all zones, duplicates included.
    pub fn vertex_count(&self) -> usize {
        self.peers.len()
    }

    /// Every vertex of every zone, zone by zone.
    pub fn vertex_refs(&self) -> impl Iterator<Item = VertexRef> + '_ {
        self.lattices.iter().flat_map(|lattice| {
            lattice
                .vertices()
                .iter()
                .map(move |v| VertexRef::new(lattice.zone(), v.index))
        })
    }

    /// Uncached resolver over this arena.
    pub fn resolver(&self) -> AdjacencyResolver<'_> {
        AdjacencyResolver::over_arena(&self.zones, &self.lattices, &self.adjacency)
    }

    fn slot(&self, v: VertexRef) -> Option<usize> {
        let lattice = self.lattice(v.zone)?;
        let index = v.index as usize;
        (index < lattice.vertices().len()).then(|| self.offsets[v.zone.index()] + index)
    }

    /// Vertices in other zones at the same physical point as `v`. Cached.
    ///
    /// # Errors
    ///
    /// See [`AdjacencyResolver::resolve_peers`]. Failures are not cached.
    pub fn resolve_peers(&self, v: VertexRef) -> Result<&[VertexRef], IcosphereError> {
        let cell = &self.peers[self.slot(v).ok_or(IcosphereError::UnknownVertex(v))?];
        if let Some(peers) = cell.get() {
            return Ok(peers);
        }
        let peers = self.resolver().resolve_peers(v)?;
        Ok(cell.get_or_init(|| peers))
    }

    /// The smallest ref among `v` and its peers; equal for every copy of a
    /// physical point.
    ///
    /// # Errors
    ///
    /// As for [`resolve_peers`](Self::resolve_peers).
    pub fn canonical(&self, v: VertexRef) -> Result<VertexRef, IcosphereError> {
        Ok(self
            .resolve_peers(v)?
            .iter()
            .copied()
            .fold(v, VertexRef::min))
    }

    /// Neighbours of `v` across zone boundaries, as sorted canonical refs.
    /// Cached.
    ///
    /// # Errors
    ///
    /// See [`NeighborFinder::neighbors`].
    pub fn neighbors(&self, v: VertexRef) -> Result<&[VertexRef], IcosphereError> {
        let cell = &self.neighbors[self.slot(v).ok_or(IcosphereError::UnknownVertex(v))?];
        if let Some(neighbors) = cell.get() {
            return Ok(neighbors);
        }
        let neighbors = NeighborFinder::new(self).neighbors(v)?;
        Ok(cell.get_or_init(|| neighbors))
    }

    /// Neighbour counts of every physical point against expected valence.
    ///
    /// # Errors
    ///
    /// The first peer-resolution error, e.g. on an open shape.
    pub fn valence_report(&self) -> Result<ValenceReport, IcosphereError> {
        NeighborFinder::new(self).valence_report()
    }

    /// Find the peer of an edge vertex geometrically: the nearest vertex on
    /// the mirror zone's copy of the edge. `None` for corners and interior
    /// vertices.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::UnknownVertex`] or the mirror lookup errors.
    pub fn locate_on_mirror_edge(
        &self,
        v: VertexRef,
    ) -> Result<Option<VertexRef>, IcosphereError> {
        let vertex = self.vertex(v).ok_or(IcosphereError::UnknownVertex(v))?;
        let VertexRole::Edge { edge, .. } = vertex.role else {
            return Ok(None);
        };
        let zone = self.zone(v.zone).ok_or(IcosphereError::UnknownVertex(v))?;
        let mirror = self.adjacency.mirror_edge(zone, edge)?;
        let Some(other) = self.lattice(mirror.zone) else {
            return Err(IcosphereError::MirrorZoneNotFound { zone: v.zone, edge });
        };

        let walk = other.edge_vertices(mirror.edge);
        let candidates: Vec<_> = walk.iter().map(|w| w.position).collect();
        Ok(ClosestPointFinder::euclidean()
            .find(vertex.position, &candidates)
            .map(|i| VertexRef::new(mirror.zone, walk[i].index)))
    }

    /// Resolve peers and neighbours of every vertex, spreading zones over
    /// all available cores.
    ///
    /// # Errors
    ///
    /// The first resolution error any worker hit.
    pub fn resolve_all(&self) -> Result<(), IcosphereError> {
        self.resolve_all_with(num_cpus::get())
    }

    /// Like [`resolve_all`](Self::resolve_all) with an explicit worker count.
    ///
    /// # Errors
    ///
    /// The first resolution error any worker hit.
    pub fn resolve_all_with(&self, threads: usize) -> Result<(), IcosphereError> {
        let threads = threads.clamp(1, self.lattices.len().max(1));
        let per_worker = self.lattices.len().div_ceil(threads).max(1);

        std::thread::scope(|scope| {
            let workers: Vec<_> = self
                .lattices
                .chunks(per_worker)
                .map(|chunk| {
                    scope.spawn(move || -> Result<(), IcosphereError> {
                        for lattice in chunk {
                            for vertex in lattice.vertices() {
                                self.neighbors(VertexRef::new(lattice.zone(), vertex.index))?;
                            }
                        }
                        Ok(())
                    })
                })
                .collect();

            workers.into_iter().try_for_each(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
        })
    }

    /// Flatten every lattice into one mesh.
    ///
    /// # Errors
    ///
    /// See [`MeshExport::from_lattices`].
    pub fn export(&self, options: &ExportOptions) -> Result<MeshExport, IcosphereError> {
        MeshExport::from_lattices(&self.lattices, options)
    }
}
