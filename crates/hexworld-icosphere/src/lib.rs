//! Icosphere generation: per-zone barycentric subdivision of an icosahedron
//! and vertex adjacency resolved across zone boundaries.

mod adjacency;
mod base_shape;
mod closest;
mod edge;
mod error;
mod export;
mod icosphere;
mod lattice;
mod neighbor;
mod point;
mod registry;
mod zone;

pub use adjacency::{AdjacencyResolver, MirrorEdge, ZoneAdjacency};
pub use base_shape::{BaseShape, ICOSAHEDRON_FACES, MAX_ISO_DIVISIONS, icosahedron_vertices};
pub use closest::{Bracket, ClosestPointFinder, DistanceMetric, bracket, sorted_unique};
pub use edge::{EdgeIdentity, VertexRole, classify};
pub use error::IcosphereError;
pub use export::{ExportOptions, FaceStyle, MeshExport};
pub use icosphere::Icosphere;
pub use lattice::{
    DivideOptions, Face, Lattice, MAX_DIVISIONS, Triangulation, Vertex, VertexRef, lattice_index,
    vertex_count,
};
pub use neighbor::{
    LATTICE_OFFSETS, NeighborFinder, ValenceReport, ValenceViolation, local_neighbors,
};
pub use point::{Point, PointId};
pub use registry::{DEFAULT_QUANTUM, PointRegistry};
pub use zone::{Zone, ZoneCorner, ZoneId};

/// Build the root zones of a sphere of `radius`, each icosahedron face split
/// `iso_divisions + 1` times per edge.
///
/// # Errors
///
/// [`IcosphereError::InvalidRadius`] for a non-positive or non-finite radius
/// and [`IcosphereError::TooManyDivisions`] above [`MAX_ISO_DIVISIONS`].
pub fn build_base_shape(radius: f64, iso_divisions: u32) -> Result<BaseShape, IcosphereError> {
    BaseShape::build(radius, iso_divisions)
}
