//! Error types for zone construction and cross-zone adjacency.

use crate::{EdgeIdentity, VertexRef, ZoneId};

/// Errors raised while building zones or resolving adjacency between them.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum IcosphereError {
    /// A zone was given something other than three corners.
    #[error("zone needs exactly 3 corners, got {0}")]
    CornerCount(usize),

    /// A corner coordinate is NaN or infinite.
    #[error("corner {corner} has a non-finite coordinate")]
    NonFiniteCorner { corner: usize },

    /// Two corners of a zone are the same point.
    #[error("zone corners must be three distinct points")]
    DegenerateCorners,

    /// The sphere radius is not a finite positive number.
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    /// A lattice vertex sits at the origin, so it has no direction to project along.
    #[error("vertex ({row}, {col}) of {zone} lies at the origin and cannot be projected")]
    DegenerateProjection { zone: ZoneId, row: u32, col: u32 },

    /// A division count above the supported limit.
    #[error("{divisions} divisions exceeds the limit of {max}")]
    TooManyDivisions { divisions: u32, max: u32 },

    /// A point registry quantum that is not a finite positive number.
    #[error("quantum must be finite and positive, got {0}")]
    InvalidQuantum(f64),

    /// No other zone shares this edge; the base shape is not closed.
    #[error("no mirror zone shares edge {edge:?} of {zone}")]
    MirrorZoneNotFound { zone: ZoneId, edge: EdgeIdentity },

    /// More than one other zone shares this edge; the base shape is not a manifold.
    #[error("edge {edge:?} of {zone} is shared by {count} other zones")]
    NonManifoldEdge {
        zone: ZoneId,
        edge: EdgeIdentity,
        count: usize,
    },

    /// Two zones sharing an edge were divided a different number of times.
    #[error("{zone} is divided {found} times, expected {expected}")]
    DivisionMismatch {
        zone: ZoneId,
        expected: u32,
        found: u32,
    },

    /// A zone's id does not match its position in the arena.
    #[error("zone at position {position} has id {id}")]
    ZoneIdMismatch { position: usize, id: ZoneId },

    /// A resolver was given a different number of zones and lattices.
    #[error("{zones} zones but {lattices} lattices")]
    LatticeCount { zones: usize, lattices: usize },

    /// The vertex reference does not point into the zone arena.
    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexRef),
}
