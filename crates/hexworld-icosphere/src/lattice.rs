//! Barycentric lattice of a subdivided zone.
//!
//! A zone divided `N` times has `N + 1` rows; row `r` holds `r + 1` vertices.
//! Vertices are stored row-major with ascending columns, so the vertex at
//! `(row, col)` has index `row * (row + 1) / 2 + col`.

use std::fmt;

use glam::DVec3;

use crate::edge::{VertexRole, classify};
use crate::{EdgeIdentity, IcosphereError, Zone, ZoneCorner, ZoneId};

/// Largest accepted division count. Keeps every row-major index within `u32`.
pub const MAX_DIVISIONS: u32 = 4096;

/// Three vertex indices, wound in the zone's `(root, row, col)` orientation.
pub type Face = [u32; 3];

/// Which triangles are emitted for each lattice row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Triangulation {
    /// Upward triangles only: `N(N+1)/2` faces. Leaves the downward gaps open.
    Strip,
    /// Upward and downward triangles: `N²` faces covering the whole zone.
    #[default]
    Diamond,
}

impl Triangulation {
    /// Number of faces produced for a zone divided `divisions` times.
    #[must_use]
    pub fn face_count(self, divisions: u32) -> usize {
        let n = divisions as usize;
        match self {
            Triangulation::Strip => n * (n + 1) / 2,
            Triangulation::Diamond => n * n,
        }
    }
}

/// Settings for [`Zone::subdivide`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DivideOptions {
    /// Face layout of the lattice.
    pub triangulation: Triangulation,
    /// When set, every vertex is pushed out to this distance from the origin.
    pub radius: Option<f64>,
}

impl DivideOptions {
    /// Diamond lattice projected onto a sphere of `radius`.
    #[must_use]
    pub fn projected(radius: f64) -> Self {
        Self {
            triangulation: Triangulation::Diamond,
            radius: Some(radius),
        }
    }

    /// Replace the triangulation.
    #[must_use]
    pub fn with_triangulation(mut self, triangulation: Triangulation) -> Self {
        self.triangulation = triangulation;
        self
    }
}

/// Identity of a vertex in a zone arena: its zone and its lattice index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexRef {
    /// Owning zone.
    pub zone: ZoneId,
    /// Index in the zone's lattice.
    pub index: u32,
}

impl VertexRef {
    /// Construct a vertex reference.
    #[must_use]
    pub fn new(zone: ZoneId, index: u32) -> Self {
        Self { zone, index }
    }
}

impl fmt::Display for VertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-v.{}", self.zone, self.index)
    }
}

/// A lattice vertex. Carries all of its metadata from creation on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Lattice row, `0..=N`.
    pub row: u32,
    /// Lattice column, `0..=row`.
    pub col: u32,
    /// Row-major index within the zone.
    pub index: u32,
    /// World-space position (projected when the lattice has a radius).
    pub position: DVec3,
    /// Corner / edge / interior role.
    pub role: VertexRole,
}

impl Vertex {
    /// Lattice steps from this vertex to the root, row and col corner edges:
    /// `(row, N - row + col, N - col)`.
    #[must_use]
    pub fn corner_offsets(&self, divisions: u32) -> [u32; 3] {
        [self.row, divisions - self.row + self.col, divisions - self.col]
    }
}

/// Row-major index of `(row, col)`.
#[inline]
#[must_use]
pub fn lattice_index(row: u32, col: u32) -> u32 {
    row * (row + 1) / 2 + col
}

/// Number of vertices in a lattice divided `divisions` times.
#[must_use]
pub fn vertex_count(divisions: u32) -> usize {
    let n = divisions as usize;
    (n + 1) * (n + 2) / 2
}

/// The subdivided lattice of one zone. Immutable once built.
#[derive(Clone, Debug)]
pub struct Lattice {
    zone: ZoneId,
    divisions: u32,
    triangulation: Triangulation,
    radius: Option<f64>,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Lattice {
    pub(crate) fn build(
        zone: &Zone,
        divisions: u32,
        options: &DivideOptions,
    ) -> Result<Self, IcosphereError> {
        if divisions > MAX_DIVISIONS {
            return Err(IcosphereError::TooManyDivisions {
                divisions,
                max: MAX_DIVISIONS,
            });
        }
        if let Some(radius) = options.radius
            && (!radius.is_finite() || radius <= 0.0)
        {
            return Err(IcosphereError::InvalidRadius(radius));
        }
        if divisions < 1 {
            tracing::debug!(zone = %zone.id(), "division count 0, using the bare corners");
        }
        let n = divisions.max(1);
        let [root, row_corner, col_corner] = zone.corners().map(|p| p.position);
        let col_unit = (col_corner - row_corner) / f64::from(n);

        let mut vertices = Vec::with_capacity(vertex_count(n));
        for row in 0..=n {
            let base = root.lerp(row_corner, f64::from(row) / f64::from(n));
            for col in 0..=row {
                let planar = if row == 0 {
                    root
                } else if row == n && col == 0 {
                    row_corner
                } else if row == n && col == n {
                    col_corner
                } else {
                    base + col_unit * f64::from(col)
                };
                let position = match options.radius {
                    Some(radius) => {
                        let length = planar.length();
                        if !length.is_finite() || length <= 0.0 {
                            return Err(IcosphereError::DegenerateProjection {
                                zone: zone.id(),
                                row,
                                col,
                            });
                        }
                        planar * (radius / length)
                    }
                    None => planar,
                };
                vertices.push(Vertex {
                    row,
                    col,
                    index: lattice_index(row, col),
                    position,
                    role: classify(row, col, n),
                });
            }
        }

        Ok(Self {
            zone: zone.id(),
            divisions: n,
            triangulation: options.triangulation,
            radius: options.radius,
            vertices,
            faces: triangulate(n, options.triangulation),
        })
    }

    /// The zone this lattice belongs to.
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Effective division count (at least 1).
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Configured triangulation.
    pub fn triangulation(&self) -> Triangulation {
        self.triangulation
    }

    /// Projection radius, if any.
    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    /// All vertices in index order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Faces of the configured triangulation.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Faces of an arbitrary triangulation over the same vertices.
    pub fn faces_for(&self, triangulation: Triangulation) -> Vec<Face> {
        if triangulation == self.triangulation {
            self.faces.clone()
        } else {
            triangulate(self.divisions, triangulation)
        }
    }

    /// Vertex by lattice index.
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    /// Vertex at a signed lattice coordinate; `None` when out of bounds.
    pub fn vertex_at(&self, row: i64, col: i64) -> Option<&Vertex> {
        if row < 0 || row > i64::from(self.divisions) || col < 0 || col > row {
            return None;
        }
        self.vertex(lattice_index(row as u32, col as u32))
    }

    /// Vertices grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        (0..=self.divisions).map(move |row| {
            let start = lattice_index(row, 0) as usize;
            &self.vertices[start..=start + row as usize]
        })
    }

    /// The vertex at one of the three corners.
    pub fn corner(&self, corner: ZoneCorner) -> &Vertex {
        let (row, col) = corner.lattice_coord(self.divisions);
        &self.vertices[lattice_index(row, col) as usize]
    }

    /// The `N + 1` vertices of an edge, ordered from its first corner.
    pub fn edge_vertices(&self, edge: EdgeIdentity) -> Vec<&Vertex> {
        (0..=self.divisions)
            .map(|position| {
                let (row, col) = edge.lattice_coord(position, self.divisions);
                &self.vertices[lattice_index(row, col) as usize]
            })
            .collect()
    }

    /// Diamond cells as polygons: `(r,c), (r+1,c), (r+1,c+1), (r,c+1)` quads,
    /// plus the trailing upward triangle of each row.
    pub fn quads(&self) -> Vec<Vec<u32>> {
        let n = self.divisions;
        let mut polygons = Vec::with_capacity((n * (n + 1) / 2) as usize);
        for row in 0..n {
            for col in 0..=row {
                let mut polygon = vec![
                    lattice_index(row, col),
                    lattice_index(row + 1, col),
                    lattice_index(row + 1, col + 1),
                ];
                if col < row {
                    polygon.push(lattice_index(row, col + 1));
                }
                polygons.push(polygon);
            }
        }
        polygons
    }
}

fn triangulate(divisions: u32, triangulation: Triangulation) -> Vec<Face> {
    let mut faces = Vec::with_capacity(triangulation.face_count(divisions));
    for row in 0..divisions {
        for col in 0..=row {
            faces.push([
                lattice_index(row, col),
                lattice_index(row + 1, col),
                lattice_index(row + 1, col + 1),
            ]);
            if triangulation == Triangulation::Diamond && col < row {
                faces.push([
                    lattice_index(row, col),
                    lattice_index(row + 1, col + 1),
                    lattice_index(row, col + 1),
                ]);
            }
        }
    }
    faces
}
