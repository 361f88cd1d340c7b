//! Flat `{ points, faces }` mesh export consumed by renderers.

use serde::{Deserialize, Serialize};

use crate::{IcosphereError, Lattice, PointRegistry};

/// Welding never uses a quantum coarser than this fraction of the shortest
/// lattice edge.
const MAX_WELD_FRACTION: f64 = 0.25;

/// How faces are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FaceStyle {
    /// The lattice's configured triangulation.
    #[default]
    Triangles,
    /// Each upward/downward triangle pair merged into one quad.
    Quads,
}

/// Options for [`MeshExport::from_lattices`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    /// Weld coincident points with this quantum; `None` keeps every zone's
    /// local point array.
    pub weld: Option<f64>,
    /// Face layout.
    pub faces: FaceStyle,
}

impl ExportOptions {
    /// Globally deduplicated points, welded at `quantum`.
    #[must_use]
    pub fn welded(quantum: f64) -> Self {
        Self {
            weld: Some(quantum),
            faces: FaceStyle::Triangles,
        }
    }

    /// Zone-local points concatenated zone by zone.
    #[must_use]
    pub fn zone_local() -> Self {
        Self {
            weld: None,
            faces: FaceStyle::Triangles,
        }
    }

    /// Replace the face style.
    #[must_use]
    pub fn with_faces(mut self, faces: FaceStyle) -> Self {
        self.faces = faces;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::welded(crate::DEFAULT_QUANTUM)
    }
}

/// A point list and a face list indexing into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshExport {
    /// `[x, y, z]` per point.
    pub points: Vec<[f64; 3]>,
    /// Point indices per face: 3 for triangles, 4 for quads.
    pub faces: Vec<Vec<u32>>,
}

impl MeshExport {
    /// Flatten zone lattices into one mesh.
    ///
    /// A weld quantum larger than a quarter of the shortest lattice edge is
    /// reduced to that, so welding only merges coincident points.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::InvalidQuantum`] for a weld quantum that is not
    /// finite and positive.
    pub fn from_lattices<'a>(
        lattices: impl IntoIterator<Item = &'a Lattice>,
        options: &ExportOptions,
    ) -> Result<Self, IcosphereError> {
        let lattices: Vec<&Lattice> = lattices.into_iter().collect();
        let mut registry = options
            .weld
            .map(|quantum| weld_quantum(quantum, &lattices).and_then(PointRegistry::with_quantum))
            .transpose()?;
        let mut points: Vec<[f64; 3]> = Vec::new();
        let mut faces: Vec<Vec<u32>> = Vec::new();

        for lattice in lattices {
            let remap: Vec<u32> = match registry.as_mut() {
                Some(registry) => lattice
                    .vertices()
                    .iter()
                    .map(|v| registry.intern(v.position).0)
                    .collect(),
                None => {
                    let offset = points.len() as u32;
                    points.extend(lattice.vertices().iter().map(|v| v.position.to_array()));
                    (0..lattice.vertices().len() as u32).map(|i| offset + i).collect()
                }
            };

            match options.faces {
                FaceStyle::Triangles => faces.extend(
                    lattice
                        .faces()
                        .iter()
                        .map(|face| face.iter().map(|&i| remap[i as usize]).collect()),
                ),
                FaceStyle::Quads => faces.extend(
                    lattice
                        .quads()
                        .into_iter()
                        .map(|poly| poly.into_iter().map(|i| remap[i as usize]).collect()),
                ),
            }
        }

        if let Some(registry) = registry {
            points = registry.positions().iter().map(|p| p.to_array()).collect();
        }

        Ok(Self { points, faces })
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `requested`, capped by the shortest edge of any lattice face.
fn weld_quantum(requested: f64, lattices: &[&Lattice]) -> Result<f64, IcosphereError> {
    if !requested.is_finite() || requested <= 0.0 {
        return Err(IcosphereError::InvalidQuantum(requested));
    }
    let shortest = lattices
        .iter()
        .flat_map(|lattice| {
            let vertices = lattice.vertices();
            lattice.faces().iter().flat_map(move |&[a, b, c]| {
                [(a, b), (b, c), (c, a)].map(|(from, to)| {
                    vertices[from as usize]
                        .position
                        .distance(vertices[to as usize].position)
                })
            })
        })
        .filter(|length| *length > 0.0)
        .fold(f64::INFINITY, f64::min);

    let cap = shortest * MAX_WELD_FRACTION;
    if requested > cap {
        tracing::debug!(requested, cap, "weld quantum capped by lattice spacing");
        return Ok(cap);
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::{DivideOptions, Point, PointId, Triangulation, Zone, ZoneId};

    fn two_zones() -> Vec<Lattice> {
        let p = [
            Point::named(PointId(0), DVec3::new(0.0, 0.0, 0.0)),
            Point::named(PointId(1), DVec3::new(4.0, 0.0, 0.0)),
            Point::named(PointId(2), DVec3::new(0.0, 4.0, 0.0)),
            Point::named(PointId(3), DVec3::new(4.0, 4.0, 0.0)),
        ];
        let a = Zone::new(ZoneId(0), &[p[0], p[1], p[2]], None).unwrap();
        let b = Zone::new(ZoneId(1), &[p[3], p[2], p[1]], None).unwrap();
        let options = DivideOptions::default();
        vec![a.subdivide(2, &options).unwrap(), b.subdivide(2, &options).unwrap()]
    }

    #[test]
    fn test_zone_local_export_concatenates() {
        let lattices = two_zones();
        let export = MeshExport::from_lattices(&lattices, &ExportOptions::zone_local()).unwrap();
        assert_eq!(export.point_count(), 12);
        assert_eq!(export.face_count(), 8);
        assert_eq!(export.faces[4], vec![6, 7, 8]);
    }

    #[test]
    fn test_welded_export_merges_shared_edge() {
        let lattices = two_zones();
        let export =
            MeshExport::from_lattices(&lattices, &ExportOptions::welded(0.01)).unwrap();
        // Two 6-vertex lattices sharing a 3-vertex edge.
        assert_eq!(export.point_count(), 9);
        assert_eq!(export.face_count(), 8);
        assert!(export.faces.iter().flatten().all(|&i| (i as usize) < 9));
    }

    #[test]
    fn test_coarse_quantum_never_merges_lattice_neighbours() {
        let lattices = two_zones();
        // The lattice spacing is 2, so a quantum of 3 would fold each edge.
        let export = MeshExport::from_lattices(&lattices, &ExportOptions::welded(3.0)).unwrap();
        assert_eq!(export.point_count(), 9);
    }

    #[test]
    fn test_unusable_weld_quantum_is_an_error() {
        let lattices = two_zones();
        for quantum in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                MeshExport::from_lattices(&lattices, &ExportOptions::welded(quantum)),
                Err(IcosphereError::InvalidQuantum(_))
            ));
        }
    }

    #[test]
    fn test_quad_export() {
        let lattices = two_zones();
        let options = ExportOptions::welded(0.01).with_faces(FaceStyle::Quads);
        let export = MeshExport::from_lattices(&lattices, &options).unwrap();
        assert_eq!(export.face_count(), 6);
        assert_eq!(export.faces.iter().filter(|f| f.len() == 4).count(), 2);
    }

    #[test]
    fn test_strip_lattices_export_their_own_faces() {
        let zone = Zone::new(
            ZoneId(0),
            &[
                Point::new(DVec3::ZERO),
                Point::new(DVec3::X),
                Point::new(DVec3::Y),
            ],
            None,
        )
        .unwrap();
        let lattice = zone
            .subdivide(
                3,
                &DivideOptions::default().with_triangulation(Triangulation::Strip),
            )
            .unwrap();
        let export = MeshExport::from_lattices([&lattice], &ExportOptions::zone_local()).unwrap();
        assert_eq!(export.face_count(), 6);
    }

    #[test]
    fn test_json_shape() {
        let export = MeshExport {
            points: vec![[0.0, 1.0, 2.0]],
            faces: vec![vec![0, 0, 0]],
        };
        let json = export.to_json().unwrap();
        assert_eq!(json, r#"{"points":[[0.0,1.0,2.0]],"faces":[[0,0,0]]}"#);
        let back: MeshExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }
}
