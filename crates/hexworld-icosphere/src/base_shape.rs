//! The root icosahedron and its iso-divided variants.

use glam::DVec3;

use crate::{
    DivideOptions, Icosphere, IcosphereError, MeshExport, Point, PointId, PointRegistry,
    Triangulation, Zone, ZoneId,
};

/// Largest accepted iso-division count. Keeps zone ids within `u32`.
pub const MAX_ISO_DIVISIONS: u32 = 1023;

/// Corner indices of the 20 icosahedron faces, wound outward.
pub const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 golden-ratio icosahedron vertices scaled to `radius`.
#[must_use]
pub fn icosahedron_vertices(radius: f64) -> [DVec3; 12] {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        DVec3::new(-1.0, t, 0.0),
        DVec3::new(1.0, t, 0.0),
        DVec3::new(-1.0, -t, 0.0),
        DVec3::new(1.0, -t, 0.0),
        DVec3::new(0.0, -1.0, t),
        DVec3::new(0.0, 1.0, t),
        DVec3::new(0.0, -1.0, -t),
        DVec3::new(0.0, 1.0, -t),
        DVec3::new(t, 0.0, -1.0),
        DVec3::new(t, 0.0, 1.0),
        DVec3::new(-t, 0.0, -1.0),
        DVec3::new(-t, 0.0, 1.0),
    ]
    .map(|v| v.normalize() * radius)
}

/// Root zones of a sphere, before per-zone subdivision.
///
/// At `iso_divisions == 0` the zones are the 20 icosahedron faces. Otherwise
/// each face is split into `(iso_divisions + 1)²` projected sub-triangles and
/// every sub-triangle becomes a zone whose parent is the face's index.
#[derive(Clone, Debug)]
pub struct BaseShape {
    radius: f64,
    iso_divisions: u32,
    registry: PointRegistry,
    zones: Vec<Zone>,
}

impl BaseShape {
    /// Build the base shape.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::InvalidRadius`] if `radius` is not finite and positive,
    /// [`IcosphereError::TooManyDivisions`] above [`MAX_ISO_DIVISIONS`].
    pub fn build(radius: f64, iso_divisions: u32) -> Result<Self, IcosphereError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(IcosphereError::InvalidRadius(radius));
        }
        if iso_divisions > MAX_ISO_DIVISIONS {
            return Err(IcosphereError::TooManyDivisions {
                divisions: iso_divisions,
                max: MAX_ISO_DIVISIONS,
            });
        }

        let mut registry = PointRegistry::with_quantum(radius * 1e-6)?;
        let corners: Vec<Point> = icosahedron_vertices(radius)
            .into_iter()
            .map(|v| registry.intern_point(v))
            .collect();

        let faces = ICOSAHEDRON_FACES
            .iter()
            .enumerate()
            .map(|(i, face)| {
                let points = face.map(|c| corners[c as usize]);
                Zone::new(ZoneId(i as u32), &points, None)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let zones = if iso_divisions == 0 {
            faces
        } else {
            let options = DivideOptions::projected(radius);
            let split = iso_divisions as usize + 1;
            let mut zones = Vec::with_capacity(faces.len() * split * split);
            for face in &faces {
                let lattice = face.subdivide(iso_divisions + 1, &options)?;
                let first = ZoneId(zones.len() as u32);
                zones.extend(face.child_zones(&lattice, &mut registry, first)?);
            }
            zones
        };

        tracing::debug!(
            radius,
            iso_divisions,
            points = registry.len(),
            zones = zones.len(),
            "built base shape"
        );

        Ok(Self {
            radius,
            iso_divisions,
            registry,
            zones,
        })
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of times each icosahedron face was split.
    pub fn iso_divisions(&self) -> u32 {
        self.iso_divisions
    }

    /// Root zones, indexed by [`ZoneId`].
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Named base points.
    pub fn points(&self) -> &PointRegistry {
        &self.registry
    }

    /// Position of a named base point.
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.registry.get(id)
    }

    /// Subdivide every zone `divisions` times onto the sphere and set up the
    /// adjacency arena.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::TooManyDivisions`] above [`MAX_DIVISIONS`](crate::MAX_DIVISIONS).
    pub fn subdivide(
        &self,
        divisions: u32,
        triangulation: Triangulation,
    ) -> Result<Icosphere, IcosphereError> {
        self.clone().into_icosphere(divisions, triangulation)
    }

    /// Like [`subdivide`](Self::subdivide), consuming the shape.
    ///
    /// # Errors
    ///
    /// As for [`subdivide`](Self::subdivide).
    pub fn into_icosphere(
        self,
        divisions: u32,
        triangulation: Triangulation,
    ) -> Result<Icosphere, IcosphereError> {
        let options = DivideOptions::projected(self.radius).with_triangulation(triangulation);
        Icosphere::from_ordered_zones(self.zones, divisions, options)
    }

    /// Points and zone triangles of the unsubdivided shape.
    pub fn export(&self) -> MeshExport {
        let points = self
            .registry
            .positions()
            .iter()
            .map(|p| p.to_array())
            .collect();
        let faces = self
            .zones
            .iter()
            .map(|zone| {
                zone.corners()
                    .iter()
                    .filter_map(|p| p.id.map(|id| id.0))
                    .collect()
            })
            .collect();
        MeshExport { points, faces }
    }
}
