//! Deduplicating store of base-shape points.
//!
//! Positions are bucketed on a cubic grid whose cell size is the registry's
//! quantum. Two positions are the same point when every coordinate differs by
//! at most half a quantum, so a lookup probes the 27 cells around the key cell
//! and never splits a point that straddles a cell boundary.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::{IcosphereError, Point, PointId};

/// Default quantization step: one decimal place of world units.
pub const DEFAULT_QUANTUM: f64 = 0.1;

type CellKey = [i64; 3];

/// Deduplicating store of points with stable integer identities.
#[derive(Clone, Debug)]
pub struct PointRegistry {
    quantum: f64,
    points: Vec<DVec3>,
    cells: FxHashMap<CellKey, Vec<PointId>>,
}

impl PointRegistry {
    /// Create an empty registry using [`DEFAULT_QUANTUM`].
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            points: Vec::new(),
            cells: FxHashMap::default(),
        }
    }

    /// Create an empty registry with an explicit quantization step.
    ///
    /// # Errors
    ///
    /// [`IcosphereError::InvalidQuantum`] unless `quantum` is finite and positive.
    pub fn with_quantum(quantum: f64) -> Result<Self, IcosphereError> {
        if !quantum.is_finite() || quantum <= 0.0 {
            return Err(IcosphereError::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum,
            ..Self::new()
        })
    }

    /// The quantization step.
    pub fn quantum(&self) -> f64 {
        self.quantum
    }

    /// Return the id of the point at `position`, registering it if new.
    pub fn intern(&mut self, position: DVec3) -> PointId {
        if let Some(id) = self.find(position) {
            return id;
        }
        let id = PointId(self.points.len() as u32);
        self.points.push(position);
        self.cells
            .entry(self.cell_key(position))
            .or_default()
            .push(id);
        id
    }

    /// Like [`intern`](Self::intern), but returns the canonical point so
    /// that every caller sharing a location sees bit-identical coordinates.
    pub fn intern_point(&mut self, position: DVec3) -> Point {
        let id = self.intern(position);
        Point::named(id, self.points[id.index()])
    }

    /// Look up an already-registered point without inserting.
    pub fn find(&self, position: DVec3) -> Option<PointId> {
        let [cx, cy, cz] = self.cell_key(position);
        let tolerance = self.quantum * 0.5;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    if let Some(&id) = ids.iter().find(|id| {
                        (self.points[id.index()] - position).abs().max_element() <= tolerance
                    }) {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    /// The registered point with this id.
    pub fn get(&self, id: PointId) -> Option<Point> {
        self.points
            .get(id.index())
            .map(|&position| Point::named(id, position))
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Canonical positions in id order.
    pub fn positions(&self) -> &[DVec3] {
        &self.points
    }

    /// Iterate over all points in id order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &position)| Point::named(PointId(i as u32), position))
    }

    fn cell_key(&self, position: DVec3) -> CellKey {
        let cell = (position / self.quantum).round();
        [cell.x as i64, cell.y as i64, cell.z as i64]
    }
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self::new()
    }
}
