//! Edge identities of a zone and the role of each lattice vertex.
//!
//! A zone's three edges are named by the corner pair they connect. Along an
//! edge, a vertex's position counts lattice steps from the first-listed corner.

use crate::ZoneCorner;

/// One of the three edges of a zone, named by the corners it connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdentity {
    /// Root → row corner; the `col == 0` boundary.
    RootRow,
    /// Root → col corner; the `col == row` boundary.
    RootCol,
    /// Row corner → col corner; the `row == N` boundary.
    RowCol,
}

impl EdgeIdentity {
    /// All three edges.
    pub const ALL: [EdgeIdentity; 3] = [
        EdgeIdentity::RootRow,
        EdgeIdentity::RootCol,
        EdgeIdentity::RowCol,
    ];

    /// The `(first, second)` corners of this edge.
    #[must_use]
    pub fn corners(self) -> (ZoneCorner, ZoneCorner) {
        match self {
            EdgeIdentity::RootRow => (ZoneCorner::Root, ZoneCorner::Row),
            EdgeIdentity::RootCol => (ZoneCorner::Root, ZoneCorner::Col),
            EdgeIdentity::RowCol => (ZoneCorner::Row, ZoneCorner::Col),
        }
    }

    /// The edge joining two corners, in either order.
    #[must_use]
    pub fn between(a: ZoneCorner, b: ZoneCorner) -> Option<EdgeIdentity> {
        use ZoneCorner::*;
        match (a, b) {
            (Root, Row) | (Row, Root) => Some(EdgeIdentity::RootRow),
            (Root, Col) | (Col, Root) => Some(EdgeIdentity::RootCol),
            (Row, Col) | (Col, Row) => Some(EdgeIdentity::RowCol),
            _ => None,
        }
    }

    /// Lattice `(row, col)` of the vertex `position` steps from the first corner.
    #[must_use]
    pub fn lattice_coord(self, position: u32, divisions: u32) -> (u32, u32) {
        debug_assert!(position <= divisions, "edge position {position} > {divisions}");
        match self {
            EdgeIdentity::RootRow => (position, 0),
            EdgeIdentity::RootCol => (position, position),
            EdgeIdentity::RowCol => (divisions, position),
        }
    }

    /// Steps from the first corner if `(row, col)` lies on this edge
    /// (corner endpoints included).
    #[must_use]
    pub fn position_of(self, row: u32, col: u32, divisions: u32) -> Option<u32> {
        match self {
            EdgeIdentity::RootRow if col == 0 => Some(row),
            EdgeIdentity::RootCol if col == row => Some(row),
            EdgeIdentity::RowCol if row == divisions => Some(col),
            _ => None,
        }
    }
}

/// Role of a lattice vertex relative to its zone's corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexRole {
    /// One of the three original corners.
    Corner(ZoneCorner),
    /// Strictly inside an edge; `position` is in `1..N`.
    Edge { edge: EdgeIdentity, position: u32 },
    /// Not on the zone boundary.
    Interior,
}

impl VertexRole {
    /// Returns true for corners and edge vertices.
    #[must_use]
    pub fn is_boundary(self) -> bool {
        !matches!(self, VertexRole::Interior)
    }
}

/// Classify the vertex at `(row, col)` of a lattice divided `divisions` times.
#[must_use]
pub fn classify(row: u32, col: u32, divisions: u32) -> VertexRole {
    let n = divisions;
    if row == 0 {
        VertexRole::Corner(ZoneCorner::Root)
    } else if row == n && col == 0 {
        VertexRole::Corner(ZoneCorner::Row)
    } else if row == n && col == n {
        VertexRole::Corner(ZoneCorner::Col)
    } else if col == 0 {
        VertexRole::Edge {
            edge: EdgeIdentity::RootRow,
            position: row,
        }
    } else if col == row {
        VertexRole::Edge {
            edge: EdgeIdentity::RootCol,
            position: row,
        }
    } else if row == n {
        VertexRole::Edge {
            edge: EdgeIdentity::RowCol,
            position: col,
        }
    } else {
        VertexRole::Interior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_of_each_edge() {
        for edge in EdgeIdentity::ALL {
            let (a, b) = edge.corners();
            assert_ne!(a, b);
            assert_eq!(EdgeIdentity::between(a, b), Some(edge));
            assert_eq!(EdgeIdentity::between(b, a), Some(edge));
        }
        assert_eq!(EdgeIdentity::between(ZoneCorner::Row, ZoneCorner::Row), None);
    }

    #[test]
    fn test_edge_endpoints_are_the_edge_corners() {
        let n = 5;
        for edge in EdgeIdentity::ALL {
            let (first, second) = edge.corners();
            assert_eq!(edge.lattice_coord(0, n), first.lattice_coord(n));
            assert_eq!(edge.lattice_coord(n, n), second.lattice_coord(n));
        }
    }

    #[test]
    fn test_position_of_inverts_lattice_coord() {
        let n = 6;
        for edge in EdgeIdentity::ALL {
            for position in 0..=n {
                let (row, col) = edge.lattice_coord(position, n);
                assert_eq!(edge.position_of(row, col, n), Some(position));
            }
        }
        assert_eq!(EdgeIdentity::RowCol.position_of(3, 1, n), None);
    }

    #[test]
    fn test_classify_corners() {
        assert_eq!(classify(0, 0, 4), VertexRole::Corner(ZoneCorner::Root));
        assert_eq!(classify(4, 0, 4), VertexRole::Corner(ZoneCorner::Row));
        assert_eq!(classify(4, 4, 4), VertexRole::Corner(ZoneCorner::Col));
    }

    #[test]
    fn test_classify_edges_use_distance_from_first_corner() {
        assert_eq!(
            classify(2, 0, 4),
            VertexRole::Edge {
                edge: EdgeIdentity::RootRow,
                position: 2
            }
        );
        assert_eq!(
            classify(3, 3, 4),
            VertexRole::Edge {
                edge: EdgeIdentity::RootCol,
                position: 3
            }
        );
        assert_eq!(
            classify(4, 1, 4),
            VertexRole::Edge {
                edge: EdgeIdentity::RowCol,
                position: 1
            }
        );
    }

    #[test]
    fn test_classify_interior() {
        assert_eq!(classify(2, 1, 4), VertexRole::Interior);
        assert!(!classify(2, 1, 4).is_boundary());
        assert!(classify(4, 2, 4).is_boundary());
    }

    #[test]
    fn test_single_division_has_only_corners() {
        let roles = [classify(0, 0, 1), classify(1, 0, 1), classify(1, 1, 1)];
        assert!(roles.iter().all(|r| matches!(r, VertexRole::Corner(_))));
    }
}
