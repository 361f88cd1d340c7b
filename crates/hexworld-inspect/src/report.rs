//! Plain-text reports of vertex adjacency.

use std::fmt::Write;

use hexworld_icosphere::{
    Icosphere, IcosphereError, Lattice, ValenceReport, VertexRef, VertexRole,
};

fn role_label(role: VertexRole) -> String {
    match role {
        VertexRole::Corner(corner) => format!("corner {corner:?}"),
        VertexRole::Edge { edge, position } => format!("edge {edge:?} @ {position}"),
        VertexRole::Interior => "interior".to_string(),
    }
}

/// Role, coordinates, peers and neighbours of one vertex.
pub(crate) fn vertex_report(sphere: &Icosphere, v: VertexRef) -> Result<String, IcosphereError> {
    let vertex = sphere.vertex(v).ok_or(IcosphereError::UnknownVertex(v))?;
    let peers = sphere.resolve_peers(v)?;
    let neighbors = sphere.neighbors(v)?;

    let mut out = String::new();
    let p = vertex.position;
    let _ = writeln!(
        out,
        "{v}: {} (row {}, col {}) at [{:.4}, {:.4}, {:.4}]",
        role_label(vertex.role),
        vertex.row,
        vertex.col,
        p.x,
        p.y,
        p.z
    );
    let _ = writeln!(out, "  peers ({}): {}", peers.len(), join(peers));
    let _ = writeln!(out, "  neighbours ({}): {}", neighbors.len(), join(neighbors));
    Ok(out)
}

/// Every lattice row, each vertex with its steps to the three corner edges.
pub(crate) fn lattice_report(lattice: &Lattice) -> String {
    let n = lattice.divisions();
    let mut out = String::new();
    for (row, vertices) in lattice.rows().enumerate() {
        let cells: Vec<String> = vertices
            .iter()
            .map(|v| {
                let [a, b, c] = v.corner_offsets(n);
                format!("{}:({a},{b},{c})", v.index)
            })
            .collect();
        let _ = writeln!(out, "  row {row}: {}", cells.join(" "));
    }
    out
}

/// One-line valence summary.
pub(crate) fn valence_summary(report: &ValenceReport) -> String {
    format!(
        "{} points: {} pentagons, {} hexagons, {} violations",
        report.points,
        report.pentagons,
        report.hexagons,
        report.violations.len()
    )
}

fn join(refs: &[VertexRef]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
