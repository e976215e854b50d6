use crate::geometry::types::{Boundary, Edge, VerticalBand, Vertex};

use log::debug;

/// Closes an ordered vertex list into a cyclic edge list.
///
/// Edge `i` runs from `vertices[i - 1]` to `vertices[i]`, so edge 0 connects
/// the last vertex back to the first. The edge count always equals the vertex
/// count; too-short inputs are rejected later by processor validation, not here.
pub fn build_edges(vertices: &[Vertex]) -> Vec<Edge> {
    let n = vertices.len();
    (0..n)
        .map(|i| Edge {
            start: vertices[(i + n - 1) % n],
            end: vertices[i],
        })
        .collect()
}

impl Boundary {
    pub fn build(vertices: &[Vertex], band: Option<VerticalBand>) -> Self {
        let edges = build_edges(vertices);
        debug!(
            "Boundary built: {} edges, vertical band {:?}",
            edges.len(),
            band
        );
        Self { edges, band }
    }
}
