use crate::geometry::types::{Boundary, Edge, Position, VerticalBand};

/// Whether a ray cast from (xp, yp) towards +x crosses the edge.
///
/// Exactly one endpoint must lie strictly below `yp`, which also excludes
/// horizontal edges so the interpolation never divides by zero. The crossing
/// must lie strictly to the right of the point.
#[inline]
fn crosses(edge: &Edge, xp: f64, yp: f64) -> bool {
    let (x1, y1) = (edge.start.x, edge.start.y);
    let (x2, y2) = (edge.end.x, edge.end.y);
    if (yp < y1) == (yp < y2) {
        return false;
    }
    let x_cross = x1 + (yp - y1) / (y2 - y1) * (x2 - x1);
    xp < x_cross
}

/// Number of edges crossed by the +x ray from (xp, yp)
pub fn crossing_count(xp: f64, yp: f64, edges: &[Edge]) -> usize {
    edges.iter().filter(|e| crosses(e, xp, yp)).count()
}

/// Ray-casting membership test, O(edges).
///
/// Points exactly on an edge follow the half-open rule of the strict
/// comparisons: left and bottom sides count as inside, right and top sides as
/// outside. With a band configured, a position without z is outside.
pub fn is_inside(position: &Position, edges: &[Edge], band: Option<&VerticalBand>) -> bool {
    if let Some(band) = band {
        match position.z {
            Some(z) if band.contains(z) => {}
            _ => return false,
        }
    }
    crossing_count(position.x, position.y, edges) % 2 == 1
}

impl Boundary {
    pub fn contains(&self, position: &Position) -> bool {
        is_inside(position, &self.edges, self.band.as_ref())
    }
}
