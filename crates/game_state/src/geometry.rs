pub mod build;
pub mod ray_cast;
pub mod types;

pub use build::build_edges;
pub use ray_cast::{crossing_count, is_inside};
pub use types::{Boundary, Edge, Position, VerticalBand, Vertex};
