use crate::error::{GameStateError, Result};
use serde::{Deserialize, Serialize};

/// Polygon vertex on the horizontal (x, y) plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Config vertices must be exactly `[x, y]`
impl TryFrom<Vec<f64>> for Vertex {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match coords.as_slice() {
            &[x, y] => Ok(Self { x, y }),
            other => Err(format!(
                "vertex must have exactly 2 coordinates [x, y], got {}",
                other.len()
            )),
        }
    }
}

impl From<Vertex> for [f64; 2] {
    fn from(v: Vertex) -> Self {
        [v.x, v.y]
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Directed boundary segment; `end` is the vertex that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

/// Closed z range [z_min, z_max] gating the planar test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalBand {
    #[serde(rename = "min")]
    z_min: f64,
    #[serde(rename = "max")]
    z_max: f64,
}

impl VerticalBand {
    pub fn new(z_min: f64, z_max: f64) -> Result<Self> {
        let band = Self { z_min, z_max };
        band.validate()?;
        Ok(band)
    }

    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Deserialized bands bypass `new`, so config validation calls this
    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons and is rejected here as well
        if !(self.z_min <= self.z_max) {
            return Err(GameStateError::InvalidVerticalBand {
                z_min: self.z_min,
                z_max: self.z_max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, z: f64) -> bool {
        self.z_min <= z && z <= self.z_max
    }
}

/// Player position of one row; `z` is absent for planar data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Position {
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn spatial(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

/// Analyst-defined region: closed edge set plus optional vertical band
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub edges: Vec<Edge>,
    pub band: Option<VerticalBand>,
}

impl Boundary {
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_band_rejects_inverted_range() {
        let err = VerticalBand::new(10.0, 0.0).unwrap_err();
        assert!(matches!(err, GameStateError::InvalidVerticalBand { .. }));
    }

    #[test]
    fn test_vertical_band_accepts_degenerate_range() {
        let band = VerticalBand::new(5.0, 5.0).unwrap();
        assert!(band.contains(5.0));
        assert!(!band.contains(5.0001));
    }

    #[test]
    fn test_vertical_band_rejects_nan() {
        assert!(VerticalBand::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_vertex_from_coordinate_list() {
        assert_eq!(
            Vertex::try_from(vec![1.0, 2.0]),
            Ok(Vertex::new(1.0, 2.0))
        );
        assert!(Vertex::try_from(vec![0.0, 0.0, 0.0]).is_err());
        assert!(Vertex::try_from(vec![0.0]).is_err());
        assert!(Vertex::try_from(vec![]).is_err());
    }

    #[test]
    fn test_vertex_from_pair() {
        let v: Vertex = [-1735.0, 250.0].into();
        assert_eq!(v, Vertex::new(-1735.0, 250.0));
    }
}
