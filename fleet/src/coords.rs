use serde::{Deserialize, Serialize};

/// A raw longitude/latitude pair in degrees. No precision is trimmed, since the simulation
/// advances positions by a few meters per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lon: f64,
    pub lat: f64,
}

impl Coords {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lon, self.lat)
    }
}
