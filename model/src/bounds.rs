use serde::{Deserialize, Serialize};

use fleet::{Coords, Journey};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Covers nothing until `update` is called.
    pub fn new() -> Self {
        Self {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn update(&mut self, pt: Coords) {
        self.min_lon = self.min_lon.min(pt.lon);
        self.min_lat = self.min_lat.min(pt.lat);
        self.max_lon = self.max_lon.max(pt.lon);
        self.max_lat = self.max_lat.max(pt.lat);
    }

    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon || self.min_lat > self.max_lat
    }

    pub fn contains(&self, pt: Coords) -> bool {
        pt.lon >= self.min_lon
            && pt.lon <= self.max_lon
            && pt.lat >= self.min_lat
            && pt.lat <= self.max_lat
    }

    pub fn center(&self) -> Coords {
        Coords::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Grows each side by some fraction of the box's size, so markers don't sit on the edge of the
    /// screen.
    pub fn padded(&self, fraction: f64) -> Self {
        let dx = (self.max_lon - self.min_lon) * fraction;
        let dy = (self.max_lat - self.min_lat) * fraction;
        Self {
            min_lon: self.min_lon - dx,
            min_lat: self.min_lat - dy,
            max_lon: self.max_lon + dx,
            max_lat: self.max_lat + dy,
        }
    }

    pub fn ring(&self) -> Vec<Coords> {
        vec![
            Coords::new(self.min_lon, self.min_lat),
            Coords::new(self.max_lon, self.min_lat),
            Coords::new(self.max_lon, self.max_lat),
            Coords::new(self.min_lon, self.max_lat),
            Coords::new(self.min_lon, self.min_lat),
        ]
    }
}

/// The box covering where every journey starts, ends, and is right now. None if there are no
/// journeys.
pub fn fit_bounds<'a, I: IntoIterator<Item = &'a Journey>>(journeys: I) -> Option<BoundingBox> {
    let mut bounds = BoundingBox::new();
    for journey in journeys {
        bounds.update(journey.from_coords);
        bounds.update(journey.destination_coords);
        bounds.update(journey.current_coords);
    }
    if bounds.is_empty() {
        None
    } else {
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use geom::{Duration, Time};

    use super::*;
    use crate::{advance, SimConfig};

    #[test]
    fn covers_every_journey() {
        let start = Time::START_OF_DAY + Duration::hours(8);
        let mut journeys = fleet::build_fleet(fleet::mock_fleet(start)).unwrap();
        let config = SimConfig::default();
        let mut now = start;
        // Move everyone partway along
        for _ in 0..50 {
            now = now + config.tick();
            journeys = advance(&journeys, now, &config).journeys;
        }

        let bounds = fit_bounds(&journeys).unwrap();
        for j in &journeys {
            assert!(bounds.contains(j.from_coords));
            assert!(bounds.contains(j.destination_coords));
            assert!(bounds.contains(j.current_coords));
        }

        let padded = bounds.padded(0.1);
        assert!(padded.contains(bounds.center()));
        assert!(padded.min_lon < bounds.min_lon && padded.max_lat > bounds.max_lat);
    }

    #[test]
    fn nothing_to_fit() {
        let none: Vec<Journey> = Vec::new();
        assert!(fit_bounds(&none).is_none());
    }
}
