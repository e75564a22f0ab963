use std::f64::consts::PI;

use fleet::{Coords, Journey};
use model::{fit_bounds, BoundingBox};

const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;
const FIT_PADDING: f64 = 0.1;

/// What part of the map is on screen. The tile provider does the actual projection and drawing;
/// this just tracks what to ask it for.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub center: Coords,
    pub zoom: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl Viewport {
    pub fn new(center: Coords, zoom: f64, width_px: f64, height_px: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width_px,
            height_px,
        }
    }

    /// Frames every journey. When there's nothing to frame or the screen has no size yet, the
    /// view is left alone. Returns true if the view changed.
    pub fn fit(&mut self, journeys: &[Journey]) -> bool {
        if self.width_px <= 0.0 || self.height_px <= 0.0 {
            warn!(
                "Can't fit bounds; the map isn't ready ({}x{})",
                self.width_px, self.height_px
            );
            return false;
        }
        let bounds = match fit_bounds(journeys) {
            Some(b) => b,
            None => {
                warn!("Can't fit bounds; there are no journeys");
                return false;
            }
        };
        let bounds = bounds.padded(FIT_PADDING);
        self.center = bounds.center();
        self.zoom = self.zoom_to_fit(&bounds);
        debug!("Fit {} journeys at zoom {:.2}", journeys.len(), self.zoom);
        true
    }

    pub fn recenter(&mut self, pt: Coords) {
        self.center = pt;
    }

    fn zoom_to_fit(&self, bounds: &BoundingBox) -> f64 {
        let lon_span = (bounds.max_lon - bounds.min_lon) / 360.0;
        let y_span = (mercator_y(bounds.max_lat) - mercator_y(bounds.min_lat)) / (2.0 * PI);

        let mut zoom = MAX_ZOOM;
        if lon_span > 0.0 {
            zoom = zoom.min((self.width_px / TILE_SIZE / lon_span).log2());
        }
        if y_span > 0.0 {
            zoom = zoom.min((self.height_px / TILE_SIZE / y_span).log2());
        }
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Approximately what's visible
    pub fn visible_bounds(&self) -> BoundingBox {
        let world_px = TILE_SIZE * 2.0_f64.powf(self.zoom);
        let half_lon = self.width_px / world_px * 360.0 / 2.0;
        let center_y = mercator_y(self.center.lat);
        let half_y = self.height_px / world_px * 2.0 * PI / 2.0;

        let mut bounds = BoundingBox::new();
        bounds.update(Coords::new(
            self.center.lon - half_lon,
            inverse_mercator_y(center_y - half_y),
        ));
        bounds.update(Coords::new(
            self.center.lon + half_lon,
            inverse_mercator_y(center_y + half_y),
        ));
        bounds
    }
}

fn mercator_y(lat: f64) -> f64 {
    // Web Mercator stops short of the poles
    let lat = lat.clamp(-85.05112878, 85.05112878).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}

fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - PI / 2.0).to_degrees()
}
