use std::collections::BTreeMap;

use fleet::{Coords, Journey, JourneyID};

/// Markers closer than this many pixels on screen get merged
const CLUSTER_RADIUS_PX: f64 = 40.0;
/// Zoomed in this far, every vehicle gets its own marker
pub const NO_CLUSTERING_ZOOM: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub center: Coords,
    pub members: Vec<JourneyID>,
}

/// Groups vehicle positions into a grid whose cells shrink as the map zooms in. Cells are
/// returned in a deterministic order.
pub fn cluster_vehicles(journeys: &[&Journey], zoom: f64) -> Vec<Cluster> {
    if zoom >= NO_CLUSTERING_ZOOM {
        return journeys
            .iter()
            .map(|j| Cluster {
                center: j.current_coords,
                members: vec![j.id],
            })
            .collect();
    }

    let cell_degrees = CLUSTER_RADIUS_PX * 360.0 / (256.0 * 2.0_f64.powf(zoom));
    let mut cells: BTreeMap<(i64, i64), Vec<&Journey>> = BTreeMap::new();
    for journey in journeys {
        let pt = journey.current_coords;
        let key = (
            (pt.lon / cell_degrees).floor() as i64,
            (pt.lat / cell_degrees).floor() as i64,
        );
        cells.entry(key).or_insert_with(Vec::new).push(journey);
    }

    cells
        .into_values()
        .map(|members| {
            let n = members.len() as f64;
            let lon = members.iter().map(|j| j.current_coords.lon).sum::<f64>() / n;
            let lat = members.iter().map(|j| j.current_coords.lat).sum::<f64>() / n;
            Cluster {
                center: Coords::new(lon, lat),
                members: members.into_iter().map(|j| j.id).collect(),
            }
        })
        .collect()
}
