use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use fleet::{Coords, Journey, JourneyID, JourneyStatus};
use model::geo::bearing;
use model::BoundingBox;

use super::cluster::cluster_vehicles;
use super::style::{style, MarkerTag, SchoolPalette, Style};

/// Everything the map library needs to draw one frame: route lines, origin and destination pins,
/// and vehicle markers (possibly clustered).
pub fn build_scene(
    journeys: &[&Journey],
    selected: Option<JourneyID>,
    palette: &SchoolPalette,
    zoom: f64,
) -> GeoJson {
    let mut features = Vec::new();

    for journey in journeys {
        let tag = MarkerTag::for_journey(journey, selected, palette);
        let style = style(tag);

        let mut route = feature(Value::LineString(vec![
            journey.from_coords.to_position(),
            journey.destination_coords.to_position(),
        ]));
        route.set_property("type", "route");
        route.set_property("journey", journey.id.0);
        set_style(&mut route, &style);
        features.push(route);

        for (kind, name, pt) in [
            ("origin", &journey.from, journey.from_coords),
            ("destination", &journey.destination, journey.destination_coords),
        ] {
            let mut pin = point(pt);
            pin.set_property("type", kind);
            pin.set_property("journey", journey.id.0);
            pin.set_property("name", name.clone());
            features.push(pin);
        }
    }

    for cluster in cluster_vehicles(journeys, zoom) {
        if cluster.members.len() > 1 {
            let mut f = point(cluster.center);
            f.set_property("type", "cluster");
            f.set_property("count", cluster.members.len());
            f.set_property(
                "journeys",
                cluster.members.iter().map(|id| id.0).collect::<Vec<_>>(),
            );
            features.push(f);
            continue;
        }

        let journey = match journeys.iter().find(|j| j.id == cluster.members[0]) {
            Some(j) => j,
            None => continue,
        };
        features.push(vehicle(
            journey,
            &style(MarkerTag::for_journey(journey, selected, palette)),
        ));
    }

    GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

fn vehicle(journey: &Journey, style: &Style) -> Feature {
    let mut f = point(journey.current_coords);
    f.set_property("type", "vehicle");
    f.set_property("journey", journey.id.0);
    f.set_property("bus_plate", journey.bus_plate.clone());
    f.set_property("status", journey.status.describe());
    f.set_property("progress", journey.progress);
    f.set_property("passengers", journey.passengers);
    f.set_property("rotation", heading(journey));
    f.set_property("expected_arrival", journey.expected_arrival.ampm_tostring());
    set_style(&mut f, style);
    f
}

/// Which way the vehicle marker should face. Once the bus is at the destination, there's nowhere
/// left to face, so keep the direction of the whole route.
pub fn heading(journey: &Journey) -> f64 {
    let moving = journey.status == JourneyStatus::Pending
        && journey.current_coords != journey.destination_coords;
    if moving {
        bearing(journey.current_coords, journey.destination_coords)
    } else {
        bearing(journey.from_coords, journey.destination_coords)
    }
}

/// An outline of some bounds, for debugging what "fit bounds" picked or what's on screen.
pub fn bounds_feature(bounds: &BoundingBox, kind: &str) -> Feature {
    let mut f = feature(Value::Polygon(vec![bounds
        .ring()
        .into_iter()
        .map(|pt| pt.to_position())
        .collect()]));
    f.set_property("type", kind);
    f
}

fn set_style(f: &mut Feature, style: &Style) {
    f.set_property("color", style.color.clone());
    f.set_property("icon", style.icon);
    f.set_property("line_width", style.line_width);
    f.set_property("opacity", style.opacity);
}

fn point(pt: Coords) -> Feature {
    feature(Value::Point(pt.to_position()))
}

fn feature(value: Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: None,
        foreign_members: None,
    }
}
