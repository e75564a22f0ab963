use std::f64::consts::PI;

use geom::{Duration, Time};

use fleet::Journey;

use crate::geo::{fraction_along, haversine_km, lerp};
use crate::{AlertKind, JourneyEvent, SimConfig};

pub struct TickOutcome {
    pub journeys: Vec<Journey>,
    pub events: Vec<JourneyEvent>,
}

/// Moves every pending journey forward by one tick. The input isn't modified; a fresh list is
/// returned, in the same order, along with any events raised.
pub fn advance(journeys: &[Journey], now: Time, config: &SimConfig) -> TickOutcome {
    let mut events = Vec::new();
    let journeys = journeys
        .iter()
        .map(|journey| step(journey, now, config, &mut events))
        .collect();
    TickOutcome { journeys, events }
}

fn step(
    journey: &Journey,
    now: Time,
    config: &SimConfig,
    events: &mut Vec<JourneyEvent>,
) -> Journey {
    let mut journey = journey.clone();
    if !journey.is_pending() {
        return journey;
    }

    let total_km = haversine_km(journey.from_coords, journey.destination_coords);
    if total_km < config.zero_distance_km {
        journey.arrive(now);
        events.push(arrived(&journey));
        return journey;
    }

    journey.bus.speed_kmh = drifted_speed(&journey, now, config);
    let speed_kmh = journey.bus.speed_kmh.max(config.speed_floor_kmh);
    let covered_km = speed_kmh * config.tick_seconds / 3600.0;
    // The vehicle always sits on the straight line between the endpoints, so its position there
    // says how much of the route is done
    let done = fraction_along(
        journey.from_coords,
        journey.destination_coords,
        journey.current_coords,
    );
    let t = (done + covered_km / total_km).min(1.0);

    journey.current_coords = lerp(journey.from_coords, journey.destination_coords, t);
    journey.progress = journey.progress.max((t * 100.0).round() as u8);
    journey.last_update = now;

    let remaining_km = haversine_km(journey.current_coords, journey.destination_coords);
    if remaining_km < config.arrival_threshold_km || journey.progress >= 100 {
        journey.arrive(now);
        events.push(arrived(&journey));
        return journey;
    }

    journey.expected_arrival = now + Duration::seconds(remaining_km / speed_kmh * 3600.0);
    journey.bus.battery =
        (journey.bus.battery - config.battery_drain_per_km * covered_km).max(0.0);

    if journey.bus.battery < config.low_battery_threshold {
        events.push(JourneyEvent {
            journey: journey.id,
            kind: AlertKind::LowBattery,
            message: format!(
                "{} is low on battery ({:.0}%)",
                journey.bus_plate, journey.bus.battery
            ),
        });
    }

    if !journey.delayed
        && journey.expected_arrival > journey.scheduled_arrival + config.delay_grace()
    {
        journey.delayed = true;
        events.push(JourneyEvent {
            journey: journey.id,
            kind: AlertKind::Delayed,
            message: format!(
                "{} to {} is running late, now expected at {}",
                journey.bus_plate,
                journey.destination,
                journey.expected_arrival.ampm_tostring()
            ),
        });
    }

    journey
}

// Oscillates around the cruising speed, offset per journey. Over a whole period the swings cancel
// out, so the average pace matches the cruising speed.
fn drifted_speed(journey: &Journey, now: Time, config: &SimConfig) -> f64 {
    let cruise = journey.bus.cruise_kmh;
    let elapsed = (now - journey.started_at).inner_seconds();
    let phase = 2.0 * PI * elapsed / config.speed_drift_period_seconds + journey.id.0 as f64;
    (cruise * (1.0 + config.speed_drift_fraction * phase.sin())).max(0.0)
}

fn arrived(journey: &Journey) -> JourneyEvent {
    JourneyEvent {
        journey: journey.id,
        kind: AlertKind::Arrived,
        message: format!("{} has arrived at {}", journey.bus_plate, journey.destination),
    }
}
