use anyhow::Result;
use chrono::{NaiveTime, Timelike};
use geom::{Duration, Time};
use serde::Deserialize;

use crate::{Bus, Connectivity, Coords, Driver, SeedJourney, MAX_ROSTER};

const DEFAULT_BATTERY: f64 = 100.0;
const DEFAULT_TEMPERATURE: f64 = 20.0;

/// Reads journeys to seed the simulation from CSV. Passenger names aren't part of the format, so
/// rosters are left as placeholders.
pub fn load_csv<R: std::io::Read>(reader: R) -> Result<Vec<SeedJourney>> {
    let mut seeds = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;

        let connectivity = match Connectivity::parse(&rec.connectivity) {
            Some(x) => x,
            None => {
                warn!(
                    "Journey {} has unknown connectivity {:?}, assuming weak",
                    rec.id, rec.connectivity
                );
                Connectivity::Weak
            }
        };
        let battery = match rec.battery {
            Some(x) => x,
            None => {
                warn!("Journey {} has no battery reading, assuming full", rec.id);
                DEFAULT_BATTERY
            }
        };
        if !(0.0..=100.0).contains(&battery) {
            bail!("Journey {} has battery {}%", rec.id, battery);
        }
        let temperature = match rec.temperature {
            Some(x) => x,
            None => {
                warn!(
                    "Journey {} has no temperature reading, assuming {}",
                    rec.id, DEFAULT_TEMPERATURE
                );
                DEFAULT_TEMPERATURE
            }
        };
        if rec.speed_kmh < 0.0 {
            bail!("Journey {} has negative speed {}", rec.id, rec.speed_kmh);
        }

        let started_at = parse_time(&rec.started_at)?;
        let scheduled_arrival = parse_time(&rec.scheduled_arrival)?;
        if scheduled_arrival < started_at {
            bail!(
                "Journey {} is scheduled to arrive at {} before starting at {}",
                rec.id,
                scheduled_arrival,
                started_at
            );
        }

        let roster = (1..=rec.passengers.min(MAX_ROSTER))
            .map(|idx| format!("Passenger {idx}"))
            .collect();
        let alerts = rec
            .alerts
            .unwrap_or_default()
            .split(';')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect();

        seeds.push(SeedJourney {
            orig_id: rec.id,
            bus_plate: rec.bus_plate,
            school: rec.school,
            from: rec.from,
            from_coords: Coords::new(rec.from_lon, rec.from_lat),
            destination: rec.destination,
            destination_coords: Coords::new(rec.destination_lon, rec.destination_lat),
            bus: Bus::new(rec.speed_kmh, battery, temperature, connectivity),
            driver: Driver {
                name: rec.driver_name,
                phone: rec.driver_phone,
            },
            passengers: rec.passengers,
            roster,
            alerts,
            started_at,
            scheduled_arrival,
        });
    }
    Ok(seeds)
}

pub fn parse_time(x: &str) -> Result<Time> {
    let time = NaiveTime::parse_from_str(x, "%H:%M:%S")
        .map_err(|err| anyhow!("bad time {:?}: {}", x, err))?;
    Ok(Time::START_OF_DAY
        + Duration::hours(time.hour() as usize)
        + Duration::minutes(time.minute() as usize)
        + Duration::seconds(time.second() as f64))
}

#[derive(Deserialize)]
struct Record {
    id: String,
    bus_plate: String,
    school: String,
    from: String,
    from_lon: f64,
    from_lat: f64,
    destination: String,
    destination_lon: f64,
    destination_lat: f64,
    speed_kmh: f64,
    battery: Option<f64>,
    temperature: Option<f64>,
    connectivity: String,
    driver_name: String,
    driver_phone: String,
    passengers: usize,
    started_at: String,
    scheduled_arrival: String,
    alerts: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_fleet;

    const INPUT: &str = "\
id,bus_plate,school,from,from_lon,from_lat,destination,destination_lon,destination_lat,speed_kmh,battery,temperature,connectivity,driver_name,driver_phone,passengers,started_at,scheduled_arrival,alerts
J-1,AA-00-AA,North,Depot,-9.20,38.75,North,-9.14,38.75,40,80,21,good,Ana,+351 1,7,07:30:00,07:50:00,Low battery; Long distance route
J-2,BB-00-BB,South,Depot,-9.20,38.70,South,-9.14,38.72,35,50,20,satellite,Rui,+351 2,2,07:45:30,08:00:00,
J-3,CC-00-CC,South,Depot,-9.21,38.71,South,-9.14,38.72,30,,,,Eva,+351 3,0,07:50:00,08:10:00,
";

    #[test]
    fn import_journeys() {
        let seeds = load_csv(INPUT.as_bytes()).unwrap();
        assert_eq!(seeds.len(), 3);

        let first = &seeds[0];
        assert_eq!(first.from_coords, Coords::new(-9.20, 38.75));
        assert_eq!(first.alerts, vec!["Low battery", "Long distance route"]);
        assert_eq!(first.passengers, 7);
        assert_eq!(first.roster.len(), crate::MAX_ROSTER);
        assert_eq!(first.bus.connectivity, Connectivity::Good);
        assert_eq!(
            first.started_at,
            Time::START_OF_DAY + Duration::hours(7) + Duration::minutes(30)
        );

        // Unknown or missing values fall back instead of failing the import
        assert_eq!(seeds[1].bus.connectivity, Connectivity::Weak);
        assert!(seeds[1].alerts.is_empty());
        assert_eq!(seeds[2].bus.battery, DEFAULT_BATTERY);
        assert_eq!(seeds[2].bus.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(seeds[2].bus.connectivity, Connectivity::Weak);

        let journeys = build_fleet(seeds).unwrap();
        assert_eq!(journeys[0].passengers, 7);
        assert_eq!(journeys[0].passengers_list.len(), crate::MAX_ROSTER);
        assert_eq!(journeys[1].current_coords, journeys[1].from_coords);
    }

    #[test]
    fn huge_headcount_keeps_a_short_roster() {
        let input = INPUT.replace("+351 1,7,", "+351 1,4000000000,");
        let journeys = build_fleet(load_csv(input.as_bytes()).unwrap()).unwrap();
        assert_eq!(journeys[0].passengers, 4_000_000_000);
        assert_eq!(journeys[0].passengers_list.len(), crate::MAX_ROSTER);
    }

    #[test]
    fn reject_bad_rows() {
        let bad_battery = INPUT.replace("40,80,21", "40,180,21");
        assert!(load_csv(bad_battery.as_bytes()).is_err());

        let bad_time = INPUT.replace("07:30:00", "7h30");
        assert!(load_csv(bad_time.as_bytes()).is_err());

        let duplicate = INPUT.replace("J-2", "J-1");
        let seeds = load_csv(duplicate.as_bytes()).unwrap();
        assert!(build_fleet(seeds).is_err());
    }
}
