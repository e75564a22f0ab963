use anyhow::Result;
use geom::{Duration, Time};

use crate::{
    cap_roster, orig, Bus, Connectivity, Coords, Driver, IDMapping, Journey, JourneyID,
    JourneyStatus,
};

#[derive(Clone, Debug)]
pub struct SeedJourney {
    pub orig_id: String,
    pub bus_plate: String,
    pub school: String,
    pub from: String,
    pub from_coords: Coords,
    pub destination: String,
    pub destination_coords: Coords,
    pub bus: Bus,
    pub driver: Driver,
    /// Headcount, which may be larger than the roster of names
    pub passengers: usize,
    pub roster: Vec<String>,
    pub alerts: Vec<String>,
    pub started_at: Time,
    pub scheduled_arrival: Time,
}

impl SeedJourney {
    pub fn into_journey(self, id: JourneyID) -> Journey {
        Journey {
            id,
            orig_id: orig::JourneyID(self.orig_id),
            bus_plate: self.bus_plate,
            school: self.school,
            from: self.from,
            destination: self.destination,
            from_coords: self.from_coords,
            destination_coords: self.destination_coords,
            current_coords: self.from_coords,
            status: JourneyStatus::Pending,
            progress: 0,
            passengers: self.passengers.max(self.roster.len()),
            passengers_list: cap_roster(self.roster),
            bus: self.bus,
            driver: self.driver,
            alerts: self.alerts,
            started_at: self.started_at,
            last_update: self.started_at,
            // Until the first tick projects something better
            expected_arrival: self.scheduled_arrival,
            scheduled_arrival: self.scheduled_arrival,
            delayed: false,
        }
    }
}

pub fn build_fleet(seeds: Vec<SeedJourney>) -> Result<Vec<Journey>> {
    let mut ids: IDMapping<orig::JourneyID, JourneyID> = IDMapping::new();
    let mut journeys = Vec::new();
    for seed in seeds {
        let id = ids.insert_new(orig::JourneyID(seed.orig_id.clone()))?;
        journeys.push(seed.into_journey(id));
    }
    info!("Seeded {} journeys", journeys.len());
    Ok(journeys)
}

/// The mock fleet the dashboard starts with: morning school runs around Lisbon.
pub fn mock_fleet(start: Time) -> Vec<SeedJourney> {
    let roster = |names: &[&str]| names.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    let driver = |name: &str, phone: &str| Driver {
        name: name.to_string(),
        phone: phone.to_string(),
    };

    let alvalade = "Escola Básica de Alvalade";
    let camoes = "Liceu Camões";
    let moderno = "Colégio Moderno";

    vec![
        SeedJourney {
            orig_id: "J-1001".to_string(),
            bus_plate: "AA-12-BC".to_string(),
            school: alvalade.to_string(),
            from: "Benfica".to_string(),
            from_coords: Coords::new(-9.2003, 38.7510),
            destination: alvalade.to_string(),
            destination_coords: Coords::new(-9.1443, 38.7530),
            bus: Bus::new(42.0, 86.0, 21.5, Connectivity::Good),
            driver: driver("Rui Almeida", "+351 912 345 678"),
            passengers: 7,
            roster: roster(&[
                "Ana Sousa",
                "Bruno Costa",
                "Carla Dias",
                "Diogo Lopes",
                "Eva Martins",
                "Filipe Nunes",
                "Gabriela Reis",
            ]),
            alerts: Vec::new(),
            started_at: start,
            scheduled_arrival: start + Duration::minutes(15),
        },
        SeedJourney {
            orig_id: "J-1002".to_string(),
            bus_plate: "BB-34-DE".to_string(),
            school: alvalade.to_string(),
            from: "Lumiar".to_string(),
            from_coords: Coords::new(-9.1590, 38.7720),
            destination: alvalade.to_string(),
            destination_coords: Coords::new(-9.1443, 38.7530),
            bus: Bus::new(30.0, 17.0, 23.0, Connectivity::Weak),
            driver: driver("Sofia Ferreira", "+351 913 222 111"),
            passengers: 3,
            roster: roster(&["Hugo Pinto", "Inês Ramos", "João Silva"]),
            alerts: vec!["Low battery".to_string()],
            started_at: start,
            scheduled_arrival: start + Duration::minutes(10),
        },
        SeedJourney {
            orig_id: "J-1003".to_string(),
            bus_plate: "CC-56-FG".to_string(),
            school: camoes.to_string(),
            from: "Oeiras".to_string(),
            from_coords: Coords::new(-9.3106, 38.6913),
            destination: camoes.to_string(),
            destination_coords: Coords::new(-9.1436, 38.7296),
            bus: Bus::new(55.0, 64.0, 19.0, Connectivity::Good),
            driver: driver("Miguel Santos", "+351 914 876 543"),
            passengers: 4,
            roster: roster(&[
                "Leonor Alves",
                "Mariana Gomes",
                "Nuno Carvalho",
                "Rita Marques",
            ]),
            alerts: vec!["Long distance route".to_string()],
            started_at: start,
            scheduled_arrival: start + Duration::minutes(25),
        },
        SeedJourney {
            orig_id: "J-1004".to_string(),
            bus_plate: "DD-78-HI".to_string(),
            school: camoes.to_string(),
            from: "Arroios".to_string(),
            from_coords: Coords::new(-9.1340, 38.7330),
            destination: camoes.to_string(),
            destination_coords: Coords::new(-9.1436, 38.7296),
            // Parked with a stalled speed report; the speed floor still moves it along
            bus: Bus::new(0.0, 72.0, 20.0, Connectivity::Offline),
            driver: driver("Teresa Moura", "+351 915 000 222"),
            passengers: 2,
            roster: roster(&["Tiago Rocha", "Vera Teixeira"]),
            alerts: Vec::new(),
            started_at: start,
            scheduled_arrival: start + Duration::minutes(5),
        },
        SeedJourney {
            orig_id: "J-1005".to_string(),
            bus_plate: "EE-90-JK".to_string(),
            school: moderno.to_string(),
            from: moderno.to_string(),
            from_coords: Coords::new(-9.1585, 38.7560),
            destination: moderno.to_string(),
            destination_coords: Coords::new(-9.1585, 38.7560),
            bus: Bus::new(25.0, 91.0, 22.0, Connectivity::Good),
            driver: driver("Paulo Correia", "+351 916 333 444"),
            passengers: 0,
            roster: Vec::new(),
            alerts: Vec::new(),
            started_at: start,
            scheduled_arrival: start,
        },
        SeedJourney {
            orig_id: "J-1006".to_string(),
            bus_plate: "FF-11-LM".to_string(),
            school: moderno.to_string(),
            from: "Parque das Nações".to_string(),
            from_coords: Coords::new(-9.0940, 38.7680),
            destination: moderno.to_string(),
            destination_coords: Coords::new(-9.1585, 38.7560),
            bus: Bus::new(38.0, 54.0, 24.5, Connectivity::Good),
            driver: driver("Helena Barros", "+351 917 555 666"),
            passengers: 6,
            roster: roster(&[
                "Xavier Cunha",
                "Yara Fonseca",
                "Zé Pereira",
                "Beatriz Matos",
                "Duarte Vieira",
                "Francisca Melo",
            ]),
            alerts: Vec::new(),
            started_at: start,
            // Tight schedule; this one will run late
            scheduled_arrival: start + Duration::minutes(3),
        },
    ]
}
