use geom::Time;
use serde::{Deserialize, Serialize};

use crate::{orig, Coords, JourneyID};

pub const MAX_ROSTER: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Journey {
    pub id: JourneyID,
    pub orig_id: orig::JourneyID,
    pub bus_plate: String,
    /// Routes are grouped (and colored) by the school they serve
    pub school: String,

    pub from: String,
    pub destination: String,
    pub from_coords: Coords,
    pub destination_coords: Coords,
    pub current_coords: Coords,

    pub status: JourneyStatus,
    pub progress: u8,

    pub passengers: usize,
    pub passengers_list: Vec<String>,
    pub bus: Bus,
    pub driver: Driver,
    /// Badges from the seed data, like "Low battery". Never changed by the simulation.
    pub alerts: Vec<String>,

    pub started_at: Time,
    pub last_update: Time,
    pub expected_arrival: Time,
    pub scheduled_arrival: Time,
    pub delayed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JourneyStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    /// The current reading, which drifts around `cruise_kmh`
    pub speed_kmh: f64,
    pub cruise_kmh: f64,
    pub battery: f64,
    pub temperature: f64,
    pub connectivity: Connectivity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    Good,
    Weak,
    Offline,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub phone: String,
}

impl Bus {
    pub fn new(speed_kmh: f64, battery: f64, temperature: f64, connectivity: Connectivity) -> Self {
        Self {
            speed_kmh,
            cruise_kmh: speed_kmh,
            battery,
            temperature,
            connectivity,
        }
    }
}

impl JourneyStatus {
    pub fn is_terminal(self) -> bool {
        self != JourneyStatus::Pending
    }

    pub fn describe(self) -> &'static str {
        match self {
            JourneyStatus::Pending => "in transit",
            JourneyStatus::Completed => "arrived",
            JourneyStatus::Cancelled => "cancelled",
        }
    }
}

impl Connectivity {
    pub fn parse(x: &str) -> Option<Self> {
        match x.to_ascii_lowercase().as_str() {
            "good" | "strong" => Some(Connectivity::Good),
            "weak" => Some(Connectivity::Weak),
            "offline" | "none" => Some(Connectivity::Offline),
            _ => None,
        }
    }
}

impl Journey {
    pub fn is_pending(&self) -> bool {
        self.status == JourneyStatus::Pending
    }

    /// Snaps to the destination and stops the bus. The only way to reach 100% progress.
    pub fn arrive(&mut self, now: Time) {
        self.current_coords = self.destination_coords;
        self.progress = 100;
        self.status = JourneyStatus::Completed;
        self.bus.speed_kmh = 0.0;
        self.last_update = now;
        self.expected_arrival = now;
    }

    /// Does nothing for journeys that already finished; status never moves backwards.
    pub fn cancel(&mut self, now: Time) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JourneyStatus::Cancelled;
        self.bus.speed_kmh = 0.0;
        self.last_update = now;
        true
    }

    pub fn describe(&self) -> String {
        format!(
            "{} ({}): {} to {}, {}% {}",
            self.bus_plate,
            self.orig_id.0,
            self.from,
            self.destination,
            self.progress,
            self.status.describe()
        )
    }
}

pub fn cap_roster(names: Vec<String>) -> Vec<String> {
    names.into_iter().take(MAX_ROSTER).collect()
}
