#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod alerts;
mod bounds;
mod config;
pub mod geo;
mod sidebar;
mod simulation;

use abstutil::Counter;
use anyhow::Result;
use geom::{Duration, Time};

use fleet::{build_fleet, Journey, JourneyID, JourneyStatus, SeedJourney};

pub use self::alerts::{AlertKind, JourneyEvent, Notification, NotificationCenter};
pub use self::bounds::{fit_bounds, BoundingBox};
pub use self::config::{AlertPolicy, SimConfig};
pub use self::sidebar::{sorted, DetailState, Sidebar, SortKey};
pub use self::simulation::{advance, TickOutcome};

/// The simulation store: owns every journey and the simulated clock. Each tick replaces the whole
/// list; readers only ever see a consistent snapshot.
pub struct Model {
    pub config: SimConfig,
    pub time: Time,
    journeys: Vec<Journey>,
    // Kept to reset the fleet
    seed: Vec<SeedJourney>,
    start_time: Time,
    pub notifications: NotificationCenter,
    ticks: usize,
}

pub struct TickReport {
    pub time: Time,
    pub events: Vec<JourneyEvent>,
    /// The subset of events that made it past the de-duplication policy
    pub shown: Vec<Notification>,
}

impl Model {
    pub fn new(seed: Vec<SeedJourney>, start_time: Time, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let journeys = build_fleet(seed.clone())?;
        Ok(Self {
            notifications: NotificationCenter::new(&config),
            config,
            time: start_time,
            journeys,
            seed,
            start_time,
            ticks: 0,
        })
    }

    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    pub fn journey(&self, id: JourneyID) -> Option<&Journey> {
        self.journeys.iter().find(|j| j.id == id)
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn tick(&mut self) -> TickReport {
        self.time = self.time + self.config.tick();
        self.ticks += 1;

        let outcome = advance(&self.journeys, self.time, &self.config);
        self.journeys = outcome.journeys;
        let shown = self
            .notifications
            .publish(outcome.events.clone(), self.time);

        debug!(
            "Tick {} at {}: {} events, {} shown",
            self.ticks,
            self.time,
            outcome.events.len(),
            shown.len()
        );
        TickReport {
            time: self.time,
            events: outcome.events,
            shown,
        }
    }

    pub fn cancel(&mut self, id: JourneyID) -> Result<()> {
        let now = self.time;
        let journey = match self.journeys.iter_mut().find(|j| j.id == id) {
            Some(j) => j,
            None => bail!("Unknown {:?}", id),
        };
        if !journey.cancel(now) {
            bail!(
                "Can't cancel {}; it's already {}",
                journey.orig_id.0,
                journey.status.describe()
            );
        }
        info!("Cancelled {}", journey.describe());
        Ok(())
    }

    /// Throws away all progress and starts over from the original seed.
    pub fn reset(&mut self) -> Result<()> {
        self.journeys = build_fleet(self.seed.clone())?;
        self.time = self.start_time;
        self.ticks = 0;
        self.notifications.clear();
        info!("Reset to a fresh fleet of {} journeys", self.journeys.len());
        Ok(())
    }

    pub fn all_terminal(&self) -> bool {
        self.journeys.iter().all(|j| j.status.is_terminal())
    }

    pub fn status_counts(&self) -> Counter<JourneyStatus> {
        let mut cnt = Counter::new();
        for journey in &self.journeys {
            cnt.inc(journey.status);
        }
        cnt
    }

    pub fn elapsed(&self) -> Duration {
        self.time - self.start_time
    }
}
