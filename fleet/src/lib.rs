#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod coords;
mod ids;
mod journey;
mod load;
mod seed;

pub use coords::Coords;
pub use ids::{orig, CheapID, IDMapping, JourneyID};
pub use journey::{cap_roster, Bus, Connectivity, Driver, Journey, JourneyStatus, MAX_ROSTER};
pub use load::{load_csv, parse_time};
pub use seed::{build_fleet, mock_fleet, SeedJourney};
