//! The map widget, kept independent of whatever library actually draws tiles. This decides what
//! to show and how it should look; the result is handed over as GeoJSON.

mod cluster;
mod filters;
mod interaction;
mod scene;
mod style;
mod viewport;

pub use cluster::{cluster_vehicles, Cluster, NO_CLUSTERING_ZOOM};
pub use filters::{Filters, StatusFilter};
pub use interaction::{MapEvent, PopupState};
pub use scene::{bounds_feature, build_scene, heading};
pub use style::{style, MarkerTag, SchoolPalette, Style};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
