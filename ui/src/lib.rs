#[macro_use]
extern crate log;

pub mod map;
mod scheduler;

use anyhow::Result;
use geojson::GeoJson;

use fleet::{Coords, Journey, JourneyID};
use model::{Model, Sidebar, SortKey, TickReport};

use map::{build_scene, Filters, MapEvent, PopupState, SchoolPalette, Viewport};
pub use scheduler::{Scheduler, SpeedSetting};

/// The live map and the journey list beside it. Both read from the same `Model`.
pub struct Dashboard {
    pub model: Model,
    pub filters: Filters,
    pub sidebar: Sidebar,
    pub popup: PopupState,
    pub viewport: Viewport,
    palette: SchoolPalette,
}

impl Dashboard {
    pub fn new(model: Model) -> Self {
        let palette = SchoolPalette::new(model.journeys());
        let mut viewport = Viewport::new(Coords::new(0.0, 0.0), 2.0, 1280.0, 800.0);
        viewport.fit(model.journeys());
        Self {
            model,
            filters: Filters::new(),
            sidebar: Sidebar::new(),
            popup: PopupState::Idle,
            viewport,
            palette,
        }
    }

    pub fn tick(&mut self) -> TickReport {
        self.model.tick()
    }

    pub fn visible(&self) -> Vec<&Journey> {
        self.filters.apply(self.model.journeys())
    }

    pub fn sidebar_entries(&self) -> Vec<&Journey> {
        self.sidebar.entries(self.visible())
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sidebar.sort_key = key;
    }

    /// Changing the search or status filter starts over from a fresh fleet.
    pub fn set_filters(&mut self, filters: Filters) -> Result<()> {
        if filters == self.filters {
            return Ok(());
        }
        info!("Showing {}", filters.describe());
        self.filters = filters;
        self.model.reset()?;
        self.popup = PopupState::Idle;
        self.sidebar.close();
        Ok(())
    }

    pub fn on_map_event(&mut self, ev: MapEvent) {
        self.popup = self.popup.handle(ev);
    }

    /// Picks a journey from the list: highlight it and move the map there.
    pub fn select(&mut self, id: JourneyID) -> bool {
        match self.sidebar.select(self.model.journeys(), id) {
            Some(pt) => {
                self.viewport.recenter(pt);
                true
            }
            None => {
                warn!("Can't select unknown {:?}", id);
                false
            }
        }
    }

    pub fn fit_all(&mut self) -> bool {
        self.viewport.fit(self.model.journeys())
    }

    /// Whatever is highlighted on the map, preferring the sidebar's choice
    pub fn highlighted(&self) -> Option<JourneyID> {
        self.sidebar.selected().or_else(|| self.popup.open_for())
    }

    pub fn scene(&self) -> GeoJson {
        build_scene(
            &self.visible(),
            self.highlighted(),
            &self.palette,
            self.viewport.zoom,
        )
    }

    pub fn popup_lines(&self) -> Option<Vec<String>> {
        let id = self.popup.open_for()?;
        self.model.journey(id).map(describe_journey)
    }

    pub fn legend(&self) -> Vec<(&str, String)> {
        self.palette.legend()
    }
}

pub fn describe_journey(journey: &Journey) -> Vec<String> {
    let mut lines = vec![
        format!("{} - {}", journey.bus_plate, journey.school),
        format!("{} to {}", journey.from, journey.destination),
        format!(
            "{}% ({}), expected at {}",
            journey.progress,
            journey.status.describe(),
            journey.expected_arrival.ampm_tostring()
        ),
        format!("Driver: {} ({})", journey.driver.name, journey.driver.phone),
        format!(
            "Speed {:.0} km/h, battery {:.0}%, {:.1}°C, connectivity {:?}",
            journey.bus.speed_kmh,
            journey.bus.battery,
            journey.bus.temperature,
            journey.bus.connectivity
        ),
    ];
    if journey.delayed {
        lines.push(format!(
            "Running late; scheduled for {}",
            journey.scheduled_arrival.ampm_tostring()
        ));
    }
    for alert in &journey.alerts {
        lines.push(format!("Alert: {alert}"));
    }
    let mut passengers = format!("{} passengers", journey.passengers);
    if !journey.passengers_list.is_empty() {
        passengers.push_str(&format!(": {}", journey.passengers_list.join(", ")));
        if journey.passengers > journey.passengers_list.len() {
            passengers.push_str(&format!(
                " and {} more",
                journey.passengers - journey.passengers_list.len()
            ));
        }
    }
    lines.push(passengers);
    lines
}

#[cfg(test)]
mod tests {
    use geom::{Duration, Time};
    use model::SimConfig;

    use super::*;
    use crate::map::StatusFilter;

    fn dashboard() -> Dashboard {
        let start = Time::START_OF_DAY + Duration::hours(8);
        let model = Model::new(fleet::mock_fleet(start), start, SimConfig::default()).unwrap();
        Dashboard::new(model)
    }

    #[test]
    fn select_recenters_and_highlights() {
        let mut dashboard = dashboard();
        for _ in 0..20 {
            dashboard.tick();
        }
        let target = dashboard.model.journey(JourneyID(2)).unwrap().current_coords;
        assert!(dashboard.select(JourneyID(2)));
        assert_eq!(dashboard.viewport.center, target);
        assert_eq!(dashboard.highlighted(), Some(JourneyID(2)));

        assert!(!dashboard.select(JourneyID(100)));
        assert_eq!(dashboard.highlighted(), Some(JourneyID(2)));

        // The popup is independent of the sidebar
        dashboard.on_map_event(MapEvent::MarkerClicked(JourneyID(0)));
        assert_eq!(dashboard.popup, PopupState::Open(JourneyID(0)));
        assert_eq!(dashboard.highlighted(), Some(JourneyID(2)));
        let lines = dashboard.popup_lines().unwrap();
        assert!(lines[0].starts_with("AA-12-BC"));
        assert!(lines.iter().any(|l| l.contains("and 2 more")));

        dashboard.sidebar.close();
        assert_eq!(dashboard.highlighted(), Some(JourneyID(0)));
        dashboard.on_map_event(MapEvent::ClickedOutside);
        assert_eq!(dashboard.highlighted(), None);
        assert!(dashboard.popup_lines().is_none());
    }

    #[test]
    fn changing_filters_reseeds() {
        let mut dashboard = dashboard();
        for _ in 0..20 {
            dashboard.tick();
        }
        assert!(dashboard.model.journeys().iter().any(|j| j.progress > 0));

        // Setting the same filters again is a no-op
        dashboard.set_filters(Filters::new()).unwrap();
        assert_eq!(dashboard.model.ticks(), 20);

        let mut filters = Filters::new();
        filters.status = StatusFilter::Pending;
        filters.search = "alvalade".to_string();
        dashboard.set_filters(filters).unwrap();
        assert_eq!(dashboard.model.ticks(), 0);
        assert!(dashboard.model.journeys().iter().all(|j| j.progress == 0));

        let visible: Vec<&str> = dashboard
            .visible()
            .into_iter()
            .map(|j| j.bus_plate.as_str())
            .collect();
        assert_eq!(visible, vec!["AA-12-BC", "BB-34-DE"]);
    }

    #[test]
    fn sidebar_follows_filters_and_sort() {
        let mut dashboard = dashboard();
        dashboard.set_sort_key(SortKey::Passengers);
        let entries: Vec<usize> = dashboard
            .sidebar_entries()
            .into_iter()
            .map(|j| j.passengers)
            .collect();
        let mut expected = entries.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(entries, expected);
        assert_eq!(entries.len(), dashboard.model.journeys().len());
    }
}
