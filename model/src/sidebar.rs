use serde::{Deserialize, Serialize};

use fleet::{Coords, Journey, JourneyID};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Progress,
    Passengers,
    ExpectedArrival,
}

impl SortKey {
    pub fn parse(x: &str) -> Option<Self> {
        match x {
            "progress" => Some(SortKey::Progress),
            "passengers" => Some(SortKey::Passengers),
            "eta" | "expected_arrival" => Some(SortKey::ExpectedArrival),
            _ => None,
        }
    }
}

/// A sorted view over the journeys. Stable, so ties keep their original relative order, and
/// nothing is modified.
pub fn sorted<'a, I>(journeys: I, key: SortKey) -> Vec<&'a Journey>
where
    I: IntoIterator<Item = &'a Journey>,
{
    let mut list: Vec<&Journey> = journeys.into_iter().collect();
    match key {
        SortKey::Progress => list.sort_by(|a, b| b.progress.cmp(&a.progress)),
        SortKey::Passengers => list.sort_by(|a, b| b.passengers.cmp(&a.passengers)),
        SortKey::ExpectedArrival => list.sort_by_key(|j| j.expected_arrival),
    }
    list
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    Open(JourneyID),
}

pub struct Sidebar {
    pub sort_key: SortKey,
    pub detail: DetailState,
}

impl Sidebar {
    pub fn new() -> Self {
        Self {
            sort_key: SortKey::Progress,
            detail: DetailState::Idle,
        }
    }

    pub fn entries<'a, I>(&self, journeys: I) -> Vec<&'a Journey>
    where
        I: IntoIterator<Item = &'a Journey>,
    {
        sorted(journeys, self.sort_key)
    }

    /// Opens the detail view for a journey. Returns where the map should recenter, or None if the
    /// journey doesn't exist.
    pub fn select(&mut self, journeys: &[Journey], id: JourneyID) -> Option<Coords> {
        let journey = journeys.iter().find(|j| j.id == id)?;
        self.detail = DetailState::Open(id);
        Some(journey.current_coords)
    }

    pub fn close(&mut self) {
        self.detail = DetailState::Idle;
    }

    pub fn selected(&self) -> Option<JourneyID> {
        match self.detail {
            DetailState::Idle => None,
            DetailState::Open(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use geom::{Duration, Time};

    use super::*;

    fn mock() -> Vec<Journey> {
        let start = Time::START_OF_DAY + Duration::hours(8);
        let mut journeys = fleet::build_fleet(fleet::mock_fleet(start)).unwrap();
        for (idx, j) in journeys.iter_mut().enumerate() {
            // Pairs of ties: 0 and 1, 2 and 3, 4 and 5
            j.progress = 10 * (idx / 2) as u8;
            j.passengers = idx % 3;
            j.expected_arrival = start + Duration::minutes(60 - 10 * idx);
        }
        journeys
    }

    fn ids(list: Vec<&Journey>) -> Vec<usize> {
        list.into_iter().map(|j| j.id.0).collect()
    }

    #[test]
    fn sort_by_progress_is_stable() {
        let journeys = mock();
        assert_eq!(ids(sorted(&journeys, SortKey::Progress)), vec![4, 5, 2, 3, 0, 1]);

        // Reversing the input reverses the order within ties too
        let mut reversed = journeys.clone();
        reversed.reverse();
        assert_eq!(ids(sorted(&reversed, SortKey::Progress)), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn other_sort_keys() {
        let journeys = mock();
        // passengers are 0, 1, 2, 0, 1, 2
        assert_eq!(
            ids(sorted(&journeys, SortKey::Passengers)),
            vec![2, 5, 1, 4, 0, 3]
        );
        assert_eq!(
            ids(sorted(&journeys, SortKey::ExpectedArrival)),
            vec![5, 4, 3, 2, 1, 0]
        );
        // Sorting is a view; the list itself is untouched
        assert_eq!(
            journeys.iter().map(|j| j.id.0).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn select_and_close() {
        let journeys = mock();
        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.selected(), None);

        let center = sidebar.select(&journeys, JourneyID(2)).unwrap();
        assert_eq!(center, journeys[2].current_coords);
        assert_eq!(sidebar.detail, DetailState::Open(JourneyID(2)));

        assert!(sidebar.select(&journeys, JourneyID(99)).is_none());
        assert_eq!(sidebar.selected(), Some(JourneyID(2)));

        sidebar.close();
        assert_eq!(sidebar.detail, DetailState::Idle);
    }
}
