use fleet::{Journey, JourneyStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Completed,
    Cancelled,
}

impl StatusFilter {
    pub fn matches(self, status: JourneyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == JourneyStatus::Pending,
            StatusFilter::Completed => status == JourneyStatus::Completed,
            StatusFilter::Cancelled => status == JourneyStatus::Cancelled,
        }
    }

    pub fn parse(x: &str) -> Option<Self> {
        match x {
            "all" => Some(StatusFilter::All),
            "pending" => Some(StatusFilter::Pending),
            "completed" => Some(StatusFilter::Completed),
            "cancelled" => Some(StatusFilter::Cancelled),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filters {
    pub status: StatusFilter,
    /// Free text, matched case-insensitively against the plate, either end of the route, and the
    /// driver
    pub search: String,
}

impl Filters {
    pub fn new() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
        }
    }

    pub fn matches(&self, journey: &Journey) -> bool {
        if !self.status.matches(journey.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &journey.bus_plate,
            &journey.from,
            &journey.destination,
            &journey.driver.name,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, journeys: &'a [Journey]) -> Vec<&'a Journey> {
        journeys.iter().filter(|j| self.matches(j)).collect()
    }

    pub fn describe(&self) -> String {
        let status = match self.status {
            StatusFilter::All => "all journeys",
            StatusFilter::Pending => "journeys in transit",
            StatusFilter::Completed => "arrived journeys",
            StatusFilter::Cancelled => "cancelled journeys",
        };
        if self.search.trim().is_empty() {
            status.to_string()
        } else {
            format!("{status} matching {:?}", self.search.trim())
        }
    }
}
