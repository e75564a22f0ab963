use std::collections::BTreeMap;

use serde::Serialize;

use fleet::{Journey, JourneyID, JourneyStatus};

/// Everything that decides how a journey's route and markers look, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerTag {
    Selected,
    Cancelled,
    Completed,
    Delayed,
    /// Normal routes are colored by the school they serve
    School(usize),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Style {
    pub color: String,
    pub icon: &'static str,
    pub line_width: f64,
    pub opacity: f64,
}

/// Assigns each school a stable index, in order of first appearance.
pub struct SchoolPalette {
    index: BTreeMap<String, usize>,
}

impl SchoolPalette {
    pub fn new(journeys: &[Journey]) -> Self {
        let mut index = BTreeMap::new();
        for journey in journeys {
            let next = index.len();
            index.entry(journey.school.clone()).or_insert(next);
        }
        Self { index }
    }

    pub fn lookup(&self, school: &str) -> usize {
        // Schools appearing later than the palette was built share the first color
        self.index.get(school).cloned().unwrap_or(0)
    }

    pub fn legend(&self) -> Vec<(&str, String)> {
        let mut list: Vec<(&str, usize)> =
            self.index.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        list.sort_by_key(|(_, idx)| *idx);
        list.into_iter()
            .map(|(name, idx)| (name, style(MarkerTag::School(idx)).color))
            .collect()
    }
}

impl MarkerTag {
    pub fn for_journey(
        journey: &Journey,
        selected: Option<JourneyID>,
        palette: &SchoolPalette,
    ) -> Self {
        if selected == Some(journey.id) {
            return MarkerTag::Selected;
        }
        match journey.status {
            JourneyStatus::Cancelled => MarkerTag::Cancelled,
            JourneyStatus::Completed => MarkerTag::Completed,
            JourneyStatus::Pending => {
                if journey.delayed {
                    MarkerTag::Delayed
                } else {
                    MarkerTag::School(palette.lookup(&journey.school))
                }
            }
        }
    }
}

pub fn style(tag: MarkerTag) -> Style {
    match tag {
        MarkerTag::Selected => Style {
            color: "#ffd43b".to_string(),
            icon: "bus-selected",
            line_width: 6.0,
            opacity: 1.0,
        },
        MarkerTag::Cancelled => Style {
            color: "#495057".to_string(),
            icon: "bus-cancelled",
            line_width: 2.0,
            opacity: 0.4,
        },
        MarkerTag::Completed => Style {
            color: "#adb5bd".to_string(),
            icon: "bus-parked",
            line_width: 2.0,
            opacity: 0.6,
        },
        MarkerTag::Delayed => Style {
            color: "#e03131".to_string(),
            icon: "bus-alert",
            line_width: 5.0,
            opacity: 1.0,
        },
        MarkerTag::School(idx) => {
            let c = colorous::TABLEAU10[idx % colorous::TABLEAU10.len()];
            Style {
                color: format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
                icon: "bus",
                line_width: 4.0,
                opacity: 0.9,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use geom::{Duration, Time};

    use super::*;

    fn mock() -> Vec<Journey> {
        let start = Time::START_OF_DAY + Duration::hours(8);
        fleet::build_fleet(fleet::mock_fleet(start)).unwrap()
    }

    #[test]
    fn tags_by_precedence() {
        let mut journeys = mock();
        let palette = SchoolPalette::new(&journeys);

        // The first two journeys go to the same school, the third to another
        assert_eq!(
            MarkerTag::for_journey(&journeys[0], None, &palette),
            MarkerTag::School(0)
        );
        assert_eq!(
            MarkerTag::for_journey(&journeys[1], None, &palette),
            MarkerTag::School(0)
        );
        assert_eq!(
            MarkerTag::for_journey(&journeys[2], None, &palette),
            MarkerTag::School(1)
        );

        journeys[0].delayed = true;
        assert_eq!(
            MarkerTag::for_journey(&journeys[0], None, &palette),
            MarkerTag::Delayed
        );
        // Selection wins over everything
        assert_eq!(
            MarkerTag::for_journey(&journeys[0], Some(journeys[0].id), &palette),
            MarkerTag::Selected
        );

        let now = journeys[1].started_at;
        journeys[1].cancel(now);
        assert_eq!(
            MarkerTag::for_journey(&journeys[1], None, &palette),
            MarkerTag::Cancelled
        );
        journeys[2].arrive(now);
        assert_eq!(
            MarkerTag::for_journey(&journeys[2], None, &palette),
            MarkerTag::Completed
        );
    }

    #[test]
    fn school_colors_differ() {
        let journeys = mock();
        let palette = SchoolPalette::new(&journeys);
        let legend = palette.legend();
        assert_eq!(legend.len(), 3);
        assert_ne!(legend[0].1, legend[1].1);
        assert_ne!(legend[1].1, legend[2].1);
        for (_, color) in legend {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
        }
        assert_ne!(
            style(MarkerTag::Delayed).color,
            style(MarkerTag::School(0)).color
        );
    }
}
