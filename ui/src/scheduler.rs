use std::ops::ControlFlow;

use model::TickReport;

use crate::Dashboard;

/// How fast simulated time passes compared to real time.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum SpeedSetting {
    Realtime,
    Fast,
    Faster,
    Fastest,
    Unthrottled,
}

impl SpeedSetting {
    pub fn multiplier(self) -> Option<f64> {
        match self {
            SpeedSetting::Realtime => Some(1.0),
            SpeedSetting::Fast => Some(5.0),
            SpeedSetting::Faster => Some(30.0),
            SpeedSetting::Fastest => Some(3600.0),
            SpeedSetting::Unthrottled => None,
        }
    }

    pub fn parse(x: &str) -> Option<Self> {
        match x {
            "realtime" => Some(SpeedSetting::Realtime),
            "fast" => Some(SpeedSetting::Fast),
            "faster" => Some(SpeedSetting::Faster),
            "fastest" => Some(SpeedSetting::Fastest),
            "unthrottled" => Some(SpeedSetting::Unthrottled),
            _ => None,
        }
    }
}

/// Drives the simulation on a fixed cadence. Everything happens on the calling thread, one tick at
/// a time, so ticks never overlap.
pub struct Scheduler {
    pub speed: SpeedSetting,
    pub max_ticks: usize,
}

impl Scheduler {
    pub fn new(speed: SpeedSetting, max_ticks: usize) -> Self {
        Self { speed, max_ticks }
    }

    /// Ticks until every journey is done, the tick limit is reached, or the callback asks to stop.
    /// Returns the number of ticks run.
    pub fn run<F>(&self, dashboard: &mut Dashboard, mut on_tick: F) -> usize
    where
        F: FnMut(&Dashboard, &TickReport) -> ControlFlow<()>,
    {
        let pause = self.speed.multiplier().map(|multiplier| {
            std::time::Duration::from_secs_f64(dashboard.model.config.tick_seconds / multiplier)
        });

        let mut ticks = 0;
        while ticks < self.max_ticks && !dashboard.model.all_terminal() {
            let report = dashboard.tick();
            ticks += 1;
            if on_tick(dashboard, &report).is_break() {
                info!("Stopping the simulation after {} ticks", ticks);
                break;
            }
            if let Some(pause) = pause {
                std::thread::sleep(pause);
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use geom::{Duration, Time};
    use model::{Model, SimConfig};

    use super::*;

    fn dashboard() -> Dashboard {
        let start = Time::START_OF_DAY + Duration::hours(8);
        let model = Model::new(fleet::mock_fleet(start), start, SimConfig::default()).unwrap();
        Dashboard::new(model)
    }

    #[test]
    fn runs_until_done() {
        let mut dashboard = dashboard();
        let scheduler = Scheduler::new(SpeedSetting::Unthrottled, 100_000);
        let mut seen = 0;
        let ticks = scheduler.run(&mut dashboard, |_, _| {
            seen += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(ticks, seen);
        assert!(dashboard.model.all_terminal());
        assert_eq!(dashboard.model.ticks(), ticks);
    }

    #[test]
    fn stops_when_asked() {
        let mut dashboard = dashboard();
        let scheduler = Scheduler::new(SpeedSetting::Unthrottled, 100_000);
        let ticks = scheduler.run(&mut dashboard, |dashboard, _| {
            if dashboard.model.ticks() == 7 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(ticks, 7);
        assert!(!dashboard.model.all_terminal());

        let capped = Scheduler::new(SpeedSetting::Unthrottled, 3);
        assert_eq!(capped.run(&mut dashboard, |_, _| ControlFlow::Continue(())), 3);
        assert_eq!(dashboard.model.ticks(), 10);
    }
}
