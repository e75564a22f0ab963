#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::ops::ControlFlow;

use abstutil::prettyprint_usize;
use anyhow::Result;
use structopt::StructOpt;

use fleet::JourneyStatus;
use model::{fit_bounds, AlertPolicy, Model, SimConfig, SortKey};
use ui::map::{bounds_feature, Filters, StatusFilter};
use ui::{Dashboard, Scheduler, SpeedSetting};

#[derive(StructOpt)]
struct Args {
    /// The path to a CSV file with journeys to simulate. Without this, a built-in mock fleet is
    /// used.
    #[structopt(long)]
    seed: Option<String>,
    /// The path to a JSON file overriding simulation settings
    #[structopt(long)]
    config: Option<String>,
    /// When the simulation starts, as HH:MM:SS
    #[structopt(long, default_value = "07:30:00")]
    start: String,
    /// realtime, fast, faster, fastest, or unthrottled
    #[structopt(long, default_value = "fastest")]
    speed: String,
    /// Stop after this many ticks, even if some journeys are still going
    #[structopt(long, default_value = "100000")]
    max_ticks: usize,
    /// Only show journeys whose plate, route, or driver contains this
    #[structopt(long)]
    search: Option<String>,
    /// all, pending, completed, or cancelled
    #[structopt(long, default_value = "all")]
    status: String,
    /// How to sort the journey list: progress, passengers, or eta
    #[structopt(long, default_value = "progress")]
    sort: String,
    /// How to de-duplicate alerts: global (one banner at a time) or per-journey
    #[structopt(long)]
    policy: Option<String>,
    /// With the per-journey policy, how many seconds before repeating the same alert
    #[structopt(long, default_value = "300")]
    cooldown: f64,
    /// Print the journey list every this many ticks
    #[structopt(long, default_value = "30")]
    report_every: usize,
    /// Write the final map scene as GeoJSON to this path
    #[structopt(long)]
    geojson: Option<String>,
}

impl Args {
    fn config(&self) -> Result<SimConfig> {
        let mut config = match self.config {
            Some(ref path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        match self.policy.as_deref() {
            None => {}
            Some("global") => {
                config.alert_policy = AlertPolicy::GlobalBanner;
            }
            Some("per-journey") => {
                config.alert_policy = AlertPolicy::PerJourney {
                    cooldown_seconds: self.cooldown,
                };
            }
            Some(x) => bail!("Unknown --policy {x}"),
        }
        config.validate()?;
        Ok(config)
    }

    fn model(&self) -> Result<Model> {
        let start = fleet::parse_time(&self.start)?;
        let seed = match self.seed {
            Some(ref path) => fleet::load_csv(fs_err::File::open(path)?)?,
            None => fleet::mock_fleet(start),
        };
        if seed.is_empty() {
            bail!("No journeys to simulate");
        }
        Model::new(seed, start, self.config()?)
    }

    fn filters(&self) -> Result<Filters> {
        let mut filters = Filters::new();
        filters.status = match StatusFilter::parse(&self.status) {
            Some(x) => x,
            None => bail!("Unknown --status {}", self.status),
        };
        if let Some(ref search) = self.search {
            filters.search = search.clone();
        }
        Ok(filters)
    }
}

fn main() {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    if let Err(err) = run(args) {
        error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let speed = match SpeedSetting::parse(&args.speed) {
        Some(x) => x,
        None => bail!("Unknown --speed {}", args.speed),
    };
    let sort_key = match SortKey::parse(&args.sort) {
        Some(x) => x,
        None => bail!("Unknown --sort {}", args.sort),
    };

    let mut dashboard = Dashboard::new(args.model()?);
    dashboard.set_filters(args.filters()?)?;
    dashboard.set_sort_key(sort_key);
    dashboard.fit_all();
    for (school, color) in dashboard.legend() {
        info!("{color} {school}");
    }

    let scheduler = Scheduler::new(speed, args.max_ticks);
    let report_every = args.report_every.max(1);
    let ticks = scheduler.run(&mut dashboard, |dashboard, report| {
        for notification in &report.shown {
            println!("[{}] {}", report.time.ampm_tostring(), notification.message);
        }
        if dashboard.model.ticks() % report_every == 0 {
            print_sidebar(dashboard);
        }
        ControlFlow::Continue(())
    });

    print_sidebar(&dashboard);
    let counts = dashboard.model.status_counts();
    println!(
        "After {} ticks ({} simulated): {} arrived, {} in transit, {} cancelled",
        prettyprint_usize(ticks),
        dashboard.model.elapsed(),
        prettyprint_usize(counts.get(JourneyStatus::Completed)),
        prettyprint_usize(counts.get(JourneyStatus::Pending)),
        prettyprint_usize(counts.get(JourneyStatus::Cancelled)),
    );

    if let Some(path) = args.geojson {
        let mut gj = dashboard.scene();
        if let geojson::GeoJson::FeatureCollection(ref mut fc) = gj {
            if let Some(bounds) = fit_bounds(dashboard.model.journeys()) {
                fc.features.push(bounds_feature(&bounds, "bounds"));
            }
            fc.features.push(bounds_feature(
                &dashboard.viewport.visible_bounds(),
                "viewport",
            ));
        }
        fs_err::write(&path, serde_json::to_string_pretty(&gj)?)?;
        info!("Wrote the map scene to {path}");
    }
    Ok(())
}

fn print_sidebar(dashboard: &Dashboard) {
    println!(
        "--- {} at {} ---",
        dashboard.filters.describe(),
        dashboard.model.time.ampm_tostring()
    );
    for journey in dashboard.sidebar_entries() {
        println!("  {}", journey.describe());
    }
}
