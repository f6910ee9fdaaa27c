use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use floornav_core::{Graph, Navigator, SearchOptions, WaypointId};

#[derive(Parser, Debug)]
#[command(name = "floornav", version, about = "Query routes on an indoor waypoint graph")]
struct Args {
    /// Location document (map.json)
    #[arg(long = "graph", value_name = "PATH")]
    graph: PathBuf,

    /// Stop a search after this many expanded waypoints
    #[arg(long = "max-expansions", value_name = "N")]
    max_expansions: Option<u64>,

    /// Search deadline in milliseconds (0 disables)
    #[arg(long = "timeout-ms", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drawable segments between two waypoints on one floor
    Route {
        #[arg(long)]
        start: WaypointId,
        #[arg(long)]
        finish: WaypointId,
        #[arg(long, default_value_t = 1)]
        floor: i32,
    },
    /// Walking length of the full route across floors
    Length {
        #[arg(long)]
        start: WaypointId,
        #[arg(long)]
        finish: WaypointId,
    },
    /// A single waypoint with its metadata
    Waypoint {
        #[arg(long)]
        id: WaypointId,
    },
    /// Floors of the location, or the waypoints of one floor
    Levels {
        #[arg(long)]
        level: Option<i32>,
    },
}

impl Args {
    fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(n) = self.max_expansions { options.max_expansions = n; }
        if let Some(ms) = self.timeout_ms { options.timeout_ms = ms; }
        options
    }
}

fn run(args: &Args) -> Result<serde_json::Value> {
    let file = File::open(&args.graph).with_context(|| format!("failed to open {:?}", args.graph))?;
    let graph = Graph::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to load graph from {:?}", args.graph))?;
    let mut nav = Navigator::with_options(Arc::new(graph), args.search_options());

    let out = match &args.command {
        Command::Route { start, finish, floor } => match nav.route(*start, *finish, *floor) {
            Ok(route) => serde_json::to_value(route.as_ref())?,
            Err(e) if e.is_no_path() => json!({ "found": false, "reason": e.to_string(), "segments": [] }),
            Err(e) => return Err(e.into()),
        },
        Command::Length { start, finish } => {
            let length = nav.route_length(*start, *finish)?;
            json!({ "start": start, "finish": finish, "length": length })
        }
        Command::Waypoint { id } => serde_json::to_value(nav.waypoint(*id)?)?,
        Command::Levels { level: Some(level) } => {
            let on_level: Vec<_> = nav.graph().waypoints_on_level(*level).collect();
            serde_json::to_value(on_level)?
        }
        Command::Levels { level: None } => serde_json::to_value(nav.graph().levels())?,
    };
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    info!(?args, "starting floornav");

    let out = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
