//! lastmile — sequence delivery stops in an urban neighbourhood.
//!
//! Loads the road network for a place, picks (or reads) delivery stops,
//! orders them with the nearest-neighbour sequencer, and prints the
//! step-by-step time breakdown.  With `--out` it also writes the route map
//! (`route.geojson`) and the leg/point/stop tables.
//!
//! Without `--places-dir` the built-in synthetic Bengaluru neighbourhoods
//! are used, so the binary runs with no downloaded data.

mod network;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use lm_core::SampleRng;
use lm_output::{CsvWriter, OutputWriter, RouteReport, format_summary, write_geojson};
use lm_route::{
    Deadline, RouteResult, RouteSequencer, SequenceResult, SequencerConfig, StopSet, load_stops_csv,
};
use lm_spatial::{DijkstraRouter, GraphCache, GraphProvider, RoadNetwork, SpeedProfile};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Neighbourhood to plan in, e.g. "Indiranagar, Bengaluru, India".
    #[arg(short, long, default_value = "Indiranagar, Bengaluru, India")]
    place: String,

    /// Directory of `<slug>.osm.pbf` extracts (requires the `osm` feature).
    #[arg(long, env = "LASTMILE_PLACES_DIR")]
    places_dir: Option<PathBuf>,

    /// Number of delivery stops, depot included.
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(2..=10))]
    stops: u8,

    /// Traffic congestion factor applied to free-flow travel time.
    #[arg(short, long, default_value_t = 1.5, value_parser = parse_congestion)]
    congestion: f64,

    /// Seed for random stop selection.  Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Read stops from a CSV file (`node` or `lat,lon` columns) instead of
    /// sampling them.
    #[arg(long)]
    stops_csv: Option<PathBuf>,

    /// Sample and sequence this many independent stop sets.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    runs: u16,

    /// Leave the route open: do not append the final stop to the polyline.
    #[arg(long)]
    open_route: bool,

    /// Give up if sequencing takes longer than this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Write `route.geojson` and the CSV (and SQLite) tables here.
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_congestion(s: &str) -> Result<f64, String> {
    let f: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (1.0..=3.0).contains(&f) {
        Ok(f)
    } else {
        Err(format!("congestion factor must be between 1.0 and 3.0, got {f}"))
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    println!("=== lastmile: last-mile route sequencing ===");
    println!(
        "Place: {}  |  Stops: {}  |  Congestion: x{:.2}",
        cli.place, cli.stops, cli.congestion
    );
    println!();

    // 1. Road network.
    let provider = build_provider(&cli)?;
    let mut cache = GraphCache::new(provider.as_ref());
    let network = cache.get(&cli.place).with_context(|| {
        format!(
            "could not load a road network for {:?}; check the area name and try again",
            cli.place
        )
    })?;
    println!(
        "Road network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    // 2. Stops.
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut rng = SampleRng::new(seed);
    let batch = choose_stops(&cli, &network, &mut rng)?;
    info!(seed, sets = batch.len(), "stops chosen");

    // 3. Sequence.
    let config = SequencerConfig {
        congestion_factor: cli.congestion,
        close_route:       !cli.open_route,
    };
    let sequencer = RouteSequencer::new(DijkstraRouter, config)?;

    let deadline = cli.timeout_ms.map(|ms| Deadline::after(Duration::from_millis(ms)));
    let t0 = Instant::now();
    let mut results = sequencer.sequence_batch_with(&network, &batch, || deadline).into_iter();
    let result = results
        .next()
        .context("no stop set to sequence")?
        .context("could not build a delivery route for these stops")?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, sets = batch.len(), "sequencing finished");

    // 4. Present.
    let stops = &batch[0];
    let report = RouteReport::new(&result, stops, &network);
    print!("{}", format_summary(&report));
    println!();
    println!(
        "Visit order (labels): {}",
        result
            .visit_order
            .iter()
            .filter_map(|&n| stops.label_of(n))
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    );
    println!("Route polyline: {} points", report.points.len());

    if batch.len() > 1 {
        print_batch(&result, results);
    }

    if let Some(dir) = &cli.out {
        write_outputs(dir, &report)?;
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_provider(cli: &Cli) -> Result<Box<dyn GraphProvider>> {
    let profile = SpeedProfile::default();
    match &cli.places_dir {
        None => {
            info!(
                places = network::PLACES.len(),
                "no places directory configured, using synthetic neighbourhoods"
            );
            Ok(Box::new(network::synthetic_provider(profile)))
        }
        #[cfg(feature = "osm")]
        Some(dir) => {
            info!(dir = %dir.display(), "loading OSM extracts");
            Ok(Box::new(lm_spatial::PbfDirectoryProvider::new(dir.clone(), profile)))
        }
        #[cfg(not(feature = "osm"))]
        Some(dir) => bail!(
            "--places-dir {} needs OSM support; rebuild with `--features osm`",
            dir.display()
        ),
    }
}

fn choose_stops(cli: &Cli, network: &RoadNetwork, rng: &mut SampleRng) -> Result<Vec<StopSet>> {
    if let Some(path) = &cli.stops_csv {
        if cli.runs > 1 {
            warn!(runs = cli.runs, "--runs is ignored when stops come from a CSV file");
        }
        let stops = load_stops_csv(path, network)
            .with_context(|| format!("could not read stops from {}", path.display()))?;
        return Ok(vec![stops]);
    }

    let k = usize::from(cli.stops);
    if network.node_count() < k {
        bail!(
            "{} has only {} road nodes, fewer than the {k} stops requested",
            cli.place,
            network.node_count()
        );
    }
    (0..cli.runs)
        .map(|i| {
            let mut child = rng.child(u64::from(i));
            StopSet::sample(network, k, &mut child).context("could not sample delivery stops")
        })
        .collect()
}

fn print_batch(
    first: &RouteResult,
    rest: impl Iterator<Item = SequenceResult<RouteResult>>,
) {
    println!();
    println!("{:<6} {:>8} {:>18}", "Run", "Legs", "Total time (min)");
    println!("{}", "-".repeat(34));
    println!("{:<6} {:>8} {:>18.2}", 0, first.legs.len(), first.total_time_mins);
    for (i, result) in (1..).zip(rest) {
        match result {
            Ok(r) => println!("{:<6} {:>8} {:>18.2}", i, r.legs.len(), r.total_time_mins),
            Err(e) => println!("{i:<6} failed: {e}"),
        }
    }
}

fn write_outputs(dir: &Path, report: &RouteReport) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create output directory {}", dir.display()))?;

    CsvWriter::new(dir)?.write_report(report)?;
    write_geojson(&dir.join("route.geojson"), report)?;

    #[cfg(feature = "sqlite")]
    lm_output::SqliteWriter::new(dir)?.write_report(report)?;

    println!();
    println!("Wrote route.geojson, route_legs.csv, route_points.csv, stops.csv to {}", dir.display());
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
