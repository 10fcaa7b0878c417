use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use clap::Parser;
use pilgrimage_itinerary::prelude::*;
use std::path::PathBuf;

mod catalog;
mod output;

use catalog::read_catalog;
use output::{write_itinerary_json, write_route_geojson};

#[derive(Parser, Debug)]
#[command(
    name = "plan-itinerary",
    author,
    version,
    about = "Plan a pilgrimage day itinerary from a location catalog",
    long_about = "Resolves the selected temples, officiant and lunch spot from a catalog file, \
                  orders the temples by repeatedly visiting the nearest one, and prints the \
                  timed day plan.\n\n\
                  The plan can be written as JSON and the route as GeoJSON for map rendering."
)]
struct Args {
    /// Catalog JSON file with companions, destinations and meal_stops
    #[arg(short, long)]
    catalog: PathBuf,

    /// Name of the start point
    #[arg(long, default_value = "New Delhi")]
    start_name: String,

    /// Start latitude in decimal degrees
    #[arg(long, default_value_t = 28.6139, allow_hyphen_values = true)]
    start_lat: f64,

    /// Start longitude in decimal degrees
    #[arg(long, default_value_t = 77.2090, allow_hyphen_values = true)]
    start_lng: f64,

    /// Companion (officiant) identifier
    #[arg(long)]
    companion: Option<String>,

    /// Destination identifier (repeat for several)
    #[arg(short, long = "destination")]
    destinations: Vec<String>,

    /// Meal stop identifier
    #[arg(short, long)]
    meal_stop: Option<String>,

    /// Arrival time at the first destination (HH:MM, 24-hour)
    #[arg(long, default_value = "09:00", value_parser = parse_time)]
    day_start: NaiveTime,

    /// Radius for lunch suggestions when no meal stop is selected
    #[arg(long, default_value_t = 5.0)]
    meal_radius_km: f64,

    /// Write the itinerary as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the route as GeoJSON to this file
    #[arg(long)]
    route_geojson: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

impl Args {
    fn selection(&self) -> StopSelection {
        StopSelection {
            companion: self.companion.as_deref().map(CompanionIdentifier::new),
            destinations: self
                .destinations
                .iter()
                .map(DestinationIdentifier::new)
                .collect(),
            meal_stop: self.meal_stop.as_deref().map(MealStopIdentifier::new),
        }
    }
}

/// Log nearby lunch options around the last destination
fn suggest_meal_stops(catalog: &StaticLocationCatalog, itinerary: &Itinerary, radius_km: f64) {
    let anchor = itinerary
        .route
        .waypoints()
        .iter()
        .rev()
        .nth(1)
        .map(|w| w.coordinate);

    let Some(anchor) = anchor else {
        return;
    };

    let mut suggestions = catalog.meal_stops_near(anchor, radius_km);
    if suggestions.is_empty() {
        log::info!("  No meal stops within {:.1} km, showing the closest instead", radius_km);
        suggestions = catalog.nearest_meal_stops(anchor, 3);
    }

    for meal in suggestions {
        log::info!(
            "    {} [{}] ({}, {:.2} km)",
            meal.name,
            meal.id,
            meal.cuisine,
            haversine_km(anchor, meal.coordinate)
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Pilgrimage Itinerary Planner ===");
    log::info!("Catalog: {}", args.catalog.display());

    // Validate input file exists
    if !args.catalog.exists() {
        bail!("Catalog file does not exist: {}", args.catalog.display());
    }

    let start = StartPoint::new(
        &args.start_name,
        Coordinate::new(args.start_lat, args.start_lng).context("Invalid start location")?,
    );
    log::info!("Start: {} {}", start.name, start.coordinate);

    // Phase 1: Resolve selection
    log::info!("");
    log::info!("Phase 1: Resolving selection...");
    let catalog = read_catalog(&args.catalog)?;
    let stops = catalog
        .resolve(&args.selection())
        .context("Failed to resolve selection")?;
    log::info!("  Resolved {} stops", stops.len());

    if args.destinations.is_empty() {
        log::warn!("  No destinations selected; the plan will only return to the start");
    }

    // Phase 2: Sequence
    log::info!("");
    log::info!("Phase 2: Sequencing route...");
    let sequencer = RouteSequencer::new(SequencerOptions {
        day_start: args.day_start,
        ..SequencerOptions::default()
    });
    let itinerary = sequencer.optimize_route(&start, &stops);

    for step in &itinerary.steps {
        log::info!(
            "  {:>8} - {:<8} {} ({:.2} km)",
            step.arrival,
            step.departure,
            step.activity,
            step.distance_km
        );
    }
    log::info!("  Total distance: {:.2} km", itinerary.total_distance_km());

    if args.meal_stop.is_none() && !args.destinations.is_empty() {
        log::info!("");
        log::info!("Lunch suggestions:");
        suggest_meal_stops(&catalog, &itinerary, args.meal_radius_km);
    }

    // Phase 3: Write output
    if let Some(path) = &args.output {
        log::info!("");
        write_itinerary_json(&itinerary, path).context("Failed to write itinerary JSON")?;
    }

    if let Some(path) = &args.route_geojson {
        write_route_geojson(&itinerary.route, path).context("Failed to write route GeoJSON")?;
    }

    log::info!("Done!");

    Ok(())
}
