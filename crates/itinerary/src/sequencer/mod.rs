//! Route sequencing: turns a start point and a bag of stops into a day plan.
//!
//! Destinations are ordered with a greedy nearest-neighbour walk from the start
//! point. The walk is O(n²) and not a shortest tour; stop counts are small.

pub mod clock;
pub mod options;

use tracing::{debug, trace};

use crate::models::itinerary::*;
use crate::models::types::*;
use crate::spatial::queries::{haversine_km, round_km};

pub use clock::{format_label, DayClock};
pub use options::SequencerOptions;

/// Stops split by kind. Only the first companion and meal stop are kept.
struct StopPartition<'a> {
    companion: Option<&'a Companion>,
    destinations: Vec<&'a Destination>,
    meal: Option<&'a MealStop>,
}

impl<'a> StopPartition<'a> {
    fn from_stops(stops: &'a [Stop]) -> Self {
        let mut partition = Self {
            companion: None,
            destinations: Vec::new(),
            meal: None,
        };

        for stop in stops {
            match stop {
                Stop::Companion(c) if partition.companion.is_none() => {
                    partition.companion = Some(c)
                }
                Stop::Companion(c) => debug!(companion = %c.id, "ignoring additional companion"),
                Stop::Destination(d) => partition.destinations.push(d),
                Stop::MealStop(m) if partition.meal.is_none() => partition.meal = Some(m),
                Stop::MealStop(m) => debug!(meal_stop = %m.id, "ignoring additional meal stop"),
            }
        }

        partition
    }
}

/// Order destinations by repeatedly moving to the closest unvisited one.
///
/// Returns each destination with its unrounded distance from the previous
/// position. Equidistant candidates keep their input order.
pub fn nearest_neighbor_order<'a>(
    origin: Coordinate,
    destinations: &[&'a Destination],
) -> Vec<(&'a Destination, f64)> {
    let mut unvisited = destinations.to_vec();
    let mut ordered = Vec::with_capacity(unvisited.len());
    let mut current = origin;

    while !unvisited.is_empty() {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        for (i, candidate) in unvisited.iter().enumerate() {
            let distance = haversine_km(current, candidate.coordinate);
            trace!(destination = %candidate.id, distance_km = distance, "candidate");
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }

        let next = unvisited.remove(best);
        debug!(
            destination = %next.id,
            distance_km = best_distance,
            remaining = unvisited.len(),
            "selected nearest destination"
        );
        current = next.coordinate;
        ordered.push((next, best_distance));
    }

    ordered
}

/// Builds itineraries. Holds only immutable timing options, so one sequencer
/// can serve any number of concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct RouteSequencer {
    options: SequencerOptions,
}

impl RouteSequencer {
    pub fn new(options: SequencerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SequencerOptions {
        &self.options
    }

    /// Sequence `stops` into a day plan that starts and ends at `start`.
    ///
    /// The plan is: companion (if any), destinations in nearest-neighbour
    /// order, the meal stop (if any), then the return to the start point.
    pub fn optimize_route(&self, start: &StartPoint, stops: &[Stop]) -> Itinerary {
        let partition = StopPartition::from_stops(stops);
        let mut steps = Vec::with_capacity(partition.destinations.len() + 3);

        if let Some(companion) = partition.companion {
            steps.push(ItineraryStep {
                subject: StepSubject::Stop(Stop::Companion(companion.clone())),
                arrival: "Start".into(),
                departure: "End".into(),
                activity: format!(
                    "Accompanied by {} ({})",
                    companion.name, companion.specialization
                ),
                distance_km: 0.0,
            });
        }

        let mut position = start.coordinate;
        let mut clock = DayClock::starting_at(self.options.day_start);

        for (destination, distance) in nearest_neighbor_order(position, &partition.destinations) {
            steps.push(ItineraryStep {
                subject: StepSubject::Stop(Stop::Destination(destination.clone())),
                arrival: clock.label(),
                departure: clock.label_after(self.options.visit_duration),
                activity: format!("Visit {}", destination.name),
                distance_km: round_km(distance),
            });

            position = destination.coordinate;
            clock.advance(self.options.destination_spacing);
        }

        if let Some(meal) = partition.meal {
            let distance = haversine_km(position, meal.coordinate);
            steps.push(ItineraryStep {
                subject: StepSubject::Stop(Stop::MealStop(meal.clone())),
                arrival: format_label(self.options.meal_arrival),
                departure: format_label(self.options.meal_departure),
                activity: format!("Lunch at {} ({})", meal.name, meal.cuisine),
                distance_km: round_km(distance),
            });
            position = meal.coordinate;
        }

        steps.push(ItineraryStep {
            subject: StepSubject::ReturnToStart {
                name: start.name.clone(),
            },
            arrival: "Evening".into(),
            departure: "-".into(),
            activity: format!("Return to {}", start.name),
            distance_km: round_km(haversine_km(position, start.coordinate)),
        });

        let route = route_path(start, &steps);
        debug!(steps = steps.len(), waypoints = route.len(), "itinerary sequenced");

        Itinerary { steps, route }
    }
}

fn route_path(start: &StartPoint, steps: &[ItineraryStep]) -> RoutePath {
    let mut waypoints = Vec::with_capacity(steps.len() + 2);
    waypoints.push(Waypoint {
        name: "Start Location".into(),
        coordinate: start.coordinate,
    });

    for step in steps {
        if let StepSubject::Stop(stop) = &step.subject {
            if let Some(coordinate) = stop.coordinate() {
                waypoints.push(Waypoint {
                    name: stop.name().into(),
                    coordinate,
                });
            }
        }
    }

    waypoints.push(Waypoint {
        name: "End Location".into(),
        coordinate: start.coordinate,
    });

    RoutePath::new(waypoints)
}
