//! Output of route sequencing: ordered steps and the map path.

use std::sync::Arc;

use geo::{Coord, LineString};

use crate::models::types::*;

/// What a step refers to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "step", rename_all = "snake_case")
)]
pub enum StepSubject {
    Stop(Stop),
    /// Synthetic closing step back to the start point
    ReturnToStart { name: Arc<str> },
}

/// One line of the day plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItineraryStep {
    pub subject: StepSubject,
    pub arrival: String,
    pub departure: String,
    pub activity: String,
    /// Kilometres from the previous step, rounded to 2 decimals
    pub distance_km: f64,
}

impl ItineraryStep {
    pub fn is_companion(&self) -> bool {
        matches!(self.subject, StepSubject::Stop(Stop::Companion(_)))
    }

    pub fn is_return(&self) -> bool {
        matches!(self.subject, StepSubject::ReturnToStart { .. })
    }

    pub fn name(&self) -> &str {
        match &self.subject {
            StepSubject::Stop(stop) => stop.name(),
            StepSubject::ReturnToStart { name } => name,
        }
    }

    /// Location of the step, if it is a geolocated stop
    pub fn coordinate(&self) -> Option<Coordinate> {
        match &self.subject {
            StepSubject::Stop(stop) => stop.coordinate(),
            StepSubject::ReturnToStart { .. } => None,
        }
    }
}

/// A named point on the route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

/// Closed loop of geolocated points in visiting order, for map rendering.
///
/// Starts at "Start Location" and ends at "End Location", both at the start point.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct RoutePath {
    waypoints: Vec<Waypoint>,
}

impl RoutePath {
    pub(crate) fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    pub fn to_line_string(&self) -> LineString {
        LineString::new(
            self.waypoints
                .iter()
                .map(|w| Coord {
                    x: w.coordinate.lng(),
                    y: w.coordinate.lat(),
                })
                .collect(),
        )
    }
}

/// The ordered day plan together with its map path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    pub steps: Vec<ItineraryStep>,
    pub route: RoutePath,
}

impl Itinerary {
    /// Sum of the rounded per-step distances, including the return leg
    pub fn total_distance_km(&self) -> f64 {
        self.steps.iter().map(|s| s.distance_km).sum()
    }

    pub fn companion(&self) -> Option<&Companion> {
        self.steps.iter().find_map(|s| match &s.subject {
            StepSubject::Stop(Stop::Companion(c)) => Some(c),
            _ => None,
        })
    }

    /// Names of geolocated stops in visiting order
    pub fn visited_names(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.coordinate().is_some())
            .map(|s| s.name())
            .collect()
    }

    pub fn into_parts(self) -> (Vec<ItineraryStep>, RoutePath) {
        (self.steps, self.route)
    }
}
