//! Collaborator traits the planner talks to.
//!
//! Implementations can be in-memory, database-backed, or remote.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::booking::Booking;
use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Selection
// ============================================================================

/// The identifiers a user picked on the planning form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct StopSelection {
    pub companion: Option<CompanionIdentifier>,
    /// In the order they were picked
    pub destinations: Vec<DestinationIdentifier>,
    pub meal_stop: Option<MealStopIdentifier>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Source of companions, destinations and meal stops
pub trait LocationCatalog: Send + Sync {
    // ---- Lookups ----
    fn get_companion(&self, id: &CompanionIdentifier) -> Option<Arc<Companion>>;
    fn get_destination(&self, id: &DestinationIdentifier) -> Option<Arc<Destination>>;
    fn get_meal_stop(&self, id: &MealStopIdentifier) -> Option<Arc<MealStop>>;

    // ---- Collections ----
    fn all_companions(&self) -> Vec<Arc<Companion>>;
    fn all_destinations(&self) -> Vec<Arc<Destination>>;
    fn all_meal_stops(&self) -> Vec<Arc<MealStop>>;

    // ---- Spatial queries ----

    /// Meal stops within `radius_km` of `point`
    fn meal_stops_near(&self, point: Coordinate, radius_km: f64) -> Vec<Arc<MealStop>>;

    /// The `n` meal stops closest to `point`, closest first
    fn nearest_meal_stops(&self, point: Coordinate, n: usize) -> Vec<Arc<MealStop>>;

    // ---- Filters ----

    fn destinations_matching(
        &self,
        predicate: &dyn Fn(&Destination) -> bool,
    ) -> Vec<Arc<Destination>> {
        self.all_destinations()
            .into_iter()
            .filter(|d| predicate(d))
            .collect()
    }

    /// Resolve a selection into stops: companion, destinations in selection order, meal stop.
    fn resolve(&self, selection: &StopSelection) -> Result<Vec<Stop>> {
        let mut stops = Vec::with_capacity(selection.destinations.len() + 2);

        if let Some(id) = &selection.companion {
            let companion = self
                .get_companion(id)
                .ok_or_else(|| ItineraryError::CompanionNotFound(id.clone()))?;
            stops.push(Stop::Companion((*companion).clone()));
        }

        let mut picked = HashSet::new();
        for id in &selection.destinations {
            if !picked.insert(id) {
                continue;
            }
            let destination = self
                .get_destination(id)
                .ok_or_else(|| ItineraryError::DestinationNotFound(id.clone()))?;
            stops.push(Stop::Destination((*destination).clone()));
        }

        if let Some(id) = &selection.meal_stop {
            let meal = self
                .get_meal_stop(id)
                .ok_or_else(|| ItineraryError::MealStopNotFound(id.clone()))?;
            stops.push(Stop::MealStop((*meal).clone()));
        }

        Ok(stops)
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// Storage of companion bookings. At most one booking per companion per date.
pub trait BookingLedger {
    fn is_booked(&self, companion: &CompanionIdentifier, date: NaiveDate) -> bool;

    fn record(&mut self, booking: Booking) -> Result<()>;
}
