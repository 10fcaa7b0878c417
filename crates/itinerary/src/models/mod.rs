//! Stop, itinerary and catalog models.

pub mod itinerary;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use itinerary::{Itinerary, ItineraryStep, RoutePath, StepSubject, Waypoint};
pub use traits::{BookingLedger, LocationCatalog, StopSelection};
pub use types::{
    Companion, Coordinate, Destination, ItineraryError, MealStop, PriceRange, Result, StartPoint,
    Stop,
};
