//! # pilgrimage-itinerary
//!
//! Day planning for temple pilgrimages.
//!
//! ## Features
//!
//! - **Route sequencing**: greedy nearest-neighbour ordering of destinations from a start point
//! - **Timed steps**: arrival and departure labels for every stop, fixed lunch window
//! - **Map path**: closed loop of geolocated waypoints ready for rendering
//! - **Catalog**: in-memory lookups plus R-tree backed meal stop searches
//! - **Bookings**: one booking per companion per date, storage pluggable
//! - **Narrative boundary**: pluggable summary generation that never blocks the plan
//!
//! ## Example
//!
//! ```
//! use pilgrimage_itinerary::prelude::*;
//!
//! let start = StartPoint::new("Delhi", Coordinate::new(28.6139, 77.2090)?);
//!
//! let stops = vec![
//!     Stop::Destination(Destination {
//!         id: DestinationIdentifier::new("kedarnath"),
//!         name: "Kedarnath".into(),
//!         coordinate: Coordinate::new(30.7352, 79.0669)?,
//!         address: None,
//!         deity: Some("Lord Shiva".into()),
//!     }),
//!     Stop::Destination(Destination {
//!         id: DestinationIdentifier::new("akshardham"),
//!         name: "Akshardham".into(),
//!         coordinate: Coordinate::new(28.6127, 77.2773)?,
//!         address: None,
//!         deity: None,
//!     }),
//! ];
//!
//! let itinerary = RouteSequencer::default().optimize_route(&start, &stops);
//!
//! // Nearest first, then back home
//! assert_eq!(itinerary.steps[0].name(), "Akshardham");
//! assert_eq!(itinerary.steps[0].arrival, "9:00 AM");
//! assert_eq!(itinerary.steps[1].name(), "Kedarnath");
//! assert_eq!(itinerary.steps[1].arrival, "10:30 AM");
//! assert!(itinerary.steps[2].is_return());
//! assert_eq!(itinerary.route.len(), 4);
//! # Ok::<(), ItineraryError>(())
//! ```

pub mod booking;
pub mod identifiers;
pub mod models;
pub mod narrative;
pub mod provider;
pub mod sequencer;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::booking::{available_companions, book, Booking, BookingRequest};
    pub use crate::identifiers::*;
    pub use crate::models::{itinerary::*, traits::*, types::*};
    pub use crate::narrative::{summarize, NarrativeGenerator, NarrativeRequest};
    pub use crate::provider::{CatalogData, StaticLocationCatalog};
    pub use crate::sequencer::{RouteSequencer, SequencerOptions};
    pub use crate::spatial::haversine_km;
}

pub use prelude::*;
