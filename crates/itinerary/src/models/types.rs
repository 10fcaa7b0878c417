//! Core data types for stops, start points and errors.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair in decimal degrees.
///
/// Always within [-90, 90] / [-180, 180]; construction rejects anything else.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoordinate", into = "RawCoordinate")
)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);

        if !lat_ok || !lng_ok {
            return Err(ItineraryError::InvalidCoordinate { lat, lng });
        }

        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

/// geo uses x = longitude, y = latitude
impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lng, c.lat)
    }
}

impl TryFrom<Point> for Coordinate {
    type Error = ItineraryError;

    fn try_from(p: Point) -> Result<Self> {
        Coordinate::new(p.y(), p.x())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ItineraryError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

// ============================================================================
// Stops
// ============================================================================

/// Where the day begins and ends. Not part of the selectable stop set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartPoint {
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

impl StartPoint {
    pub fn new(name: impl AsRef<str>, coordinate: Coordinate) -> Self {
        Self {
            name: name.as_ref().into(),
            coordinate,
        }
    }
}

impl Default for StartPoint {
    /// New Delhi, the planner's default departure city
    fn default() -> Self {
        Self {
            name: "New Delhi".into(),
            coordinate: Coordinate {
                lat: 28.6139,
                lng: 77.2090,
            },
        }
    }
}

/// An officiant who accompanies the whole trip. Has no location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Companion {
    pub id: CompanionIdentifier,
    pub name: Arc<str>,
    pub specialization: Arc<str>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub years_of_experience: Option<u32>,
}

/// A temple or other primary place of visit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    pub id: DestinationIdentifier,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<Arc<str>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deity: Option<Arc<str>>,
}

/// Price band of a meal stop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceRange {
    #[cfg_attr(feature = "serde", serde(rename = "$"))]
    Budget,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "$$"))]
    Moderate,
    #[cfg_attr(feature = "serde", serde(rename = "$$$"))]
    Premium,
}

/// Where the party stops for lunch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealStop {
    pub id: MealStopIdentifier,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    pub cuisine: Arc<str>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_range: PriceRange,
}

/// Anything a user can put on the plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Stop {
    Companion(Companion),
    Destination(Destination),
    MealStop(MealStop),
}

impl Stop {
    pub fn name(&self) -> &str {
        match self {
            Stop::Companion(c) => &c.name,
            Stop::Destination(d) => &d.name,
            Stop::MealStop(m) => &m.name,
        }
    }

    /// Companions are not geolocated
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Stop::Companion(_) => None,
            Stop::Destination(d) => Some(d.coordinate),
            Stop::MealStop(m) => Some(m.coordinate),
        }
    }
}

impl From<Companion> for Stop {
    fn from(c: Companion) -> Self {
        Stop::Companion(c)
    }
}

impl From<Destination> for Stop {
    fn from(d: Destination) -> Self {
        Stop::Destination(d)
    }
}

impl From<MealStop> for Stop {
    fn from(m: MealStop) -> Self {
        Stop::MealStop(m)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    #[error("Invalid coordinate: latitude {lat}, longitude {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Companion not found: {0}")]
    CompanionNotFound(CompanionIdentifier),

    #[error("Destination not found: {0}")]
    DestinationNotFound(DestinationIdentifier),

    #[error("Meal stop not found: {0}")]
    MealStopNotFound(MealStopIdentifier),

    #[error("Companion {companion} is already booked for {date}")]
    AlreadyBooked {
        companion: CompanionIdentifier,
        date: NaiveDate,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Narrative generation failed: {0}")]
    Narrative(String),
}

pub type Result<T> = std::result::Result<T, ItineraryError>;
