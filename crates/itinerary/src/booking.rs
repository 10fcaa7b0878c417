//! Companion bookings: request validation and the one-booking-per-day rule.
//!
//! Storage is left to a [`BookingLedger`] implementation.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::identifiers::CompanionIdentifier;
use crate::models::traits::{BookingLedger, LocationCatalog};
use crate::models::types::{Companion, ItineraryError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated booking request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub companion: CompanionIdentifier,
    pub user_name: String,
    pub date: NaiveDate,
}

impl BookingRequest {
    /// Validate raw form values. All three are required; the date is `YYYY-MM-DD`.
    pub fn parse(
        companion: Option<&str>,
        user_name: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self> {
        let companion = required(companion, "companion")?;
        let user_name = required(user_name, "user_name")?;
        let date = required(date, "date")?;

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ItineraryError::InvalidDate(date.to_string()))?;

        Ok(Self {
            companion: CompanionIdentifier::new(companion),
            user_name: user_name.to_string(),
            date,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ItineraryError::MissingField(field)),
    }
}

/// A confirmed booking
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Booking {
    pub companion: CompanionIdentifier,
    pub user_name: String,
    pub date: NaiveDate,
}

/// Book a companion for a date if they exist and are free.
pub fn book(
    catalog: &dyn LocationCatalog,
    ledger: &mut dyn BookingLedger,
    request: BookingRequest,
) -> Result<Booking> {
    if catalog.get_companion(&request.companion).is_none() {
        return Err(ItineraryError::CompanionNotFound(request.companion));
    }

    if ledger.is_booked(&request.companion, request.date) {
        return Err(ItineraryError::AlreadyBooked {
            companion: request.companion,
            date: request.date,
        });
    }

    let booking = Booking {
        companion: request.companion,
        user_name: request.user_name,
        date: request.date,
    };
    ledger.record(booking.clone())?;
    info!(companion = %booking.companion, date = %booking.date, "booking confirmed");

    Ok(booking)
}

/// Companions with no booking on `date`
pub fn available_companions(
    catalog: &dyn LocationCatalog,
    ledger: &dyn BookingLedger,
    date: NaiveDate,
) -> Vec<Arc<Companion>> {
    catalog
        .all_companions()
        .into_iter()
        .filter(|c| !ledger.is_booked(&c.id, date))
        .collect()
}
