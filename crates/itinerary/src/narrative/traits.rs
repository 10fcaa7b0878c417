//! Pluggable narrative generation.
//!
//! Hosts implement [`NarrativeGenerator`] around whatever text service they use.
//! Credentials and model choice belong to the implementing value, never to
//! process-wide state.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::models::itinerary::{Itinerary, StepSubject};
use crate::models::types::{Result, Stop};

/// Prefix of the placeholder returned when generation fails
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary";

/// What the generator is told about a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrativeRequest {
    /// Destinations and meal stop, in visiting order
    pub places: Vec<String>,
    /// e.g. "Pandit Sharma (Specialization: Katha)"
    pub companion: Option<String>,
}

impl NarrativeRequest {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let mut places = Vec::new();
        let mut companion = None;

        for step in &itinerary.steps {
            match &step.subject {
                StepSubject::Stop(Stop::Companion(c)) => {
                    companion = Some(format!("{} (Specialization: {})", c.name, c.specialization));
                }
                StepSubject::Stop(stop) => places.push(stop.name().to_string()),
                StepSubject::ReturnToStart { .. } => {}
            }
        }

        Self { places, companion }
    }
}

/// Produce free text describing an itinerary
pub trait NarrativeGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a NarrativeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// Ask `generator` for a summary, substituting a placeholder on failure.
///
/// Never fails: the itinerary is delivered whether or not a summary could be written.
pub async fn summarize(generator: &dyn NarrativeGenerator, itinerary: &Itinerary) -> String {
    let request = NarrativeRequest::from_itinerary(itinerary);

    match generator.generate(&request).await {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "narrative generation failed");
            format!("{SUMMARY_ERROR_PREFIX}: {error}")
        }
    }
}
