//! Boundary to the external narrative (summary text) generator.

pub mod traits;

pub use traits::{summarize, NarrativeGenerator, NarrativeRequest, SUMMARY_ERROR_PREFIX};
