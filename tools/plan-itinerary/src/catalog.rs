use anyhow::{Context, Result};
use pilgrimage_itinerary::{CatalogData, StaticLocationCatalog};
use std::path::Path;

/// Load a catalog JSON file (`companions`, `destinations`, `meal_stops`)
pub fn read_catalog(path: &Path) -> Result<StaticLocationCatalog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    let data: CatalogData = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    log::info!(
        "  Loaded {} companions, {} destinations, {} meal stops",
        data.companions.len(),
        data.destinations.len(),
        data.meal_stops.len()
    );

    Ok(data.into())
}
