use anyhow::{Context, Result};
use geo::LineString;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use pilgrimage_itinerary::{Itinerary, RoutePath, Waypoint};
use std::path::Path;

/// Convert a geo LineString to GeoJSON Value
fn line_string_to_geojson(line: &LineString<f64>) -> Value {
    Value::LineString(line.0.iter().map(|c| vec![c.x, c.y]).collect())
}

fn feature(geometry: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// One LineString for the whole loop
fn route_to_feature(route: &RoutePath) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("route"));
    properties.insert("waypoint_count".to_string(), serde_json::json!(route.len()));

    feature(line_string_to_geojson(&route.to_line_string()), properties)
}

fn waypoint_to_feature(waypoint: &Waypoint, order: usize) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("waypoint"));
    properties.insert("name".to_string(), serde_json::json!(&*waypoint.name));
    properties.insert("order".to_string(), serde_json::json!(order));

    feature(
        Value::Point(vec![waypoint.coordinate.lng(), waypoint.coordinate.lat()]),
        properties,
    )
}

/// Route line followed by one point per waypoint, in visiting order
pub fn route_feature_collection(route: &RoutePath) -> FeatureCollection {
    let mut features = vec![route_to_feature(route)];
    features.extend(
        route
            .iter()
            .enumerate()
            .map(|(order, waypoint)| waypoint_to_feature(waypoint, order)),
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write the route as a GeoJSON FeatureCollection
pub fn write_route_geojson(route: &RoutePath, output_path: &Path) -> Result<()> {
    log::info!("Writing {} waypoints to {}", route.len(), output_path.display());

    let geojson = GeoJson::from(route_feature_collection(route));
    let json_string =
        serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}

/// Write the full itinerary (steps and route) as JSON
pub fn write_itinerary_json(itinerary: &Itinerary, output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} itinerary steps to {}",
        itinerary.steps.len(),
        output_path.display()
    );

    let json_string =
        serde_json::to_string_pretty(itinerary).context("Failed to serialize itinerary")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write itinerary to {}", output_path.display()))?;

    Ok(())
}
