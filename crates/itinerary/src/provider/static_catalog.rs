//! In-memory location catalog.
//!
//! Stores every companion, destination and meal stop in memory, with lookup
//! maps by identifier and an R-tree over meal stops for radius queries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rstar::RTree;
use tracing::debug;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::SiteNode;
use crate::spatial::queries::{haversine_km, search_radius_degrees};

/// Raw catalog contents, as loaded from a data file
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CatalogData {
    pub companions: Vec<Companion>,
    pub destinations: Vec<Destination>,
    pub meal_stops: Vec<MealStop>,
}

/// In-memory catalog with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug)]
pub struct StaticLocationCatalog {
    // Core data, in load order
    companions: Vec<Arc<Companion>>,
    destinations: Vec<Arc<Destination>>,
    meal_stops: Vec<Arc<MealStop>>,

    // Lookup maps
    companion_map: HashMap<CompanionIdentifier, Arc<Companion>>,
    destination_map: HashMap<DestinationIdentifier, Arc<Destination>>,
    meal_stop_map: HashMap<MealStopIdentifier, Arc<MealStop>>,

    // Spatial index
    meal_stop_tree: RTree<SiteNode<MealStop>>,
}

impl StaticLocationCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::from_data(Vec::new(), Vec::new(), Vec::new())
    }

    /// Build a catalog from raw records. Later duplicates of an id win the lookup.
    pub fn from_data(
        companions: Vec<Companion>,
        destinations: Vec<Destination>,
        meal_stops: Vec<MealStop>,
    ) -> Self {
        let companions: Vec<Arc<Companion>> = companions.into_iter().map(Arc::new).collect();
        let destinations: Vec<Arc<Destination>> = destinations.into_iter().map(Arc::new).collect();
        let meal_stops: Vec<Arc<MealStop>> = meal_stops.into_iter().map(Arc::new).collect();

        // Build lookup maps
        let companion_map: HashMap<_, _> = companions
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();

        let destination_map: HashMap<_, _> = destinations
            .iter()
            .map(|d| (d.id.clone(), d.clone()))
            .collect();

        let meal_stop_map: HashMap<_, _> = meal_stops
            .iter()
            .map(|m| (m.id.clone(), m.clone()))
            .collect();

        // Build spatial index
        let meal_stop_tree = RTree::bulk_load(
            meal_stops
                .iter()
                .map(|m| SiteNode::new(m.coordinate, m.clone()))
                .collect(),
        );

        debug!(
            companions = companions.len(),
            destinations = destinations.len(),
            meal_stops = meal_stops.len(),
            "catalog loaded"
        );

        Self {
            companions,
            destinations,
            meal_stops,
            companion_map,
            destination_map,
            meal_stop_map,
            meal_stop_tree,
        }
    }
}

impl Default for StaticLocationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CatalogData> for StaticLocationCatalog {
    fn from(data: CatalogData) -> Self {
        Self::from_data(data.companions, data.destinations, data.meal_stops)
    }
}

impl LocationCatalog for StaticLocationCatalog {
    fn get_companion(&self, id: &CompanionIdentifier) -> Option<Arc<Companion>> {
        self.companion_map.get(id).cloned()
    }

    fn get_destination(&self, id: &DestinationIdentifier) -> Option<Arc<Destination>> {
        self.destination_map.get(id).cloned()
    }

    fn get_meal_stop(&self, id: &MealStopIdentifier) -> Option<Arc<MealStop>> {
        self.meal_stop_map.get(id).cloned()
    }

    fn all_companions(&self) -> Vec<Arc<Companion>> {
        self.companions.clone()
    }

    fn all_destinations(&self) -> Vec<Arc<Destination>> {
        self.destinations.clone()
    }

    fn all_meal_stops(&self) -> Vec<Arc<MealStop>> {
        self.meal_stops.clone()
    }

    fn meal_stops_near(&self, point: Coordinate, radius_km: f64) -> Vec<Arc<MealStop>> {
        // Validate radius is positive
        if radius_km <= 0.0 || !radius_km.is_finite() {
            return Vec::new();
        }

        let radius_deg = search_radius_degrees(radius_km, point.lat());

        // The tree is in plain lng/lat space, so a circle crossing the antimeridian
        // is also searched around the wrapped centre.
        let mut centres = vec![point.lng()];
        if point.lng() + radius_deg > 180.0 {
            centres.push(point.lng() - 360.0);
        }
        if point.lng() - radius_deg < -180.0 {
            centres.push(point.lng() + 360.0);
        }

        let mut seen = HashSet::new();
        centres
            .into_iter()
            .flat_map(move |lng| {
                self.meal_stop_tree
                    .locate_within_distance([lng, point.lat()], radius_deg * radius_deg)
            })
            .filter(|node| seen.insert(Arc::as_ptr(&node.site)))
            .filter(|node| haversine_km(point, node.coordinate) <= radius_km)
            .map(|node| node.site.clone())
            .collect()
    }

    fn nearest_meal_stops(&self, point: Coordinate, n: usize) -> Vec<Arc<MealStop>> {
        let mut ranked: Vec<(f64, &Arc<MealStop>)> = self
            .meal_stops
            .iter()
            .map(|m| (haversine_km(point, m.coordinate), m))
            .collect();

        // Stable sort keeps load order among equal distances
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        ranked.into_iter().take(n).map(|(_, m)| m.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn temple(id: &str, name: &str, lat: f64, lng: f64, deity: &str) -> Destination {
        Destination {
            id: DestinationIdentifier::new(id),
            name: name.into(),
            coordinate: c(lat, lng),
            address: None,
            deity: Some(deity.into()),
        }
    }

    fn eatery(id: &str, lat: f64, lng: f64) -> MealStop {
        MealStop {
            id: MealStopIdentifier::new(id),
            name: id.into(),
            coordinate: c(lat, lng),
            cuisine: "North Indian".into(),
            price_range: PriceRange::Budget,
        }
    }

    fn sample() -> StaticLocationCatalog {
        StaticLocationCatalog::from_data(
            vec![Companion {
                id: CompanionIdentifier::new("p1"),
                name: "Pandit Kulkarni".into(),
                specialization: "Marriage Ceremonies".into(),
                years_of_experience: Some(25),
            }],
            vec![
                temple("t1", "Kedarnath", 30.7352, 79.0669, "Lord Shiva"),
                temple("t2", "Badrinath", 30.7447, 79.4911, "Lord Vishnu"),
                temple("t3", "Somnath", 20.8880, 70.4010, "Lord Shiva"),
            ],
            vec![
                // ~1.1 km north of Connaught Place
                eatery("cp-north", 28.6415, 77.2167),
                // ~27 km away
                eatery("gurgaon", 28.4595, 77.0266),
                eatery("mumbai", 19.0760, 72.8777),
            ],
        )
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = StaticLocationCatalog::new();
        assert_eq!(catalog.all_destinations().len(), 0);
        assert_eq!(catalog.all_meal_stops().len(), 0);
        assert!(catalog.meal_stops_near(c(0.0, 0.0), 100.0).is_empty());
        assert!(catalog.nearest_meal_stops(c(0.0, 0.0), 3).is_empty());
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = sample();

        assert!(catalog.get_companion(&CompanionIdentifier::new("p1")).is_some());
        assert_eq!(
            &*catalog
                .get_destination(&DestinationIdentifier::new("t2"))
                .unwrap()
                .name,
            "Badrinath"
        );
        assert!(catalog.get_meal_stop(&MealStopIdentifier::new("nowhere")).is_none());
    }

    #[test]
    fn test_destinations_matching_predicate() {
        let catalog = sample();
        let shiva: Vec<String> = catalog
            .destinations_matching(&|d| d.deity.as_deref() == Some("Lord Shiva"))
            .iter()
            .map(|d| d.name.to_string())
            .collect();

        assert_eq!(shiva, vec!["Kedarnath", "Somnath"]);
    }

    #[test]
    fn test_meal_stops_near() {
        let catalog = sample();
        let connaught_place = c(28.6315, 77.2167);

        let near: Vec<String> = catalog
            .meal_stops_near(connaught_place, 5.0)
            .iter()
            .map(|m| m.id.to_string())
            .collect();
        assert_eq!(near, vec!["cp-north"]);

        assert_eq!(catalog.meal_stops_near(connaught_place, 50.0).len(), 2);
        assert!(catalog.meal_stops_near(connaught_place, 0.0).is_empty());
        assert!(catalog.meal_stops_near(connaught_place, f64::NAN).is_empty());
    }

    #[test]
    fn test_meal_stops_near_at_high_latitude() {
        // 1 km east at 60°N is ~0.018° of longitude, twice the naive degree radius
        let point = c(60.0, 10.0);
        let east = eatery("east", 60.0, 10.018);
        let catalog = StaticLocationCatalog::from_data(vec![], vec![], vec![east]);

        assert_eq!(catalog.meal_stops_near(point, 1.5).len(), 1);
    }

    #[test]
    fn test_meal_stops_near_across_antimeridian() {
        // ~2.2 km apart on the equator, on opposite sides of ±180°
        let catalog = StaticLocationCatalog::from_data(
            vec![],
            vec![],
            vec![
                eatery("west", 0.0, -179.99),
                eatery("east", 0.0, 179.98),
                eatery("far", 0.0, -179.0),
            ],
        );

        let ids = |point: Coordinate| -> Vec<String> {
            catalog
                .meal_stops_near(point, 5.0)
                .iter()
                .map(|m| m.id.to_string())
                .collect()
        };

        assert_eq!(ids(c(0.0, 179.99)), vec!["east", "west"]);
        assert_eq!(ids(c(0.0, -179.99)), vec!["west", "east"]);
    }

    #[test]
    fn test_resolve_skips_repeated_destination() {
        let catalog = sample();
        let selection = StopSelection {
            destinations: vec![
                DestinationIdentifier::new("t1"),
                DestinationIdentifier::new("t3"),
                DestinationIdentifier::new("t1"),
            ],
            ..StopSelection::default()
        };

        let stops = catalog.resolve(&selection).unwrap();
        let names: Vec<&str> = stops.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Kedarnath", "Somnath"]);

        let itinerary = crate::sequencer::RouteSequencer::default()
            .optimize_route(&StartPoint::default(), &stops);
        assert_eq!(itinerary.steps.len(), 3);
        assert_eq!(itinerary.route.len(), 4);
    }

    #[test]
    fn test_nearest_meal_stops_ordered_by_distance() {
        let catalog = sample();
        let ids: Vec<String> = catalog
            .nearest_meal_stops(c(28.6139, 77.2090), 2)
            .iter()
            .map(|m| m.id.to_string())
            .collect();

        assert_eq!(ids, vec!["cp-north", "gurgaon"]);
    }

    #[test]
    fn test_resolve_selection_in_selection_order() {
        let catalog = sample();
        let selection = StopSelection {
            companion: Some(CompanionIdentifier::new("p1")),
            destinations: vec![
                DestinationIdentifier::new("t3"),
                DestinationIdentifier::new("t1"),
            ],
            meal_stop: Some(MealStopIdentifier::new("gurgaon")),
        };

        let stops = catalog.resolve(&selection).unwrap();
        let names: Vec<&str> = stops.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Pandit Kulkarni", "Somnath", "Kedarnath", "gurgaon"]);
    }

    #[test]
    fn test_resolve_unknown_identifier() {
        let catalog = sample();
        let selection = StopSelection {
            destinations: vec![DestinationIdentifier::new("t404")],
            ..StopSelection::default()
        };

        assert!(matches!(
            catalog.resolve(&selection),
            Err(ItineraryError::DestinationNotFound(id)) if id.as_str() == "t404"
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_catalog_data_from_json() {
        let data: CatalogData = serde_json::from_str(
            r#"{
                "destinations": [
                    {"id": "t1", "name": "Siddhivinayak",
                     "coordinate": {"lat": 19.0169, "lng": 72.8304}, "deity": "Lord Ganesha"}
                ],
                "meal_stops": [
                    {"id": "m1", "name": "Bade Miya",
                     "coordinate": {"lat": 18.9230, "lng": 72.8327}, "cuisine": "Mughlai"}
                ]
            }"#,
        )
        .unwrap();

        let catalog = StaticLocationCatalog::from(data);
        assert!(catalog.all_companions().is_empty());
        assert_eq!(catalog.all_destinations().len(), 1);
        assert_eq!(
            catalog.get_meal_stop(&MealStopIdentifier::new("m1")).unwrap().price_range,
            PriceRange::Moderate
        );
    }
}
