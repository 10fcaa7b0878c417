//! R-tree nodes for spatial indexing of catalog sites.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries run in two stages:
//! 1. **R-tree filter**: Euclidean distance in degree space, widened for latitude
//! 2. **Haversine filter**: exact great-circle distance on the survivors
//!
//! Degree-space distance is only a prefilter; it is never reported to callers.

use std::sync::Arc;

use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::Coordinate;

/// A geolocated catalog entry stored in an R-tree.
///
/// Points are stored as `[lng, lat]` to match geo's x/y convention.
#[derive(Debug)]
pub struct SiteNode<T> {
    pub site: Arc<T>,
    pub coordinate: Coordinate,
    point: [f64; 2],
}

impl<T> SiteNode<T> {
    pub fn new(coordinate: Coordinate, site: Arc<T>) -> Self {
        Self {
            site,
            coordinate,
            point: [coordinate.lng(), coordinate.lat()],
        }
    }
}

impl<T> Clone for SiteNode<T> {
    fn clone(&self) -> Self {
        Self {
            site: self.site.clone(),
            coordinate: self.coordinate,
            point: self.point,
        }
    }
}

impl<T> RTreeObject for SiteNode<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl<T> PointDistance for SiteNode<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
