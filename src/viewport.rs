//! Viewport fitting for the events map.
//!
//! Regions follow the usual mobile map convention: a center plus the
//! latitude/longitude span visible across the whole map surface. Fitting
//! uses a linear degrees-per-pixel model, which is what the map widget
//! itself does for regions of city scale.

use serde::{Deserialize, Serialize};

use crate::filters::BBox;
use crate::models::Position;

/// Smallest span (degrees) a fitted region may have, so a single marker
/// does not zoom the map to an infinite level.
pub const MIN_DELTA_DEG: f64 = 0.01;

/// Visible map region.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Check whether a position is inside the visible region.
    #[must_use]
    pub fn contains(&self, p: &Position) -> bool {
        (p.latitude - self.latitude).abs() <= self.latitude_delta / 2.0 + f64::EPSILON
            && (p.longitude - self.longitude).abs() <= self.longitude_delta / 2.0 + f64::EPSILON
    }
}

/// Edge padding in pixels, kept clear of markers when fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct EdgePadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Size of the map surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MapSize {
    pub width: f64,
    pub height: f64,
}

/// Compute a region that frames every coordinate inside the padded area.
///
/// Returns `None` for an empty set; the caller keeps its current view.
/// Padding wider than the map is clamped so at least one pixel of content
/// remains.
#[must_use]
pub fn fit_to_coordinates(
    coords: &[Position],
    padding: EdgePadding,
    size: MapSize,
) -> Option<Region> {
    let bbox = BBox::enclosing(coords)?;

    let width = size.width.max(1.0);
    let height = size.height.max(1.0);
    let inner_w = (width - padding.left - padding.right).max(1.0);
    let inner_h = (height - padding.top - padding.bottom).max(1.0);

    let lat_span = bbox.lat_span().max(MIN_DELTA_DEG);
    let lon_span = bbox.lon_span().max(MIN_DELTA_DEG);

    // Scale the content span up to the whole surface
    let latitude_delta = (lat_span * height / inner_h).min(180.0);
    let longitude_delta = (lon_span * width / inner_w).min(360.0);

    // Shift the center so the content sits in the middle of the padded area
    let deg_per_px_lat = latitude_delta / height;
    let deg_per_px_lon = longitude_delta / width;
    let mid_lat = (bbox.min_lat + bbox.max_lat) / 2.0;
    let mid_lon = (bbox.min_lon + bbox.max_lon) / 2.0;

    let latitude = (mid_lat + (padding.top - padding.bottom) / 2.0 * deg_per_px_lat).clamp(-90.0, 90.0);
    let longitude = mid_lon + (padding.right - padding.left) / 2.0 * deg_per_px_lon;

    Some(Region {
        latitude,
        longitude,
        latitude_delta,
        longitude_delta,
    })
}
