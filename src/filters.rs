//! Event filtering logic.
//!
//! Keeps upcoming events and computes geographic bounds for the map.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Event, Position};

/// Check whether an event is scheduled at or after `now`.
///
/// Events whose `dateTime` does not parse are never upcoming.
#[must_use]
pub fn is_upcoming(event: &Event, now: DateTime<Utc>) -> bool {
    match event.scheduled_at() {
        Some(at) => at >= now,
        None => {
            debug!(id = %event.id, date_time = %event.date_time, "unparsable dateTime, dropping event");
            false
        }
    }
}

/// Keep only the events that have not started yet, preserving order.
#[must_use]
pub fn upcoming(events: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
    events.into_iter().filter(|e| is_upcoming(e, now)).collect()
}

/// Bounding box for a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BBox {
    /// Smallest box containing every position, or `None` for an empty set.
    #[must_use]
    pub fn enclosing<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        positions.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    min_lat: p.latitude,
                    min_lon: p.longitude,
                    max_lat: p.latitude,
                    max_lon: p.longitude,
                },
                Some(b) => Self {
                    min_lat: b.min_lat.min(p.latitude),
                    min_lon: b.min_lon.min(p.longitude),
                    max_lat: b.max_lat.max(p.latitude),
                    max_lon: b.max_lon.max(p.longitude),
                },
            })
        })
    }

    /// Check if a point is within the bounding box.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::tests::event;

    fn jan_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_future_event_kept() {
        let kept = upcoming(vec![event("1", "2099-01-01T00:00:00Z", 1.0, 1.0)], jan_2024());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_past_event_dropped() {
        let kept = upcoming(vec![event("2", "2000-01-01T00:00:00Z", 1.0, 1.0)], jan_2024());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_event_at_now_is_upcoming() {
        let e = event("3", "2024-01-01T00:00:00Z", 0.0, 0.0);
        assert!(is_upcoming(&e, jan_2024()));
        assert!(!is_upcoming(&e, jan_2024() + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_unparsable_date_dropped() {
        let kept = upcoming(vec![event("4", "soon", 0.0, 0.0)], jan_2024());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_date_only_future_event_kept() {
        let kept = upcoming(vec![event("5", "2099-01-01", 0.0, 0.0)], jan_2024());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_offsetless_future_event_kept() {
        let kept = upcoming(vec![event("6", "2099-01-01T10:00:00", 0.0, 0.0)], jan_2024());
        assert_eq!(kept.len(), 1);

        let e = event("7", "2024-01-01", 0.0, 0.0);
        assert!(is_upcoming(&e, jan_2024()));
        assert!(!is_upcoming(&e, jan_2024() + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_order_preserved() {
        let kept = upcoming(
            vec![
                event("b", "2030-01-01T00:00:00Z", 0.0, 0.0),
                event("old", "2001-01-01T00:00:00Z", 0.0, 0.0),
                event("a", "2025-01-01T00:00:00Z", 0.0, 0.0),
            ],
            jan_2024(),
        );
        let ids: Vec<&str> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_bbox_enclosing() {
        let points = [
            Position::new(-27.6, -48.5),
            Position::new(-23.5, -46.6),
            Position::new(-22.9, -43.2),
        ];
        let bbox = BBox::enclosing(&points).unwrap();
        assert!((bbox.min_lat - (-27.6)).abs() < 1e-9);
        assert!((bbox.max_lon - (-43.2)).abs() < 1e-9);
        for p in &points {
            assert!(bbox.contains(p.latitude, p.longitude));
        }
        assert!(!bbox.contains(0.0, 0.0));
    }

    #[test]
    fn test_bbox_empty() {
        assert!(BBox::enclosing(std::iter::empty::<&Position>()).is_none());
    }
}
