//! Scene description for the events map.
//!
//! The map widget is an external collaborator; this module decides what
//! it should show: the region, one marker per event, the footer with its
//! counter and the two floating buttons.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::MapSettings;
use crate::models::{Event, Position};
use crate::viewport::Region;

/// Marker image size in points.
pub const MARKER_SIZE: Size = Size {
    width: 48.0,
    height: 54.0,
};

/// Square floating button.
pub const BUTTON_SIZE: f64 = 56.0;
pub const CORNER_RADIUS: f64 = 16.0;

pub const FOOTER_INSET_X: f64 = 24.0;
pub const FOOTER_BOTTOM: f64 = 40.0;
pub const FOOTER_PADDING_LEFT: f64 = 24.0;

pub const LOGOUT_TOP: f64 = 70.0;
pub const LOGOUT_RIGHT: f64 = 24.0;

pub const CREATE_BUTTON_COLOR: Rgb = Rgb(0x00, 0xA3, 0xFF);
pub const LOGOUT_BUTTON_COLOR: Rgb = Rgb(0x4D, 0x6F, 0x80);
pub const FOOTER_COLOR: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const FOOTER_TEXT_COLOR: Rgb = Rgb(0x8F, 0xA7, 0xB3);
pub const ICON_COLOR: Rgb = Rgb(0xFF, 0xFF, 0xFF);

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Offsets from the screen edges; unset edges are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Anchor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

/// What a button does when tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    CreateEvent,
    LogOut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub kind: ButtonKind,
    /// Feather icon name
    pub icon: &'static str,
    pub icon_color: Rgb,
    pub background: Rgb,
    pub size: Size,
    pub corner_radius: f64,
    pub anchor: Anchor,
}

impl Button {
    fn create_event() -> Self {
        Self {
            kind: ButtonKind::CreateEvent,
            icon: "plus",
            icon_color: ICON_COLOR,
            background: CREATE_BUTTON_COLOR,
            size: Size {
                width: BUTTON_SIZE,
                height: BUTTON_SIZE,
            },
            corner_radius: CORNER_RADIUS,
            // Laid out at the end of the footer row
            anchor: Anchor::default(),
        }
    }

    fn log_out() -> Self {
        Self {
            kind: ButtonKind::LogOut,
            icon: "log-out",
            icon_color: ICON_COLOR,
            background: LOGOUT_BUTTON_COLOR,
            size: Size {
                width: BUTTON_SIZE,
                height: BUTTON_SIZE,
            },
            corner_radius: CORNER_RADIUS,
            anchor: Anchor {
                top: Some(LOGOUT_TOP),
                right: Some(LOGOUT_RIGHT),
                ..Anchor::default()
            },
        }
    }
}

/// One tappable event marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Marker key and navigation parameter
    pub event_id: String,
    pub title: String,
    pub date_time: String,
    pub coordinate: Position,
    pub icon: PathBuf,
    pub icon_size: Size,
}

impl Marker {
    fn for_event(event: &Event, icon: &Path) -> Self {
        Self {
            event_id: event.id.clone(),
            title: event.name.clone(),
            date_time: event.date_time.clone(),
            coordinate: event.position,
            icon: icon.to_path_buf(),
            icon_size: MARKER_SIZE,
        }
    }
}

/// Bottom bar with the event counter and the create button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub text: String,
    pub text_color: Rgb,
    pub background: Rgb,
    pub height: f64,
    pub corner_radius: f64,
    pub padding_left: f64,
    pub anchor: Anchor,
    pub create_button: Button,
}

impl Footer {
    fn with_count(count: usize) -> Self {
        Self {
            text: footer_text(count),
            text_color: FOOTER_TEXT_COLOR,
            background: FOOTER_COLOR,
            height: BUTTON_SIZE,
            corner_radius: CORNER_RADIUS,
            padding_left: FOOTER_PADDING_LEFT,
            anchor: Anchor {
                left: Some(FOOTER_INSET_X),
                right: Some(FOOTER_INSET_X),
                bottom: Some(FOOTER_BOTTOM),
                top: None,
            },
            create_button: Button::create_event(),
        }
    }
}

/// Everything the map screen displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub region: Region,
    pub style: String,
    pub markers: Vec<Marker>,
    pub footer: Footer,
    pub logout_button: Button,
}

/// Counter shown in the footer.
#[must_use]
pub fn footer_text(count: usize) -> String {
    format!("{count} event(s) found")
}

/// Build the scene for `events` shown in `region`.
#[must_use]
pub fn build_scene(events: &[Event], region: Region, settings: &MapSettings) -> MapScene {
    let markers: Vec<Marker> = events
        .iter()
        .map(|e| Marker::for_event(e, &settings.marker_icon))
        .collect();

    MapScene {
        region,
        style: settings.style.clone(),
        footer: Footer::with_count(markers.len()),
        markers,
        logout_button: Button::log_out(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::event;

    #[test]
    fn test_one_marker_per_event() {
        let settings = MapSettings::default();
        let events = vec![
            event("1", "2099-01-01T00:00:00Z", 1.0, 1.0),
            event("2", "2099-01-02T00:00:00Z", 2.0, 2.0),
        ];

        let scene = build_scene(&events, settings.default_region, &settings);

        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.markers[0].event_id, "1");
        assert_eq!(scene.markers[1].coordinate, Position::new(2.0, 2.0));
        assert_eq!(scene.footer.text, "2 event(s) found");
    }

    #[test]
    fn test_empty_scene() {
        let settings = MapSettings::default();
        let scene = build_scene(&[], settings.default_region, &settings);
        assert!(scene.markers.is_empty());
        assert_eq!(scene.footer.text, "0 event(s) found");
        assert_eq!(scene.region, settings.default_region);
    }

    #[test]
    fn test_buttons() {
        let settings = MapSettings::default();
        let scene = build_scene(&[], settings.default_region, &settings);
        assert_eq!(scene.footer.create_button.kind, ButtonKind::CreateEvent);
        assert_eq!(scene.footer.create_button.background.hex(), "#00A3FF");
        assert_eq!(scene.logout_button.kind, ButtonKind::LogOut);
        assert_eq!(scene.logout_button.anchor.top, Some(70.0));
    }

    #[test]
    fn test_scene_serializes_colors_as_hex() {
        let settings = MapSettings::default();
        let scene = build_scene(&[], settings.default_region, &settings);
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["logout_button"]["background"], "#4D6F80");
        assert_eq!(json["region"]["latitudeDelta"], 0.008);
    }
}
