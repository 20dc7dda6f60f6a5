//! Output formatters for the map scene.
//!
//! Supports a human-readable terminal view (with the screen's colours) and
//! JSON.

use std::io::{self, Write};

use crate::navigation::Route;
use crate::render::{Button, MapScene, Rgb};

// ANSI codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const ICON_MAP: &str = "🗺";
const ICON_MARKER: &str = "📍";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal output (default)
    #[default]
    Human,
    /// JSON scene description
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s} (expected: human, json)")),
        }
    }
}

/// Foreground escape for a 24-bit colour.
fn fg(c: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", c.0, c.1, c.2)
}

/// Background escape for a 24-bit colour.
fn bg(c: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", c.0, c.1, c.2)
}

fn button_label(button: &Button) -> String {
    format!(
        "{}{}{BOLD} {} {RESET}",
        bg(button.background),
        fg(button.icon_color),
        button.icon
    )
}

/// Write the scene in human-readable format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, scene: &MapScene) -> io::Result<()> {
    let r = scene.region;
    writeln!(
        writer,
        "{ICON_MAP} {BOLD}Events map{RESET} {DIM}({} style){RESET}{:>30}",
        scene.style,
        button_label(&scene.logout_button)
    )?;
    writeln!(
        writer,
        "{DIM}region {:.5}, {:.5} │ span {:.4}° x {:.4}°{RESET}",
        r.latitude, r.longitude, r.latitude_delta, r.longitude_delta
    )?;

    for marker in &scene.markers {
        writeln!(
            writer,
            "{ICON_MARKER} {BOLD}{}{RESET} │ {:>9.5}, {:>10.5} │ {} {DIM}[{}]{RESET}",
            marker.event_id,
            marker.coordinate.latitude,
            marker.coordinate.longitude,
            marker.date_time,
            marker.title
        )?;
    }

    let footer = &scene.footer;
    writeln!(
        writer,
        "{}{}{BOLD} {} {RESET} {}",
        bg(footer.background),
        fg(footer.text_color),
        footer.text,
        button_label(&footer.create_button)
    )
}

/// Write the scene as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, scene: &MapScene) -> io::Result<()> {
    let json = serde_json::to_string_pretty(scene)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write the scene in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_scene<W: Write>(writer: &mut W, scene: &MapScene, format: Format) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, scene),
        Format::Json => write_json(writer, scene),
    }
}

/// Write the route the screen navigated to.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_route<W: Write>(writer: &mut W, route: &Route, format: Format) -> io::Result<()> {
    match format {
        Format::Human => {
            let params = route.params().map(|p| p.to_string()).unwrap_or_default();
            writeln!(writer, "→ {BOLD}{}{RESET} {params}", route.screen())
        }
        Format::Json => {
            let json = serde_json::json!({ "screen": route.screen(), "params": route.params() });
            writeln!(writer, "{json}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSettings;
    use crate::models::tests::event;
    use crate::render::build_scene;

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<Format>().unwrap(), Format::Human);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("ndjson".parse::<Format>().is_err());
    }

    #[test]
    fn test_human_output_lists_markers_and_footer() {
        let settings = MapSettings::default();
        let events = vec![event("42", "2099-01-01T00:00:00Z", -27.5, -48.5)];
        let scene = build_scene(&events, settings.default_region, &settings);

        let mut out = Vec::new();
        write_human(&mut out, &scene).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("42"));
        assert!(text.contains("Event 42"));
        assert!(text.contains("1 event(s) found"));
        assert!(text.contains("log-out"));
    }

    #[test]
    fn test_json_route() {
        let mut out = Vec::new();
        let route = Route::EventDetails {
            event_id: "1".into(),
        };
        write_route(&mut out, &route, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["screen"], "EventDetails");
        assert_eq!(value["params"]["eventId"], "1");
    }
}
