//! Core of the events map screen.
//!
//! Loads volunteer events from the event server, keeps the upcoming ones,
//! fits the map around them and turns taps into navigation and session
//! side effects.

pub mod cli;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod filters;
pub mod loader;
pub mod models;
pub mod navigation;
pub mod output;
pub mod render;
pub mod screen;
pub mod server;
pub mod session;
pub mod viewport;
