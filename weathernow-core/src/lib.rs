//! Core library for the `weathernow` CLI.
//!
//! This crate defines:
//! - The lookup controller that owns request state
//! - The OpenWeather provider and the device location seam
//! - Shared domain models (queries, reports, lookup state)
//! - Text formatting of reports
//! - Configuration & credentials handling
//!
//! It is used by `weathernow-cli`, but can also be driven by other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, LocationConfig};
pub use controller::{LookupController, LookupKind, PendingLookup};
pub use error::{LocationError, LookupError};
pub use location::LocationProvider;
pub use model::{Condition, Coordinates, LookupState, Query, UnitSystem, WeatherReport};
pub use provider::WeatherProvider;
