//! Device location collaborator.
//!
//! Resolving a position is the host's job; this module only defines the seam
//! and the few sources a terminal host can offer.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Coordinates, LocationError, config::LocationConfig};

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Whether the capability exists at all. Checked before any lookup starts.
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always resolves to the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// The user refused to share a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// No location capability on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Pick a location source from the `[location]` config table.
///
/// Disabled sharing wins over configured coordinates; a table without both
/// coordinates counts as no capability.
pub fn location_from_config(config: Option<&LocationConfig>) -> Box<dyn LocationProvider> {
    match config {
        Some(loc) if !loc.enabled => Box::new(DeniedLocation),
        Some(LocationConfig {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..
        }) => Box::new(FixedLocation(Coordinates::new(*latitude, *longitude))),
        _ => Box::new(NoLocation),
    }
}
