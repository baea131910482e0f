//! Lookup controller: the single owner of lookup state.
//!
//! State only changes through the transition methods here. A lookup can be
//! driven in one call ([`LookupController::lookup_by_name`]) or in steps
//! (`begin_*`, [`LookupController::fetch`], [`LookupController::complete`])
//! when the host wants to render the loading state in between.
//!
//! There is no cancellation. If two lookups overlap, whichever completes last
//! decides the final state.

use crate::{
    Coordinates, LocationError, LookupError, Query, UnitSystem, WeatherReport,
    location::LocationProvider,
    model::LookupState,
    provider::WeatherProvider,
};

/// Which trigger started a lookup. Decides the failure text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    ByName,
    ByLocation,
}

impl LookupKind {
    pub fn failure_message(&self) -> &'static str {
        match self {
            LookupKind::ByName => "City not found or fetch failed.",
            LookupKind::ByLocation => "Weather fetch failed.",
        }
    }
}

/// A lookup that has entered the loading state and still needs a result.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLookup {
    pub kind: LookupKind,
    pub query: Query,
    /// Units in effect when the lookup was triggered.
    pub units: UnitSystem,
}

#[derive(Debug)]
pub struct LookupController {
    provider: Box<dyn WeatherProvider>,
    units: UnitSystem,
    state: LookupState,
}

impl LookupController {
    pub fn new(provider: Box<dyn WeatherProvider>, units: UnitSystem) -> Self {
        Self {
            provider,
            units,
            state: LookupState::Idle,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.state.report()
    }

    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }

    /// Affects later lookups only. A held report is not refetched.
    pub fn set_units(&mut self, units: UnitSystem) {
        if units != self.units {
            tracing::debug!(from = %self.units, to = %units, "unit system changed");
        }
        self.units = units;
    }

    /// Enter loading for a city lookup. Blank input changes nothing and returns `None`.
    pub fn begin_name_lookup(&mut self, raw: &str) -> Option<PendingLookup> {
        let query = Query::city(raw)?;
        Some(self.begin(LookupKind::ByName, query))
    }

    /// Enter loading for a lookup at already resolved coordinates.
    pub fn begin_coordinates_lookup(&mut self, coordinates: Coordinates) -> PendingLookup {
        self.begin(LookupKind::ByLocation, Query::Coordinates(coordinates))
    }

    fn begin(&mut self, kind: LookupKind, query: Query) -> PendingLookup {
        tracing::info!(%query, units = %self.units, "starting lookup");
        self.enter_loading();

        PendingLookup {
            kind,
            query,
            units: self.units,
        }
    }

    fn enter_loading(&mut self) {
        tracing::debug!("state -> loading");
        self.state = LookupState::Loading;
    }

    /// Issue the request for `pending`. Does not touch state.
    pub async fn fetch(&self, pending: &PendingLookup) -> Result<WeatherReport, LookupError> {
        self.provider.current_weather(&pending.query, pending.units).await
    }

    /// Settle a lookup. Always leaves loading; sets exactly one of report or message.
    pub fn complete(&mut self, kind: LookupKind, result: Result<WeatherReport, LookupError>) {
        self.state = match result {
            Ok(report) => {
                tracing::debug!(location = %report.location_name, "state -> success");
                LookupState::Success(report)
            }
            Err(err) => {
                tracing::warn!(error = %err, ?kind, "lookup failed");
                LookupState::Failed(kind.failure_message().to_string())
            }
        };
    }

    /// Settle a location lookup whose position could not be resolved.
    pub fn fail_location(&mut self, err: LocationError) {
        tracing::warn!(error = %err, "location unavailable");
        self.state = LookupState::Failed(err.to_string());
    }

    /// Look up weather for a city name. Blank input performs no request.
    pub async fn lookup_by_name(&mut self, raw: &str) -> &LookupState {
        if let Some(pending) = self.begin_name_lookup(raw) {
            let result = self.fetch(&pending).await;
            self.complete(pending.kind, result);
        }
        &self.state
    }

    /// Look up weather at known coordinates.
    pub async fn lookup_by_coordinates(&mut self, latitude: f64, longitude: f64) -> &LookupState {
        let pending = self.begin_coordinates_lookup(Coordinates::new(latitude, longitude));
        let result = self.fetch(&pending).await;
        self.complete(pending.kind, result);
        &self.state
    }

    /// Resolve the device position, then look up weather there.
    ///
    /// A missing capability fails before loading is entered. A denial arrives
    /// while loading. Neither issues a weather request.
    pub async fn lookup_by_location(&mut self, locator: &dyn LocationProvider) -> &LookupState {
        if !locator.is_available() {
            self.fail_location(LocationError::Unavailable);
            return &self.state;
        }

        self.enter_loading();

        match locator.current_position().await {
            Ok(position) => self.lookup_by_coordinates(position.latitude, position.longitude).await,
            Err(err) => {
                self.fail_location(err);
                &self.state
            }
        }
    }
}
