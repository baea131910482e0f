use crate::{
    Config, LookupError, Query, UnitSystem, WeatherReport,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Source of current-weather reports.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issues exactly one request. No retry and no cancellation.
    async fn current_weather(
        &self,
        query: &Query,
        units: UnitSystem,
    ) -> Result<WeatherReport, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let mut provider = OpenWeatherProvider::with_timeout(
        api_key.to_owned(),
        config.request_timeout_secs.map(Duration::from_secs),
    )?;

    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url);
    }

    let boxed: Box<dyn WeatherProvider> = Box::new(provider);
    Ok(boxed)
}
