//! Text presentation of lookup state.
//!
//! Everything here is a pure function of a report (or state) and the active
//! unit system. Raw values are relabeled with whatever units are passed in,
//! even if the report was fetched under the other system.

use chrono::FixedOffset;
use std::fmt;

use crate::{
    model::{LookupState, UnitSystem, WeatherReport},
    provider::openweather::icon_url,
};

pub const LOADING_TEXT: &str = "Loading...";

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `round` sends negative halves away from zero.
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

/// Headline temperature, e.g. "18°C".
pub fn temperature(value: f64, units: UnitSystem) -> String {
    format!("{}{}", round_half_up(value), units.temperature_suffix())
}

/// Secondary temperature without unit letter, e.g. "17°".
pub fn degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

pub fn wind(speed: f64, units: UnitSystem) -> String {
    format!("{} {}", speed, units.wind_suffix())
}

pub fn humidity(pct: u8) -> String {
    format!("{pct}%")
}

pub fn pressure(hpa: f64) -> String {
    format!("{hpa} hPa")
}

/// "GMT+2", "GMT-5", "GMT+5.5", "GMT0". The sign is only written for positive offsets.
pub fn timezone(offset_secs: i32) -> String {
    let hours = f64::from(offset_secs) / 3600.0;
    let sign = if offset_secs > 0 { "+" } else { "" };
    format!("GMT{sign}{hours}")
}

pub fn location_heading(report: &WeatherReport) -> String {
    match &report.country {
        Some(country) => format!("{} ({})", report.location_name, country),
        None => report.location_name.clone(),
    }
}

/// Observation time as wall-clock time at the reported location.
pub fn local_time(report: &WeatherReport) -> Option<String> {
    let observed = report.observed_at?;
    let offset = FixedOffset::east_opt(report.utc_offset_secs)?;
    Some(observed.with_timezone(&offset).format("%H:%M").to_string())
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every displayed field of a report, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub heading: String,
    pub temperature: String,
    pub condition: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub feels_like: String,
    pub min: String,
    pub max: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub timezone: String,
    pub local_time: Option<String>,
}

impl ReportView {
    pub fn new(report: &WeatherReport, units: UnitSystem) -> Self {
        let icon = &report.condition.icon;

        Self {
            heading: location_heading(report),
            temperature: temperature(report.temperature, units),
            condition: report.condition.label.to_uppercase(),
            description: title_case(&report.condition.description),
            icon_url: (!icon.is_empty()).then(|| icon_url(icon)),
            feels_like: degrees(report.feels_like),
            min: degrees(report.temp_min),
            max: degrees(report.temp_max),
            humidity: humidity(report.humidity_pct),
            wind: wind(report.wind_speed, units),
            pressure: pressure(report.pressure_hpa),
            timezone: timezone(report.utc_offset_secs),
            local_time: local_time(report),
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "  {}  {} - {}", self.temperature, self.condition, self.description)?;
        writeln!(f)?;
        writeln!(f, "  {:<12}{}", "Feels Like", self.feels_like)?;
        writeln!(f, "  {:<12}{}", "Min", self.min)?;
        writeln!(f, "  {:<12}{}", "Max", self.max)?;
        writeln!(f, "  {:<12}{}", "Humidity", self.humidity)?;
        writeln!(f, "  {:<12}{}", "Wind", self.wind)?;
        writeln!(f, "  {:<12}{}", "Pressure", self.pressure)?;
        write!(f, "  {:<12}{}", "Timezone", self.timezone)?;

        if let Some(local) = &self.local_time {
            write!(f, " (updated {local} local)")?;
        }
        if let Some(url) = &self.icon_url {
            write!(f, "\n  {:<12}{}", "Icon", url)?;
        }

        Ok(())
    }
}

/// Render the whole lookup state. `None` when there is nothing to show.
pub fn render_state(state: &LookupState, units: UnitSystem) -> Option<String> {
    match state {
        LookupState::Idle => None,
        LookupState::Loading => Some(LOADING_TEXT.to_string()),
        LookupState::Failed(message) => Some(message.clone()),
        LookupState::Success(report) => Some(ReportView::new(report, units).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;
    use chrono::{DateTime, Utc};

    fn paris() -> WeatherReport {
        WeatherReport {
            location_name: "Paris".into(),
            country: Some("FR".into()),
            temperature: 18.2,
            feels_like: 17.5,
            temp_min: 16.1,
            temp_max: 19.4,
            humidity_pct: 67,
            wind_speed: 3.6,
            pressure_hpa: 1015.0,
            condition: Condition {
                label: "Clouds".into(),
                description: "broken clouds".into(),
                icon: "04d".into(),
            },
            utc_offset_secs: 7200,
            observed_at: DateTime::<Utc>::from_timestamp(1_760_788_800, 0),
        }
    }

    #[test]
    fn paris_metric_headline() {
        assert_eq!(temperature(18.2, UnitSystem::Metric), "18°C");
        assert_eq!(temperature(64.8, UnitSystem::Imperial), "65°F");
    }

    #[test]
    fn rounding_sends_halves_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-7.6), -8);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(0.5), 1);
    }

    #[test]
    fn rounding_is_exact_just_below_a_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-1.5000000000000002), -2);
    }

    #[test]
    fn timezone_formats_like_offset_hours() {
        assert_eq!(timezone(7200), "GMT+2");
        assert_eq!(timezone(-18000), "GMT-5");
        assert_eq!(timezone(19800), "GMT+5.5");
        assert_eq!(timezone(0), "GMT0");
    }

    #[test]
    fn wind_keeps_raw_value_and_suffix() {
        assert_eq!(wind(3.6, UnitSystem::Metric), "3.6 m/s");
        assert_eq!(wind(4.0, UnitSystem::Imperial), "4 mph");
    }

    #[test]
    fn heading_includes_country_when_present() {
        let mut report = paris();
        assert_eq!(location_heading(&report), "Paris (FR)");
        report.country = None;
        assert_eq!(location_heading(&report), "Paris");
    }

    #[test]
    fn report_view_formats_every_field() {
        let view = ReportView::new(&paris(), UnitSystem::Metric);

        assert_eq!(view.temperature, "18°C");
        assert_eq!(view.condition, "CLOUDS");
        assert_eq!(view.description, "Broken Clouds");
        assert_eq!(view.feels_like, "18°");
        assert_eq!(view.min, "16°");
        assert_eq!(view.max, "19°");
        assert_eq!(view.humidity, "67%");
        assert_eq!(view.pressure, "1015 hPa");
        assert_eq!(view.timezone, "GMT+2");
        assert_eq!(view.local_time.as_deref(), Some("14:00"));
        assert_eq!(view.icon_url.as_deref(), Some("https://openweathermap.org/img/wn/04d@4x.png"));
    }

    #[test]
    fn switching_units_relabels_held_values() {
        let view = ReportView::new(&paris(), UnitSystem::Imperial);
        assert_eq!(view.temperature, "18°F");
        assert_eq!(view.wind, "3.6 mph");
    }

    #[test]
    fn card_contains_headline_and_stats() {
        let card = ReportView::new(&paris(), UnitSystem::Metric).to_string();
        assert!(card.starts_with("Paris (FR)\n"));
        assert!(card.contains("18°C  CLOUDS - Broken Clouds"));
        assert!(card.contains("Humidity    67%"));
        assert!(card.contains("GMT+2 (updated 14:00 local)"));
    }

    #[test]
    fn state_rendering() {
        assert_eq!(render_state(&LookupState::Idle, UnitSystem::Metric), None);
        assert_eq!(render_state(&LookupState::Loading, UnitSystem::Metric).as_deref(), Some(LOADING_TEXT));
        assert_eq!(
            render_state(&LookupState::Failed("Weather fetch failed.".into()), UnitSystem::Metric).as_deref(),
            Some("Weather fetch failed.")
        );
        let rendered = render_state(&LookupState::Success(paris()), UnitSystem::Metric).unwrap();
        assert!(rendered.contains("18°C"));
    }
}
