//! Wire shapes of a WeatherAPI.com `forecast.json` response.
//!
//! Only `location`, `current` and `forecast.forecastday[].date` are required;
//! everything else defaults so a sparse but well-formed response still parses.

use serde::Deserialize;

/// One complete, successfully parsed forecast response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationData {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

impl LocationData {
    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tz_id: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub is_day: u8,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: String,
    #[serde(default)]
    pub pressure_mb: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub vis_km: f64,
    #[serde(default)]
    pub uv: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// A single day of the forecast horizon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD` in the location's local calendar.
    pub date: String,
    #[serde(default)]
    pub day: DaySummary,
    #[serde(default)]
    pub astro: Astro,
    #[serde(default)]
    pub hour: Vec<HourlyRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DaySummary {
    #[serde(default)]
    pub maxtemp_c: f64,
    #[serde(default)]
    pub mintemp_c: f64,
    #[serde(default)]
    pub avgtemp_c: f64,
    #[serde(default)]
    pub maxwind_kph: f64,
    #[serde(default)]
    pub totalprecip_mm: f64,
    #[serde(default)]
    pub avgvis_km: f64,
    #[serde(default)]
    pub avghumidity: f64,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    #[serde(default)]
    pub daily_chance_of_snow: u8,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub uv: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Astro {
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    #[serde(default)]
    pub moonrise: String,
    #[serde(default)]
    pub moonset: String,
    #[serde(default)]
    pub moon_phase: String,
    #[serde(default)]
    pub is_sun_up: u8,
    #[serde(default)]
    pub is_moon_up: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyRecord {
    /// Local timestamp, `YYYY-MM-DD HH:MM`.
    pub time: String,
    #[serde(default)]
    pub temp_c: f64,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub chance_of_rain: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_response_parses_with_defaults() {
        let body = r#"{
            "location": { "name": "Lagos", "lat": 6.45, "lon": 3.4 },
            "current": { "temp_c": 29.0, "condition": { "text": "Sunny" } },
            "forecast": { "forecastday": [ { "date": "2024-03-04" } ] }
        }"#;

        let parsed: LocationData = serde_json::from_str(body).expect("sparse body must parse");

        assert_eq!(parsed.location.name, "Lagos");
        assert_eq!(parsed.current.condition.text, "Sunny");
        assert_eq!(parsed.days().len(), 1);
        assert!(parsed.days()[0].hour.is_empty());
        assert_eq!(parsed.days()[0].day.daily_chance_of_rain, 0);
    }

    #[test]
    fn missing_current_block_is_rejected() {
        let body = r#"{ "location": { "name": "Lagos" }, "forecast": { "forecastday": [] } }"#;
        assert!(serde_json::from_str::<LocationData>(body).is_err());
    }

    #[test]
    fn api_error_envelope_is_rejected() {
        let body = r#"{ "error": { "code": 1006, "message": "No matching location found." } }"#;
        assert!(serde_json::from_str::<LocationData>(body).is_err());
    }
}
