//! Panel-ready projection of a payload, assembled from the projector.

use crate::{
    model::LocationData,
    projector::{self, checkpointed_hours, day_label, hour_label, weekday_name},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub header: Header,
    pub air: AirConditions,
    pub map: MapPin,
    pub tomorrow: Vec<HourSlot>,
    pub week: Vec<DayRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub region: String,
    pub country: String,
    pub temp_c: f64,
    pub chance_of_rain: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirConditions {
    pub feels_like_c: f64,
    pub uv: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub visibility_km: f64,
    pub pressure_mb: f64,
    pub humidity_pct: u8,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub chance_of_rain: Option<u8>,
    pub chance_of_snow: Option<u8>,
    pub sun_up: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub label: String,
    pub temp_c: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub label: String,
    pub date: String,
    pub condition: String,
    pub max_temp_c: f64,
}

impl DashboardView {
    /// `today` is the caller's `YYYY-MM-DD`, see [`projector::today_date_string`].
    pub fn project(payload: &LocationData, today: &str) -> Self {
        let first_day = projector::today(payload);
        let current = &payload.current;
        let location = &payload.location;

        let header = Header {
            name: location.name.clone(),
            region: location.region.clone(),
            country: location.country.clone(),
            temp_c: current.temp_c,
            chance_of_rain: first_day.map(|d| d.day.daily_chance_of_rain),
        };

        let air = AirConditions {
            feels_like_c: current.feelslike_c,
            uv: current.uv,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir.clone(),
            visibility_km: current.vis_km,
            pressure_mb: current.pressure_mb,
            humidity_pct: current.humidity,
            sunrise: first_day.map(|d| d.astro.sunrise.clone()),
            sunset: first_day.map(|d| d.astro.sunset.clone()),
            chance_of_rain: first_day.map(|d| d.day.daily_chance_of_rain),
            chance_of_snow: first_day.map(|d| d.day.daily_chance_of_snow),
            sun_up: first_day.map(|d| d.astro.is_sun_up != 0),
        };

        let map = MapPin {
            lat: location.lat,
            lon: location.lon,
            popup: format!("{} · {} · {}°C", location.name, current.condition.text, current.temp_c),
        };

        let tomorrow = projector::tomorrow(payload)
            .map(|day| {
                checkpointed_hours(day)
                    .into_iter()
                    .map(|h| HourSlot {
                        label: hour_label(&h.time).unwrap_or_else(|| h.time.clone()),
                        temp_c: h.temp_c,
                        condition: h.condition.text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let week = payload
            .days()
            .iter()
            .map(|d| DayRow {
                label: day_label(&d.date, today, weekday_name),
                date: d.date.clone(),
                condition: d.day.condition.text.clone(),
                max_temp_c: d.day.maxtemp_c,
            })
            .collect();

        Self { header, air, map, tomorrow, week }
    }
}
