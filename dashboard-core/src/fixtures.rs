//! Payload builders shared by unit tests.

use crate::model::{
    Astro, Condition, Current, DaySummary, Forecast, ForecastDay, HourlyRecord, Location, LocationData,
};

pub fn condition(text: &str) -> Condition {
    Condition { text: text.to_string(), icon: format!("//cdn/{}.png", text.to_lowercase()), code: 1000 }
}

pub fn hour(time: &str, temp_c: f64) -> HourlyRecord {
    HourlyRecord { time: time.to_string(), temp_c, condition: condition("Clear"), chance_of_rain: 0 }
}

/// 24 hourly records `date 00:00` .. `date 23:00`, temperature equal to the hour.
pub fn full_day_hours(date: &str) -> Vec<HourlyRecord> {
    (0..24).map(|h| hour(&format!("{date} {h:02}:00"), f64::from(h))).collect()
}

pub fn day(date: &str) -> ForecastDay {
    ForecastDay {
        date: date.to_string(),
        day: DaySummary {
            maxtemp_c: 31.0,
            mintemp_c: 24.0,
            daily_chance_of_rain: 80,
            daily_chance_of_snow: 0,
            condition: condition("Patchy rain"),
            ..DaySummary::default()
        },
        astro: Astro {
            sunrise: "06:52 AM".to_string(),
            sunset: "07:01 PM".to_string(),
            is_sun_up: 1,
            ..Astro::default()
        },
        hour: full_day_hours(date),
    }
}

pub fn location_data(name: &str, dates: &[&str]) -> LocationData {
    LocationData {
        location: Location {
            name: name.to_string(),
            region: "Region".to_string(),
            country: "Country".to_string(),
            lat: 6.45,
            lon: 3.4,
            tz_id: None,
            localtime: None,
        },
        current: Current {
            temp_c: 29.5,
            feelslike_c: 33.1,
            is_day: 1,
            condition: condition("Sunny"),
            wind_kph: 14.4,
            wind_dir: "SW".to_string(),
            pressure_mb: 1012.0,
            humidity: 74,
            vis_km: 10.0,
            uv: 7.0,
        },
        forecast: Forecast { forecastday: dates.iter().map(|d| day(d)).collect() },
    }
}
