use std::fmt;

use dashboard_core::view::DashboardView;

/// Plain-text rendering of every dashboard panel.
pub fn dashboard(view: &DashboardView) -> String {
    Dashboard(view).to_string()
}

/// Display adapter for a [`DashboardView`].
pub struct Dashboard<'a>(pub &'a DashboardView);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let h = &view.header;
        let air = &view.air;

        writeln!(f, "{}, {} ({})", h.name, h.region, h.country)?;
        writeln!(f, "  {}°C   chance of rain: {}", h.temp_c, pct(h.chance_of_rain))?;
        writeln!(f)?;

        writeln!(f, "TOMORROW'S FORECAST")?;
        if view.tomorrow.is_empty() {
            writeln!(f, "  (no hourly data)")?;
        }
        for slot in &view.tomorrow {
            writeln!(f, "  {}  {:>5}°C  {}", slot.label, slot.temp_c, slot.condition)?;
        }
        writeln!(f)?;

        writeln!(f, "AIR CONDITIONS")?;
        writeln!(f, "  Feels like  {}°C", air.feels_like_c)?;
        writeln!(f, "  UV index    {}", air.uv)?;
        writeln!(f, "  Wind        {}km/h {}", air.wind_kph, air.wind_dir)?;
        writeln!(f, "  Visibility  {}km", air.visibility_km)?;
        writeln!(f, "  Pressure    {}hPa", air.pressure_mb)?;
        writeln!(f, "  Humidity    {}%", air.humidity_pct)?;
        writeln!(f, "  Sunrise     {}", text(air.sunrise.as_deref()))?;
        writeln!(f, "  Sunset      {}", text(air.sunset.as_deref()))?;
        writeln!(f, "  Sun up      {}", yes_no(air.sun_up))?;
        writeln!(f, "  Rain        {}", pct(air.chance_of_rain))?;
        writeln!(f, "  Snow        {}", pct(air.chance_of_snow))?;
        writeln!(f)?;

        writeln!(f, "LOCATION")?;
        writeln!(f, "  {:.4}, {:.4}  {}", view.map.lat, view.map.lon, view.map.popup)?;
        writeln!(f)?;

        writeln!(f, "{}-DAY FORECAST", view.week.len())?;
        for row in &view.week {
            writeln!(f, "  {:<10} {:<24} {}°C", row.label, row.condition, row.max_temp_c)?;
        }
        Ok(())
    }
}

fn pct(value: Option<u8>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}%"))
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    }
}
