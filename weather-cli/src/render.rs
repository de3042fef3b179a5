use std::fmt;

use weather_core::Lookup;

/// Human-readable block for one lookup.
pub fn render(lookup: &Lookup) -> String {
    Rendered(lookup).to_string()
}

struct Rendered<'a>(&'a Lookup);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0.report;

        write!(f, "{}", report.title())?;
        if !report.success {
            let error = report.error.as_deref().unwrap_or("Unknown error");
            return write!(f, "\n  {}: {error}", report.location);
        }

        let temperature = match (report.temp_c, report.temp_f) {
            (Some(c), Some(fahrenheit)) => Some(format!("{c:.1}°C / {fahrenheit:.1}°F")),
            (Some(c), None) => Some(format!("{c:.1}°C")),
            (None, _) => None,
        };

        let rows = [
            ("Temperature", temperature),
            ("Condition", report.condition.clone()),
            ("Humidity", report.humidity.map(|h| format!("{h}%"))),
            ("Wind", report.wind_kph.map(|w| format!("{w:.1} km/h"))),
            ("Sunrise", report.sunrise.clone()),
            ("Sunset", report.sunset.clone()),
            ("Updated", report.last_updated.clone()),
        ];
        for (label, value) in rows {
            if let Some(value) = value {
                write!(f, "\n  {label}: {value}")?;
            }
        }

        if self.0.manual_search {
            write!(f, "\n  (manual search)")?;
        }

        Ok(())
    }
}
