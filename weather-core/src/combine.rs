use crate::{
    location::LocationQuery,
    model::{AstronomyPayload, CurrentPayload, UpstreamResult, WeatherReport},
};

/// Merge the two upstream results into a single report.
///
/// Either side failing fails the report; the current-conditions error wins
/// when both failed. Missing fields inside a successful payload stay `None`.
pub fn combine(
    current: UpstreamResult<CurrentPayload>,
    astronomy: UpstreamResult<AstronomyPayload>,
    query: &LocationQuery,
) -> WeatherReport {
    let (current, astronomy) = match (current, astronomy) {
        (Ok(current), Ok(astronomy)) => (current, astronomy),
        (Err(err), _) | (Ok(_), Err(err)) => {
            return WeatherReport::failed(query.display_name(), &err);
        }
    };

    let CurrentPayload { location, current } = current;
    let astro = astronomy.astronomy.astro;

    WeatherReport {
        location: location.name.unwrap_or_else(|| query.display_name().to_string()),
        temp_c: current.temp_c,
        temp_f: current.temp_f,
        condition: current.condition.text,
        icon: current.condition.icon,
        humidity: current.humidity,
        wind_kph: current.wind_kph,
        last_updated: current.last_updated,
        sunrise: astro.sunrise,
        sunset: astro.sunset,
        success: true,
        error: None,
    }
}
