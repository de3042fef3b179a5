use serde::{Deserialize, Serialize};
use std::{fmt, net::IpAddr};

/// City used when the caller gives us nothing usable (blank input, loopback).
pub const DEFAULT_LOCATION: &str = "Cape Town";

/// Upstream marker asking the provider to geolocate the request origin.
pub const AUTO_DETECT: &str = "auto:ip";

/// Prefix shared by every cache key written by the weather service.
pub const CACHE_KEY_PREFIX: &str = "weather:";

/// Canonical location string sent upstream and used as the cache key suffix.
///
/// Only [`resolve`] builds one, so the value is never empty and never carries
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_auto_detect(&self) -> bool {
        self.0 == AUTO_DETECT
    }

    pub fn cache_key(&self) -> String {
        debug_assert!(!self.0.is_empty(), "empty location query reached the cache");
        format!("{CACHE_KEY_PREFIX}{}", self.0)
    }

    /// Human-readable form shown when upstream did not name the place.
    pub fn display_name(&self) -> &str {
        if self.is_auto_detect() { "Your Location" } else { &self.0 }
    }

    fn default_location() -> Self {
        Self(DEFAULT_LOCATION.to_string())
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classify raw caller input into a canonical query.
///
/// - blank or missing input falls back to [`DEFAULT_LOCATION`]
/// - loopback addresses fall back to [`DEFAULT_LOCATION`] (local development)
/// - any other IP address becomes [`AUTO_DETECT`]
/// - everything else is a manual place-name search, trimmed
pub fn resolve(raw: Option<&str>) -> LocationQuery {
    let Some(input) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return LocationQuery::default_location();
    };

    match parse_ip(input) {
        Some(ip) if ip.is_loopback() => LocationQuery::default_location(),
        Some(_) => LocationQuery(AUTO_DETECT.to_string()),
        None => LocationQuery(input.to_string()),
    }
}

pub fn is_ip_address(input: &str) -> bool {
    parse_ip(input.trim()).is_some()
}

fn parse_ip(input: &str) -> Option<IpAddr> {
    input.parse::<IpAddr>().ok()
}
