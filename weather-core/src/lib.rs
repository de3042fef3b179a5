//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Resolution of raw caller input into a canonical location query
//! - The upstream provider abstraction and its weatherapi.com client
//! - Merging of current conditions and astronomy into one report
//! - An expiring in-memory cache and the service that ties it all together
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod combine;
pub mod config;
pub mod location;
pub mod model;
pub mod provider;
pub mod service;

pub use cache::{Clock, ManualClock, SystemClock, WeatherCache};
pub use combine::combine;
pub use config::{ClientSettings, Config};
pub use location::{LocationQuery, resolve};
pub use model::{AstronomyPayload, CurrentPayload, UpstreamError, UpstreamResult, WeatherReport};
pub use provider::{WeatherProvider, weatherapi::WeatherApiProvider};
pub use service::{Lookup, RefreshTarget, WeatherService};
