use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    location::LocationQuery,
    model::{AstronomyPayload, CurrentPayload, UpstreamResult},
};

pub mod weatherapi;

/// A source of current conditions and astronomy data.
///
/// Implementations never panic or bubble transport errors: every outcome is
/// folded into an [`UpstreamResult`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> UpstreamResult<CurrentPayload>;

    async fn fetch_astronomy(&self, query: &LocationQuery) -> UpstreamResult<AstronomyPayload>;
}
