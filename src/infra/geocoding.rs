// Forward geocoding of free-text listing locations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAPBOX_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Resolves a location string to approximate coordinates.
///
/// Failures are not fatal to callers; they only suppress the map.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, location: &str) -> anyhow::Result<Coordinates>;
}

/// Mapbox places API client.
pub struct MapboxGeocoder {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    /// `[longitude, latitude]`
    center: [f64; 2],
}

impl MapboxGeocoder {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, MAPBOX_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn locate(&self, location: &str) -> anyhow::Result<Coordinates> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("geocoder base url cannot take a path"))?
            .push(&format!("{}.json", location));

        let body: FeatureCollection = self
            .client
            .get(url)
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let [lng, lat] = body
            .features
            .first()
            .map(|f| f.center)
            .ok_or_else(|| anyhow::anyhow!("no match for location '{}'", location))?;
        Ok(Coordinates { lat, lng })
    }
}

/// Used when no geocoding token is configured.
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn locate(&self, _location: &str) -> anyhow::Result<Coordinates> {
        Err(anyhow::anyhow!("geocoding is not configured"))
    }
}
