use crate::models::GeoPoint;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Reasons an address lookup can fail
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no location found for {0}")]
    NotFound(String),

    #[error("geocoding service error: {0}")]
    ServiceError(String),

    #[error("geocoding request failed: {0}")]
    Request(#[source] Arc<reqwest::Error>),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Request(Arc::new(err))
    }
}

/// Maps a postal code to a point on the map
///
/// Implementations qualify the postal code with their fixed region before
/// looking it up.
pub trait AddressResolver {
    fn resolve(&self, postal_code: &str) -> impl Future<Output = Result<GeoPoint, ResolveError>> + Send;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoPoint,
}

/// Geocoding API client
///
/// Speaks the Google Geocoding response format and caches successful
/// lookups per postal code.
pub struct GeocodingClient {
    endpoint: String,
    api_key: String,
    region: String,
    client: Client,
    cache: moka::future::Cache<String, GeoPoint>,
}

impl GeocodingClient {
    /// Create a new geocoding client
    pub fn new(
        endpoint: String,
        api_key: String,
        region: String,
        timeout_secs: u64,
        cache_size: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Ok(Self {
            endpoint,
            api_key,
            region,
            client,
            cache,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn request_url(&self, postal_code: &str) -> String {
        let address = format!("{}, {}", postal_code, self.region);
        let mut url = format!(
            "{}?address={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&address)
        );
        if !self.api_key.is_empty() {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(&self.api_key));
        }
        url
    }

    /// Look up a postal code, consulting the cache first
    pub async fn lookup(&self, postal_code: &str) -> Result<GeoPoint, ResolveError> {
        if let Some(point) = self.cache.get(postal_code).await {
            tracing::trace!("Geocode cache hit: {}", postal_code);
            return Ok(point);
        }

        tracing::debug!("Geocoding postal code {} ({})", postal_code, self.region);

        let response = self.client.get(self.request_url(postal_code)).send().await?;

        if !response.status().is_success() {
            return Err(ResolveError::ServiceError(format!(
                "geocoder returned HTTP {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await?;

        let point = match body.status.as_str() {
            "OK" => body
                .results
                .first()
                .map(|r| r.geometry.location)
                .ok_or_else(|| ResolveError::NotFound(postal_code.to_string()))?,
            "ZERO_RESULTS" => return Err(ResolveError::NotFound(postal_code.to_string())),
            other => {
                return Err(ResolveError::ServiceError(match body.error_message {
                    Some(message) => format!("{}: {}", other, message),
                    None => other.to_string(),
                }))
            }
        };

        self.cache.insert(postal_code.to_string(), point).await;
        Ok(point)
    }
}

impl AddressResolver for GeocodingClient {
    fn resolve(&self, postal_code: &str) -> impl Future<Output = Result<GeoPoint, ResolveError>> + Send {
        self.lookup(postal_code)
    }
}
