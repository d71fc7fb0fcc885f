use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::query::build_query;

const BODY_EXCERPT_CHARS: usize = 200;

/// One search result as returned by the provider. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub display_name: String,
    pub importance: f64,
    #[serde(default)]
    pub address: Option<AddressParts>,
    #[serde(default)]
    pub place_id: Option<ProviderId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

/// Provider identifiers arrive as numbers from Nominatim and as strings from
/// some compatible services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "postcode")]
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Picks the candidate with the highest importance; the earliest one wins a tie.
pub fn select_best(candidates: &[GeocodeCandidate]) -> Option<&GeocodeCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.importance <= current.importance => Some(current),
        Some(current) if candidate.importance.is_nan() => Some(current),
        _ => Some(candidate),
    })
}

#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn search(&self, address: &str) -> AppResult<Vec<GeocodeCandidate>>;
}

#[derive(Clone)]
pub struct GeocodeService {
    inner: Arc<dyn CandidateSource>,
}

impl GeocodeService {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = NominatimClient::new(config)?;
        Ok(Self {
            inner: Arc::new(client),
        })
    }

    pub fn from_source(source: Arc<dyn CandidateSource>) -> Self {
        Self { inner: source }
    }

    pub async fn fetch_best_candidate(&self, address: &str) -> AppResult<Option<GeocodeCandidate>> {
        let candidates = self.inner.search(address).await?;
        debug!(count = candidates.len(), "geocoding candidates received");
        Ok(select_best(&candidates).cloned())
    }
}

/// Nominatim-compatible search client. One attempt per lookup, no retries.
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Url::parse(&config.geocoder_base_url).map_err(|err| {
            AppError::Config(format!(
                "invalid geocoder base url {:?}: {err}",
                config.geocoder_base_url
            ))
        })?;

        let mut builder = reqwest::Client::builder().user_agent(config.geocoder_user_agent.as_str());
        if let Some(timeout) = config.geocoder_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Config(format!("failed to build geocoder client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.geocoder_base_url.clone(),
        })
    }
}

#[async_trait]
impl CandidateSource for NominatimClient {
    async fn search(&self, address: &str) -> AppResult<Vec<GeocodeCandidate>> {
        let url = build_query(&self.base_url, address);
        debug!(%url, "querying geocoding provider");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            warn!(status = status.as_u16(), %reason, "geocoding provider rejected request");
            return Err(AppError::ProviderStatus {
                status: status.as_u16(),
                reason,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !content_type
            .as_deref()
            .is_some_and(|value| value.contains("application/json"))
        {
            let body = response.text().await?;
            warn!(?content_type, "geocoding provider returned a non-JSON body");
            return Err(AppError::ProviderContentType {
                content_type,
                excerpt: excerpt(&body),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Vec<GeocodeCandidate>>(&body).map_err(|err| {
            warn!(?err, "geocoding response did not match the candidate shape");
            AppError::ProviderParse(err.to_string())
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
