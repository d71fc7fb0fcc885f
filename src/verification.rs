use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::geocode::{GeocodeCandidate, GeocodeService};
use crate::normalize::{normalize, NormalizedAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Valid,
    Corrected,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Valid => "valid",
            Confidence::Corrected => "corrected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    NoMatch,
    Match {
        address: NormalizedAddress,
        confidence: Confidence,
    },
}

/// Exact, case-sensitive comparison against the provider's display name.
pub fn classify(input: &str, candidate: &GeocodeCandidate) -> Confidence {
    if input == candidate.display_name {
        Confidence::Valid
    } else {
        Confidence::Corrected
    }
}

#[derive(Clone)]
pub struct AddressVerifier {
    geocoder: GeocodeService,
}

impl AddressVerifier {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            geocoder: GeocodeService::new(config)?,
        })
    }

    pub fn with_geocoder(geocoder: GeocodeService) -> Self {
        Self { geocoder }
    }

    pub async fn verify_address(&self, input: &str) -> AppResult<VerificationOutcome> {
        if input.is_empty() {
            return Err(AppError::Input("address is required".into()));
        }

        let Some(candidate) = self.geocoder.fetch_best_candidate(input).await? else {
            debug!("no geocoding candidate for address");
            return Ok(VerificationOutcome::NoMatch);
        };

        let confidence = classify(input, &candidate);
        let address = normalize(&candidate);
        info!(
            confidence = confidence.as_str(),
            display_name = %candidate.display_name,
            "address matched"
        );
        Ok(VerificationOutcome::Match {
            address,
            confidence,
        })
    }
}
