mod commands;
mod config;
mod errors;
mod geocode;
mod normalize;
mod query;
mod verification;

use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use commands::{
    service_health, validate_address, AddressType, ServiceHealth, ValidateAddressPayload,
    ValidationReply,
};
pub use config::{AppConfig, PublicAppConfig, DEFAULT_GEOCODER_BASE_URL, DEFAULT_GEOCODER_USER_AGENT};
pub use errors::{AppError, AppResult};
pub use geocode::{
    select_best, AddressParts, CandidateSource, GeocodeCandidate, GeocodeService, NominatimClient,
    ProviderId,
};
pub use normalize::{normalize, NormalizedAddress};
pub use query::build_query;
pub use verification::{classify, AddressVerifier, Confidence, VerificationOutcome};

/// Per-process wiring shared by the transport layer. Holds no per-request state.
pub struct AppState {
    config: AppConfig,
    verifier: AddressVerifier,
}

impl AppState {
    pub fn initialize() -> AppResult<Self> {
        init_tracing();
        let config = AppConfig::from_env();
        let verifier = AddressVerifier::new(&config)?;
        tracing::info!(
            base_url = %config.geocoder_base_url,
            timeout_secs = config.geocoder_timeout_secs,
            "address verifier ready"
        );
        Ok(Self { config, verifier })
    }

    pub fn with_verifier(config: AppConfig, verifier: AddressVerifier) -> Self {
        Self { config, verifier }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn verifier(&self) -> &AddressVerifier {
        &self.verifier
    }
}

pub fn init_tracing() {
    static INIT: OnceCell<()> = OnceCell::new();
    let _ = INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,addressify=debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
