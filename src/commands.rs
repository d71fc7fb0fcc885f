use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::config::PublicAppConfig;
use crate::errors::AppError;
use crate::normalize::NormalizedAddress;
use crate::verification::{Confidence, VerificationOutcome};
use crate::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateAddressPayload {
    #[serde(default)]
    pub address: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Valid,
    Corrected,
    Unverifiable,
}

impl From<Confidence> for AddressType {
    fn from(value: Confidence) -> Self {
        match value {
            Confidence::Valid => AddressType::Valid,
            Confidence::Corrected => AddressType::Corrected,
        }
    }
}

/// Reply handed back to the transport layer. `status` is the suggested HTTP
/// status and is not part of the serialized body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReply {
    #[serde(skip)]
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<NormalizedAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationReply {
    fn matched(address: NormalizedAddress, confidence: Confidence) -> Self {
        Self {
            status: 200,
            success: true,
            address: Some(address),
            address_type: Some(confidence.into()),
            error: None,
        }
    }

    fn failure(status: u16, message: &str, address_type: Option<AddressType>) -> Self {
        Self {
            status,
            success: false,
            address: None,
            address_type,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub config: PublicAppConfig,
}

pub async fn validate_address(state: &AppState, payload: ValidateAddressPayload) -> ValidationReply {
    let address = match payload.address {
        None | Some(Value::Null) => {
            return ValidationReply::failure(400, "Address is required", None);
        }
        Some(Value::String(text)) if text.is_empty() => {
            return ValidationReply::failure(400, "Address is required", None);
        }
        Some(Value::String(text)) => text,
        Some(_) => {
            return ValidationReply::failure(
                400,
                "Address is required and must be a string",
                None,
            );
        }
    };

    match state.verifier().verify_address(&address).await {
        Ok(VerificationOutcome::Match {
            address,
            confidence,
        }) => ValidationReply::matched(address, confidence),
        Ok(VerificationOutcome::NoMatch) => {
            ValidationReply::failure(404, "Address not found", Some(AddressType::Unverifiable))
        }
        Err(AppError::Input(reason)) => {
            warn!(%reason, "address rejected before lookup");
            ValidationReply::failure(400, "Address is required", None)
        }
        Err(err) if err.is_provider_failure() => {
            error!(?err, "address verification failed upstream");
            ValidationReply::failure(
                502,
                "Upstream geocoding failure",
                Some(AddressType::Unverifiable),
            )
        }
        Err(err) => {
            error!(?err, "address verification failed");
            ValidationReply::failure(500, "Internal server error", None)
        }
    }
}

pub fn service_health(state: &AppState) -> ServiceHealth {
    ServiceHealth {
        status: "OK",
        timestamp: Utc::now(),
        config: state.config().public_profile(),
    }
}
