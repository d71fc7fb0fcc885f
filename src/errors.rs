use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid address input: {0}")]
    Input(String),
    #[error("geocoding provider error: {status} {reason}")]
    ProviderStatus { status: u16, reason: String },
    #[error(
        "expected JSON response but got: {}. Response: {}...",
        .content_type.as_deref().unwrap_or("<none>"),
        .excerpt
    )]
    ProviderContentType {
        content_type: Option<String>,
        excerpt: String,
    },
    #[error("failed to decode geocoding response: {0}")]
    ProviderParse(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Config(String),
}

impl AppError {
    /// True for every failure that originates at the geocoding provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            AppError::ProviderStatus { .. }
                | AppError::ProviderContentType { .. }
                | AppError::ProviderParse(_)
                | AppError::Transport(_)
        )
    }
}
