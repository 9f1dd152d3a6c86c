use thiserror::Error;

/// Failures at the edges of the scene: incoming portfolio payloads,
/// section lookups requested by the host page, and asset loading.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("invalid portfolio payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("unknown section `{0}`")]
    UnknownSection(String),

    #[error("section `{0}` has no door in the current scene")]
    SectionHidden(&'static str),

    #[error("failed to load portfolio from `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },
}
