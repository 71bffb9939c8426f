use thiserror::Error;

/// Failures of the row resolution pipeline.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A required credential is absent from configuration.
    #[error("Missing {0}")]
    Configuration(String),

    /// Either external call answered with a non-success status.
    #[error("{endpoint} failed {status}")]
    Upstream { endpoint: &'static str, status: u16 },

    /// The request never completed, or its body could not be decoded.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The lookup answered but carried no media identifier.
    #[error("No media_id returned for {0}; ensure the URL is a post/reel and app is configured.")]
    Resolution(String),

    /// Malformed request body at the service boundary.
    #[error("{0}")]
    Validation(String),
}

impl ResolveError {
    pub fn is_configuration(&self) -> bool { matches!(self, Self::Configuration(_)) }
    pub fn is_upstream(&self) -> bool { matches!(self, Self::Upstream { .. }) }
    pub fn is_resolution(&self) -> bool { matches!(self, Self::Resolution(_)) }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
