use reqwest::StatusCode;

/// Why a weather lookup produced no report.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Any non-success status. The provider's reason is not interpreted.
    #[error("OpenWeather request failed with status {status}: {body}")]
    NotFound { status: StatusCode, body: String },

    /// Transport failure. The request URL is stripped since it carries the API key.
    #[error("Failed to reach OpenWeather: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to parse OpenWeather response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Network(err.without_url())
    }
}

/// Failure of the device location collaborator. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied.")]
    PermissionDenied,

    #[error("Geolocation not available.")]
    Unavailable,
}
