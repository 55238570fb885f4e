use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("{var} still holds the placeholder value; set it to a real Google Places API key")]
    PlaceholderApiKey { var: String },

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read search plan {path}: {source}")]
    SearchPlanIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search plan: {0}")]
    SearchPlanParse(#[from] serde_yaml::Error),

    #[error("invalid search plan: {0}")]
    Validation(String),
}
