use thiserror::Error;

#[derive(Debug, Error)]
pub enum RationError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Candidate {id} is missing its {signal} score")]
    MissingScore { id: String, signal: &'static str },

    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RationError>;
