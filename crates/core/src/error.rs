use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Bad configuration value (CLI flag or config file).  Fatal at startup.
    #[error("config error: {0}")]
    Config(String),

    /// The CPU sampler could not be set up, or a single sample failed.
    #[error("sampler error: {0}")]
    Sampler(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
