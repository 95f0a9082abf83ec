//! Error types. Only construction and configuration can fail; `update` never does.

/// Errors raised while reading a physics configuration resource.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (includes missing required fields)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised by engine construction and geometry replacement.
#[derive(thiserror::Error, Debug)]
pub enum PhysicsError {
    /// A tuning value is negative, non-finite or out of range.
    #[error("invalid physics config: `{field}` = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    /// Tile grid rows are ragged or the cell size is unusable.
    #[error("invalid tile grid: {0}")]
    InvalidTileGrid(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
