use thiserror::Error;

/// An error raised by a user-supplied `transform` or `default` callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a mapping operation.
///
/// Missing data is never an error; only callbacks can fail a mapping.
#[derive(Debug, Error)]
pub enum MapError {
    /// The callback's own error, unchanged.
    #[error("{0}")]
    Callback(#[from] CallbackError),
}

/// A destination spec or mapping table that cannot be read from JSON.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    #[error("transform functions cannot be expressed in JSON")]
    TransformNotSupported,

    #[error("unsupported destination spec: {0}")]
    Unsupported(String),

    #[error("mapping table must be a JSON object")]
    TableNotObject,
}
