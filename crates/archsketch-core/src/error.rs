//! Error types for graph, store and settings operations

use thiserror::Error;

/// Violations of the graph contract.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("component '{0}' has an empty icon category")]
    MissingIcon(String),

    #[error("component id '{0}' is used more than once")]
    DuplicateId(String),

    #[error("connection {from} -> {to} references unknown component '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from a diagram store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("diagram '{0}' not found")]
    NotFound(String),

    #[error("diagram store lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors reading or writing the AI settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings format error: {0}")]
    Format(#[from] serde_json::Error),
}
