//! Error types for source transforms

/// Errors that stop a source transform from producing output
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("expected {expected} source documents, got {found}")]
    DocumentCount { expected: usize, found: usize },

    #[error("source document {index} has an unexpected shape: {source}")]
    Document {
        index: usize,
        source: serde_json::Error,
    },
}

/// Errors from walking the item component graph
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("component cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}
