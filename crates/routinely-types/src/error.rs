use thiserror::Error;

/// Errors raised while loading the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(String),

    #[error("failed to fetch catalog: {0}")]
    Http(String),

    #[error("invalid catalog document: {0}")]
    Parse(String),
}

/// Errors from the persisted key-value state (selection, history, preferences).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from a single call to the remote assistant.
///
/// These never reach the conversation: the client turns every variant into
/// the fixed apology reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned status {status}")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("empty response body")]
    EmptyResponse,
}
