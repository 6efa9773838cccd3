use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("failed to read genesis file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("genesis is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("genesis root is not a JSON object")]
    NotAnObject,
}
