use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Board operation failures. The board is left unchanged whenever one of
/// these is returned.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Please provide a {0}.")]
    MissingInput(&'static str),

    #[error("No column available for the task ({0}). Please check board configuration.")]
    InvalidTarget(String),

    #[error("Task \"{0}\" not found.")]
    TaskNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
