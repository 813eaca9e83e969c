use thiserror::Error;
use uuid::Uuid;

/// Rejections from the field mutator. The input document is never modified
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{list} has no item at index {index} (length {len})")]
    IndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },

    #[error("cannot remove the last item from {0}")]
    LastItem(String),

    #[error("item kind does not match list {0}")]
    ItemKindMismatch(String),

    #[error("item id {id} already exists in {list}")]
    DuplicateId { list: String, id: Uuid },

    #[error("unknown field path '{0}'")]
    InvalidPath(String),

    #[error("invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("move {from} -> {to} is out of range for {list} (length {len})")]
    OutOfRange {
        list: String,
        from: usize,
        to: usize,
        len: usize,
    },

    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no saved resume found")]
    Missing,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored resume is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures at either export stage. None of them touch the live document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("unsupported image reference: {0}")]
    UnsupportedImage(String),

    #[error("rendered markup could not be parsed: {0}")]
    Parse(String),

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// The notification shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::Busy => "A PDF is already being generated. Please wait.",
            _ => "Failed to generate PDF. Please try again.",
        }
    }
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Missing => "No saved resume found.",
            StorageError::Io(_) => "Failed to save resume.",
            StorageError::Serde(_) => "Failed to load resume.",
        }
    }
}
