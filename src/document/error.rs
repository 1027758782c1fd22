use std::path::PathBuf;

/// Errors reported by the line buffer and the document that owns it.
///
/// None of these are fatal. The caller reports them and keeps the current
/// buffer as it was.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("could not open '{}' for reading: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open '{}' for writing: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("maximum number of lines reached ({max})")]
    CapacityExceeded { max: usize },

    #[error("no file is associated with this document; open or create a file first")]
    NoFileAssociated,
}

pub type Result<T> = std::result::Result<T, BufferError>;
