use std::{io, path::PathBuf};

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// Signal byte used when a line-convention flag is unset.
pub const NUL: u8 = 0x00;

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The provided output buffer was too small.
    ///
    /// `required` is the number of bytes necessary to hold the worst-case
    /// expansion of the input.
    #[error("output buffer is too small; required {required} bytes")]
    OutputBufferTooSmall { required: usize },

    /// Source and destination name the same file.
    #[error("source and destination are the same file")]
    SameFile,

    /// The source file could not be opened for reading.
    #[error("cannot open source {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file could not be created.
    #[error("cannot create destination {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
