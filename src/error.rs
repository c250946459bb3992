use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Per-item failures. None of these abort a run; callers log and move on.
#[derive(thiserror::Error, Debug)]
pub enum TidyError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot percent-decode {name:?}: {source}")]
    Decode {
        name: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("target already exists: {} -> {}", .from.display(), .to.display())]
    Collision { from: PathBuf, to: PathBuf },

    #[error("cleaned name is empty for {}", .path.display())]
    EmptyName { path: PathBuf },

    #[error("cleaned name {name:?} for {} contains a path separator", .path.display())]
    InvalidName { path: PathBuf, name: String },
}

impl TidyError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TidyError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<TidyError> for io::Error {
    fn from(err: TidyError) -> Self {
        match err {
            TidyError::Io { source, .. } => source,
            TidyError::Collision { .. } => io::Error::new(io::ErrorKind::AlreadyExists, err.to_string()),
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}
