use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid file entry on line {line} (expected 'short_path=disk_path'): {content}")]
    Parse { line: usize, content: String },

    #[error("short path on line {line} is not valid UTF-8: {content}")]
    InvalidUtf8 { line: usize, content: String },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize runfiles: {0}")]
    Runfiles(String),

    #[error("could not locate zipper in runfiles (tried: {})", candidates.join(", "))]
    ToolNotFound { candidates: Vec<String> },

    #[error("{program} failed with {status}")]
    CommandFailed { program: String, status: String },
}

impl Error {
    pub fn usage<T: Into<String>>(msg: T) -> Self {
        Error::Usage(msg.into())
    }

    /// Wrap an I/O error with the operation and path it relates to
    pub fn io<P: Into<PathBuf>>(action: &'static str, path: P, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<clap::Error> for Error {
    fn from(err: clap::Error) -> Self {
        // clap renders a multi-line report; keep the first line only
        let rendered = err.to_string();
        let first = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        Error::Usage(first)
    }
}
