// error.rs - Crate-wide error type for the report pipeline

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading tables or rendering charts.
///
/// Every variant is fatal: the pipeline aborts on the first failure and
/// leaves any previously written images on disk.
#[derive(Debug)]
pub enum Error {
    /// An expected input CSV file does not exist.
    FileNotFound(PathBuf),
    /// An input CSV exists but cannot be used: a required column is
    /// missing from the header, or a data cell does not parse as f64.
    MalformedTable { path: PathBuf, detail: String },
    /// The beta columns of the three result tables disagree.
    MisalignedTables { detail: String },
    /// A series pushed into a figure does not match the x-axis length.
    ShapeMismatch {
        label: String,
        expected: usize,
        found: usize,
    },
    /// Reading an input or writing an output image failed at the OS level.
    Io(std::io::Error),
    /// The drawing backend rejected the figure.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileNotFound(path) => {
                write!(f, "input file not found: {}", path.display())
            }
            Error::MalformedTable { path, detail } => {
                write!(f, "malformed table {}: {}", path.display(), detail)
            }
            Error::MisalignedTables { detail } => {
                write!(f, "result tables are misaligned: {detail}")
            }
            Error::ShapeMismatch {
                label,
                expected,
                found,
            } => {
                write!(
                    f,
                    "series '{label}' has {found} points but the x axis has {expected}"
                )
            }
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
