use std::{error, fmt, io};

pub type StitchResult<T> = Result<T, StitchError>;

/// Errors that abort a stitching run.
///
/// Missing alternate path files are not represented here: they are an
/// expected condition, skipped with a notice on stderr.
#[derive(Debug)]
pub enum StitchError {
    /// An unrecognized line in a scaffold-graph or path file. Carries the
    /// offending file and line.
    Format { file: String, line: String },
    /// Upstream data inconsistency: a duplicate edge during primary
    /// ingestion, a non-linear graph after branch resolution, or a
    /// non-unique sink in a component assumed linear.
    Invariant(String),
    /// Wrapper for an IO error.
    Io(io::Error),
}

impl fmt::Display for StitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StitchError::Format { file, line } => {
                write!(f, "unexpected line in {}: {}", file, line)
            }
            StitchError::Invariant(msg) => write!(f, "invariant violation: {}", msg),
            StitchError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for StitchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            StitchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StitchError {
    fn from(err: io::Error) -> Self {
        StitchError::Io(err)
    }
}
