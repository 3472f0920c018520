use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while storing one upload. The client only
/// ever sees a bare 500 for any of these; form parse errors never get here.
#[derive(Debug)]
pub enum ReceiveError {
    RelativePath(String),
    CreateDir { dir: PathBuf, source: io::Error },
    MissingFile,
    Unreadable(io::Error),
    Open { path: PathBuf, source: io::Error },
    Copy { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiveError::RelativePath(to) => {
                write!(f, "destination {to:?} is not an absolute path")
            }
            ReceiveError::CreateDir { dir, source } => {
                write!(f, "create dest dir {} failed: {source}", dir.display())
            }
            ReceiveError::MissingFile => write!(f, "form field \"file\" is missing"),
            ReceiveError::Unreadable(e) => write!(f, "read form file failed: {e}"),
            ReceiveError::Open { path, source } => {
                write!(f, "create file {} failed: {source}", path.display())
            }
            ReceiveError::Copy { path, source } => {
                write!(f, "copy file to {} failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReceiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiveError::CreateDir { source, .. }
            | ReceiveError::Open { source, .. }
            | ReceiveError::Copy { source, .. } => Some(source),
            ReceiveError::Unreadable(e) => Some(e),
            ReceiveError::RelativePath(_) | ReceiveError::MissingFile => None,
        }
    }
}
