use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Every variant raised from a running traversal or scan task is fatal to
/// the whole process; see `search::fatal`.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("failed to stat {path}: {source}")]
    PathStat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn path_stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathStat {
            path: path.into(),
            source,
        }
    }

    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "entity not found")
    }

    #[test]
    fn test_error_creation() {
        let path = Path::new("test.txt");
        let err = SearchError::path_stat(path, not_found());
        assert!(matches!(err, SearchError::PathStat { .. }));

        let err = SearchError::directory_read(path, not_found());
        assert!(matches!(err, SearchError::DirectoryRead { .. }));

        let err = SearchError::file_open(path, not_found());
        assert!(matches!(err, SearchError::FileOpen { .. }));

        let err = SearchError::file_read(path, not_found());
        assert!(matches!(err, SearchError::FileRead { .. }));

        let err = SearchError::invalid_pattern("unclosed group");
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::path_stat("missing.txt", not_found());
        assert_eq!(
            err.to_string(),
            "failed to stat missing.txt: entity not found"
        );

        let err = SearchError::directory_read("locked", not_found());
        assert_eq!(
            err.to_string(),
            "failed to read directory locked: entity not found"
        );

        let err = SearchError::invalid_pattern("unclosed group");
        assert_eq!(err.to_string(), "invalid pattern: unclosed group");

        let err = SearchError::config_error("missing required field");
        assert_eq!(
            err.to_string(),
            "configuration error: missing required field"
        );
    }
}
