/// Represents all possible errors that can occur when working with cat/dat archives.
///
/// This enum is used throughout the crate to provide detailed error information for
/// operations that may fail, such as catalog parsing, data access, and extraction.
#[derive(Debug)]
pub enum CatError {
    /// Represents an error that occurs when a catalog line cannot be parsed.
    MalformedCatalog(String),
    /// Represents an error that occurs when a catalog's paired data file is absent.
    MissingDataFile(String),
    /// Represents an error that occurs when a data file is shorter than an entry requires.
    TruncatedArchive(String),
    /// Represents an error that occurs when an extracted file cannot be written.
    DestinationWrite(String),
    /// Represents an error that occurs when a file or directory is not found.
    FileNotFound(String),
    /// Represents an error that occurs during I/O operations.
    Io(std::io::Error),
    /// Represents an error that occurs for any other reason not covered by the above variants.
    Other(String),
}

/// Provides a user-friendly string representation for each error variant in `CatError`.
impl std::fmt::Display for CatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatError::MalformedCatalog(err) => write!(f, "Malformed catalog: {err}"),
            CatError::MissingDataFile(name) => write!(f, "Missing data file: {name}"),
            CatError::TruncatedArchive(err) => write!(f, "Truncated archive: {err}"),
            CatError::DestinationWrite(err) => write!(f, "Failed to write destination: {err}"),
            CatError::FileNotFound(name) => write!(f, "File not found: {name}"),
            CatError::Io(err) => write!(f, "I/O error: {err}"),
            CatError::Other(err) => write!(f, "Catalog error: {err}"),
        }
    }
}

/// Implements the standard error trait for `CatError`, allowing it to be used with
/// error chaining and other error handling utilities.
impl std::error::Error for CatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Allows automatic conversion from `std::io::Error` to `CatError`.
impl From<std::io::Error> for CatError {
    fn from(error: std::io::Error) -> Self {
        CatError::Io(error)
    }
}
