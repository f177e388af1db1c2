//! Error types for the grant publication matcher.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status. No retry is attempted.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, or the status reason when the body is empty
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a status error from a code and response body.
    #[must_use]
    pub fn status_error(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("no response body").to_string()
        } else {
            body
        };
        Self::Status { status: status.as_u16(), message }
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Parse(_) => None,
        }
    }

    /// Returns true if the response arrived but could not be decoded.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Blocking input-validation errors. These halt processing before any API call.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    /// The input table has no column with the required name
    #[error("Input file must contain a column named '{column}'")]
    MissingColumn {
        /// Required column name
        column: String,
    },

    /// More distinct grant identifiers than the batch cap allows
    #[error("Too many unique Grant IDs! The limit is {limit}, but {found} were found.")]
    TooManyGrantIds {
        /// Configured cap
        limit: usize,
        /// Distinct identifiers found
        found: usize,
    },

    /// Grant identifier was empty after trimming
    #[error("Grant ID cannot be empty")]
    EmptyGrantId,

    /// No funder candidate was chosen in manual mode
    #[error("No funder selected for Grant ID {grant_id}")]
    NoFunderSelected {
        /// Grant identifier being resolved
        grant_id: String,
    },

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unreadable spreadsheet workbook
    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    /// I/O error reading input or prompting the operator
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors writing results.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// CSV serialization error
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for input validation.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
