use thiserror::Error;

/// Fallback shown when the backend gives us nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "Đã xảy ra lỗi. Vui lòng thử lại.";

/// Top-level application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// API call errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// Authentication / session errors
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    /// Client-side validation errors (detected before any network call)
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// File operation errors
    #[error("file error: {0}")]
    File(#[from] FileError),
    /// Business-rule errors
    #[error("business error: {0}")]
    Business(#[from] BusinessError),
    /// Configuration errors
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Other errors (wrapping third-party library errors)
    #[error("error: {0}")]
    Other(String),
}

/// API call errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, ...)
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The backend answered with a non-success status.
    ///
    /// `message` is the server-provided text when the body carried one; the UI
    /// layer shows it verbatim.
    #[error("{endpoint} returned {status}: {message}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// The response body could not be decoded
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// The message a view should present for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::BadResponse { message, .. } if !message.is_empty() => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

/// Authentication / session errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the token (401). The session has already been
    /// cleared when this surfaces.
    #[error("unauthorized (session cleared, return to {return_path:?})")]
    Unauthorized { return_path: Option<String> },
    /// An operation required a logged-in user
    #[error("login required: {action}")]
    LoginRequired { action: String },
    /// The login envelope reported failure
    #[error("login rejected: {message}")]
    LoginFailed { message: String },
}

/// Client-side validation errors
///
/// These block the request entirely; no network call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("a PDF file is required before submitting")]
    MissingFile,
    #[error("a revision comment is required")]
    MissingRevisionComment,
    #[error("a reviewer must be selected")]
    MissingReviewer,
    #[error("a review decision is required")]
    MissingDecision,
    #[error("field `{field}` is required")]
    MissingField { field: &'static str },
}

/// File operation errors
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to parse TOML {path}: {source}")]
    TomlParse {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Business-rule errors
#[derive(Debug, Error)]
pub enum BusinessError {
    /// A guest asked for a page past the free preview. The reader presents a
    /// login prompt instead of rendering.
    #[error("page index {page_index} is beyond the guest preview (max {max_guest_page_index})")]
    PageAccessDenied {
        page_index: usize,
        max_guest_page_index: i64,
    },
    /// The submission already reached a terminal status
    #[error("submission {submission_id} is already {status}")]
    SubmissionFinalized {
        submission_id: String,
        status: String,
    },
    /// The acting user is not the original submitter
    #[error("only the submitter may revise submission {submission_id}")]
    NotSubmitter { submission_id: String },
    /// Requested page does not exist in the document
    #[error("page {page} is out of range (document has {total_pages} pages)")]
    PageOutOfRange { page: usize, total_pages: usize },
    /// The document has no file attached
    #[error("document {document_id} has no file attached")]
    NoFile { document_id: String },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var_name} has value '{value}', expected {expected_type}")]
    EnvVarParse {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
    #[error("config file {path} is invalid: {message}")]
    InvalidFile { path: String, message: String },
}

// ========== Conversions from common error types ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::Decode {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::Read {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== Convenience constructors ==========

impl AppError {
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::Request {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    pub fn bad_response(
        endpoint: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        })
    }

    pub fn login_required(action: impl Into<String>) -> Self {
        AppError::Auth(AuthError::LoginRequired {
            action: action.into(),
        })
    }

    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::Write {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// The message a view should present for this failure: server-provided
    /// text when we have it, otherwise the generic fallback.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Auth(AuthError::LoginFailed { message }) if !message.is_empty() => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    /// True when this error should trigger the login prompt in a reader view.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            AppError::Business(BusinessError::PageAccessDenied { .. })
        )
    }
}

// ========== Result type alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
