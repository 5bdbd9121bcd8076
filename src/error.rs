//! Error types.
//!
//! `AppError` is what reaches `main`: a message plus the process exit code.
//! `FetchError` is the typed failure of the income-statement fetch; the TUI
//! keeps it as a status line while the `table` command converts it into an
//! `AppError`.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a fetch of the income statement failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// `FMP_API_KEY` is not set (neither in the environment nor in `.env`).
    MissingApiKey,
    /// The request never produced a response (DNS, TLS, connection reset...).
    Request(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not a JSON array of income-statement records.
    Decode(String),
    /// FMP answered with an error object (`{"Error Message": "..."}`).
    Api(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::MissingApiKey => write!(f, "Missing FMP_API_KEY in environment (.env)."),
            FetchError::Request(e) => write!(f, "FMP request failed: {e}"),
            FetchError::Status(code) => write!(f, "FMP request failed with status {code}."),
            FetchError::Decode(e) => write!(f, "Failed to parse FMP response: {e}"),
            FetchError::Api(msg) => write!(f, "FMP returned an error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match err {
            FetchError::MissingApiKey => 2,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_maps_to_exit_codes() {
        let missing: AppError = FetchError::MissingApiKey.into();
        assert_eq!(missing.exit_code(), 2);

        let status: AppError = FetchError::Status(503).into();
        assert_eq!(status.exit_code(), 4);
        assert_eq!(status.to_string(), "FMP request failed with status 503.");
    }
}
