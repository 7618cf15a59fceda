use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReliabilityError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("SENTRY_TOKEN is not set, a Sentry auth token is required")]
    MissingToken,

    #[error("Invalid LOG_LEVEL '{0}' (expected trace, debug, info, warn, error or off)")]
    InvalidLogLevel(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Sentry API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed pagination header: {0}")]
    Pagination(String),

    #[error("Cannot compute MTTR: no first_seen/set_resolved pairs found")]
    NoRepairPairs,

    #[error("Cannot compute MTBF: need at least two events, found {0}")]
    NotEnoughEvents(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ReliabilityError>;
