use thiserror::Error;

use crate::extract::Layout;

#[derive(Error, Debug)]
pub enum PbpError {
    #[error("Network error fetching {url} after {attempts} attempt(s): {message}")]
    Network {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("No plays matched the {} layout", layout_names(.tried))]
    ParseMismatch { tried: Vec<Layout> },

    #[error("Row {index}: cannot derive {field} from '{value}': {reason}")]
    Normalization {
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl PbpError {
    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PbpError::Network { .. })
    }
}

fn layout_names(tried: &[Layout]) -> String {
    tried.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" or ")
}

pub type Result<T> = std::result::Result<T, PbpError>;
