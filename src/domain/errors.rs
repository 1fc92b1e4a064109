use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the whole dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    DataSource(DataSourceError),
    Ui(UiError),
}

/// Failure signal produced by the market-data source
#[derive(Debug, Clone, PartialEq)]
pub enum DataSourceError {
    /// Request could not complete, returned a non-2xx status, or was unreadable
    NetworkFailure(NetworkError),
    /// Well-formed response without usable data
    EmptyResult(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    RequestFailed(String),
    HttpStatus { status: u16, status_text: String },
    InvalidPayload(String),
}

/// Browser plumbing errors; logged, never fed into the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    WindowUnavailable,
    ElementNotFound(String),
    CanvasContextUnavailable(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::DataSource(e) => write!(f, "Data Source Error: {}", e),
            AppError::Ui(e) => write!(f, "UI Error: {}", e),
        }
    }
}

impl Display for DataSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DataSourceError::NetworkFailure(e) => write!(f, "Network failure: {}", e),
            DataSourceError::EmptyResult(what) => write!(f, "Empty result: {}", what),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NetworkError::RequestFailed(msg) => write!(f, "request failed: {}", msg),
            NetworkError::HttpStatus { status, status_text } => {
                write!(f, "HTTP error: {} - {}", status, status_text)
            }
            NetworkError::InvalidPayload(msg) => write!(f, "invalid payload: {}", msg),
        }
    }
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UiError::WindowUnavailable => write!(f, "window not available"),
            UiError::ElementNotFound(id) => write!(f, "element '{}' not found", id),
            UiError::CanvasContextUnavailable(msg) => write!(f, "canvas context unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for DataSourceError {}
impl std::error::Error for NetworkError {}
impl std::error::Error for UiError {}

impl From<NetworkError> for DataSourceError {
    fn from(error: NetworkError) -> Self {
        DataSourceError::NetworkFailure(error)
    }
}

impl From<DataSourceError> for AppError {
    fn from(error: DataSourceError) -> Self {
        AppError::DataSource(error)
    }
}

impl From<UiError> for AppError {
    fn from(error: UiError) -> Self {
        AppError::Ui(error)
    }
}

pub type DataSourceResult<T> = Result<T, DataSourceError>;
pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_reads_like_the_response_line() {
        let err: DataSourceError = NetworkError::HttpStatus {
            status: 429,
            status_text: "Too Many Requests".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Network failure: HTTP error: 429 - Too Many Requests");
    }

    #[test]
    fn wraps_into_root_error() {
        let err: AppError = DataSourceError::EmptyResult("catalog".to_string()).into();
        assert_eq!(err.to_string(), "Data Source Error: Empty result: catalog");
    }

    #[test]
    fn canvas_failures_read_as_ui_errors() {
        let err: AppError = UiError::ElementNotFound("price-chart".to_string()).into();
        assert_eq!(err.to_string(), "UI Error: element 'price-chart' not found");
    }
}
