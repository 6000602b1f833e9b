/// Errors raised by the triage core.
///
/// Validation errors are raised before the pipeline runs. Upstream and malformed-output
/// errors fail the single request that hit them; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid symptoms_text: {0}")]
    SymptomsText(#[from] triage_types::TextError),
    #[error("invalid age: {0}")]
    Age(#[from] triage_types::AgeError),

    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(reqwest::Error),

    #[error("guidance service unreachable: {0}")]
    UpstreamTransport(String),
    #[error("guidance service timed out after {0}s")]
    UpstreamTimeout(u64),
    #[error("guidance service returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("guidance service response could not be decoded: {0}")]
    UpstreamDecode(String),
    #[error("malformed guidance payload: {0}")]
    MalformedGuidance(String),
}

impl CoreError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_) | CoreError::SymptomsText(_) | CoreError::Age(_)
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
