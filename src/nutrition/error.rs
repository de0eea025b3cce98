use thiserror::Error;

/// Failure modes of one analysis round trip. The controller collapses all of
/// them into a single generic user-facing message; the variants exist for
/// diagnostics.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("nutrition service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("nutrition service error ({status}): {body}")]
    Upstream { status: u16, body: String },
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("could not decode the model response: {0}")]
    MalformedResponse(String),
}
