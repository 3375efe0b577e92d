/// Failures of a suggestion request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SuggestError {
    /// The request did not satisfy the input schema.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No model is configured (missing API key).
    #[error("suggestions are not configured: GEMINI_API_KEY is not set")]
    NotConfigured,

    /// The model endpoint could not be reached or timed out.
    #[error("network error: {0}")]
    Transport(String),

    /// The model endpoint answered with a non-success status.
    #[error("model returned http {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The model answered, but not with `{ideas: string[]}`.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}
