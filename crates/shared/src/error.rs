use thiserror::Error;

/// Client-side rejection raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a valid PDF file.")]
    NotPdf { media_type: String },
    #[error("PDF is too large ({size_bytes} bytes); the limit is {limit_bytes} bytes.")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}
