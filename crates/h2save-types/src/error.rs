use std::fmt;

/// Result of one expansion request: the decoded string or a normalized failure.
pub type ExpansionResult = std::result::Result<String, NormalizedError>;

/// Which component boundary a failure was caught at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the selected file failed.
    Ingestion,
    /// The decoder rejected the buffer/format pair.
    Decode,
    /// The tree view could not parse the JSON it was handed.
    Presentation,
    /// Writing a download artifact failed.
    Delivery,
}

/// A failure reduced to a single human-readable message.
///
/// This is the only error shape that reaches the error sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    kind: ErrorKind,
    message: String,
}

impl NormalizedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn ingestion(name: &str, detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Ingestion, format!("Could not read {}: {}", name, detail))
    }

    pub fn decode(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Decode, format!("Could not parse savefile: {}", detail))
    }

    pub fn presentation(detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Presentation,
            format!("Could not display savefile tree: {}", detail),
        )
    }

    pub fn delivery(file_name: &str, detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Delivery,
            format!("Could not save {}: {}", file_name, detail),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NormalizedError {}
