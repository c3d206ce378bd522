use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("no recognized words supplied")]
    EmptyInput,
    #[error("no canonical section matched the recognized words")]
    NoSectionMatch,
    #[error("section {section_id} has no canonical words to align against")]
    DegenerateAlignment { section_id: u32 },
    #[error("canonical store error while {context}: {message}")]
    Store {
        context: &'static str,
        message: String,
    },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl AlignmentError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    /// For `CanonicalStore` implementations outside this crate.
    pub fn store(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Store {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
