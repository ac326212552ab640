use crate::{OptionList, QuestionTypeName};

/// Error type for survey model operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// Removing the entry would leave the list empty.
    #[error("Cannot remove the last entry of {list}")]
    LastOption { list: OptionList },

    /// Metadata whose shape belongs to a different question type.
    #[error(
        "Metadata for {} does not fit a {} question",
        type_label(.found),
        type_label(.expected)
    )]
    MetadataMismatch {
        expected: Option<QuestionTypeName>,
        found: Option<QuestionTypeName>,
    },

    /// A type name the registry does not know.
    #[error("Unknown question type: {0}")]
    UnknownQuestionType(String),

    /// Metadata could not be encoded for the persistence API.
    #[error("Failed to encode metadata: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failure inside a persistence or analytics collaborator.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error is the last-entry guard.
    pub fn is_last_option(&self) -> bool {
        matches!(self, Self::LastOption { .. })
    }
}

fn type_label(name: &Option<QuestionTypeName>) -> String {
    name.map_or_else(|| "untyped".to_owned(), |name| name.to_string())
}
