use std::fmt;

use thiserror::Error;

/// Pipeline step an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ValidatorSelection,
    DelegationGrouping,
    VoteExtraction,
    Attribution,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidatorSelection => "validator selection",
            Self::DelegationGrouping => "delegation grouping",
            Self::VoteExtraction => "vote extraction",
            Self::Attribution => "attribution",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any of these aborts the whole run; no partial result is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TallyError {
    #[error("{stage}: missing or malformed field '{field}'")]
    MissingField { stage: Stage, field: String },

    #[error("{stage}: field '{field}' is not a valid number: {value:?}")]
    InvalidNumber {
        stage: Stage,
        field: String,
        value: String,
    },

    #[error("{stage}: {what} has an unexpected shape")]
    InvalidShape { stage: Stage, what: String },

    #[error("{stage}: arithmetic overflow in {context}")]
    Overflow { stage: Stage, context: String },
}

impl TallyError {
    pub(crate) fn missing(stage: Stage, field: impl Into<String>) -> Self {
        Self::MissingField {
            stage,
            field: field.into(),
        }
    }

    pub(crate) fn invalid_number(
        stage: Stage,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            stage,
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn overflow(stage: Stage, context: impl Into<String>) -> Self {
        Self::Overflow {
            stage,
            context: context.into(),
        }
    }

    /// The step that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::MissingField { stage, .. }
            | Self::InvalidNumber { stage, .. }
            | Self::InvalidShape { stage, .. }
            | Self::Overflow { stage, .. } => *stage,
        }
    }
}
