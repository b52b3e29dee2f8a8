use thiserror::Error;

/// Errors that may occur when evaluating thermophysical properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The input is outside the model's valid domain.
    ///
    /// For example, a pressure above the critical point of water.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }

    pub(crate) fn calculation(context: impl Into<String>) -> Self {
        Self::Calculation {
            context: context.into(),
        }
    }
}
