use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::thermo::PropertyError;

/// Errors that can occur while configuring or running a batch crystallizer.
#[derive(Debug, Error)]
pub enum CrystallizerError {
    /// The inputs are out of range or contradict each other.
    #[error("invalid configuration: {context}")]
    InvalidConfiguration { context: String },

    /// The integrator failed or exhausted its evaluation budget.
    #[error("integration did not converge: {context}")]
    Convergence { context: String },

    /// A property lookup failed during the run.
    #[error("property evaluation failed: {context}")]
    Property {
        context: String,
        #[source]
        source: PropertyError,
    },

    /// The saturation onset search failed.
    #[error("saturation onset search failed")]
    Bisection(#[from] bisection::Error),
}

impl CrystallizerError {
    pub(super) fn invalid(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    pub(super) fn convergence(context: impl Into<String>) -> Self {
        Self::Convergence {
            context: context.into(),
        }
    }

    /// Returns a closure that wraps a [`PropertyError`] with `context`.
    pub(super) fn property(context: impl Into<String>) -> impl FnOnce(PropertyError) -> Self {
        let context = context.into();
        move |source| Self::Property { context, source }
    }
}
