use thiserror::Error;
use uom::si::f64::TemperatureInterval;

use crate::support::{newton, thermo::PropertyError};

/// Errors that can occur while solving an evaporator train.
#[derive(Debug, Error)]
pub enum EvaporatorError {
    /// The inputs are out of range or contradict each other.
    #[error("invalid configuration: {context}")]
    InvalidConfiguration { context: String },

    /// The balance solve stopped before meeting its tolerance.
    #[error("balance solve did not converge: residual={residual:e} after {iters} iterations")]
    Convergence {
        /// Scaled residual norm at the last iterate.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// The Newton solver failed outright.
    ///
    /// Covers singular Jacobians, non-finite residuals, and property
    /// failures that backtracking could not step around.
    #[error("balance solver failed")]
    Solver(#[from] newton::Error<PropertyError>),

    /// An effect has no positive driving force, so its area is undefined.
    #[error("effect {effect} has a non-positive driving temperature difference: {delta_t:?}")]
    DegenerateGeometry {
        /// One-based effect index.
        effect: usize,
        delta_t: TemperatureInterval,
    },

    /// A property lookup failed outside the solver loop.
    #[error("property evaluation failed: {context}")]
    Property {
        context: String,
        #[source]
        source: PropertyError,
    },
}

impl EvaporatorError {
    pub(super) fn invalid(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    /// Returns a closure that wraps a [`PropertyError`] with `context`.
    pub(super) fn property(context: impl Into<String>) -> impl FnOnce(PropertyError) -> Self {
        let context = context.into();
        move |source| Self::Property { context, source }
    }
}
