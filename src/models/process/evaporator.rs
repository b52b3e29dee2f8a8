//! Multi-effect evaporator model.
//!
//! [`MultiEffectEvaporator`] concentrates a sugar juice through a cascade of
//! effects and reports the solved [`EvaporatorTrain`]. It implements
//! [`twine_core::Model`] with an [`EvaporatorSpec`] as input.
//!
//! # Example
//!
//! ```
//! use sugar_train::models::process::evaporator::{EvaporatorSpec, Feed, MultiEffectEvaporator};
//! use uom::si::{
//!     f64::{MassRate, Pressure, ThermodynamicTemperature},
//!     mass_rate::kilogram_per_second,
//!     pressure::bar,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let feed = Feed::new(
//!     MassRate::new::<kilogram_per_second>(20_000.0 / 3600.0),
//!     0.15,
//!     ThermodynamicTemperature::new::<degree_celsius>(85.0),
//! )?;
//! let spec = EvaporatorSpec::new(
//!     3,
//!     feed,
//!     0.65,
//!     Pressure::new::<bar>(3.5),
//!     Pressure::new::<bar>(0.15),
//! )?;
//!
//! let train = MultiEffectEvaporator::default().solve(&spec)?;
//! assert!(train.steam_economy() > 1.9);
//! # Ok::<(), sugar_train::models::process::evaporator::EvaporatorError>(())
//! ```

mod core;
pub mod sweep;

pub use self::core::{
    EffectState, EvaporatorConfig, EvaporatorError, EvaporatorParameters, EvaporatorSpec,
    EvaporatorTrain, Feed,
};

use twine_core::Model;

use crate::support::thermo::{PropertyProvider, model::SugarSolution};

/// Multi-effect evaporator bound to a property provider.
///
/// Holds no state between solves; every call to [`solve`](Self::solve)
/// builds a fresh train.
#[derive(Debug, Clone)]
pub struct MultiEffectEvaporator<P = SugarSolution> {
    provider: P,
    parameters: EvaporatorParameters,
    config: EvaporatorConfig,
}

impl Default for MultiEffectEvaporator<SugarSolution> {
    fn default() -> Self {
        Self::new(SugarSolution::new())
    }
}

impl<P: PropertyProvider> MultiEffectEvaporator<P> {
    /// Creates an evaporator with default parameters and solver settings.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parameters: EvaporatorParameters::default(),
            config: EvaporatorConfig::default(),
        }
    }

    /// Replaces the modeling assumptions.
    #[must_use]
    pub fn with_parameters(mut self, parameters: EvaporatorParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Replaces the solver budget.
    #[must_use]
    pub fn with_config(mut self, config: EvaporatorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn parameters(&self) -> &EvaporatorParameters {
        &self.parameters
    }

    #[must_use]
    pub fn config(&self) -> &EvaporatorConfig {
        &self.config
    }

    /// Solves the train described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaporatorError`] on invalid parameters, non-convergence,
    /// non-positive driving forces, or property failures.
    pub fn solve(&self, spec: &EvaporatorSpec) -> Result<EvaporatorTrain, EvaporatorError> {
        self::core::solve(&self.provider, spec, &self.parameters, &self.config)
    }
}

impl<P: PropertyProvider> Model for MultiEffectEvaporator<P> {
    type Input = EvaporatorSpec;
    type Output = EvaporatorTrain;
    type Error = EvaporatorError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.solve(input)
    }
}
