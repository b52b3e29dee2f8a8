//! Batch cooling crystallizer model.
//!
//! [`BatchCrystallizer`] integrates the moment equations of a seeded sucrose
//! batch under a [`CoolingProfile`] and reports a [`CrystallizerTrajectory`].
//! It implements [`twine_core::Model`] with a [`CrystallizerRun`] as input.
//!
//! # Example
//!
//! ```
//! use sugar_train::models::process::crystallizer::{
//!     BatchCrystallizer, CoolingProfile, CrystallizerSpec,
//! };
//! use uom::si::{
//!     f64::{Mass, ThermodynamicTemperature, Time},
//!     mass::kilogram,
//!     thermodynamic_temperature::degree_celsius,
//!     time::hour,
//! };
//!
//! let spec = CrystallizerSpec::new(
//!     ThermodynamicTemperature::new::<degree_celsius>(70.0),
//!     ThermodynamicTemperature::new::<degree_celsius>(35.0),
//!     Time::new::<hour>(4.0),
//!     Mass::new::<kilogram>(5000.0),
//!     85.0,
//! )?;
//!
//! let crystallizer = BatchCrystallizer::default();
//! let trajectory = crystallizer.simulate(&spec, "linear".parse()?, 100)?;
//! assert!(trajectory.distribution().mean_size > 0.0);
//!
//! let sizing = crystallizer.size(&trajectory, spec.batch_mass())?;
//! assert!(sizing.coil_area.value > 0.0);
//! # Ok::<(), sugar_train::models::process::crystallizer::CrystallizerError>(())
//! ```

mod core;

pub use self::core::{
    CoolingProfile, CrystallizationKinetics, CrystallizerError, CrystallizerParameters,
    CrystallizerSpec, CrystallizerTrajectory, EquipmentSizing, IntegrationMethod,
    IntegratorConfig, Moments, SizeDistribution, SizingParameters, TrajectoryPoint,
};

use twine_core::Model;
use uom::si::f64::Mass;

use crate::support::thermo::{PropertyProvider, model::SugarSolution};

/// Input of a single crystallizer simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystallizerRun {
    pub spec: CrystallizerSpec,
    pub profile: CoolingProfile,

    /// Number of reporting nodes, including both ends of the batch.
    pub n_points: usize,
}

/// Results of running every standard profile on the same batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileComparison {
    trajectories: Vec<CrystallizerTrajectory>,
    best: usize,
}

impl ProfileComparison {
    /// One trajectory per profile, in the order of [`CoolingProfile::standard`].
    #[must_use]
    pub fn trajectories(&self) -> &[CrystallizerTrajectory] {
        &self.trajectories
    }

    /// The run with the narrowest size distribution (lowest CV).
    ///
    /// Ties go to the earlier profile.
    #[must_use]
    pub fn best(&self) -> &CrystallizerTrajectory {
        &self.trajectories[self.best]
    }
}

/// Batch cooling crystallizer bound to a property provider.
#[derive(Debug, Clone)]
pub struct BatchCrystallizer<P = SugarSolution> {
    provider: P,
    kinetics: CrystallizationKinetics,
    parameters: CrystallizerParameters,
    config: IntegratorConfig,
    sizing: SizingParameters,
}

impl Default for BatchCrystallizer<SugarSolution> {
    fn default() -> Self {
        Self::new(SugarSolution::new())
    }
}

impl<P: PropertyProvider> BatchCrystallizer<P> {
    /// Creates a crystallizer with default kinetics, properties and settings.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            kinetics: CrystallizationKinetics::default(),
            parameters: CrystallizerParameters::default(),
            config: IntegratorConfig::default(),
            sizing: SizingParameters::default(),
        }
    }

    #[must_use]
    pub fn with_kinetics(mut self, kinetics: CrystallizationKinetics) -> Self {
        self.kinetics = kinetics;
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: CrystallizerParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Replaces the integration method, tolerances and budget.
    #[must_use]
    pub fn with_config(mut self, config: IntegratorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingParameters) -> Self {
        self.sizing = sizing;
        self
    }

    #[must_use]
    pub fn kinetics(&self) -> &CrystallizationKinetics {
        &self.kinetics
    }

    #[must_use]
    pub fn parameters(&self) -> &CrystallizerParameters {
        &self.parameters
    }

    #[must_use]
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Simulates `spec` under `profile`, reporting at `n_points` evenly
    /// spaced times.
    ///
    /// # Errors
    ///
    /// Returns [`CrystallizerError`] on invalid settings, integrator failure
    /// or budget exhaustion, or property failures.
    pub fn simulate(
        &self,
        spec: &CrystallizerSpec,
        profile: CoolingProfile,
        n_points: usize,
    ) -> Result<CrystallizerTrajectory, CrystallizerError> {
        self::core::simulate(
            &self.provider,
            &self.kinetics,
            &self.parameters,
            &self.config,
            spec,
            profile,
            n_points,
        )
    }

    /// Runs `spec` under every standard profile and picks the lowest CV.
    ///
    /// # Errors
    ///
    /// Returns the first [`CrystallizerError`] raised by any run.
    pub fn compare_profiles(
        &self,
        spec: &CrystallizerSpec,
        n_points: usize,
    ) -> Result<ProfileComparison, CrystallizerError> {
        let trajectories = CoolingProfile::standard()
            .into_iter()
            .map(|profile| self.simulate(spec, profile, n_points))
            .collect::<Result<Vec<_>, _>>()?;

        let mut best = 0;
        for (i, trajectory) in trajectories.iter().enumerate() {
            let cv = trajectory.distribution().coefficient_of_variation;
            if cv < trajectories[best].distribution().coefficient_of_variation {
                best = i;
            }
        }
        log::debug!(
            "{} cooling gives the lowest CV",
            trajectories[best].profile()
        );

        Ok(ProfileComparison { trajectories, best })
    }

    /// Sizes the vessel for `batch_mass` cooled as in `trajectory`.
    ///
    /// # Errors
    ///
    /// Returns [`CrystallizerError::InvalidConfiguration`] if a sizing rule or
    /// the batch mass is not strictly positive.
    pub fn size(
        &self,
        trajectory: &CrystallizerTrajectory,
        batch_mass: Mass,
    ) -> Result<EquipmentSizing, CrystallizerError> {
        self::core::size(&self.sizing, trajectory.spec(), batch_mass)
    }
}

impl<P: PropertyProvider> Model for BatchCrystallizer<P> {
    type Input = CrystallizerRun;
    type Output = CrystallizerTrajectory;
    type Error = CrystallizerError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.simulate(&input.spec, input.profile, input.n_points)
    }
}
