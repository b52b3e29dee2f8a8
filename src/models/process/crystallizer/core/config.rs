use uom::si::{f64::MassDensity, mass_density::kilogram_per_cubic_meter};

use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

use super::{CrystallizerError, Moments};

/// Physical properties of the crystal and the syrup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystallizerParameters {
    /// Density of solid sucrose.
    pub crystal_density: MassDensity,

    /// Density of the syrup, used to convert batch mass to volume.
    pub syrup_density: MassDensity,

    /// Volume shape factor `k_v` relating crystal volume to `L³`.
    pub shape_factor: f64,

    /// Initial moments of the seed population.
    pub seed: Moments,

    /// Lower bound of the suspension density seen by the nucleation law.
    pub suspension_density_floor: MassDensity,
}

impl Default for CrystallizerParameters {
    fn default() -> Self {
        Self {
            crystal_density: MassDensity::new::<kilogram_per_cubic_meter>(1500.0),
            syrup_density: MassDensity::new::<kilogram_per_cubic_meter>(1300.0),
            shape_factor: std::f64::consts::PI / 6.0,
            seed: Moments::SEED,
            suspension_density_floor: MassDensity::new::<kilogram_per_cubic_meter>(1e-6),
        }
    }
}

impl CrystallizerParameters {
    pub(super) fn validate(&self) -> Result<(), CrystallizerError> {
        let check = |name: &str, result: Result<(), ConstraintError>| {
            result.map_err(|err| CrystallizerError::invalid(format!("{name}: {err}")))
        };

        check("crystal density", StrictlyPositive::check(&self.crystal_density))?;
        check("syrup density", StrictlyPositive::check(&self.syrup_density))?;
        check("shape factor", StrictlyPositive::check(&self.shape_factor))?;
        check(
            "suspension density floor",
            StrictlyPositive::check(&self.suspension_density_floor),
        )?;
        // The integrator scales each moment by its seed value.
        for (i, m) in self.seed.to_array().iter().enumerate() {
            check(&format!("seed moment m{i}"), StrictlyPositive::check(m))?;
        }
        Ok(())
    }
}

/// Integration scheme used for the moment equations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Adaptive explicit Dormand-Prince 5(4).
    Dopri5,

    /// Adaptive implicit Radau IIA of order 5, suited to stiff runs.
    #[default]
    Radau5,
}

/// Tolerances and budget of the population balance integration.
///
/// The state is rescaled by the seed moments and the initial concentration
/// before integration, so every component starts at one and the scalar
/// tolerances below apply uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorConfig {
    pub method: IntegrationMethod,

    /// Relative tolerance on the scaled state.
    pub rtol: f64,

    /// Absolute tolerance on the scaled state.
    pub atol: f64,

    /// Maximum number of right-hand-side evaluations for a whole run.
    pub max_evaluations: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::default(),
            rtol: 1e-8,
            atol: 1e-10,
            max_evaluations: 500_000,
        }
    }
}

impl IntegratorConfig {
    pub(super) fn validate(&self) -> Result<(), CrystallizerError> {
        let check = |name: &str, result: Result<(), ConstraintError>| {
            result.map_err(|err| CrystallizerError::invalid(format!("{name}: {err}")))
        };

        check("relative tolerance", StrictlyPositive::check(&self.rtol))?;
        check("absolute tolerance", StrictlyPositive::check(&self.atol))?;
        if self.max_evaluations == 0 {
            return Err(CrystallizerError::invalid("evaluation budget must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CrystallizerParameters::default().validate().is_ok());
        assert!(IntegratorConfig::default().validate().is_ok());
        assert_eq!(IntegratorConfig::default().method, IntegrationMethod::Radau5);
    }

    #[test]
    fn rejects_empty_seed() {
        let parameters = CrystallizerParameters {
            seed: Moments {
                m3: 0.0,
                ..Moments::SEED
            },
            ..CrystallizerParameters::default()
        };
        assert!(matches!(
            parameters.validate(),
            Err(CrystallizerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_zero_budget() {
        let config = IntegratorConfig {
            max_evaluations: 0,
            ..IntegratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
