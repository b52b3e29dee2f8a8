//! Nucleation and growth rate laws.

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::constraint::{Constraint, ConstraintError, NonNegative, StrictlyPositive};

use super::CrystallizerError;

/// Power-law crystallization kinetics.
///
/// - Secondary nucleation: `B = k_b · S^b · M_T^j`, #/(m³·s)
/// - Growth with Arrhenius temperature dependence:
///   `G = k_g · S^g · exp(−E_g / (R·T))`, m/s
///
/// Both rates vanish for an undersaturated or saturated solution (`S <= 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystallizationKinetics {
    /// Nucleation rate constant `k_b`.
    pub nucleation_constant: f64,

    /// Supersaturation order of nucleation `b`.
    pub nucleation_order: f64,

    /// Suspension density exponent `j`.
    pub suspension_exponent: f64,

    /// Growth rate constant `k_g`, m/s.
    pub growth_constant: f64,

    /// Supersaturation order of growth `g`.
    pub growth_order: f64,

    /// Growth activation energy `E_g`, J/mol.
    pub activation_energy: f64,

    /// Universal gas constant, J/(mol·K).
    pub gas_constant: f64,
}

impl Default for CrystallizationKinetics {
    fn default() -> Self {
        Self {
            nucleation_constant: 1.5e10,
            nucleation_order: 2.5,
            suspension_exponent: 0.5,
            growth_constant: 2.8e-7,
            growth_order: 1.5,
            activation_energy: 45_000.0,
            gas_constant: 8.314,
        }
    }
}

impl CrystallizationKinetics {
    /// Nucleation rate at relative supersaturation `s` and suspension
    /// density `suspension_density` (kg crystal per m³).
    #[must_use]
    pub fn nucleation_rate(&self, s: f64, suspension_density: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        self.nucleation_constant
            * s.powf(self.nucleation_order)
            * suspension_density.powf(self.suspension_exponent)
    }

    /// Linear growth rate at relative supersaturation `s` and `temperature`.
    #[must_use]
    pub fn growth_rate(&self, s: f64, temperature: ThermodynamicTemperature) -> f64 {
        self.growth_rate_kelvin(s, temperature.get::<kelvin>())
    }

    pub(super) fn growth_rate_kelvin(&self, s: f64, temperature: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        self.growth_constant
            * s.powf(self.growth_order)
            * (-self.activation_energy / (self.gas_constant * temperature)).exp()
    }

    pub(super) fn validate(&self) -> Result<(), CrystallizerError> {
        let check = |name: &str, result: Result<(), ConstraintError>| {
            result.map_err(|err| CrystallizerError::invalid(format!("{name}: {err}")))
        };

        check("nucleation constant", NonNegative::check(&self.nucleation_constant))?;
        check("nucleation order", NonNegative::check(&self.nucleation_order))?;
        check("suspension exponent", NonNegative::check(&self.suspension_exponent))?;
        check("growth constant", NonNegative::check(&self.growth_constant))?;
        check("growth order", NonNegative::check(&self.growth_order))?;
        check("activation energy", NonNegative::check(&self.activation_energy))?;
        check("gas constant", StrictlyPositive::check(&self.gas_constant))?;
        Ok(())
    }
}
