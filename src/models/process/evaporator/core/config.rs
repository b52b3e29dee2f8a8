use uom::si::{
    f64::{HeatTransfer, Pressure},
    heat_transfer::watt_per_square_meter_kelvin,
    pressure::bar,
};

use crate::support::{
    constraint::{
        Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitIntervalUpperOpen,
    },
    newton,
};

use super::EvaporatorError;

/// Modeling assumptions of the evaporator train.
///
/// None of these are physical laws. The vapor decay factor stands in for a
/// per-effect enthalpy balance, and the coefficient extrapolation beyond the
/// three tabulated effects is a linear guess with a floor. Both are exposed
/// here so callers can replace them with plant data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaporatorParameters {
    /// Pressure drop between the heating steam and the first effect.
    pub pressure_margin: Pressure,

    /// Ratio `V_i / V_{i-1}` imposed on every effect after the first.
    pub vapor_decay: f64,

    /// Clean overall heat transfer coefficients of the first three effects.
    pub clean_coefficients: [HeatTransfer; 3],

    /// Reduction of the clean coefficient for each effect beyond the third.
    pub coefficient_decrement: HeatTransfer,

    /// Lower bound of the extrapolated clean coefficients.
    pub coefficient_floor: HeatTransfer,

    /// Fouling resistance added in series to every clean coefficient, m²·K/W.
    pub fouling_resistance: f64,

    /// Fraction of the first-effect heat duty lost to the surroundings.
    pub heat_loss: f64,
}

impl Default for EvaporatorParameters {
    fn default() -> Self {
        let u = |value| HeatTransfer::new::<watt_per_square_meter_kelvin>(value);
        Self {
            pressure_margin: Pressure::new::<bar>(0.3),
            vapor_decay: 0.95,
            clean_coefficients: [u(2500.0), u(2200.0), u(1800.0)],
            coefficient_decrement: u(200.0),
            coefficient_floor: u(1000.0),
            fouling_resistance: 2.0e-4,
            heat_loss: 0.03,
        }
    }
}

impl EvaporatorParameters {
    /// Checks that every assumption is physically admissible.
    pub(super) fn validate(&self) -> Result<(), EvaporatorError> {
        let check = |name: &str, result: Result<(), ConstraintError>| {
            result.map_err(|err| EvaporatorError::invalid(format!("{name}: {err}")))
        };

        check("pressure margin", NonNegative::check(&self.pressure_margin))?;
        check("vapor decay", StrictlyPositive::check(&self.vapor_decay))?;
        for (i, u) in self.clean_coefficients.iter().enumerate() {
            check(&format!("clean coefficient {}", i + 1), StrictlyPositive::check(u))?;
        }
        check("coefficient decrement", NonNegative::check(&self.coefficient_decrement))?;
        check("coefficient floor", StrictlyPositive::check(&self.coefficient_floor))?;
        check("fouling resistance", NonNegative::check(&self.fouling_resistance))?;
        check("heat loss", UnitIntervalUpperOpen::check(&self.heat_loss))?;
        Ok(())
    }
}

/// Budget and tolerances of the balance solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaporatorConfig {
    /// Maximum number of Newton iterations.
    pub max_iters: usize,

    /// Convergence threshold on the scaled residual norm.
    ///
    /// Flows are scaled by the feed flow and temperatures by 100 °C, so the
    /// residuals are dimensionless and of order one.
    pub residual_tol: f64,

    /// Smallest step fraction tried when backtracking.
    pub min_damping: f64,
}

impl Default for EvaporatorConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-10,
            min_damping: 1.0 / 1024.0,
        }
    }
}

impl EvaporatorConfig {
    /// Converts this configuration into a Newton solver configuration.
    pub(super) fn newton(&self) -> newton::Config {
        newton::Config {
            max_iters: self.max_iters,
            residual_tol: self.residual_tol,
            min_damping: self.min_damping,
            ..newton::Config::default()
        }
    }
}
