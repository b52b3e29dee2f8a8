//! Temperature at which a cooling syrup first becomes saturated.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use crate::support::thermo::{PropertyError, PropertyProvider};

use super::{CoolingProfile, CrystallizerError, CrystallizerSpec};

/// Finds where the solubility curve crosses the initial concentration.
///
/// Returns the initial temperature if the syrup is charged at or above
/// saturation and `None` if it stays undersaturated down to the coldest
/// temperature `profile` reaches within the batch. Solubility is assumed to
/// rise with temperature.
pub(super) fn saturation_onset<P: PropertyProvider>(
    provider: &P,
    spec: &CrystallizerSpec,
    profile: CoolingProfile,
) -> Result<Option<ThermodynamicTemperature>, CrystallizerError> {
    let concentration = spec.initial_concentration();
    let model = SolubilityModel { provider };

    let hot = model
        .call(&spec.initial_temperature())
        .map_err(CrystallizerError::property("solubility at charge temperature"))?;
    if concentration >= hot.solubility {
        return Ok(Some(spec.initial_temperature()));
    }

    let coldest = profile.temperature(spec.duration(), spec);
    let cold = model
        .call(&coldest)
        .map_err(CrystallizerError::property("solubility at end of batch"))?;
    if concentration < cold.solubility {
        return Ok(None);
    }

    let problem = SaturationProblem { concentration };

    let solution = bisection::solve(
        &model,
        &problem,
        [coldest.get::<degree_celsius>(), spec.initial_celsius()],
        &onset_bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Both ends evaluated, so a failure lies inside the bracket.
            // Treat it as too hot and keep narrowing.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(CrystallizerError::convergence(format!(
            "saturation onset not bracketed within {} iterations, residual={:e}",
            solution.iters, solution.residual
        )));
    }

    Ok(Some(solution.snapshot.output.temperature))
}

fn onset_bisection() -> bisection::Config {
    bisection::Config {
        max_iters: 100,
        x_abs_tol: 1e-9,
        x_rel_tol: 0.0,
        residual_tol: 1e-12,
    }
}

/// Solubility paired with the temperature it was evaluated at.
#[derive(Debug, Clone, Copy)]
struct SolubilityPoint {
    temperature: ThermodynamicTemperature,
    solubility: f64,
}

struct SolubilityModel<'a, P> {
    provider: &'a P,
}

impl<P: PropertyProvider> Model for SolubilityModel<'_, P> {
    type Input = ThermodynamicTemperature;
    type Output = SolubilityPoint;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(SolubilityPoint {
            temperature: *input,
            solubility: self.provider.solubility(*input)?,
        })
    }
}

/// Residual `C*(T) − C0`, positive above the onset.
struct SaturationProblem {
    concentration: f64,
}

impl EquationProblem<1> for SaturationProblem {
    type Input = ThermodynamicTemperature;
    type Output = SolubilityPoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<degree_celsius>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.solubility - self.concentration])
    }
}
