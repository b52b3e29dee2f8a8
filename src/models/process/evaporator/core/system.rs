//! Scaled balance equations of the evaporator train.
//!
//! Each effect contributes four unknowns, stored contiguously as
//! `[l, v, x, θ]`:
//!
//! - `l = L / F` and `v = V / F`, liquid and vapor flows relative to the feed,
//! - `x`, the solute mass fraction of the liquid leaving the effect,
//! - `θ = T / 100 °C`, the boiling temperature of that liquid.
//!
//! Scaling keeps every unknown and every residual of order one, so a single
//! scalar tolerance is meaningful for the whole system.

use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::thermo::{PropertyError, PropertyProvider};

/// Temperature scale of the `θ` unknowns, °C.
const THETA_SCALE: f64 = 100.0;

/// Unknowns per effect.
pub(super) const UNKNOWNS: usize = 4;

/// Solved state of one effect, in scaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ScaledEffect {
    pub(super) liquid: f64,
    pub(super) vapor: f64,
    pub(super) concentration: f64,
    pub(super) temperature_c: f64,
}

pub(super) struct BalanceSystem<'a, P> {
    provider: &'a P,
    feed_concentration: f64,
    target_concentration: f64,
    vapor_decay: f64,
    /// Pure-water saturation temperature of each effect, °C.
    saturation_c: Vec<f64>,
}

impl<'a, P: PropertyProvider> BalanceSystem<'a, P> {
    pub(super) fn new(
        provider: &'a P,
        feed_concentration: f64,
        target_concentration: f64,
        vapor_decay: f64,
        pressures: &[Pressure],
    ) -> Result<Self, PropertyError> {
        let saturation_c = pressures
            .iter()
            .map(|&p| {
                provider
                    .saturation_temperature(p)
                    .map(|t| t.get::<degree_celsius>())
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            provider,
            feed_concentration,
            target_concentration,
            vapor_decay,
            saturation_c,
        })
    }

    pub(super) fn effects(&self) -> usize {
        self.saturation_c.len()
    }

    /// Boiling temperature of a solution in effect `i`, °C.
    fn boiling_c(&self, i: usize, concentration: f64) -> Result<f64, PropertyError> {
        let elevation = self
            .provider
            .boiling_point_elevation(100.0 * concentration)?
            .get::<delta_kelvin>();
        Ok(self.saturation_c[i] + elevation)
    }

    /// Analytic starting point.
    ///
    /// The total evaporation `1 - xF/x_target` is split evenly, liquid flows
    /// ramp down linearly, and temperatures follow the boiling relation at
    /// the resulting concentrations.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn initial_guess(&self) -> Result<Vec<f64>, PropertyError> {
        let n = self.effects();
        let per_effect = (1.0 - self.feed_concentration / self.target_concentration) / n as f64;

        let mut z = Vec::with_capacity(UNKNOWNS * n);
        for i in 0..n {
            let liquid = 1.0 - (i + 1) as f64 * per_effect;
            let concentration = self.feed_concentration / liquid;
            let temperature = self.boiling_c(i, concentration)?;
            z.extend([
                liquid,
                per_effect,
                concentration,
                temperature / THETA_SCALE,
            ]);
        }
        Ok(z)
    }

    /// Writes the scaled residuals at `z` into `r`.
    ///
    /// Per effect: overall mass balance, solute balance, boiling relation, and
    /// the vapor coupling `v_i = decay · v_{i-1}`. The first effect has no
    /// upstream vapor, so its fourth slot closes the system with
    /// `x_N = x_target`.
    pub(super) fn residuals(&self, z: &[f64], r: &mut [f64]) -> Result<(), PropertyError> {
        let n = self.effects();
        let (mut l_prev, mut x_prev, mut v_prev) = (1.0, self.feed_concentration, 0.0);

        for i in 0..n {
            let k = UNKNOWNS * i;
            let [l, v, x, theta] = [z[k], z[k + 1], z[k + 2], z[k + 3]];

            r[k] = l_prev - l - v;
            r[k + 1] = l_prev * x_prev - l * x;
            r[k + 2] = theta - self.boiling_c(i, x)? / THETA_SCALE;
            r[k + 3] = if i == 0 {
                z[UNKNOWNS * (n - 1) + 2] - self.target_concentration
            } else {
                v - self.vapor_decay * v_prev
            };

            (l_prev, x_prev, v_prev) = (l, x, v);
        }
        Ok(())
    }

    /// Splits a solution vector into per-effect states.
    pub(super) fn unpack(&self, z: &[f64]) -> Vec<ScaledEffect> {
        z.chunks_exact(UNKNOWNS)
            .map(|c| ScaledEffect {
                liquid: c[0],
                vapor: c[1],
                concentration: c[2],
                temperature_c: c[3] * THETA_SCALE,
            })
            .collect()
    }
}

impl ScaledEffect {
    pub(super) fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.temperature_c)
    }
}
