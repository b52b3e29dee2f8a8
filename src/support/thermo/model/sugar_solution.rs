//! Aqueous sucrose solution with an IAPWS-IF97 water saturation line.
//!
//! # Correlations
//!
//! - Saturation temperature and latent heat: IAPWS-IF97 (pure water).
//! - Boiling point elevation (Dühring-type): `ΔT = A·x + B·x²` with `x` in
//!   mass percent, `A = 0.03`, `B = 0.00015` below 50 % and
//!   `A = 0.045`, `B = 0.0003` from 50 % upward.
//! - Heat capacity: mass-weighted mixing of water (4180 J/(kg·K)) and
//!   sucrose (1250 J/(kg·K)).
//! - Solubility: `C* = 64.18 + 0.1337·T + 5.52e-3·T² − 9.73e-6·T³`
//!   g/100 g solution, `T` in °C.
//!
//! The boiling point elevation is discontinuous at 50 %, which the
//! evaporator tolerates because its flow unknowns do not depend on
//! temperature.

use uom::si::{
    f64::{Pressure, SpecificHeatCapacity, TemperatureInterval, ThermodynamicTemperature},
    available_energy::joule_per_kilogram,
    pressure::megapascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    thermo::{PropertyError, PropertyProvider},
    units::SpecificEnthalpy,
};

use super::steam;

/// Default sucrose solution property model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SugarSolution {
    cp_water: SpecificHeatCapacity,
    cp_sucrose: SpecificHeatCapacity,
}

impl Default for SugarSolution {
    fn default() -> Self {
        Self::new()
    }
}

impl SugarSolution {
    /// Creates the model with its reference heat capacities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cp_water: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4180.0),
            cp_sucrose: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1250.0),
        }
    }
}

fn solubility_celsius(t: f64) -> f64 {
    64.18 + 0.1337 * t + 5.52e-3 * t.powi(2) - 9.73e-6 * t.powi(3)
}

impl PropertyProvider for SugarSolution {
    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        let t = steam::saturation_temperature_k(pressure.get::<megapascal>())?;
        Ok(ThermodynamicTemperature::new::<kelvin>(t))
    }

    fn latent_heat(&self, pressure: Pressure) -> Result<SpecificEnthalpy, PropertyError> {
        let latent = steam::latent_heat_j_per_kg(pressure.get::<megapascal>())?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(latent))
    }

    fn boiling_point_elevation(
        &self,
        mass_percent: f64,
    ) -> Result<TemperatureInterval, PropertyError> {
        if !(0.0..100.0).contains(&mass_percent) {
            return Err(PropertyError::out_of_domain(format!(
                "sucrose concentration {mass_percent} % outside [0, 100) %"
            )));
        }

        let (a, b) = if mass_percent < 50.0 {
            (0.03, 0.000_15)
        } else {
            (0.045, 0.000_3)
        };
        let elevation = a * mass_percent + b * mass_percent.powi(2);

        Ok(TemperatureInterval::new::<delta_kelvin>(elevation))
    }

    fn solution_heat_capacity(
        &self,
        mass_fraction: f64,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        if !(0.0..=1.0).contains(&mass_fraction) {
            return Err(PropertyError::out_of_domain(format!(
                "sucrose mass fraction {mass_fraction} outside [0, 1]"
            )));
        }
        Ok(self.cp_water * (1.0 - mass_fraction) + self.cp_sucrose * mass_fraction)
    }

    fn solubility(&self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError> {
        let t = temperature.get::<degree_celsius>();
        if !(-10.0..=120.0).contains(&t) {
            return Err(PropertyError::out_of_domain(format!(
                "solubility correlation undefined at {t} °C"
            )));
        }
        Ok(solubility_celsius(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{available_energy::kilojoule_per_kilogram, pressure::bar};

    #[test]
    fn saturation_temperature_of_heating_steam() {
        let model = SugarSolution::new();
        let t = model
            .saturation_temperature(Pressure::new::<bar>(3.5))
            .unwrap();
        assert_relative_eq!(t.get::<degree_celsius>(), 138.86, epsilon = 0.05);
    }

    #[test]
    fn saturation_temperature_is_monotonic() {
        let model = SugarSolution::new();
        let temps: Vec<f64> = [0.1, 0.15, 0.5, 1.0, 2.0, 3.2, 3.5]
            .into_iter()
            .map(|p| {
                model
                    .saturation_temperature(Pressure::new::<bar>(p))
                    .unwrap()
                    .get::<degree_celsius>()
            })
            .collect();
        assert!(temps.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn latent_heat_of_heating_steam() {
        let model = SugarSolution::new();
        let latent = model.latent_heat(Pressure::new::<bar>(3.5)).unwrap();
        assert_relative_eq!(latent.get::<kilojoule_per_kilogram>(), 2147.4, epsilon = 3.0);
    }

    #[test]
    fn boiling_point_elevation_branches() {
        let model = SugarSolution::new();

        let dilute = model.boiling_point_elevation(20.0).unwrap();
        assert_relative_eq!(dilute.get::<delta_kelvin>(), 0.66, epsilon = 1e-12);

        let syrup = model.boiling_point_elevation(65.0).unwrap();
        assert_relative_eq!(syrup.get::<delta_kelvin>(), 4.1925, epsilon = 1e-12);

        assert!(model.boiling_point_elevation(100.0).is_err());
    }

    #[test]
    fn heat_capacity_mixing_rule() {
        let model = SugarSolution::new();
        let cp = model.solution_heat_capacity(0.65).unwrap();
        assert_relative_eq!(
            cp.get::<joule_per_kilogram_kelvin>(),
            0.35 * 4180.0 + 0.65 * 1250.0,
            epsilon = 1e-9
        );
        assert!(model.solution_heat_capacity(1.2).is_err());
    }

    #[test]
    fn supersaturation_sign_follows_solubility() {
        let model = SugarSolution::new();
        let t = ThermodynamicTemperature::new::<degree_celsius>(60.0);
        let c_star = model.solubility(t).unwrap();

        assert_relative_eq!(
            model.relative_supersaturation(c_star, t).unwrap(),
            0.0,
            epsilon = 1e-12
        );
        assert!(model.relative_supersaturation(c_star + 5.0, t).unwrap() > 0.0);
        assert!(model.relative_supersaturation(c_star - 5.0, t).unwrap() < 0.0);
    }
}
