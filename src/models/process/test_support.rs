use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, SpecificHeatCapacity, TemperatureInterval, ThermodynamicTemperature},
    pressure::bar,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    thermo::{PropertyError, PropertyProvider},
    units::SpecificEnthalpy,
};

/// Provider with closed-form properties for hand-checkable tests.
///
/// - `T_sat = 100 °C + 20 K/bar · (p − 1 bar)`
/// - constant latent heat and heat capacity
/// - no boiling point elevation
/// - `C* = 60 + 0.25·T` g/100 g with `T` in °C
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IdealSolution;

impl IdealSolution {
    pub(crate) const LATENT_HEAT: f64 = 2.2e6;
    pub(crate) const HEAT_CAPACITY: f64 = 4000.0;
}

impl PropertyProvider for IdealSolution {
    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        let p = pressure.get::<bar>();
        if p <= 0.0 {
            return Err(PropertyError::out_of_domain("non-positive pressure"));
        }
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            100.0 + 20.0 * (p - 1.0),
        ))
    }

    fn latent_heat(&self, _pressure: Pressure) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(Self::LATENT_HEAT))
    }

    fn boiling_point_elevation(
        &self,
        mass_percent: f64,
    ) -> Result<TemperatureInterval, PropertyError> {
        if !(0.0..100.0).contains(&mass_percent) {
            return Err(PropertyError::out_of_domain("concentration"));
        }
        Ok(TemperatureInterval::new::<delta_kelvin>(0.0))
    }

    fn solution_heat_capacity(
        &self,
        _mass_fraction: f64,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            Self::HEAT_CAPACITY,
        ))
    }

    fn solubility(&self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError> {
        Ok(60.0 + 0.25 * temperature.get::<degree_celsius>())
    }
}
