use uom::si::f64::{
    Pressure, SpecificHeatCapacity, TemperatureInterval, ThermodynamicTemperature,
};

use crate::support::units::SpecificEnthalpy;

use super::PropertyError;

/// Property lookups required by the evaporator and crystallizer models.
///
/// Implementations must be stateless: identical inputs return identical
/// outputs, so solves and simulations stay deterministic and can run
/// concurrently.
///
/// # Contract
///
/// [`saturation_temperature`](Self::saturation_temperature) must be monotonic
/// non-decreasing in pressure. The evaporator assigns strictly decreasing
/// pressures along the train and relies on this to obtain decreasing boiling
/// temperatures.
pub trait PropertyProvider {
    /// Returns the saturation temperature of pure water at `pressure`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the pressure is outside the model domain.
    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError>;

    /// Returns the latent heat of vaporization of water at `pressure`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the pressure is outside the model domain.
    fn latent_heat(&self, pressure: Pressure) -> Result<SpecificEnthalpy, PropertyError>;

    /// Returns the boiling point elevation of a solution at `mass_percent` solute.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the concentration is outside the model domain.
    fn boiling_point_elevation(
        &self,
        mass_percent: f64,
    ) -> Result<TemperatureInterval, PropertyError>;

    /// Returns the specific heat capacity of a solution at `mass_fraction` solute.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the concentration is outside the model domain.
    fn solution_heat_capacity(
        &self,
        mass_fraction: f64,
    ) -> Result<SpecificHeatCapacity, PropertyError>;

    /// Returns the equilibrium solubility, in g solute per 100 g solution.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the temperature is outside the model domain.
    fn solubility(&self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError>;

    /// Returns the relative supersaturation `(C - C*) / C*`.
    ///
    /// `concentration` is in g solute per 100 g solution.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the solubility cannot be evaluated or is not positive.
    fn relative_supersaturation(
        &self,
        concentration: f64,
        temperature: ThermodynamicTemperature,
    ) -> Result<f64, PropertyError> {
        let c_star = self.solubility(temperature)?;
        if c_star <= 0.0 {
            return Err(PropertyError::calculation(format!(
                "non-positive solubility {c_star} g/100 g"
            )));
        }
        Ok((concentration - c_star) / c_star)
    }
}

impl<P: PropertyProvider + ?Sized> PropertyProvider for &P {
    fn saturation_temperature(
        &self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        (**self).saturation_temperature(pressure)
    }

    fn latent_heat(&self, pressure: Pressure) -> Result<SpecificEnthalpy, PropertyError> {
        (**self).latent_heat(pressure)
    }

    fn boiling_point_elevation(
        &self,
        mass_percent: f64,
    ) -> Result<TemperatureInterval, PropertyError> {
        (**self).boiling_point_elevation(mass_percent)
    }

    fn solution_heat_capacity(
        &self,
        mass_fraction: f64,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        (**self).solution_heat_capacity(mass_fraction)
    }

    fn solubility(&self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError> {
        (**self).solubility(temperature)
    }

    fn relative_supersaturation(
        &self,
        concentration: f64,
        temperature: ThermodynamicTemperature,
    ) -> Result<f64, PropertyError> {
        (**self).relative_supersaturation(concentration, temperature)
    }
}
