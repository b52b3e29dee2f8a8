use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// Subtracting two [`ThermodynamicTemperature`] values (absolute temperatures)
/// in [`uom`] does not yield a [`TemperatureInterval`]; this trait fills the gap.
/// See [#380](https://github.com/iliekturtles/uom/issues/380) for background.
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::kelvin as delta_kelvin, thermodynamic_temperature::degree_celsius,
    };

    #[test]
    fn cooling_span() {
        let start = ThermodynamicTemperature::new::<degree_celsius>(70.0);
        let end = ThermodynamicTemperature::new::<degree_celsius>(35.0);

        assert_relative_eq!(start.minus(end).get::<delta_kelvin>(), 35.0, epsilon = 1e-12);
        assert_relative_eq!(end.minus(start).get::<delta_kelvin>(), -35.0, epsilon = 1e-12);
    }
}
