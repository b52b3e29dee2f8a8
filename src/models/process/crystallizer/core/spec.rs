use uom::si::{
    f64::{Mass, ThermodynamicTemperature, Time},
    mass::kilogram,
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};

use super::CrystallizerError;

/// Operating point of one cooling batch.
///
/// The syrup is charged at `initial_temperature` with `initial_concentration`
/// g sucrose per 100 g solution and cooled to `final_temperature` over
/// `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystallizerSpec {
    initial_temperature: ThermodynamicTemperature,
    final_temperature: ThermodynamicTemperature,
    duration: Constrained<Time, StrictlyPositive>,
    batch_mass: Constrained<Mass, StrictlyPositive>,
    initial_concentration: Constrained<f64, StrictlyPositive>,
}

impl CrystallizerSpec {
    /// Creates a batch operating point.
    ///
    /// # Errors
    ///
    /// Returns [`CrystallizerError::InvalidConfiguration`] if the final
    /// temperature is not below the initial one, or if the duration, batch
    /// mass or initial concentration is not strictly positive.
    pub fn new(
        initial_temperature: ThermodynamicTemperature,
        final_temperature: ThermodynamicTemperature,
        duration: Time,
        batch_mass: Mass,
        initial_concentration: f64,
    ) -> Result<Self, CrystallizerError> {
        if final_temperature.get::<degree_celsius>() >= initial_temperature.get::<degree_celsius>()
        {
            return Err(CrystallizerError::invalid(
                "final temperature must be below the initial temperature",
            ));
        }

        let positive = |name: &str| {
            let name = name.to_owned();
            move |err: ConstraintError| CrystallizerError::invalid(format!("{name}: {err}"))
        };

        Ok(Self {
            initial_temperature,
            final_temperature,
            duration: Constrained::new(duration).map_err(positive("duration"))?,
            batch_mass: Constrained::new(batch_mass).map_err(positive("batch mass"))?,
            initial_concentration: Constrained::new(initial_concentration)
                .map_err(positive("initial concentration"))?,
        })
    }

    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        self.initial_temperature
    }

    pub fn final_temperature(&self) -> ThermodynamicTemperature {
        self.final_temperature
    }

    pub fn duration(&self) -> Time {
        self.duration.get()
    }

    pub fn batch_mass(&self) -> Mass {
        self.batch_mass.get()
    }

    /// Initial solute concentration, g per 100 g solution.
    pub fn initial_concentration(&self) -> f64 {
        self.initial_concentration.get()
    }

    /// Returns a copy with a different batch duration.
    ///
    /// # Errors
    ///
    /// Returns [`CrystallizerError::InvalidConfiguration`] if `duration` is
    /// not strictly positive.
    pub fn with_duration(&self, duration: Time) -> Result<Self, CrystallizerError> {
        Self::new(
            self.initial_temperature,
            self.final_temperature,
            duration,
            self.batch_mass(),
            self.initial_concentration(),
        )
    }

    /// Returns a copy with a different initial concentration.
    ///
    /// # Errors
    ///
    /// Returns [`CrystallizerError::InvalidConfiguration`] if `concentration`
    /// is not strictly positive.
    pub fn with_initial_concentration(
        &self,
        concentration: f64,
    ) -> Result<Self, CrystallizerError> {
        Self::new(
            self.initial_temperature,
            self.final_temperature,
            self.duration(),
            self.batch_mass(),
            concentration,
        )
    }

    pub(super) fn initial_celsius(&self) -> f64 {
        self.initial_temperature.get::<degree_celsius>()
    }

    pub(super) fn final_celsius(&self) -> f64 {
        self.final_temperature.get::<degree_celsius>()
    }

    pub(super) fn duration_seconds(&self) -> f64 {
        self.duration().get::<second>()
    }

    pub(super) fn batch_kilograms(&self) -> f64 {
        self.batch_mass().get::<kilogram>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::time::hour;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn spec(tf: f64, hours: f64, kg: f64, c0: f64) -> Result<CrystallizerSpec, CrystallizerError> {
        CrystallizerSpec::new(
            celsius(70.0),
            celsius(tf),
            Time::new::<hour>(hours),
            Mass::new::<kilogram>(kg),
            c0,
        )
    }

    #[test]
    fn accepts_reference_batch() {
        let spec = spec(35.0, 4.0, 5000.0, 75.0).unwrap();
        assert_eq!(spec.duration_seconds(), 14_400.0);
        assert_eq!(spec.batch_kilograms(), 5000.0);
        assert_eq!(spec.initial_concentration(), 75.0);
    }

    #[test]
    fn rejects_heating() {
        for tf in [70.0, 80.0] {
            assert!(matches!(
                spec(tf, 4.0, 5000.0, 75.0),
                Err(CrystallizerError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(spec(35.0, 0.0, 5000.0, 75.0).is_err());
        assert!(spec(35.0, 4.0, -1.0, 75.0).is_err());
        assert!(spec(35.0, 4.0, 5000.0, 0.0).is_err());
        assert!(spec(35.0, 4.0, 5000.0, f64::NAN).is_err());
    }

    #[test]
    fn with_methods_revalidate() {
        let spec = spec(35.0, 4.0, 5000.0, 75.0).unwrap();
        assert!(spec.with_duration(Time::new::<hour>(0.0)).is_err());
        let richer = spec.with_initial_concentration(85.0).unwrap();
        assert_eq!(richer.initial_concentration(), 85.0);
        assert_eq!(richer.duration(), spec.duration());
    }
}
