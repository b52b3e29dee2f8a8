use std::{fmt, str::FromStr};

use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::constraint::{Constraint, StrictlyPositive};

use super::{CrystallizerError, CrystallizerSpec};

/// Prescribed jacket temperature trajectory of a cooling batch.
///
/// Each variant is a pure function of elapsed time and the batch's initial
/// temperature, final temperature and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoolingProfile {
    /// Straight-line cooling from `T0` to `Tf` over the batch.
    Linear,

    /// `T(t) = Tf + (T0 − Tf)·exp(−decay_rate·t)`, with `decay_rate` in 1/s.
    ///
    /// Only approaches `Tf` asymptotically.
    Exponential { decay_rate: f64 },

    /// `T(t) = T0 − (T0 − Tf)·(t/duration)^exponent`.
    ///
    /// Slow at first and fast at the end, an open-loop approximation of
    /// constant-supersaturation cooling. Holding supersaturation truly
    /// constant needs feedback on the measured concentration.
    Optimal { exponent: f64 },
}

impl CoolingProfile {
    /// Exponential profile with a decay rate of 3e-4 1/s.
    #[must_use]
    pub const fn exponential() -> Self {
        Self::Exponential { decay_rate: 3e-4 }
    }

    /// Optimal profile with an exponent of 0.8.
    #[must_use]
    pub const fn optimal() -> Self {
        Self::Optimal { exponent: 0.8 }
    }

    /// The three profiles with their default parameters.
    #[must_use]
    pub const fn standard() -> [Self; 3] {
        [Self::Linear, Self::exponential(), Self::optimal()]
    }

    /// Profile name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential { .. } => "exponential",
            Self::Optimal { .. } => "optimal",
        }
    }

    /// Returns the prescribed temperature `elapsed` into the batch.
    #[must_use]
    pub fn temperature(&self, elapsed: Time, spec: &CrystallizerSpec) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.celsius_at(
            elapsed.get::<second>(),
            spec.initial_celsius(),
            spec.final_celsius(),
            spec.duration_seconds(),
        ))
    }

    pub(super) fn celsius_at(&self, t: f64, t0: f64, tf: f64, duration: f64) -> f64 {
        match *self {
            Self::Linear => t0 - (t0 - tf) * t / duration,
            Self::Exponential { decay_rate } => tf + (t0 - tf) * (-decay_rate * t).exp(),
            Self::Optimal { exponent } => t0 - (t0 - tf) * (t / duration).powf(exponent),
        }
    }

    pub(super) fn validate(&self) -> Result<(), CrystallizerError> {
        let result = match self {
            Self::Linear => Ok(()),
            Self::Exponential { decay_rate } => StrictlyPositive::check(decay_rate),
            Self::Optimal { exponent } => StrictlyPositive::check(exponent),
        };
        result.map_err(|err| CrystallizerError::invalid(format!("{} profile: {err}", self.name())))
    }
}

impl fmt::Display for CoolingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoolingProfile {
    type Err = CrystallizerError;

    /// Parses a profile name into the profile with default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::exponential()),
            "optimal" => Ok(Self::optimal()),
            other => Err(CrystallizerError::invalid(format!(
                "unknown cooling profile `{other}`"
            ))),
        }
    }
}
