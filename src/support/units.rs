//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for physical units at every public boundary
//! (flows, pressures, temperatures, areas). The numerical kernels work on
//! plain `f64` values in fixed units and convert at the edges.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use sugar_train::support::units::TemperatureDifference;
//!
//! let steam = ThermodynamicTemperature::new::<degree_celsius>(138.9);
//! let first_effect = ThermodynamicTemperature::new::<degree_celsius>(136.4);
//! let driving_force = steam.minus(first_effect);
//! // driving_force is a TemperatureInterval, not a ThermodynamicTemperature
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::SpecificEnthalpy;
pub use temperature_difference::TemperatureDifference;
