//! Vessel, agitator and cooling coil sizing for a batch crystallizer.
//!
//! All relations are closed-form:
//!
//! - volume `V = M / ρ`
//! - cylindrical shell with `H = a·D`, so `D = (4V / (π·a))^(1/3)`
//! - agitation power `P = Np·ρ·N³·Da⁵` with `Da = r·D`
//! - coil area `A = Q / (U·ΔT_lm)` with the mean cooling duty
//!   `Q = M·cp·(T0 − Tf) / duration`

use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{
        Area, Frequency, HeatTransfer, Length, Mass, MassDensity, Power, SpecificHeatCapacity,
        TemperatureInterval, Time, Volume,
    },
    frequency::hertz,
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    volume::cubic_meter,
};

use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

use super::{CrystallizerError, CrystallizerSpec};

/// Design rules used to size the crystallizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingParameters {
    /// Height-to-diameter ratio of the shell.
    pub aspect_ratio: f64,

    /// Agitator rotational speed.
    pub agitator_speed: Frequency,

    /// Agitator-to-vessel diameter ratio.
    pub impeller_ratio: f64,

    /// Agitator power number `Np`.
    pub power_number: f64,

    pub syrup_density: MassDensity,
    pub syrup_heat_capacity: SpecificHeatCapacity,

    /// Overall coefficient of the cooling coil.
    pub coil_coefficient: HeatTransfer,

    /// Log-mean temperature difference across the coil.
    pub coil_driving_force: TemperatureInterval,
}

impl Default for SizingParameters {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.5,
            agitator_speed: Frequency::new::<hertz>(1.0),
            impeller_ratio: 1.0 / 3.0,
            power_number: 5.0,
            syrup_density: MassDensity::new::<kilogram_per_cubic_meter>(1300.0),
            syrup_heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(2300.0),
            coil_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(500.0),
            coil_driving_force: TemperatureInterval::new::<delta_kelvin>(15.0),
        }
    }
}

impl SizingParameters {
    fn validate(&self) -> Result<(), CrystallizerError> {
        let check = |name: &str, result: Result<(), ConstraintError>| {
            result.map_err(|err| CrystallizerError::invalid(format!("{name}: {err}")))
        };

        check("aspect ratio", StrictlyPositive::check(&self.aspect_ratio))?;
        check("agitator speed", StrictlyPositive::check(&self.agitator_speed))?;
        check("impeller ratio", StrictlyPositive::check(&self.impeller_ratio))?;
        check("power number", StrictlyPositive::check(&self.power_number))?;
        check("syrup density", StrictlyPositive::check(&self.syrup_density))?;
        check("syrup heat capacity", StrictlyPositive::check(&self.syrup_heat_capacity))?;
        check("coil coefficient", StrictlyPositive::check(&self.coil_coefficient))?;
        check("coil driving force", StrictlyPositive::check(&self.coil_driving_force))?;
        Ok(())
    }
}

/// Main dimensions of a batch crystallizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentSizing {
    pub volume: Volume,
    pub diameter: Length,
    pub height: Length,
    pub agitator_diameter: Length,
    pub agitation_power: Power,

    /// Mean heat removal rate over the batch.
    pub cooling_duty: Power,

    pub coil_area: Area,

    /// Batch cycle time, equal to the cooling duration.
    pub residence_time: Time,
}

/// Sizes a vessel holding `batch_mass` cooled as described by `spec`.
///
/// # Errors
///
/// Returns [`CrystallizerError::InvalidConfiguration`] if any design rule is
/// not strictly positive.
pub fn size(
    parameters: &SizingParameters,
    spec: &CrystallizerSpec,
    batch_mass: Mass,
) -> Result<EquipmentSizing, CrystallizerError> {
    parameters.validate()?;
    StrictlyPositive::check(&batch_mass)
        .map_err(|err| CrystallizerError::invalid(format!("batch mass: {err}")))?;

    let rho = parameters.syrup_density.get::<kilogram_per_cubic_meter>();
    let mass = batch_mass.get::<kilogram>();

    let volume = mass / rho;
    let diameter = (4.0 * volume / (PI * parameters.aspect_ratio)).cbrt();
    let height = parameters.aspect_ratio * diameter;

    let agitator_diameter = parameters.impeller_ratio * diameter;
    let speed = parameters.agitator_speed.get::<hertz>();
    let agitation_power = parameters.power_number * rho * speed.powi(3) * agitator_diameter.powi(5);

    let temperature_drop = spec.initial_celsius() - spec.final_celsius();
    let cooling_duty = mass
        * parameters.syrup_heat_capacity.get::<joule_per_kilogram_kelvin>()
        * temperature_drop
        / spec.duration_seconds();
    let coil_area = cooling_duty
        / (parameters.coil_coefficient.get::<watt_per_square_meter_kelvin>()
            * parameters.coil_driving_force.get::<delta_kelvin>());

    Ok(EquipmentSizing {
        volume: Volume::new::<cubic_meter>(volume),
        diameter: Length::new::<meter>(diameter),
        height: Length::new::<meter>(height),
        agitator_diameter: Length::new::<meter>(agitator_diameter),
        agitation_power: Power::new::<watt>(agitation_power),
        cooling_duty: Power::new::<watt>(cooling_duty),
        coil_area: Area::new::<square_meter>(coil_area),
        residence_time: spec.duration(),
    })
}
