//! Batch cooling crystallization by the method of moments.
//!
//! A seeded sucrose syrup is cooled along a prescribed profile. Nucleation
//! and size-independent growth are driven by the relative supersaturation,
//! and the first four moments of the size distribution are integrated
//! together with the solute concentration.

mod config;
mod error;
mod integrate;
mod kinetics;
mod moments;
mod profile;
mod saturation;
mod simulate;
mod sizing;
mod spec;
mod trajectory;

pub use config::{CrystallizerParameters, IntegrationMethod, IntegratorConfig};
pub use error::CrystallizerError;
pub use kinetics::CrystallizationKinetics;
pub use moments::{Moments, SizeDistribution};
pub use profile::CoolingProfile;
pub use sizing::{EquipmentSizing, SizingParameters, size};
pub use spec::CrystallizerSpec;
pub use trajectory::{CrystallizerTrajectory, TrajectoryPoint};

pub(super) use simulate::simulate;
