use uom::si::f64::{ThermodynamicTemperature, Time};

use super::{CoolingProfile, CrystallizerSpec, Moments, SizeDistribution};

/// State of the batch at one reporting node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Time elapsed since the start of cooling.
    pub time: Time,

    pub temperature: ThermodynamicTemperature,

    /// Solute concentration, g per 100 g solution.
    pub concentration: f64,

    /// Relative supersaturation `(C − C*) / C*`.
    pub supersaturation: f64,

    pub moments: Moments,
}

/// Time history of one simulated cooling batch.
///
/// Always holds at least two points, the first at the start of cooling and
/// the last at the end of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CrystallizerTrajectory {
    pub(super) spec: CrystallizerSpec,
    pub(super) profile: CoolingProfile,
    pub(super) points: Vec<TrajectoryPoint>,
    pub(super) distribution: SizeDistribution,
    pub(super) saturation_onset: Option<ThermodynamicTemperature>,
    pub(super) evaluations: usize,
}

impl CrystallizerTrajectory {
    pub fn spec(&self) -> &CrystallizerSpec {
        &self.spec
    }

    pub fn profile(&self) -> CoolingProfile {
        self.profile
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// State at the end of the batch.
    pub fn final_point(&self) -> &TrajectoryPoint {
        &self.points[self.points.len() - 1]
    }

    /// Size statistics of the product at the end of the batch.
    pub fn distribution(&self) -> SizeDistribution {
        self.distribution
    }

    /// Temperature at which the charged syrup first becomes saturated.
    ///
    /// `None` if the syrup stays undersaturated down to the final temperature.
    /// Equal to the initial temperature if the syrup is charged supersaturated.
    pub fn saturation_onset(&self) -> Option<ThermodynamicTemperature> {
        self.saturation_onset
    }

    /// Right-hand-side evaluations spent by the integrator.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Mass of sucrose crystallized, per kg of batch.
    pub fn yield_fraction(&self) -> f64 {
        (self.points[0].concentration - self.final_point().concentration) / 100.0
    }
}
