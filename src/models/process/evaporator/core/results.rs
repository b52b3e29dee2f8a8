use uom::si::{
    area::square_meter,
    f64::{
        Area, HeatTransfer, MassRate, Power, Pressure, TemperatureInterval,
        ThermodynamicTemperature,
    },
    mass_rate::kilogram_per_second,
};

use super::Feed;

/// Solved operating state of a single effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    /// One-based position in the train.
    pub index: usize,

    /// Liquid leaving the effect.
    pub liquid_flow: MassRate,

    /// Vapor boiled off in the effect.
    pub vapor_flow: MassRate,

    /// Solute mass fraction of the leaving liquid.
    pub concentration: f64,

    /// Boiling temperature of the leaving liquid.
    pub temperature: ThermodynamicTemperature,

    pub pressure: Pressure,

    /// Latent heat carried by the vapor produced.
    pub heat_duty: Power,

    /// Effective overall coefficient, fouling included.
    pub coefficient: HeatTransfer,

    /// Temperature difference between the heating medium and the boiling liquid.
    pub driving_force: TemperatureInterval,

    pub area: Area,
}

/// A solved multi-effect evaporator.
///
/// Every returned train satisfies the mass and solute balances to the solver
/// tolerance and has a positive driving force in every effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaporatorTrain {
    pub(super) effects: Vec<EffectState>,
    pub(super) feed: Feed,
    pub(super) target_concentration: f64,
    pub(super) steam_pressure: Pressure,
    pub(super) condenser_pressure: Pressure,
    pub(super) steam_flow: MassRate,
    pub(super) iterations: usize,
}

impl EvaporatorTrain {
    /// Effects in flow order.
    #[must_use]
    pub fn effects(&self) -> &[EffectState] {
        &self.effects
    }

    #[must_use]
    pub fn feed(&self) -> Feed {
        self.feed
    }

    #[must_use]
    pub fn target_concentration(&self) -> f64 {
        self.target_concentration
    }

    #[must_use]
    pub fn steam_pressure(&self) -> Pressure {
        self.steam_pressure
    }

    #[must_use]
    pub fn condenser_pressure(&self) -> Pressure {
        self.condenser_pressure
    }

    /// Heating steam consumed by the first effect.
    #[must_use]
    pub fn steam_flow(&self) -> MassRate {
        self.steam_flow
    }

    /// Total vapor produced across all effects.
    #[must_use]
    pub fn total_evaporation(&self) -> MassRate {
        let total = self
            .effects
            .iter()
            .map(|e| e.vapor_flow.get::<kilogram_per_second>())
            .sum();
        MassRate::new::<kilogram_per_second>(total)
    }

    /// Vapor produced per unit of heating steam.
    #[must_use]
    pub fn steam_economy(&self) -> f64 {
        self.total_evaporation().get::<kilogram_per_second>()
            / self.steam_flow.get::<kilogram_per_second>()
    }

    #[must_use]
    pub fn total_area(&self) -> Area {
        let total = self.effects.iter().map(|e| e.area.get::<square_meter>()).sum();
        Area::new::<square_meter>(total)
    }

    /// Liquid leaving the last effect.
    #[must_use]
    pub fn product_flow(&self) -> MassRate {
        self.last().liquid_flow
    }

    /// Solute mass fraction leaving the last effect.
    #[must_use]
    pub fn final_concentration(&self) -> f64 {
        self.last().concentration
    }

    /// Newton iterations used by the balance solve.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn last(&self) -> &EffectState {
        // A train is only built from a non-empty solve.
        &self.effects[self.effects.len() - 1]
    }
}
