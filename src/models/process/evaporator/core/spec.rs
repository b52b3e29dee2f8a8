use uom::si::f64::{MassRate, Pressure, ThermodynamicTemperature};

use crate::support::constraint::{Constrained, StrictlyPositive, UnitIntervalOpen};

use super::EvaporatorError;

/// Thin juice entering the first effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feed {
    flow: Constrained<MassRate, StrictlyPositive>,
    concentration: Constrained<f64, UnitIntervalOpen>,
    temperature: ThermodynamicTemperature,
}

impl Feed {
    /// Creates a feed from its mass flow, solute mass fraction and temperature.
    ///
    /// # Errors
    ///
    /// Returns [`EvaporatorError::InvalidConfiguration`] if the flow is not
    /// strictly positive or the concentration is outside `(0, 1)`.
    pub fn new(
        flow: MassRate,
        concentration: f64,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, EvaporatorError> {
        Ok(Self {
            flow: StrictlyPositive::new(flow)
                .map_err(|err| EvaporatorError::invalid(format!("feed flow: {err}")))?,
            concentration: UnitIntervalOpen::new(concentration)
                .map_err(|err| EvaporatorError::invalid(format!("feed concentration: {err}")))?,
            temperature,
        })
    }

    #[must_use]
    pub fn flow(&self) -> MassRate {
        self.flow.get()
    }

    /// Solute mass fraction.
    #[must_use]
    pub fn concentration(&self) -> f64 {
        self.concentration.get()
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    /// Returns a copy of this feed with its flow scaled by `factor`.
    pub(crate) fn scaled(&self, factor: f64) -> Result<Self, EvaporatorError> {
        Self::new(self.flow() * factor, self.concentration(), self.temperature)
    }
}

/// Operating point of a multi-effect evaporator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaporatorSpec {
    effects: usize,
    feed: Feed,
    target_concentration: Constrained<f64, UnitIntervalOpen>,
    steam_pressure: Constrained<Pressure, StrictlyPositive>,
    condenser_pressure: Constrained<Pressure, StrictlyPositive>,
}

impl EvaporatorSpec {
    /// Creates a validated evaporator specification.
    ///
    /// # Errors
    ///
    /// Returns [`EvaporatorError::InvalidConfiguration`] if:
    /// - `effects` is zero,
    /// - the target concentration is outside `(0, 1)` or not above the feed concentration,
    /// - either pressure is not strictly positive,
    /// - the condenser pressure is not below the steam pressure.
    pub fn new(
        effects: usize,
        feed: Feed,
        target_concentration: f64,
        steam_pressure: Pressure,
        condenser_pressure: Pressure,
    ) -> Result<Self, EvaporatorError> {
        if effects < 1 {
            return Err(EvaporatorError::invalid("at least one effect is required"));
        }

        let target_concentration = UnitIntervalOpen::new(target_concentration)
            .map_err(|err| EvaporatorError::invalid(format!("target concentration: {err}")))?;
        if feed.concentration() >= target_concentration.get() {
            return Err(EvaporatorError::invalid(format!(
                "feed concentration {} must be below target {}",
                feed.concentration(),
                target_concentration.get()
            )));
        }

        let steam_pressure = StrictlyPositive::new(steam_pressure)
            .map_err(|err| EvaporatorError::invalid(format!("steam pressure: {err}")))?;
        let condenser_pressure = StrictlyPositive::new(condenser_pressure)
            .map_err(|err| EvaporatorError::invalid(format!("condenser pressure: {err}")))?;
        if condenser_pressure.get() >= steam_pressure.get() {
            return Err(EvaporatorError::invalid(
                "condenser pressure must be below the heating steam pressure",
            ));
        }

        Ok(Self {
            effects,
            feed,
            target_concentration,
            steam_pressure,
            condenser_pressure,
        })
    }

    #[must_use]
    pub fn effects(&self) -> usize {
        self.effects
    }

    #[must_use]
    pub fn feed(&self) -> Feed {
        self.feed
    }

    /// Solute mass fraction required in the last effect's liquid.
    #[must_use]
    pub fn target_concentration(&self) -> f64 {
        self.target_concentration.get()
    }

    #[must_use]
    pub fn steam_pressure(&self) -> Pressure {
        self.steam_pressure.get()
    }

    #[must_use]
    pub fn condenser_pressure(&self) -> Pressure {
        self.condenser_pressure.get()
    }

    /// Returns a copy with a different effect count.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`EvaporatorSpec::new`].
    pub fn with_effects(&self, effects: usize) -> Result<Self, EvaporatorError> {
        Self::new(
            effects,
            self.feed,
            self.target_concentration(),
            self.steam_pressure(),
            self.condenser_pressure(),
        )
    }

    /// Returns a copy with a different heating steam pressure.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`EvaporatorSpec::new`].
    pub fn with_steam_pressure(&self, steam_pressure: Pressure) -> Result<Self, EvaporatorError> {
        Self::new(
            self.effects,
            self.feed,
            self.target_concentration(),
            steam_pressure,
            self.condenser_pressure(),
        )
    }

    /// Returns a copy with a different target concentration.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`EvaporatorSpec::new`].
    pub fn with_target_concentration(&self, target: f64) -> Result<Self, EvaporatorError> {
        Self::new(
            self.effects,
            self.feed,
            target,
            self.steam_pressure(),
            self.condenser_pressure(),
        )
    }

    /// Returns a copy with a different feed.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`EvaporatorSpec::new`].
    pub fn with_feed(&self, feed: Feed) -> Result<Self, EvaporatorError> {
        Self::new(
            self.effects,
            feed,
            self.target_concentration(),
            self.steam_pressure(),
            self.condenser_pressure(),
        )
    }
}
