//! Sensitivity sweeps over evaporator operating points.
//!
//! Each point is an independent solve that owns all of its state. A failing
//! point records its error and the sweep moves on.
//!
//! With the `parallel` feature, points are solved on the rayon thread pool.
//! Results always come back in input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use uom::si::f64::Pressure;

use crate::support::thermo::PropertyProvider;

pub use crate::support::grid::linspace;

use super::{EvaporatorError, EvaporatorSpec, EvaporatorTrain, MultiEffectEvaporator};

/// One swept value and the outcome of solving at it.
#[derive(Debug)]
pub struct SweepPoint<T> {
    pub value: T,
    pub result: Result<EvaporatorTrain, EvaporatorError>,
}

impl<P: PropertyProvider + Sync> MultiEffectEvaporator<P> {
    /// Solves `base` once for every effect count in `effects`.
    pub fn sweep_effects(
        &self,
        base: &EvaporatorSpec,
        effects: impl IntoIterator<Item = usize>,
    ) -> Vec<SweepPoint<usize>> {
        self.sweep(effects, |&n| base.with_effects(n))
    }

    /// Solves `base` once for every heating steam pressure.
    pub fn sweep_steam_pressure(
        &self,
        base: &EvaporatorSpec,
        pressures: impl IntoIterator<Item = Pressure>,
    ) -> Vec<SweepPoint<Pressure>> {
        self.sweep(pressures, |&p| base.with_steam_pressure(p))
    }

    /// Solves `base` once for every target concentration (mass fraction).
    pub fn sweep_target_concentration(
        &self,
        base: &EvaporatorSpec,
        targets: impl IntoIterator<Item = f64>,
    ) -> Vec<SweepPoint<f64>> {
        self.sweep(targets, |&x| base.with_target_concentration(x))
    }

    /// Solves `base` with its feed flow scaled by `1 + v` for every relative
    /// variation `v`.
    pub fn sweep_feed_flow(
        &self,
        base: &EvaporatorSpec,
        variations: impl IntoIterator<Item = f64>,
    ) -> Vec<SweepPoint<f64>> {
        self.sweep(variations, |&v| {
            base.feed()
                .scaled(1.0 + v)
                .and_then(|feed| base.with_feed(feed))
        })
    }

    fn sweep<T, F>(&self, values: impl IntoIterator<Item = T>, spec_at: F) -> Vec<SweepPoint<T>>
    where
        T: Send,
        F: Fn(&T) -> Result<EvaporatorSpec, EvaporatorError> + Sync,
    {
        let point = |value: T| {
            let result = spec_at(&value).and_then(|spec| self.solve(&spec));
            if let Err(err) = &result {
                log::debug!("sweep point skipped: {err}");
            }
            SweepPoint { value, result }
        };

        map_points(values.into_iter().collect(), point)
    }
}

#[cfg(feature = "parallel")]
fn map_points<T: Send, R: Send>(values: Vec<T>, f: impl Fn(T) -> R + Sync + Send) -> Vec<R> {
    values.into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_points<T, R>(values: Vec<T>, f: impl Fn(T) -> R) -> Vec<R> {
    values.into_iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassRate, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        pressure::bar,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::models::process::evaporator::Feed;

    fn base() -> EvaporatorSpec {
        let feed = Feed::new(
            MassRate::new::<kilogram_per_second>(20_000.0 / 3600.0),
            0.15,
            ThermodynamicTemperature::new::<degree_celsius>(85.0),
        )
        .unwrap();
        EvaporatorSpec::new(3, feed, 0.65, Pressure::new::<bar>(3.5), Pressure::new::<bar>(0.15))
            .unwrap()
    }

    #[test]
    fn effect_sweep_preserves_order_and_isolates_failures() {
        let evaporator = MultiEffectEvaporator::default();
        let points = evaporator.sweep_effects(&base(), [0, 2, 3, 4, 5]);

        let values: Vec<usize> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0, 2, 3, 4, 5]);

        assert!(matches!(
            points[0].result,
            Err(EvaporatorError::InvalidConfiguration { .. })
        ));
        let economies: Vec<f64> = points[1..]
            .iter()
            .map(|p| p.result.as_ref().unwrap().steam_economy())
            .collect();
        assert!(economies.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn lower_steam_pressure_raises_economy() {
        let evaporator = MultiEffectEvaporator::default();
        let pressures = linspace(2.5, 4.5, 5).into_iter().map(Pressure::new::<bar>);
        let points = evaporator.sweep_steam_pressure(&base(), pressures);

        let economies: Vec<f64> = points
            .iter()
            .map(|p| p.result.as_ref().unwrap().steam_economy())
            .collect();
        assert!(economies.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn target_sweep_hits_each_target() {
        let evaporator = MultiEffectEvaporator::default();
        let points = evaporator.sweep_target_concentration(&base(), linspace(0.60, 0.70, 3));

        for point in &points {
            let train = point.result.as_ref().unwrap();
            assert_relative_eq!(train.final_concentration(), point.value, epsilon = 1e-9);
        }
    }

    #[test]
    fn feed_sweep_scales_steam_demand() {
        let evaporator = MultiEffectEvaporator::default();
        let points = evaporator.sweep_feed_flow(&base(), [-0.2, 0.0, 0.2]);

        let steam: Vec<f64> = points
            .iter()
            .map(|p| {
                p.result
                    .as_ref()
                    .unwrap()
                    .steam_flow()
                    .get::<kilogram_per_second>()
            })
            .collect();

        // Every balance is linear in the feed flow.
        assert_relative_eq!(steam[0] / steam[1], 0.8, max_relative = 1e-6);
        assert_relative_eq!(steam[2] / steam[1], 1.2, max_relative = 1e-6);
    }

    #[test]
    fn stopped_feed_is_reported_not_fatal() {
        let evaporator = MultiEffectEvaporator::default();
        let points = evaporator.sweep_feed_flow(&base(), [-1.0, 0.0]);
        assert!(points[0].result.is_err());
        assert!(points[1].result.is_ok());
    }
}
