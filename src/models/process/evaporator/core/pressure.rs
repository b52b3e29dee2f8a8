use uom::si::{f64::Pressure, pressure::pascal};

use super::EvaporatorError;

/// Assigns operating pressures with an equal drop per effect.
///
/// The first effect runs at `steam - margin` and the last at the condenser
/// pressure. A single effect runs at `steam - margin`.
#[allow(clippy::cast_precision_loss)]
pub(super) fn effect_pressures(
    steam: Pressure,
    condenser: Pressure,
    margin: Pressure,
    effects: usize,
) -> Result<Vec<Pressure>, EvaporatorError> {
    let first = (steam - margin).get::<pascal>();
    let last = condenser.get::<pascal>();

    if first <= 0.0 {
        return Err(EvaporatorError::invalid(
            "pressure margin leaves no positive first-effect pressure",
        ));
    }
    if effects == 1 {
        return Ok(vec![Pressure::new::<pascal>(first)]);
    }
    if last >= first {
        return Err(EvaporatorError::invalid(
            "condenser pressure must be below the first-effect pressure",
        ));
    }

    let step = (first - last) / (effects - 1) as f64;

    Ok((0..effects)
        .map(|i| {
            let p = if i + 1 == effects {
                last
            } else {
                first - step * i as f64
            };
            Pressure::new::<pascal>(p)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::bar;

    fn pressures(effects: usize) -> Result<Vec<f64>, EvaporatorError> {
        effect_pressures(
            Pressure::new::<bar>(3.5),
            Pressure::new::<bar>(0.15),
            Pressure::new::<bar>(0.3),
            effects,
        )
        .map(|ps| ps.iter().map(|p| p.get::<bar>()).collect())
    }

    #[test]
    fn three_effects_share_equal_drops() {
        let p = pressures(3).unwrap();
        assert_relative_eq!(p[0], 3.2, epsilon = 1e-12);
        assert_relative_eq!(p[1], 1.675, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.15, epsilon = 1e-12);
    }

    #[test]
    fn strictly_decreasing_for_any_count() {
        for n in 2..=8 {
            let p = pressures(n).unwrap();
            assert_eq!(p.len(), n);
            assert!(p.windows(2).all(|w| w[1] < w[0]));
        }
    }

    #[test]
    fn single_effect_uses_first_pressure() {
        let p = pressures(1).unwrap();
        assert_eq!(p.len(), 1);
        assert_relative_eq!(p[0], 3.2, epsilon = 1e-12);
    }

    #[test]
    fn rejects_condenser_above_first_effect() {
        let result = effect_pressures(
            Pressure::new::<bar>(1.0),
            Pressure::new::<bar>(0.9),
            Pressure::new::<bar>(0.3),
            3,
        );
        assert!(matches!(
            result,
            Err(EvaporatorError::InvalidConfiguration { .. })
        ));
    }
}
