use uom::si::heat_transfer::watt_per_square_meter_kelvin;

use super::EvaporatorParameters;

/// Effective overall coefficients for `effects` effects, W/(m²·K).
///
/// Clean coefficients beyond the third effect drop by a fixed decrement per
/// effect, never below the configured floor. Fouling is added in series:
/// `U_eff = 1 / (1/U_clean + R_f)`.
pub(super) fn effective_coefficients(parameters: &EvaporatorParameters, effects: usize) -> Vec<f64> {
    let get = |u: uom::si::f64::HeatTransfer| u.get::<watt_per_square_meter_kelvin>();
    let decrement = get(parameters.coefficient_decrement);
    let floor = get(parameters.coefficient_floor);

    let mut clean: Vec<f64> = parameters
        .clean_coefficients
        .iter()
        .take(effects)
        .map(|&u| get(u))
        .collect();
    while clean.len() < effects {
        let previous = clean.last().copied().unwrap_or(floor);
        clean.push((previous - decrement).max(floor));
    }

    clean
        .into_iter()
        .map(|u| 1.0 / (1.0 / u + parameters.fouling_resistance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::HeatTransfer;

    #[test]
    fn fouling_reduces_every_coefficient() {
        let u = effective_coefficients(&EvaporatorParameters::default(), 3);
        assert_relative_eq!(u[0], 1.0 / (1.0 / 2500.0 + 2e-4), epsilon = 1e-9);
        assert_relative_eq!(u[1], 1.0 / (1.0 / 2200.0 + 2e-4), epsilon = 1e-9);
        assert_relative_eq!(u[2], 1.0 / (1.0 / 1800.0 + 2e-4), epsilon = 1e-9);
    }

    #[test]
    fn extrapolates_beyond_third_effect() {
        let parameters = EvaporatorParameters {
            fouling_resistance: 0.0,
            ..EvaporatorParameters::default()
        };
        let u = effective_coefficients(&parameters, 5);
        for (actual, expected) in u.iter().zip([2500.0, 2200.0, 1800.0, 1600.0, 1400.0]) {
            assert_relative_eq!(*actual, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn extrapolation_stops_at_floor() {
        let parameters = EvaporatorParameters {
            fouling_resistance: 0.0,
            coefficient_decrement: HeatTransfer::new::<watt_per_square_meter_kelvin>(500.0),
            ..EvaporatorParameters::default()
        };
        let u = effective_coefficients(&parameters, 6);
        for (actual, expected) in u[3..].iter().zip([1300.0, 1000.0, 1000.0]) {
            assert_relative_eq!(*actual, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn fewer_effects_truncate_the_table() {
        let u = effective_coefficients(&EvaporatorParameters::default(), 1);
        assert_eq!(u.len(), 1);
    }
}
