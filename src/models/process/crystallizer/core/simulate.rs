use crate::support::thermo::PropertyProvider;

use super::{
    CoolingProfile, CrystallizationKinetics, CrystallizerError, CrystallizerParameters,
    CrystallizerSpec, CrystallizerTrajectory, IntegratorConfig, integrate::integrate,
    saturation::saturation_onset,
};

/// Simulates one cooling batch.
///
/// # Errors
///
/// Returns [`CrystallizerError`] on invalid settings, integrator failure or
/// budget exhaustion, or property failures.
pub(crate) fn simulate<P: PropertyProvider>(
    provider: &P,
    kinetics: &CrystallizationKinetics,
    parameters: &CrystallizerParameters,
    config: &IntegratorConfig,
    spec: &CrystallizerSpec,
    profile: CoolingProfile,
    n_points: usize,
) -> Result<CrystallizerTrajectory, CrystallizerError> {
    if n_points < 2 {
        return Err(CrystallizerError::invalid(format!(
            "at least 2 reporting points are required, got {n_points}"
        )));
    }
    kinetics.validate()?;
    parameters.validate()?;
    config.validate()?;
    profile.validate()?;

    let integration = integrate(
        provider, kinetics, parameters, config, spec, profile, n_points,
    )?;
    let saturation_onset = saturation_onset(provider, spec, profile)?;

    let distribution = integration
        .points
        .last()
        .map(|point| point.moments.distribution())
        .ok_or_else(|| CrystallizerError::convergence("no reporting points"))?;

    Ok(CrystallizerTrajectory {
        spec: *spec,
        profile,
        points: integration.points,
        distribution,
        saturation_onset,
        evaluations: integration.evaluations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Mass, ThermodynamicTemperature, Time},
        mass::kilogram,
        thermodynamic_temperature::degree_celsius,
        time::{hour, second},
    };

    use crate::support::thermo::model::SugarSolution;

    use super::super::Moments;

    fn spec(duration: Time, c0: f64) -> CrystallizerSpec {
        CrystallizerSpec::new(
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            ThermodynamicTemperature::new::<degree_celsius>(35.0),
            duration,
            Mass::new::<kilogram>(5000.0),
            c0,
        )
        .unwrap()
    }

    fn run(
        spec: &CrystallizerSpec,
        profile: CoolingProfile,
        n_points: usize,
    ) -> Result<CrystallizerTrajectory, CrystallizerError> {
        simulate(
            &SugarSolution::new(),
            &CrystallizationKinetics::default(),
            &CrystallizerParameters::default(),
            &IntegratorConfig::default(),
            spec,
            profile,
            n_points,
        )
    }

    #[test]
    fn reference_batch_has_finite_statistics() {
        let trajectory = run(&spec(Time::new::<hour>(4.0), 75.0), CoolingProfile::Linear, 200)
            .unwrap();
        let stats = trajectory.distribution();

        assert_eq!(trajectory.points().len(), 200);
        assert!(stats.mean_size.is_finite() && stats.mean_size > 0.0);
        assert!(stats.coefficient_of_variation.is_finite());
        assert!(stats.coefficient_of_variation > 0.0);
    }

    #[test]
    fn richer_reference_batch_moves_off_the_seed() {
        // At 80 the syrup saturates near 43 °C, well before the 35 °C end.
        let trajectory = run(&spec(Time::new::<hour>(4.0), 80.0), CoolingProfile::Linear, 200)
            .unwrap();
        let stats = trajectory.distribution();
        let seed = Moments::SEED.distribution();

        assert!(stats.mean_size.is_finite() && stats.mean_size > 0.0);
        assert!(stats.coefficient_of_variation.is_finite());
        assert!(stats.coefficient_of_variation > 0.0);
        assert!(
            (stats.coefficient_of_variation - seed.coefficient_of_variation).abs()
                > 0.005 * seed.coefficient_of_variation
        );

        // About two percent more crystals than were seeded.
        let last = trajectory.final_point();
        assert!(last.moments.m0 > 1.01 * Moments::SEED.m0);
        assert!(last.supersaturation > 0.0);

        let onset = trajectory.saturation_onset().unwrap().get::<degree_celsius>();
        assert!((35.0..70.0).contains(&onset), "onset at {onset} °C");
    }

    #[test]
    fn supersaturated_batch_obeys_moment_invariants() {
        let trajectory = run(&spec(Time::new::<hour>(4.0), 85.0), CoolingProfile::Linear, 121)
            .unwrap();
        let points = trajectory.points();
        let slack = 1.0 + 1e-12;

        for pair in points.windows(2) {
            let (a, b) = (pair[0].moments, pair[1].moments);
            assert!(b.m0 * slack >= a.m0, "m0 fell at {:?}", pair[1].time);
            assert!(b.m1 * slack >= a.m1);
            assert!(b.m2 * slack >= a.m2);
            assert!(b.m3 * slack >= a.m3);
        }
        for point in points {
            assert!(point.concentration <= 85.0 * slack);
        }

        // Cooling below the ~52.5 °C onset nucleates new crystals.
        let last = trajectory.final_point();
        assert!(last.moments.m0 > 1.1 * Moments::SEED.m0);
        assert!(last.supersaturation > 0.0);

        let stats = trajectory.distribution();
        assert!(stats.mean_size > 0.0);
        assert!(stats.coefficient_of_variation >= 0.0);

        let onset = trajectory.saturation_onset().unwrap();
        assert!((50.0..55.0).contains(&onset.get::<degree_celsius>()));
    }

    #[test]
    fn nearly_isothermal_batch_nucleates_at_the_initial_rate() {
        // Held within 0.01 °C of 70 °C, the supersaturation barely moves,
        // so m0 grows linearly at the charge nucleation rate.
        let provider = SugarSolution::new();
        let kinetics = CrystallizationKinetics::default();
        let spec = CrystallizerSpec::new(
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            ThermodynamicTemperature::new::<degree_celsius>(69.99),
            Time::new::<second>(60.0),
            Mass::new::<kilogram>(5000.0),
            98.0,
        )
        .unwrap();

        let trajectory = run(&spec, CoolingProfile::Linear, 7).unwrap();
        let seed = Moments::SEED;
        let s0 = provider
            .relative_supersaturation(98.0, spec.initial_temperature())
            .unwrap();
        let b0 = kinetics.nucleation_rate(s0, 1500.0 * seed.m3);
        assert!(s0 > 0.0);

        let last = trajectory.final_point().moments;
        assert_relative_eq!(last.m0 - seed.m0, b0 * 60.0, max_relative = 0.1);
        assert_relative_eq!(last.m0, seed.m0, max_relative = 1e-5);
        assert_relative_eq!(last.m1, seed.m1, max_relative = 1e-6);
        assert_relative_eq!(last.m2, seed.m2, max_relative = 1e-6);
        assert_relative_eq!(last.m3, seed.m3, max_relative = 1e-6);
        assert!(trajectory.points().windows(2).all(|p| p[1].moments.m0 >= p[0].moments.m0));
    }

    #[test]
    fn identical_inputs_give_identical_runs() {
        let spec = spec(Time::new::<hour>(4.0), 85.0);
        let first_run = run(&spec, CoolingProfile::optimal(), 50).unwrap();
        let optimal_run = run(&spec, CoolingProfile::optimal(), 50).unwrap();
        assert_eq!(first_run, optimal_run);
    }

    #[test]
    fn rejects_too_few_points() {
        let result = run(&spec(Time::new::<hour>(4.0), 75.0), CoolingProfile::Linear, 1);
        assert!(matches!(
            result,
            Err(CrystallizerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_invalid_profile() {
        let result = run(
            &spec(Time::new::<hour>(4.0), 75.0),
            CoolingProfile::Exponential { decay_rate: -1.0 },
            10,
        );
        assert!(result.is_err());
    }
}
