use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    f64::{Area, HeatTransfer, MassRate, Power},
    heat_transfer::watt_per_square_meter_kelvin,
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{newton, thermo::PropertyProvider, units::TemperatureDifference};

use super::{
    EffectState, EvaporatorConfig, EvaporatorError, EvaporatorParameters, EvaporatorSpec,
    EvaporatorTrain, heat_transfer::effective_coefficients, pressure::effect_pressures,
    system::BalanceSystem,
};

/// Solves the mass, solute and boiling balances of an evaporator train.
///
/// The 4N balance system is solved simultaneously by damped Newton from an
/// analytic guess. Heating steam and areas follow from the converged state.
///
/// # Errors
///
/// Returns an [`EvaporatorError`] if the parameters are inadmissible, the
/// solve does not converge within budget, an effect has no positive driving
/// force, or a property lookup fails.
pub(crate) fn solve<P: PropertyProvider>(
    provider: &P,
    spec: &EvaporatorSpec,
    parameters: &EvaporatorParameters,
    config: &EvaporatorConfig,
) -> Result<EvaporatorTrain, EvaporatorError> {
    parameters.validate()?;

    let n = spec.effects();
    let feed = spec.feed();
    let pressures = effect_pressures(
        spec.steam_pressure(),
        spec.condenser_pressure(),
        parameters.pressure_margin,
        n,
    )?;

    let system = BalanceSystem::new(
        provider,
        feed.concentration(),
        spec.target_concentration(),
        parameters.vapor_decay,
        &pressures,
    )
    .map_err(EvaporatorError::property("effect saturation temperatures"))?;

    let guess = system
        .initial_guess()
        .map_err(EvaporatorError::property("initial guess"))?;

    let solution = newton::solve(|z, r| system.residuals(z, r), &guess, &config.newton())?;

    if solution.status != newton::Status::Converged {
        log::warn!(
            "{n}-effect balance stopped at residual {:.3e} after {} iterations",
            solution.residual_norm,
            solution.iters
        );
        return Err(EvaporatorError::Convergence {
            residual: solution.residual_norm,
            iters: solution.iters,
        });
    }
    log::debug!(
        "{n}-effect balance converged in {} iterations, residual {:.3e}",
        solution.iters,
        solution.residual_norm
    );

    let scaled = system.unpack(&solution.x);
    let f = feed.flow().get::<kilogram_per_second>();

    // Heating steam from the first-effect enthalpy balance.
    let latent = |p| {
        provider
            .latent_heat(p)
            .map(|h| h.get::<joule_per_kilogram>())
            .map_err(EvaporatorError::property("latent heat"))
    };
    let latent_steam = latent(spec.steam_pressure())?;
    let latent_effects = pressures
        .iter()
        .map(|&p| latent(p))
        .collect::<Result<Vec<_>, _>>()?;

    let cp_feed = provider
        .solution_heat_capacity(feed.concentration())
        .map_err(EvaporatorError::property("feed heat capacity"))?
        .get::<joule_per_kilogram_kelvin>();
    let t_feed = feed.temperature().get::<degree_celsius>();

    let first = &scaled[0];
    let sensible = cp_feed * f * (first.temperature_c - t_feed);
    let evaporation = latent_effects[0] * first.vapor * f;
    let steam = (sensible + evaporation) / (1.0 - parameters.heat_loss) / latent_steam;

    // Areas from the driving force of each effect's heating medium.
    let t_steam = provider
        .saturation_temperature(spec.steam_pressure())
        .map_err(EvaporatorError::property("steam saturation temperature"))?;
    let coefficients = effective_coefficients(parameters, n);

    let mut effects = Vec::with_capacity(n);
    let mut t_heating = t_steam;
    for (i, effect) in scaled.iter().enumerate() {
        let temperature = effect.temperature();
        let driving_force = t_heating.minus(temperature);
        let delta_t = driving_force.get::<delta_kelvin>();
        if delta_t <= 0.0 {
            return Err(EvaporatorError::DegenerateGeometry {
                effect: i + 1,
                delta_t: driving_force,
            });
        }

        let duty = latent_effects[i] * effect.vapor * f;
        let area = duty / (coefficients[i] * delta_t);

        effects.push(EffectState {
            index: i + 1,
            liquid_flow: MassRate::new::<kilogram_per_second>(effect.liquid * f),
            vapor_flow: MassRate::new::<kilogram_per_second>(effect.vapor * f),
            concentration: effect.concentration,
            temperature,
            pressure: pressures[i],
            heat_duty: Power::new::<watt>(duty),
            coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(coefficients[i]),
            driving_force,
            area: Area::new::<square_meter>(area),
        });
        t_heating = temperature;
    }

    Ok(EvaporatorTrain {
        effects,
        feed,
        target_concentration: spec.target_concentration(),
        steam_pressure: spec.steam_pressure(),
        condenser_pressure: spec.condenser_pressure(),
        steam_flow: MassRate::new::<kilogram_per_second>(steam),
        iterations: solution.iters,
    })
}
