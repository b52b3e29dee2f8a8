//! Moment-form population balance integration.
//!
//! Under size-independent growth the population balance reduces to
//!
//! ```text
//! dm0/dt = B
//! dm1/dt = G·m0
//! dm2/dt = 2·G·m1
//! dm3/dt = 3·G·m2
//! dC/dt  = −100·k_v·ρ_c·(dm3/dt)·V/M
//! ```
//!
//! with `V = M / ρ_syrup`. The moments span some twenty orders of magnitude,
//! so each state component is divided by its initial value before
//! integration and every component starts at one.

use std::cell::{Cell, RefCell};

use differential_equations::methods::{ExplicitRungeKutta, ImplicitRungeKutta};
use differential_equations::ode::{ODE, ODEProblem};
use nalgebra::SVector;
use uom::si::{
    f64::{MassDensity, ThermodynamicTemperature, Time},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::{
    grid::linspace,
    thermo::{PropertyError, PropertyProvider},
};

use super::{
    CoolingProfile, CrystallizationKinetics, CrystallizerError, CrystallizerParameters,
    CrystallizerSpec, IntegrationMethod, IntegratorConfig, Moments, TrajectoryPoint,
};

type State = SVector<f64, 5>;

/// Reporting nodes and the evaluation count of a finished integration.
pub(super) struct Integration {
    pub(super) points: Vec<TrajectoryPoint>,
    pub(super) evaluations: usize,
}

/// Integrates one batch and samples it at `n_points` evenly spaced nodes.
pub(super) fn integrate<P: PropertyProvider>(
    provider: &P,
    kinetics: &CrystallizationKinetics,
    parameters: &CrystallizerParameters,
    config: &IntegratorConfig,
    spec: &CrystallizerSpec,
    profile: CoolingProfile,
    n_points: usize,
) -> Result<Integration, CrystallizerError> {
    let ode = MomentOde::new(provider, kinetics, parameters, spec, profile);
    let nodes = linspace(0.0, spec.duration_seconds(), n_points);

    let mut y = State::repeat(1.0);
    let mut points = Vec::with_capacity(n_points);
    points.push(ode.point(0.0, &y)?);

    for window in nodes.windows(2) {
        let (start, end) = (window[0], window[1]);
        let remaining = config
            .max_evaluations
            .saturating_sub(ode.evaluations.get())
            .max(1);
        let problem = ODEProblem::new(&ode, start, end, y);

        let solution = match config.method {
            IntegrationMethod::Dopri5 => {
                let mut solver = ExplicitRungeKutta::dopri5()
                    .rtol(config.rtol)
                    .atol(config.atol)
                    .h_max(end - start)
                    .max_steps(remaining);
                problem.solve(&mut solver)
            }
            IntegrationMethod::Radau5 => {
                let mut solver = ImplicitRungeKutta::radau5()
                    .rtol(config.rtol)
                    .atol(config.atol)
                    .h_max(end - start)
                    .max_steps(remaining);
                problem.solve(&mut solver)
            }
        }
        .map_err(|err| {
            log::warn!("crystallizer integrator failed on [{start}, {end}] s: {err}");
            CrystallizerError::convergence(format!("integrator failed on [{start}, {end}] s: {err}"))
        })?;

        if let Some(source) = ode.failure.take() {
            return Err(CrystallizerError::Property {
                context: format!("kinetics on [{start}, {end}] s"),
                source,
            });
        }

        // Backstop for a solver that stops early without reporting an error.
        let evaluations = ode.evaluations.get();
        let reached = solution.t.last().copied().unwrap_or(start);
        if evaluations > config.max_evaluations || reached < end - 1e-9 * end.abs().max(1.0) {
            log::warn!(
                "crystallizer stopped at {reached} s after {evaluations} evaluations (budget {})",
                config.max_evaluations
            );
            return Err(CrystallizerError::convergence(format!(
                "evaluation budget of {} exhausted at {reached} s",
                config.max_evaluations
            )));
        }

        y = solution
            .y
            .last()
            .copied()
            .ok_or_else(|| CrystallizerError::convergence("integrator returned no state"))?;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(CrystallizerError::convergence(format!(
                "non-finite state at {end} s"
            )));
        }

        points.push(ode.point(end, &y)?);
    }

    let evaluations = ode.evaluations.get();
    log::debug!(
        "{profile} cooling integrated over {} nodes with {evaluations} evaluations",
        points.len()
    );

    Ok(Integration {
        points,
        evaluations,
    })
}

/// Right-hand side of the scaled moment equations.
///
/// Property failures cannot propagate through the integrator, so the first
/// one is stored and the derivative is zeroed. The caller checks after every
/// segment.
struct MomentOde<'a, P> {
    provider: &'a P,
    kinetics: &'a CrystallizationKinetics,
    profile: CoolingProfile,
    spec: &'a CrystallizerSpec,
    scale: [f64; 5],
    crystal_density: f64,
    suspension_floor: f64,
    depletion: f64,
    evaluations: Cell<usize>,
    failure: RefCell<Option<PropertyError>>,
}

impl<'a, P: PropertyProvider> MomentOde<'a, P> {
    fn new(
        provider: &'a P,
        kinetics: &'a CrystallizationKinetics,
        parameters: &CrystallizerParameters,
        spec: &'a CrystallizerSpec,
        profile: CoolingProfile,
    ) -> Self {
        let density = |rho: MassDensity| rho.get::<kilogram_per_cubic_meter>();
        let [m0, m1, m2, m3] = parameters.seed.to_array();
        let crystal_density = density(parameters.crystal_density);

        Self {
            provider,
            kinetics,
            profile,
            spec,
            scale: [m0, m1, m2, m3, spec.initial_concentration()],
            crystal_density,
            suspension_floor: density(parameters.suspension_density_floor),
            depletion: 100.0 * parameters.shape_factor * crystal_density
                / density(parameters.syrup_density),
            evaluations: Cell::new(0),
            failure: RefCell::new(None),
        }
    }

    fn unscale(&self, y: &State) -> (Moments, f64) {
        let moments = Moments::from_array([
            y[0] * self.scale[0],
            y[1] * self.scale[1],
            y[2] * self.scale[2],
            y[3] * self.scale[3],
        ]);
        (moments, y[4] * self.scale[4])
    }

    /// Profile temperature, held at its end values outside the batch.
    fn temperature_celsius(&self, t: f64) -> f64 {
        let duration = self.spec.duration_seconds();
        self.profile.celsius_at(
            t.clamp(0.0, duration),
            self.spec.initial_celsius(),
            self.spec.final_celsius(),
            duration,
        )
    }

    fn supersaturation(&self, concentration: f64, celsius: f64) -> Result<f64, PropertyError> {
        self.provider.relative_supersaturation(
            concentration,
            ThermodynamicTemperature::new::<degree_celsius>(celsius),
        )
    }

    fn rates(&self, t: f64, y: &State) -> Result<State, PropertyError> {
        let (m, concentration) = self.unscale(y);
        let celsius = self.temperature_celsius(t);
        let s = self.supersaturation(concentration, celsius)?;

        let suspension_density = if m.m3 > 0.0 {
            self.crystal_density * m.m3
        } else {
            self.suspension_floor
        };
        let b = self.kinetics.nucleation_rate(s, suspension_density);
        let g = self.kinetics.growth_rate_kelvin(s, celsius + 273.15);

        let dm3 = 3.0 * g * m.m2;
        let rates = [
            b,
            g * m.m0,
            2.0 * g * m.m1,
            dm3,
            -self.depletion * dm3,
        ];

        Ok(State::from_fn(|i, _| rates[i] / self.scale[i]))
    }

    fn point(&self, t: f64, y: &State) -> Result<TrajectoryPoint, CrystallizerError> {
        let (moments, concentration) = self.unscale(y);
        let celsius = self.temperature_celsius(t);
        let supersaturation = self
            .supersaturation(concentration, celsius)
            .map_err(CrystallizerError::property(format!("supersaturation at {t} s")))?;

        Ok(TrajectoryPoint {
            time: Time::new::<second>(t),
            temperature: ThermodynamicTemperature::new::<degree_celsius>(celsius),
            concentration,
            supersaturation,
            moments,
        })
    }
}

impl<P: PropertyProvider> ODE<f64, State> for MomentOde<'_, P> {
    fn diff(&self, t: f64, y: &State, dydt: &mut State) {
        self.evaluations.set(self.evaluations.get() + 1);
        match self.rates(t, y) {
            Ok(rates) => *dydt = rates,
            Err(err) => {
                dydt.fill(0.0);
                let mut failure = self.failure.borrow_mut();
                if failure.is_none() {
                    *failure = Some(err);
                }
            }
        }
    }
}

impl<P: PropertyProvider> ODE<f64, State> for &MomentOde<'_, P> {
    fn diff(&self, t: f64, y: &State, dydt: &mut State) {
        (**self).diff(t, y, dydt);
    }
}
