use std::sync::Arc;

use nalgebra::Matrix3xX;

use nbody_core::{SimError, SimResult, SimulationDefinition, StateSample, TrajectoryResult};

use crate::callbacks::{CallbackSet, EnergyProjection};
use crate::energy::initial_energy;
use crate::integrator::{strategy_for, Integrator, IntegratorFamily, IntegratorKind, Problem};
use crate::thermostat::AndersenCallback;

/// Run one integration: resolve the strategy from the integrator's kind
/// spec, assemble the callback set, hand the problem to the integrator, and
/// wrap its output. Integrator failures are forwarded unchanged.
pub fn run(
    definition: SimulationDefinition,
    integrator: &mut dyn Integrator,
    dt: f64,
) -> SimResult<TrajectoryResult> {
    if !(dt > 0.0) {
        return Err(SimError::Invalid(format!(
            "step size must be positive, got {dt}"
        )));
    }
    let kind = IntegratorKind::from_spec(integrator.kind_spec())?;
    let strategy = strategy_for(kind)?;
    let definition = Arc::new(definition);

    let mut callbacks = CallbackSet::none();
    if strategy.conservation_projection {
        let reference_energy = initial_energy(&definition)?;
        callbacks.projection = Some(EnergyProjection::new(
            reference_energy,
            Arc::clone(&definition),
        ));
    }
    if strategy.thermostat {
        if let Some(config) = &definition.thermostat {
            callbacks.discrete.push(Box::new(AndersenCallback::new(config)));
        }
    }

    let problem = Problem {
        initial: initial_state(&definition, strategy.family),
        span: definition.time_span,
        dt,
        seed: definition
            .thermostat
            .as_ref()
            .and_then(|t| t.seed)
            .unwrap_or(0),
        definition: Arc::clone(&definition),
    };
    let trajectory = integrator.integrate(problem, callbacks)?;
    TrajectoryResult::new(trajectory, definition)
}

/// Initial state in the family's native layout: a flat `[v | u]`
/// concatenation for general-purpose integrators, separate blocks for
/// symplectic ones.
fn initial_state(definition: &SimulationDefinition, family: IntegratorFamily) -> StateSample {
    let n = definition.n_bodies();
    let mut velocities = Matrix3xX::zeros(n);
    let mut positions = Matrix3xX::zeros(n);
    for (i, body) in definition.bodies.iter().enumerate() {
        velocities.set_column(i, &body.velocity);
        positions.set_column(i, &body.position);
    }
    match family {
        IntegratorFamily::GeneralPurpose => {
            let mut flat = Matrix3xX::zeros(2 * n);
            for i in 0..n {
                flat.set_column(i, &velocities.column(i).into_owned());
                flat.set_column(n + i, &positions.column(i).into_owned());
            }
            StateSample::Flat(flat)
        }
        IntegratorFamily::Symplectic => StateSample::Partitioned {
            velocities,
            positions,
        },
    }
}
