use std::collections::BTreeMap;

use nalgebra::{Matrix3xX, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use nbody_core::{
    AndersenConfig, Body, Boundary, LennardJonesParams, PotentialKind, PotentialParams, SimError,
    SimResult, SimulationDefinition, StateLayout, StateSample, Trajectory, TrajectoryRecorder,
};

use crate::callbacks::{CallbackSet, StepContext};
use crate::integrator::{Integrator, Problem};


fn free_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            Body::new(
                Vector3::new(1.0 + i as f64, 0.5 * i as f64, 0.0),
                Vector3::new(0.1 * (i + 1) as f64, -0.2, 0.3 * i as f64),
                1.0 + i as f64,
            )
        })
        .collect()
}

fn definition(
    bodies: Vec<Body>,
    potentials: BTreeMap<PotentialKind, PotentialParams>,
    boundary: Boundary,
    thermostat: Option<AndersenConfig>,
    time_span: (f64, f64),
) -> SimulationDefinition {
    SimulationDefinition::new(bodies, potentials, boundary, thermostat, time_span).unwrap()
}

fn lj_potentials(epsilon: f64, sigma: f64, cutoff: f64) -> BTreeMap<PotentialKind, PotentialParams> {
    let mut potentials = BTreeMap::new();
    potentials.insert(
        PotentialKind::LennardJones,
        PotentialParams::LennardJones(LennardJonesParams::new(epsilon, sigma, cutoff).unwrap()),
    );
    potentials
}

/// General-purpose mock: free drift over the flat `[v | u]` state, with the
/// projection residual evaluated after every accepted step.
struct DriftIntegrator {
    spec: &'static str,
    saw_projection: bool,
    residuals: Vec<f64>,
}

impl DriftIntegrator {
    fn new(spec: &'static str) -> Self {
        Self {
            spec,
            saw_projection: false,
            residuals: Vec::new(),
        }
    }
}

impl Integrator for DriftIntegrator {
    fn kind_spec(&self) -> &str {
        self.spec
    }

    fn integrate(
        &mut self,
        problem: Problem,
        callbacks: CallbackSet,
    ) -> SimResult<Box<dyn Trajectory>> {
        let StateSample::Flat(mut state) = problem.initial else {
            return Err(SimError::Mismatch(
                "general-purpose mock expects a flat initial state".into(),
            ));
        };
        self.saw_projection = callbacks.projection.is_some();
        let n = problem.definition.n_bodies();
        let (start, end) = problem.span;
        let mut recorder = TrajectoryRecorder::new(StateLayout::Flat);
        recorder.push(start, StateSample::Flat(state.clone()))?;
        let mut t = start;
        while t < end - 1e-12 {
            let dt = problem.dt.min(end - t);
            for i in 0..n {
                let v = state.column(i).into_owned();
                let mut u = state.column_mut(n + i);
                for k in 0..3 {
                    u[k] += v[k] * dt;
                }
            }
            t += dt;
            if let Some(projection) = &callbacks.projection {
                self.residuals.push(projection.residual(&state)?);
            }
            recorder.push(t, StateSample::Flat(state.clone()))?;
        }
        Ok(Box::new(recorder.finish()?))
    }
}

/// Symplectic mock: drift on partitioned blocks, discrete callbacks invoked
/// exactly once per accepted step.
struct SymplecticMock {
    spec: &'static str,
    saw_projection: bool,
    discrete_count: usize,
}

impl SymplecticMock {
    fn new(spec: &'static str) -> Self {
        Self {
            spec,
            saw_projection: false,
            discrete_count: 0,
        }
    }
}

impl Integrator for SymplecticMock {
    fn kind_spec(&self) -> &str {
        self.spec
    }

    fn integrate(
        &mut self,
        problem: Problem,
        callbacks: CallbackSet,
    ) -> SimResult<Box<dyn Trajectory>> {
        let StateSample::Partitioned {
            mut velocities,
            mut positions,
        } = problem.initial
        else {
            return Err(SimError::Mismatch(
                "symplectic mock expects a partitioned initial state".into(),
            ));
        };
        self.saw_projection = callbacks.projection.is_some();
        self.discrete_count = callbacks.discrete.len();
        let masses = problem.definition.masses();
        let mut rng = StdRng::seed_from_u64(problem.seed);
        let (start, end) = problem.span;
        let mut recorder = TrajectoryRecorder::new(StateLayout::Partitioned);
        recorder.push(
            start,
            StateSample::Partitioned {
                velocities: velocities.clone(),
                positions: positions.clone(),
            },
        )?;
        let mut t = start;
        while t < end - 1e-12 {
            let dt = problem.dt.min(end - t);
            positions += velocities.scale(dt);
            t += dt;
            let mut ctx = StepContext {
                time: t,
                dt,
                velocities: &mut velocities,
                masses: &masses,
                rng: &mut rng,
            };
            callbacks.apply_discrete(&mut ctx);
            recorder.push(
                t,
                StateSample::Partitioned {
                    velocities: velocities.clone(),
                    positions: positions.clone(),
                },
            )?;
        }
        Ok(Box::new(recorder.finish()?))
    }
}

/// Mock that ignores the problem and returns a fixed-width trajectory.
struct WrongWidthIntegrator;

impl Integrator for WrongWidthIntegrator {
    fn kind_spec(&self) -> &str {
        "rk4"
    }

    fn integrate(
        &mut self,
        problem: Problem,
        _callbacks: CallbackSet,
    ) -> SimResult<Box<dyn Trajectory>> {
        let (start, end) = problem.span;
        let mut recorder = TrajectoryRecorder::new(StateLayout::Flat);
        recorder.push(start, StateSample::Flat(Matrix3xX::zeros(4)))?;
        recorder.push(end, StateSample::Flat(Matrix3xX::zeros(4)))?;
        Ok(Box::new(recorder.finish()?))
    }
}

/// Mock that fails the way an unstable integration would.
struct FailingIntegrator;

impl Integrator for FailingIntegrator {
    fn kind_spec(&self) -> &str {
        "dopri5"
    }

    fn integrate(
        &mut self,
        _problem: Problem,
        _callbacks: CallbackSet,
    ) -> SimResult<Box<dyn Trajectory>> {
        Err(SimError::Invalid("step size control failed to converge".into()))
    }
}
