use std::sync::Arc;

use nalgebra::{Matrix3xX, Vector3};

use crate::body::SimulationDefinition;
use crate::error::{SimError, SimResult};
use crate::state::Phase;
use crate::trajectory::Trajectory;

/// Immutable result of one run: the integrator's trajectory plus a shared
/// handle to the definition that produced it. Safe for concurrent readers.
pub struct TrajectoryResult {
    trajectory: Box<dyn Trajectory>,
    definition: Arc<SimulationDefinition>,
    n_bodies: usize,
}

impl TrajectoryResult {
    /// Wrap an integrator's output. Fails fast when the body count implied
    /// by the trajectory state disagrees with the definition's.
    pub fn new(
        trajectory: Box<dyn Trajectory>,
        definition: Arc<SimulationDefinition>,
    ) -> SimResult<Self> {
        let n_bodies = definition.n_bodies();
        let (start, _) = trajectory.span();
        trajectory.sample(start)?.split(n_bodies)?;
        Ok(Self {
            trajectory,
            definition,
            n_bodies,
        })
    }

    pub fn n_bodies(&self) -> usize {
        self.n_bodies
    }

    pub fn definition(&self) -> &SimulationDefinition {
        &self.definition
    }

    /// Native recorded time grid of the underlying trajectory.
    pub fn times(&self) -> &[f64] {
        self.trajectory.times()
    }

    pub fn span(&self) -> (f64, f64) {
        self.trajectory.span()
    }

    /// Full phase-space state at `time`, layout resolved and validated.
    pub fn phase(&self, time: f64) -> SimResult<Phase> {
        self.trajectory.sample(time)?.split(self.n_bodies)
    }

    /// 3xn position block at `time`.
    pub fn positions(&self, time: f64) -> SimResult<Matrix3xX<f64>> {
        Ok(self.phase(time)?.positions)
    }

    /// 3xn velocity block at `time`.
    pub fn velocities(&self, time: f64) -> SimResult<Matrix3xX<f64>> {
        Ok(self.phase(time)?.velocities)
    }

    pub fn position(&self, time: f64, index: usize) -> SimResult<Vector3<f64>> {
        self.body_column(index)?;
        Ok(self.positions(time)?.column(index).into_owned())
    }

    pub fn velocity(&self, time: f64, index: usize) -> SimResult<Vector3<f64>> {
        self.body_column(index)?;
        Ok(self.velocities(time)?.column(index).into_owned())
    }

    fn body_column(&self, index: usize) -> SimResult<()> {
        if index >= self.n_bodies {
            return Err(SimError::Invalid(format!(
                "body index {index} out of range for {} bodies",
                self.n_bodies
            )));
        }
        Ok(())
    }
}
