use crate::error::{SimError, SimResult};
use crate::state::{StateLayout, StateSample};

/// Time-interpolatable trajectory produced by an integrator.
///
/// The layout is a property of the trajectory itself; `sample` accepts any
/// real time inside the recorded domain and never clamps or extrapolates.
pub trait Trajectory: Send + Sync {
    fn layout(&self) -> StateLayout;

    /// Native recorded time grid, strictly increasing.
    fn times(&self) -> &[f64];

    /// Recorded domain as `(start, end)`.
    fn span(&self) -> (f64, f64) {
        let times = self.times();
        match (times.first(), times.last()) {
            (Some(&start), Some(&end)) => (start, end),
            _ => (0.0, 0.0),
        }
    }

    fn sample(&self, time: f64) -> SimResult<StateSample>;
}

/// In-memory trajectory: recorded steps plus linear interpolation between
/// adjacent steps. Recorded grid points reproduce their stored state exactly.
#[derive(Clone, Debug)]
pub struct RecordedTrajectory {
    layout: StateLayout,
    times: Vec<f64>,
    states: Vec<StateSample>,
}

impl Trajectory for RecordedTrajectory {
    fn layout(&self) -> StateLayout {
        self.layout
    }

    fn times(&self) -> &[f64] {
        &self.times
    }

    fn sample(&self, time: f64) -> SimResult<StateSample> {
        let (start, end) = match (self.times.first(), self.times.last()) {
            (Some(&start), Some(&end)) => (start, end),
            _ => {
                return Err(SimError::OutOfDomain(
                    "trajectory has no recorded steps".into(),
                ))
            }
        };
        if time < start || time > end {
            return Err(SimError::OutOfDomain(format!(
                "time {time} outside recorded domain [{start}, {end}]"
            )));
        }
        // First index with a grid time >= `time`; in-domain, so hi < len.
        let hi = self.times.partition_point(|&t| t < time);
        if self.times[hi] == time {
            return Ok(self.states[hi].clone());
        }
        let lo = hi - 1;
        let w = (time - self.times[lo]) / (self.times[hi] - self.times[lo]);
        self.states[lo].lerp(&self.states[hi], w)
    }
}

/// Push-style builder integrators use to record accepted steps.
#[derive(Debug)]
pub struct TrajectoryRecorder {
    layout: StateLayout,
    times: Vec<f64>,
    states: Vec<StateSample>,
    n_bodies: Option<usize>,
}

impl TrajectoryRecorder {
    pub fn new(layout: StateLayout) -> Self {
        Self {
            layout,
            times: Vec::new(),
            states: Vec::new(),
            n_bodies: None,
        }
    }

    pub fn push(&mut self, time: f64, state: StateSample) -> SimResult<()> {
        if state.layout() != self.layout {
            return Err(SimError::Mismatch(
                "recorded state layout differs from the recorder's".into(),
            ));
        }
        let n = state.n_bodies()?;
        match self.n_bodies {
            Some(expected) if expected != n => {
                return Err(SimError::Mismatch(format!(
                    "recorded step holds {n} bodies, previous steps hold {expected}"
                )));
            }
            Some(_) => {}
            None => self.n_bodies = Some(n),
        }
        if let Some(&last) = self.times.last() {
            if time <= last {
                return Err(SimError::Invalid(format!(
                    "recorded times must be strictly increasing, got {time} after {last}"
                )));
            }
        }
        self.times.push(time);
        self.states.push(state);
        Ok(())
    }

    pub fn finish(self) -> SimResult<RecordedTrajectory> {
        if self.times.is_empty() {
            return Err(SimError::Invalid(
                "trajectory must record at least one step".into(),
            ));
        }
        Ok(RecordedTrajectory {
            layout: self.layout,
            times: self.times,
            states: self.states,
        })
    }
}
