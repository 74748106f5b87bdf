#![forbid(unsafe_code)]

pub mod body;
pub mod boundary;
pub mod constants;
pub mod error;
pub mod potential;
pub mod result;
pub mod state;
pub mod trajectory;

pub use body::{AndersenConfig, Body, SimulationDefinition};
pub use boundary::Boundary;
pub use constants::BOLTZMANN;
pub use error::{SimError, SimResult};
pub use potential::{GravitationalParams, LennardJonesParams, PotentialKind, PotentialParams};
pub use result::TrajectoryResult;
pub use state::{Phase, StateLayout, StateSample};
pub use trajectory::{RecordedTrajectory, Trajectory, TrajectoryRecorder};
