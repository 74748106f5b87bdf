use nalgebra::Matrix3xX;

use crate::error::{SimError, SimResult};

/// How an integrator lays out phase-space state in a trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateLayout {
    /// Separate velocity and position blocks, n columns each.
    Partitioned,
    /// One 3x2n matrix, velocities in the first n columns, positions in the
    /// last n.
    Flat,
}

/// One phase-space snapshot in its integrator-native layout.
#[derive(Clone, Debug, PartialEq)]
pub enum StateSample {
    Partitioned {
        velocities: Matrix3xX<f64>,
        positions: Matrix3xX<f64>,
    },
    Flat(Matrix3xX<f64>),
}

/// A snapshot resolved into explicit velocity and position blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    pub velocities: Matrix3xX<f64>,
    pub positions: Matrix3xX<f64>,
}

impl StateSample {
    pub fn layout(&self) -> StateLayout {
        match self {
            Self::Partitioned { .. } => StateLayout::Partitioned,
            Self::Flat(_) => StateLayout::Flat,
        }
    }

    /// Body count implied by the sample's own shape.
    pub fn n_bodies(&self) -> SimResult<usize> {
        match self {
            Self::Partitioned {
                velocities,
                positions,
            } => {
                if velocities.ncols() != positions.ncols() {
                    return Err(SimError::Mismatch(format!(
                        "partitioned blocks disagree: {} velocity columns vs {} position columns",
                        velocities.ncols(),
                        positions.ncols()
                    )));
                }
                Ok(velocities.ncols())
            }
            Self::Flat(state) => {
                if state.ncols() % 2 != 0 {
                    return Err(SimError::Mismatch(format!(
                        "flat state has odd column count {}",
                        state.ncols()
                    )));
                }
                Ok(state.ncols() / 2)
            }
        }
    }

    /// Resolve the layout once and slice out velocity/position blocks.
    /// Fails fast when the implied body count disagrees with `expected`.
    pub fn split(&self, expected: usize) -> SimResult<Phase> {
        let n = self.n_bodies()?;
        if n != expected {
            return Err(SimError::Mismatch(format!(
                "trajectory state holds {n} bodies, definition holds {expected}"
            )));
        }
        match self {
            Self::Partitioned {
                velocities,
                positions,
            } => Ok(Phase {
                velocities: velocities.clone(),
                positions: positions.clone(),
            }),
            Self::Flat(state) => Ok(Phase {
                velocities: state.columns(0, n).into_owned(),
                positions: state.columns(n, n).into_owned(),
            }),
        }
    }

    /// Linear blend of two samples with the same layout and shape.
    pub(crate) fn lerp(&self, other: &Self, w: f64) -> SimResult<Self> {
        match (self, other) {
            (
                Self::Partitioned {
                    velocities: va,
                    positions: pa,
                },
                Self::Partitioned {
                    velocities: vb,
                    positions: pb,
                },
            ) => Ok(Self::Partitioned {
                velocities: va.scale(1.0 - w) + vb.scale(w),
                positions: pa.scale(1.0 - w) + pb.scale(w),
            }),
            (Self::Flat(a), Self::Flat(b)) => Ok(Self::Flat(a.scale(1.0 - w) + b.scale(w))),
            _ => Err(SimError::Mismatch(
                "cannot interpolate samples with different layouts".into(),
            )),
        }
    }
}
