use nalgebra::Matrix3xX;

use nbody_core::{Boundary, SimResult, TrajectoryResult};

/// One recorded-step snapshot: positions folded into the primary cell when
/// the boundary is periodic.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub positions: Matrix3xX<f64>,
    pub time: f64,
}

/// Lazy iteration over the trajectory's native recorded grid, one frame per
/// recorded step. A fresh call to [`frames`] restarts from the beginning and
/// reproduces the identical sequence.
pub struct Frames<'a> {
    result: &'a TrajectoryResult,
    cursor: usize,
}

pub fn frames(result: &TrajectoryResult) -> Frames<'_> {
    Frames { result, cursor: 0 }
}

impl Iterator for Frames<'_> {
    type Item = SimResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let times = self.result.times();
        if self.cursor >= times.len() {
            return None;
        }
        let time = times[self.cursor];
        self.cursor += 1;
        let boundary = self.result.definition().boundary;
        let item = self.result.positions(time).map(|mut positions| {
            if let Boundary::Periodic { .. } = boundary {
                for i in 0..positions.ncols() {
                    let folded = boundary.fold(positions.column(i).into_owned());
                    positions.set_column(i, &folded);
                }
            }
            Frame { positions, time }
        });
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.result.times().len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}
