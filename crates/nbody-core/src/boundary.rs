use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Boundary geometry of the simulation cell. Periodic cells are
/// orthorhombic with edge lengths along the coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Boundary {
    Open,
    Periodic { lx: f64, ly: f64, lz: f64 },
}

impl Boundary {
    pub fn periodic(lx: f64, ly: f64, lz: f64) -> SimResult<Self> {
        if lx <= 0.0 || ly <= 0.0 || lz <= 0.0 {
            return Err(SimError::Invalid(
                "periodic cell lengths must be positive".into(),
            ));
        }
        Ok(Self::Periodic { lx, ly, lz })
    }

    pub fn cubic(l: f64) -> SimResult<Self> {
        Self::periodic(l, l, l)
    }

    /// Minimum-image displacement `ri - rj`, or `None` when the pair lies
    /// beyond the squared cutoff. Open boundaries skip the image search but
    /// keep the cutoff test.
    pub fn min_image_displacement(
        &self,
        ri: Vector3<f64>,
        rj: Vector3<f64>,
        cutoff_sq: f64,
    ) -> Option<Vector3<f64>> {
        let mut d = ri - rj;
        if let Self::Periodic { lx, ly, lz } = *self {
            d.x -= (d.x / lx).round() * lx;
            d.y -= (d.y / ly).round() * ly;
            d.z -= (d.z / lz).round() * lz;
        }
        if d.norm_squared() > cutoff_sq {
            return None;
        }
        Some(d)
    }

    /// Fold a coordinate into the primary cell, component-wise
    /// `x - L * floor(x / L)`. Identity for open boundaries.
    pub fn fold(&self, point: Vector3<f64>) -> Vector3<f64> {
        match *self {
            Self::Open => point,
            Self::Periodic { lx, ly, lz } => Vector3::new(
                point.x - lx * (point.x / lx).floor(),
                point.y - ly * (point.y / ly).floor(),
                point.z - lz * (point.z / lz).floor(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn min_image_picks_nearest_periodic_copy() {
        let boundary = Boundary::cubic(10.0).unwrap();
        let ri = Vector3::new(0.5, 0.0, 0.0);
        let rj = Vector3::new(9.5, 0.0, 0.0);
        let d = boundary.min_image_displacement(ri, rj, 100.0).unwrap();
        assert_relative_eq!(d.x, 1.0);
        assert_relative_eq!(d.y, 0.0);
        assert_relative_eq!(d.z, 0.0);
    }

    #[test]
    fn min_image_component_never_exceeds_half_cell() {
        let boundary = Boundary::periodic(4.0, 6.0, 8.0).unwrap();
        let ri = Vector3::new(3.9, 5.9, 7.9);
        let rj = Vector3::new(0.1, 0.1, 0.1);
        let d = boundary.min_image_displacement(ri, rj, 1.0e6).unwrap();
        assert!(d.x.abs() <= 2.0);
        assert!(d.y.abs() <= 3.0);
        assert!(d.z.abs() <= 4.0);
    }

    #[test]
    fn beyond_cutoff_yields_none() {
        let boundary = Boundary::Open;
        let ri = Vector3::new(5.0, 0.0, 0.0);
        let rj = Vector3::zeros();
        assert!(boundary.min_image_displacement(ri, rj, 16.0).is_none());
        assert!(boundary.min_image_displacement(ri, rj, 25.0).is_some());
    }

    #[test]
    fn fold_maps_into_primary_cell() {
        let boundary = Boundary::cubic(2.0).unwrap();
        let folded = boundary.fold(Vector3::new(2.5, -0.5, 1.0));
        assert_relative_eq!(folded.x, 0.5);
        assert_relative_eq!(folded.y, 1.5);
        assert_relative_eq!(folded.z, 1.0);
    }

    #[test]
    fn open_fold_is_identity() {
        let p = Vector3::new(-3.0, 7.0, 0.25);
        assert_eq!(Boundary::Open.fold(p), p);
    }

    #[test]
    fn non_positive_cell_lengths_are_rejected() {
        assert!(Boundary::periodic(1.0, 0.0, 1.0).is_err());
        assert!(Boundary::cubic(-2.0).is_err());
    }
}
