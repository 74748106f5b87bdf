use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PotentialKind {
    LennardJones,
    Gravitational,
}

impl PotentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LennardJones => "lennard_jones",
            Self::Gravitational => "gravitational",
        }
    }
}

/// Pairwise short-range parameters. Lengths are stored squared; the cutoff
/// bounds the minimum-image displacement test.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LennardJonesParams {
    pub epsilon: f64,
    pub sigma_sq: f64,
    pub cutoff_sq: f64,
}

impl LennardJonesParams {
    pub fn new(epsilon: f64, sigma: f64, cutoff: f64) -> SimResult<Self> {
        if epsilon <= 0.0 || sigma <= 0.0 || cutoff <= 0.0 {
            return Err(SimError::Invalid(
                "lennard-jones parameters must be positive".into(),
            ));
        }
        Ok(Self {
            epsilon,
            sigma_sq: sigma * sigma,
            cutoff_sq: cutoff * cutoff,
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GravitationalParams {
    pub g: f64,
}

impl GravitationalParams {
    pub fn new(g: f64) -> SimResult<Self> {
        if g <= 0.0 {
            return Err(SimError::Invalid(
                "gravitational constant must be positive".into(),
            ));
        }
        Ok(Self { g })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum PotentialParams {
    LennardJones(LennardJonesParams),
    Gravitational(GravitationalParams),
}

impl PotentialParams {
    pub fn kind(&self) -> PotentialKind {
        match self {
            Self::LennardJones(_) => PotentialKind::LennardJones,
            Self::Gravitational(_) => PotentialKind::Gravitational,
        }
    }
}
