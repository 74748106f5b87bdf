use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::{SimError, SimResult};
use crate::potential::{LennardJonesParams, PotentialKind, PotentialParams};

/// One point mass: initial position, initial velocity, mass.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub mass: f64,
}

impl Body {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }
}

/// Andersen thermostat configuration: collision frequency and bath
/// temperature. The optional seed fixes the integrator's working RNG.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AndersenConfig {
    pub nu: f64,
    pub temperature: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AndersenConfig {
    pub fn new(nu: f64, temperature: f64) -> SimResult<Self> {
        if nu <= 0.0 || temperature <= 0.0 {
            return Err(SimError::Invalid(
                "thermostat frequency and temperature must be positive".into(),
            ));
        }
        Ok(Self {
            nu,
            temperature,
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Everything one run needs: the ordered body list (the ordering is shared
/// with the integrator and preserved end to end), configured potentials,
/// boundary geometry, optional thermostat, and the integration span.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationDefinition {
    pub bodies: Vec<Body>,
    pub potentials: BTreeMap<PotentialKind, PotentialParams>,
    pub boundary: Boundary,
    pub thermostat: Option<AndersenConfig>,
    pub time_span: (f64, f64),
}

impl SimulationDefinition {
    pub fn new(
        bodies: Vec<Body>,
        potentials: BTreeMap<PotentialKind, PotentialParams>,
        boundary: Boundary,
        thermostat: Option<AndersenConfig>,
        time_span: (f64, f64),
    ) -> SimResult<Self> {
        for (i, body) in bodies.iter().enumerate() {
            if !(body.mass > 0.0) {
                return Err(SimError::Invalid(format!(
                    "body {i} has non-positive mass {}",
                    body.mass
                )));
            }
        }
        for (kind, params) in potentials.iter() {
            if params.kind() != *kind {
                return Err(SimError::Invalid(format!(
                    "potential entry '{}' carries '{}' parameters",
                    kind.as_str(),
                    params.kind().as_str()
                )));
            }
        }
        if !(time_span.0 < time_span.1) {
            return Err(SimError::Invalid(format!(
                "time span must satisfy start < end, got ({}, {})",
                time_span.0, time_span.1
            )));
        }
        Ok(Self {
            bodies,
            potentials,
            boundary,
            thermostat,
            time_span,
        })
    }

    pub fn n_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// Ordered masses, aligned with the body ordering the integrator sees.
    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.mass).collect()
    }

    pub fn lennard_jones(&self) -> Option<&LennardJonesParams> {
        match self.potentials.get(&PotentialKind::LennardJones) {
            Some(PotentialParams::LennardJones(params)) => Some(params),
            _ => None,
        }
    }
}
