use std::sync::Arc;

use nalgebra::Matrix3xX;
use rand::rngs::StdRng;

use nbody_core::{SimError, SimResult, SimulationDefinition};

use crate::energy::{kinetic_energy, potential_energy};

/// Mutable integrator state handed to a step callback. Callbacks hold only
/// their configuration; everything they touch arrives through this context.
pub struct StepContext<'a> {
    /// Time of the step just accepted.
    pub time: f64,
    /// Elapsed time since the previous accepted step.
    pub dt: f64,
    /// Working velocity block, one column per body.
    pub velocities: &'a mut Matrix3xX<f64>,
    /// Ordered body masses.
    pub masses: &'a [f64],
    /// The integrator's working RNG.
    pub rng: &'a mut StdRng,
}

/// Discrete effect the integrator applies after every accepted step: once
/// per accepted step, not once per requested output time.
pub trait StepCallback {
    fn apply(&self, ctx: &mut StepContext<'_>);
}

/// Conservation-projection callback for general-purpose integrators: holds
/// the reference energy and exposes the residual the integrator's projection
/// mechanism drives to zero over the velocity block.
pub struct EnergyProjection {
    reference_energy: f64,
    definition: Arc<SimulationDefinition>,
}

impl EnergyProjection {
    pub fn new(reference_energy: f64, definition: Arc<SimulationDefinition>) -> Self {
        Self {
            reference_energy,
            definition,
        }
    }

    pub fn reference_energy(&self) -> f64 {
        self.reference_energy
    }

    /// `E0 - kinetic(v) - potential(u)` for a flat `[v | u]` state.
    pub fn residual(&self, flat: &Matrix3xX<f64>) -> SimResult<f64> {
        let n = self.definition.n_bodies();
        if flat.ncols() != 2 * n {
            return Err(SimError::Mismatch(format!(
                "flat state has {} columns, expected {}",
                flat.ncols(),
                2 * n
            )));
        }
        let velocities = flat.columns(0, n).into_owned();
        let positions = flat.columns(n, n).into_owned();
        let kinetic = kinetic_energy(&velocities, &self.definition)?;
        let potential = potential_energy(&positions, &self.definition)?;
        Ok(self.reference_energy - kinetic - potential)
    }
}

/// Callbacks the runner assembles for one integration, keyed by the
/// integrator family: projection for general-purpose integrators, discrete
/// per-step effects (currently only the Andersen thermostat) for symplectic
/// ones.
pub struct CallbackSet {
    pub projection: Option<EnergyProjection>,
    pub discrete: Vec<Box<dyn StepCallback>>,
}

impl CallbackSet {
    pub fn none() -> Self {
        Self {
            projection: None,
            discrete: Vec::new(),
        }
    }

    /// Run every discrete callback against the current step.
    pub fn apply_discrete(&self, ctx: &mut StepContext<'_>) {
        for callback in &self.discrete {
            callback.apply(ctx);
        }
    }
}

impl Default for CallbackSet {
    fn default() -> Self {
        Self::none()
    }
}
