use std::sync::Arc;

use nbody_core::{SimError, SimResult, SimulationDefinition, StateSample, Trajectory};

use crate::callbacks::CallbackSet;

/// Supported integrator kinds, split into the general-purpose family and
/// the symplectic family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegratorKind {
    Rk4,
    Dopri5,
    VelocityVerlet,
    SymplecticEuler,
    Leapfrog,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegratorFamily {
    GeneralPurpose,
    Symplectic,
}

/// What the runner attaches for a given integrator kind.
#[derive(Clone, Copy, Debug)]
pub struct RunStrategy {
    pub family: IntegratorFamily,
    /// Conservation projection; off for symplectic integrators, which
    /// conserve energy by construction.
    pub conservation_projection: bool,
    /// Whether a configured thermostat is attached as a step callback.
    pub thermostat: bool,
}

const STRATEGIES: &[(IntegratorKind, RunStrategy)] = &[
    (
        IntegratorKind::Rk4,
        RunStrategy {
            family: IntegratorFamily::GeneralPurpose,
            conservation_projection: true,
            thermostat: false,
        },
    ),
    (
        IntegratorKind::Dopri5,
        RunStrategy {
            family: IntegratorFamily::GeneralPurpose,
            conservation_projection: true,
            thermostat: false,
        },
    ),
    (
        IntegratorKind::VelocityVerlet,
        RunStrategy {
            family: IntegratorFamily::Symplectic,
            conservation_projection: false,
            thermostat: true,
        },
    ),
    (
        IntegratorKind::SymplecticEuler,
        RunStrategy {
            family: IntegratorFamily::Symplectic,
            conservation_projection: false,
            thermostat: true,
        },
    ),
    (
        IntegratorKind::Leapfrog,
        RunStrategy {
            family: IntegratorFamily::Symplectic,
            conservation_projection: false,
            thermostat: true,
        },
    ),
];

impl IntegratorKind {
    pub fn from_spec(spec: &str) -> SimResult<Self> {
        let spec = spec.trim();
        match spec.to_ascii_lowercase().as_str() {
            "rk4" => Ok(Self::Rk4),
            "dopri5" => Ok(Self::Dopri5),
            "velocity_verlet" | "velocity-verlet" => Ok(Self::VelocityVerlet),
            "symplectic_euler" | "symplectic-euler" => Ok(Self::SymplecticEuler),
            "leapfrog" => Ok(Self::Leapfrog),
            _ => Err(SimError::Unsupported(format!(
                "unknown integrator kind '{spec}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rk4 => "rk4",
            Self::Dopri5 => "dopri5",
            Self::VelocityVerlet => "velocity_verlet",
            Self::SymplecticEuler => "symplectic_euler",
            Self::Leapfrog => "leapfrog",
        }
    }
}

/// Strategy lookup; a kind missing from the table is unsupported.
pub fn strategy_for(kind: IntegratorKind) -> SimResult<RunStrategy> {
    STRATEGIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, s)| *s)
        .ok_or_else(|| {
            SimError::Unsupported(format!("no run strategy for integrator '{}'", kind.as_str()))
        })
}

/// One integration request, assembled by the runner. The initial state is
/// already in the family's native layout.
pub struct Problem {
    pub definition: Arc<SimulationDefinition>,
    pub initial: StateSample,
    pub span: (f64, f64),
    pub dt: f64,
    /// Seed for the integrator's working RNG (thermostat draws).
    pub seed: u64,
}

/// External integration collaborator. The engine never looks inside the
/// stepping scheme; it only resolves the kind spec, hands over the problem
/// and callbacks, and wraps the returned trajectory. Integrator failures
/// are forwarded unchanged.
pub trait Integrator {
    /// Textual kind identifier, resolved through [`IntegratorKind::from_spec`].
    fn kind_spec(&self) -> &str;

    fn integrate(
        &mut self,
        problem: Problem,
        callbacks: CallbackSet,
    ) -> SimResult<Box<dyn Trajectory>>;
}
