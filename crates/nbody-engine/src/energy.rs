use nalgebra::Matrix3xX;

use nbody_core::{SimError, SimResult, SimulationDefinition, TrajectoryResult, BOLTZMANN};

/// `sum_i (m_i / 2) * |v_i|^2` over the velocity block.
pub fn kinetic_energy(
    velocities: &Matrix3xX<f64>,
    definition: &SimulationDefinition,
) -> SimResult<f64> {
    check_width(velocities, definition)?;
    let mut total = 0.0;
    for (i, body) in definition.bodies.iter().enumerate() {
        total += 0.5 * body.mass * velocities.column(i).norm_squared();
    }
    Ok(total)
}

/// Lennard-Jones energy over all unordered pairs, displacements resolved by
/// the boundary collaborator. Pairs beyond the cutoff contribute zero, and a
/// definition without a Lennard-Jones entry contributes zero in total: no
/// other configured potential kind enters this accounting.
pub fn potential_energy(
    positions: &Matrix3xX<f64>,
    definition: &SimulationDefinition,
) -> SimResult<f64> {
    check_width(positions, definition)?;
    let Some(lj) = definition.lennard_jones() else {
        return Ok(0.0);
    };
    let n = definition.n_bodies();
    let boundary = definition.boundary;
    let mut total = 0.0;
    for i in 0..n {
        let ri = positions.column(i).into_owned();
        for j in (i + 1)..n {
            let rj = positions.column(j).into_owned();
            if let Some(d) = boundary.min_image_displacement(ri, rj, lj.cutoff_sq) {
                let r_sq = d.norm_squared();
                let s6 = (lj.sigma_sq / r_sq).powi(3);
                let s12 = s6 * s6;
                total += 4.0 * lj.epsilon * (s12 - s6);
            }
        }
    }
    Ok(total)
}

pub fn total_energy(result: &TrajectoryResult, time: f64) -> SimResult<f64> {
    let phase = result.phase(time)?;
    let kinetic = kinetic_energy(&phase.velocities, result.definition())?;
    let potential = potential_energy(&phase.positions, result.definition())?;
    Ok(kinetic + potential)
}

/// Energy of the definition's initial coordinates and velocities; the
/// reference value for the conservation correction, computed once before
/// integration.
pub fn initial_energy(definition: &SimulationDefinition) -> SimResult<f64> {
    if definition.bodies.is_empty() {
        return Ok(0.0);
    }
    let velocities =
        Matrix3xX::from_columns(&definition.bodies.iter().map(|b| b.velocity).collect::<Vec<_>>());
    let positions =
        Matrix3xX::from_columns(&definition.bodies.iter().map(|b| b.position).collect::<Vec<_>>());
    let kinetic = kinetic_energy(&velocities, definition)?;
    let potential = potential_energy(&positions, definition)?;
    Ok(kinetic + potential)
}

/// `mean_i(|v_i|^2 * m_i) / (3 k_B)`: a mass-weighted mean of squared
/// speed over 3 k_B, kept in exactly this form.
pub fn temperature(result: &TrajectoryResult, time: f64) -> SimResult<f64> {
    let n = result.n_bodies();
    if n == 0 {
        return Err(SimError::Invalid(
            "temperature is undefined for an empty system".into(),
        ));
    }
    let velocities = result.velocities(time)?;
    let mut acc = 0.0;
    for (i, body) in result.definition().bodies.iter().enumerate() {
        acc += velocities.column(i).norm_squared() * body.mass;
    }
    Ok(acc / n as f64 / (3.0 * BOLTZMANN))
}

fn check_width(block: &Matrix3xX<f64>, definition: &SimulationDefinition) -> SimResult<()> {
    if block.ncols() != definition.n_bodies() {
        return Err(SimError::Mismatch(format!(
            "state block has {} columns, definition holds {} bodies",
            block.ncols(),
            definition.n_bodies()
        )));
    }
    Ok(())
}
