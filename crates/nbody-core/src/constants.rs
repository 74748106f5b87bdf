/// Boltzmann constant, SI (J/K).
pub const BOLTZMANN: f64 = 1.380_649e-23;
