//! Named immutable constants installed by the AMATH library.

use vertigo_core::{InterpreterState, Value};

/// Immutable name and value for each constant, in installation order.
#[allow(clippy::approx_constant)]
pub const CONSTANTS: [(&str, f64); 7] = [
    ("+pi", 3.14159),
    ("+e", 2.71828),
    // Euler–Mascheroni
    ("+y", 0.57721),
    // golden ratio
    ("+gr", 1.618),
    // speed of light, m/s
    ("+c", 299_792_458.0),
    // gravitational constant
    ("+g", 6.6743e-11),
    // reduced Planck constant
    ("+h", 1.054571817e-34),
];

/// Install every constant into the immutable table. Run once at startup.
pub fn initialize(state: &mut InterpreterState) {
    for (name, value) in CONSTANTS {
        state.immutables.insert(name.to_string(), Value::Float(value));
    }
    tracing::debug!("installed {} AMATH constants", CONSTANTS.len());
}
