//! AMATH: arithmetic and transcendental functions for the Vertigo interpreter.
//!
//! Exposes a single instruction, `AMATH <OP> <DEST> [ARGS...]`, covering:
//! - trigonometry: `SIN`, `COS`, `TAN`, `ASIN`, `ACOS`, `ATAN`, `ATAN2`
//! - exponentials: `EXP`, `LOG`, `LOG10`, `SQRT`
//! - rounding and magnitude: `ABS`, `FLOOR`, `CEIL`, `ROUND`
//! - integers: `GCD`, `LCM`, `FACTORIAL`
//! - complex numbers: `COMPLEX`, `REALPART`, `IMAGPART`, `CONJUGATE`, `MAGNITUDE`, `PHASE`
//!
//! Results go to a register, onto the selected stack (`&`), or are rejected
//! when the destination is an immutable (`+name`). Installing the library also
//! registers the constants in [`constants::CONSTANTS`].
//!
//! ```rust
//! use vertigo_core::{InterpreterState, LibrarySet, Value};
//!
//! let mut state = InterpreterState::with_registers(["r1"]);
//! let mut libs = LibrarySet::new();
//! libs.install(&vertigo_amath::library(), &mut state).unwrap();
//! libs.execute_line("AMATH GCD r1 12 18", &mut state).unwrap();
//! assert_eq!(state.register("r1"), Some(&Value::Int(6)));
//! ```

pub mod classify;
mod compute;
pub mod constants;
pub mod dispatch;
pub mod ops;
pub mod registry;

pub use classify::ComputeError;
pub use dispatch::{evaluate, handle_amath, handle_amath_with, Destination};
pub use ops::{AmathOp, Domain, ResultKind};
pub use registry::{OpDescriptor, Registry};

use vertigo_core::Library;

/// Instruction mnemonic the library registers.
pub const INSTRUCTION: &str = "AMATH";

/// Library export: the `AMATH` handler plus the constant initializer.
pub fn library() -> Library {
    Library::new("amath")
        .with_instruction(INSTRUCTION, handle_amath)
        .with_initializer(constants::initialize)
}
