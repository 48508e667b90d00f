//! Vertigo Core
//!
//! Host-side contract shared by the Vertigo interpreter and its instruction
//! libraries: the runtime value model, the classified error taxonomy, the
//! interpreter state handed to every instruction, and library registration.

pub mod error;
pub mod library;
pub mod state;
pub mod values;

pub use error::{ErrorKind, VertigoError};
pub use library::{Initializer, InstructionHandler, Library, LibraryError, LibrarySet};
pub use state::{InterpreterState, OperandResolver};
pub use values::{CoercionError, Complex64, Value};
