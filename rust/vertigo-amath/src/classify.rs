//! Failure classification for AMATH operations.
//!
//! Operations report a line-free [`ComputeError`]; the dispatcher attaches the
//! instruction's line when turning it into a [`VertigoError`].

use crate::ops::AmathOp;
use thiserror::Error;
use vertigo_core::{CoercionError, ErrorKind, VertigoError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ComputeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ComputeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ZeroDivision, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, message)
    }

    /// Attach the failing line. Runtime failures are wrapped with the mnemonic
    /// so the host sees which operation broke.
    pub fn at(self, op: AmathOp, line: usize) -> VertigoError {
        match self.kind {
            ErrorKind::Runtime => VertigoError::new(
                ErrorKind::Runtime,
                line,
                format!("Math operation '{}' failed: {}", op.mnemonic(), self.message),
            ),
            kind => VertigoError::new(kind, line, self.message),
        }
    }

    /// Attach a line when no operation matched the mnemonic.
    pub fn at_line(self, line: usize) -> VertigoError {
        VertigoError::new(self.kind, line, self.message)
    }
}

/// Lower-level coercion failures that no operation classified more precisely.
impl From<CoercionError> for ComputeError {
    fn from(err: CoercionError) -> Self {
        ComputeError::runtime(err.to_string())
    }
}
