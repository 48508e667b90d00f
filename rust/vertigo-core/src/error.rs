//! Classified interpreter errors.
//!
//! Every failure an instruction can report belongs to one [`ErrorKind`] and
//! carries the 1-based source line of the instruction that raised it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Syntax,
    Value,
    Type,
    Lookup,
    Name,
    ZeroDivision,
    Runtime,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Lookup => "LookupError",
            ErrorKind::Name => "NameError",
            ErrorKind::ZeroDivision => "ZeroDivisionError",
            ErrorKind::Runtime => "RuntimeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VertigoError {
    #[error("SyntaxError at line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("ValueError at line {line}: {message}")]
    Value { line: usize, message: String },
    #[error("TypeError at line {line}: {message}")]
    Type { line: usize, message: String },
    #[error("LookupError at line {line}: {message}")]
    Lookup { line: usize, message: String },
    #[error("NameError at line {line}: {message}")]
    Name { line: usize, message: String },
    #[error("ZeroDivisionError at line {line}: {message}")]
    ZeroDivision { line: usize, message: String },
    #[error("RuntimeError at line {line}: {message}")]
    Runtime { line: usize, message: String },
}

impl VertigoError {
    pub fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Syntax => VertigoError::Syntax { line, message },
            ErrorKind::Value => VertigoError::Value { line, message },
            ErrorKind::Type => VertigoError::Type { line, message },
            ErrorKind::Lookup => VertigoError::Lookup { line, message },
            ErrorKind::Name => VertigoError::Name { line, message },
            ErrorKind::ZeroDivision => VertigoError::ZeroDivision { line, message },
            ErrorKind::Runtime => VertigoError::Runtime { line, message },
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, line, message)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VertigoError::Syntax { .. } => ErrorKind::Syntax,
            VertigoError::Value { .. } => ErrorKind::Value,
            VertigoError::Type { .. } => ErrorKind::Type,
            VertigoError::Lookup { .. } => ErrorKind::Lookup,
            VertigoError::Name { .. } => ErrorKind::Name,
            VertigoError::ZeroDivision { .. } => ErrorKind::ZeroDivision,
            VertigoError::Runtime { .. } => ErrorKind::Runtime,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            VertigoError::Syntax { line, .. }
            | VertigoError::Value { line, .. }
            | VertigoError::Type { line, .. }
            | VertigoError::Lookup { line, .. }
            | VertigoError::Name { line, .. }
            | VertigoError::ZeroDivision { line, .. }
            | VertigoError::Runtime { line, .. } => *line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            VertigoError::Syntax { message, .. }
            | VertigoError::Value { message, .. }
            | VertigoError::Type { message, .. }
            | VertigoError::Lookup { message, .. }
            | VertigoError::Name { message, .. }
            | VertigoError::ZeroDivision { message, .. }
            | VertigoError::Runtime { message, .. } => message,
        }
    }
}
