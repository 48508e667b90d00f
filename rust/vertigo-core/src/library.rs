//! Instruction library registration and line routing.
//!
//! A [`Library`] exports a set of instruction handlers keyed by mnemonic and an
//! optional initializer. The host installs libraries into a [`LibrarySet`],
//! which runs each initializer once and routes tokenized lines to handlers.

use crate::error::VertigoError;
use crate::state::InterpreterState;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Handles one instruction line. `parts[0]` is the instruction mnemonic.
pub type InstructionHandler = fn(&[&str], &mut InterpreterState) -> Result<(), VertigoError>;

/// One-time setup run when a library is installed.
pub type Initializer = fn(&mut InterpreterState);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("library '{0}' is already installed")]
    AlreadyInstalled(String),
    #[error("instruction '{instruction}' from library '{library}' is already provided by '{owner}'")]
    InstructionConflict {
        instruction: String,
        library: String,
        owner: String,
    },
}

#[derive(Clone)]
pub struct Library {
    name: String,
    instructions: BTreeMap<String, InstructionHandler>,
    initializer: Option<Initializer>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: BTreeMap::new(),
            initializer: None,
        }
    }

    /// Register a handler. Mnemonics are stored upper-cased.
    pub fn with_instruction(mut self, mnemonic: &str, handler: InstructionHandler) -> Self {
        self.instructions.insert(mnemonic.to_ascii_uppercase(), handler);
        self
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> impl Iterator<Item = &str> {
        self.instructions.keys().map(String::as_str)
    }

    pub fn handler(&self, mnemonic: &str) -> Option<InstructionHandler> {
        self.instructions
            .get(&mnemonic.to_ascii_uppercase())
            .copied()
    }

    pub fn initializer(&self) -> Option<Initializer> {
        self.initializer
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("instructions", &self.instructions.keys().collect::<Vec<_>>())
            .field("initializer", &self.initializer.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct LibrarySet {
    installed: Vec<String>,
    handlers: BTreeMap<String, (String, InstructionHandler)>,
}

impl LibrarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a library and run its initializer against `state`.
    ///
    /// Nothing is registered or initialized when installation is rejected.
    pub fn install(
        &mut self,
        library: &Library,
        state: &mut InterpreterState,
    ) -> Result<(), LibraryError> {
        if self.installed.iter().any(|name| name == library.name()) {
            tracing::warn!("library '{}' installed twice; rejecting", library.name());
            return Err(LibraryError::AlreadyInstalled(library.name().to_string()));
        }
        for mnemonic in library.instructions() {
            if let Some((owner, _)) = self.handlers.get(mnemonic) {
                return Err(LibraryError::InstructionConflict {
                    instruction: mnemonic.to_string(),
                    library: library.name().to_string(),
                    owner: owner.clone(),
                });
            }
        }

        for (mnemonic, handler) in &library.instructions {
            self.handlers
                .insert(mnemonic.clone(), (library.name().to_string(), *handler));
        }
        self.installed.push(library.name().to_string());
        if let Some(init) = library.initializer() {
            init(state);
        }
        tracing::debug!(
            "installed library '{}' ({} instructions)",
            library.name(),
            library.instructions.len()
        );
        Ok(())
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.iter().any(|n| n == name)
    }

    pub fn has_instruction(&self, mnemonic: &str) -> bool {
        self.handlers.contains_key(&mnemonic.to_ascii_uppercase())
    }

    /// Tokenize a source line on whitespace and hand it to the owning handler.
    /// Blank lines are a no-op.
    pub fn execute_line(&self, line: &str, state: &mut InterpreterState) -> Result<(), VertigoError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Ok(());
        };
        match self.handlers.get(&first.to_ascii_uppercase()) {
            Some((_, handler)) => handler(parts.as_slice(), state),
            None => Err(VertigoError::syntax(
                state.current_line(),
                format!("Unknown instruction '{}'.", first),
            )),
        }
    }
}
