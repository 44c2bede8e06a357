//! Error types for the enigma library.
//!
//! Three families of failure exist: bad per-character input, a rejected
//! machine configuration, and static wiring data that breaks the
//! permutation invariants. All of them are deterministic, so none is worth
//! retrying.

use thiserror::Error;

/// Errors produced by the enigma library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// The argument to an encipher call was not exactly one letter A-Z.
    #[error("Invalid input {input:?}: expected a single letter A-Z")]
    InvalidInput {
        /// The rejected argument, as given.
        input: String,
    },

    /// A configuration record was rejected. The machine keeps its
    /// previous state.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// A wiring table is not a permutation, or a reflector wiring is not an
    /// involution.
    #[error("Invariant violation in {name}: {reason}")]
    InvariantViolation {
        /// Label of the rotor or reflector being built.
        name: String,
        /// What is wrong with the wiring.
        reason: String,
    },
}

impl EnigmaError {
    pub(crate) fn invalid_input(input: impl Into<String>) -> Self {
        EnigmaError::InvalidInput {
            input: input.into(),
        }
    }

    pub(crate) fn invariant(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EnigmaError::InvariantViolation {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Reasons a [`MachineConfig`](crate::config::MachineConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Rotor id not present in the catalog.
    #[error("Unknown rotor id {0:?}")]
    UnknownRotor(String),

    /// Reflector id not present in the catalog.
    #[error("Unknown reflector id {0:?}")]
    UnknownReflector(String),

    /// Only 3 and 4 rotor machines exist.
    #[error("Rotor selection must name 3 or 4 rotors, got {0}")]
    RotorCount(usize),

    /// The same rotor was selected twice.
    #[error("Rotor {0} selected more than once")]
    DuplicateRotor(String),

    /// Beta/Gamma outside the fourth slot, or a stepping rotor in it.
    #[error("Rotor {rotor} cannot be placed in the {slot} slot")]
    MisplacedRotor { rotor: String, slot: &'static str },

    /// Thin reflector with 3 rotors, or wide reflector with 4.
    #[error("Reflector {reflector} does not fit a {rotors}-rotor machine")]
    ReflectorMismatch { reflector: String, rotors: usize },

    /// A per-rotor letter string has the wrong number of letters.
    #[error("{field} must have {expected} letters, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A per-rotor letter string contains something other than A-Z.
    #[error("{field} contains invalid letter {letter:?}")]
    InvalidLetter { field: &'static str, letter: char },

    /// A plug pair is not two distinct letters A-Z.
    #[error("Malformed plugboard pair {0:?}")]
    MalformedPlugPair(String),

    /// A letter is used by more than one plug pair.
    #[error("Plugboard letter {0} appears in more than one pair")]
    OverlappingPlugPair(char),
}
