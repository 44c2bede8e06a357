//! Machine configuration record.
//!
//! A [`MachineConfig`] is the per-message key: which rotors sit where, the
//! reflector, the ring settings, the plugboard pairs and the indicator. It
//! is plain data so callers can persist it with serde in any format.
//!
//! # Example
//!
//! ```
//! use enigma::catalog::{ReflectorId, RotorId};
//! use enigma::config::MachineConfig;
//!
//! let config = MachineConfig::default()
//!     .with_rotors(vec![RotorId::III, RotorId::I, RotorId::II])
//!     .with_ring_settings("FKW")
//!     .with_plugboard_pairs(["AN", "PF"])
//!     .with_indicator("QEV");
//! assert!(config.validate().is_ok());
//! assert_eq!(config.reflector, ReflectorId::WideB);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{ReflectorId, RotorId};
use crate::error::ConfigurationError;
use crate::plugboard::Plugboard;
use crate::utils::alphabet;

/// Number of rotors that step.
pub const STEPPING_ROTORS: usize = 3;

/// Rotor count of the four-rotor variant.
pub const MAX_ROTORS: usize = STEPPING_ROTORS + 1;

/// Configuration of a rotor assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Rotor ids, left to right. 3 rotors, or 4 with Beta/Gamma leftmost.
    pub rotor_selection: Vec<RotorId>,
    /// Reflector id. Wide for 3 rotors, thin for 4.
    #[serde(default)]
    pub reflector: ReflectorId,
    /// One ring letter per rotor, left to right.
    pub ring_settings: String,
    /// Disjoint two-letter plug pairs.
    #[serde(default)]
    pub plugboard_pairs: Vec<String>,
    /// Window letters at the start of the message, left to right.
    pub indicator: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rotor_selection: vec![RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::WideB,
            ring_settings: "AAA".to_string(),
            plugboard_pairs: Vec::new(),
            indicator: "AAA".to_string(),
        }
    }
}

impl MachineConfig {
    /// Create a new configuration with validation.
    ///
    /// # Errors
    /// Any [`ConfigurationError`] reported by [`validate`](Self::validate).
    pub fn new(
        rotor_selection: Vec<RotorId>,
        reflector: ReflectorId,
        ring_settings: &str,
        plugboard_pairs: Vec<String>,
        indicator: &str,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            rotor_selection,
            reflector,
            ring_settings: ring_settings.to_string(),
            plugboard_pairs,
            indicator: indicator.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a rotor selection written as ids separated by spaces or
    /// commas (`"I II III"`, `"Beta,II,IV,I"`), or as a run of digits
    /// (`"123"`).
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownRotor`] on an unknown id.
    pub fn parse_rotor_selection(text: &str) -> Result<Vec<RotorId>, ConfigurationError> {
        let text = text.trim();
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            return text.chars().map(|c| c.to_string().parse::<RotorId>()).collect();
        }
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse::<RotorId>)
            .collect()
    }

    /// Number of rotors in the selection.
    pub fn rotor_count(&self) -> usize {
        self.rotor_selection.len()
    }

    /// Checks every field without building a machine.
    ///
    /// # Errors
    /// - [`ConfigurationError::RotorCount`] unless 3 or 4 rotors are named.
    /// - [`ConfigurationError::DuplicateRotor`] if a rotor repeats.
    /// - [`ConfigurationError::MisplacedRotor`] if Beta/Gamma sit in a
    ///   stepping slot, or a stepping rotor in the fourth slot.
    /// - [`ConfigurationError::ReflectorMismatch`] if the reflector width
    ///   does not match the rotor count.
    /// - [`ConfigurationError::WrongLength`] / [`ConfigurationError::InvalidLetter`]
    ///   for bad ring settings or indicator.
    /// - [`ConfigurationError::MalformedPlugPair`] /
    ///   [`ConfigurationError::OverlappingPlugPair`] for bad plug pairs.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let count = self.rotor_count();
        if !(STEPPING_ROTORS..=MAX_ROTORS).contains(&count) {
            return Err(ConfigurationError::RotorCount(count));
        }

        let mut seen = HashSet::with_capacity(count);
        for id in &self.rotor_selection {
            if !seen.insert(*id) {
                return Err(ConfigurationError::DuplicateRotor(id.to_string()));
            }
        }

        // Leftmost entry of a 4-rotor selection is the fourth slot
        let fourth_slot = count - STEPPING_ROTORS;
        for (i, id) in self.rotor_selection.iter().enumerate() {
            let in_fourth_slot = i < fourth_slot;
            if id.is_fourth_rotor() != in_fourth_slot {
                return Err(ConfigurationError::MisplacedRotor {
                    rotor: id.to_string(),
                    slot: if in_fourth_slot { "fourth" } else { "stepping" },
                });
            }
        }

        if self.reflector.is_thin() != (count == MAX_ROTORS) {
            return Err(ConfigurationError::ReflectorMismatch {
                reflector: self.reflector.to_string(),
                rotors: count,
            });
        }

        alphabet::parse_letters(&self.ring_settings, count, "ring_settings")?;
        alphabet::parse_letters(&self.indicator, count, "indicator")?;
        Plugboard::with_pairs(&self.plugboard_pairs)?;
        Ok(())
    }

    /// Builder-style method to set the rotor selection
    pub fn with_rotors(mut self, rotors: Vec<RotorId>) -> Self {
        self.rotor_selection = rotors;
        self
    }

    /// Builder-style method to set the reflector
    pub fn with_reflector(mut self, reflector: ReflectorId) -> Self {
        self.reflector = reflector;
        self
    }

    /// Builder-style method to set the ring settings
    pub fn with_ring_settings(mut self, ring_settings: &str) -> Self {
        self.ring_settings = ring_settings.to_string();
        self
    }

    /// Builder-style method to set the plugboard pairs
    pub fn with_plugboard_pairs<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugboard_pairs = pairs.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style method to set the indicator
    pub fn with_indicator(mut self, indicator: &str) -> Self {
        self.indicator = indicator.to_string();
        self
    }
}
