//! Fixed catalog of rotor and reflector wirings.
//!
//! Rotors I-V are the stepping rotors. Beta and Gamma are the thin,
//! non-stepping rotors that only fit the fourth slot, next to a thin
//! reflector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, EnigmaError};
use crate::rotor::{Reflector, Rotor};

/// Catalog id of a rotor.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotorId {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "II")]
    II,
    #[serde(rename = "III")]
    III,
    #[serde(rename = "IV")]
    IV,
    #[serde(rename = "V")]
    V,
    Beta,
    Gamma,
}

impl RotorId {
    /// Every rotor in the catalog.
    pub const ALL: [RotorId; 7] = [
        RotorId::I,
        RotorId::II,
        RotorId::III,
        RotorId::IV,
        RotorId::V,
        RotorId::Beta,
        RotorId::Gamma,
    ];

    /// Canonical name, e.g. `"IV"`.
    pub fn name(self) -> &'static str {
        match self {
            RotorId::I => "I",
            RotorId::II => "II",
            RotorId::III => "III",
            RotorId::IV => "IV",
            RotorId::V => "V",
            RotorId::Beta => "Beta",
            RotorId::Gamma => "Gamma",
        }
    }

    /// Output letters for inputs `A..=Z` at ring setting A.
    pub fn wiring(self) -> &'static str {
        match self {
            RotorId::I => "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
            RotorId::II => "AJDKSIRUXBLHWTMCQGZNPYFVOE",
            RotorId::III => "BDFHJLCPRTXVZNYEIWGAKMUSQO",
            RotorId::IV => "ESOVPZJAYQUIRHXLNFTGKDCMWB",
            RotorId::V => "VZBRGITYUPSDNHLXAWMJQOFECK",
            RotorId::Beta => "LEYJVCNIXWPBQMDRTAKZGFUHOS",
            RotorId::Gamma => "FSOKANUERHMBTIYCWLQPZXVGJD",
        }
    }

    /// Window letter at which the rotor carries its left neighbour.
    pub fn notch(self) -> Option<char> {
        match self {
            RotorId::I => Some('Q'),
            RotorId::II => Some('E'),
            RotorId::III => Some('V'),
            RotorId::IV => Some('J'),
            RotorId::V => Some('Z'),
            RotorId::Beta | RotorId::Gamma => None,
        }
    }

    /// Whether this is one of the thin rotors of the fourth slot.
    pub fn is_fourth_rotor(self) -> bool {
        matches!(self, RotorId::Beta | RotorId::Gamma)
    }

    /// Builds a fresh rotor at position 0, ring setting 0.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvariantViolation`] if the catalog entry is
    /// not a valid permutation.
    pub fn build(self) -> Result<Rotor, EnigmaError> {
        Rotor::new(self.name(), self.wiring(), self.notch())
    }
}

impl fmt::Display for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotorId {
    type Err = ConfigurationError;

    /// Accepts Roman numerals, the digits `1..=5`, and `Beta`/`Gamma`,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "1" => Ok(RotorId::I),
            "II" | "2" => Ok(RotorId::II),
            "III" | "3" => Ok(RotorId::III),
            "IV" | "4" => Ok(RotorId::IV),
            "V" | "5" => Ok(RotorId::V),
            "BETA" => Ok(RotorId::Beta),
            "GAMMA" => Ok(RotorId::Gamma),
            _ => Err(ConfigurationError::UnknownRotor(s.to_string())),
        }
    }
}

/// Catalog id of a reflector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectorId {
    #[default]
    #[serde(rename = "Wide-B")]
    WideB,
    #[serde(rename = "Wide-C")]
    WideC,
    #[serde(rename = "Thin-B")]
    ThinB,
    #[serde(rename = "Thin-C")]
    ThinC,
}

impl ReflectorId {
    /// Every reflector in the catalog.
    pub const ALL: [ReflectorId; 4] = [
        ReflectorId::WideB,
        ReflectorId::WideC,
        ReflectorId::ThinB,
        ReflectorId::ThinC,
    ];

    /// Canonical name, e.g. `"Thin-B"`.
    pub fn name(self) -> &'static str {
        match self {
            ReflectorId::WideB => "Wide-B",
            ReflectorId::WideC => "Wide-C",
            ReflectorId::ThinB => "Thin-B",
            ReflectorId::ThinC => "Thin-C",
        }
    }

    /// Output letters for inputs `A..=Z`.
    pub fn wiring(self) -> &'static str {
        match self {
            ReflectorId::WideB => "YRUHQSLDPXNGOKMIEBFZCWVJAT",
            ReflectorId::WideC => "FVPJIAOYEDRZXWGCTKUQSBNMHL",
            ReflectorId::ThinB => "ENKQAUYWJICOPBLMDXZVFTHRGS",
            ReflectorId::ThinC => "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
        }
    }

    /// Thin reflectors pair with a fourth rotor; wide ones fill that space
    /// themselves.
    pub fn is_thin(self) -> bool {
        matches!(self, ReflectorId::ThinB | ReflectorId::ThinC)
    }

    /// Builds the reflector, checking its wiring is an involution.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvariantViolation`] on a bad catalog entry.
    pub fn build(self) -> Result<Reflector, EnigmaError> {
        Reflector::new(self.name(), self.wiring())
    }
}

impl fmt::Display for ReflectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReflectorId {
    type Err = ConfigurationError;

    /// Accepts `Wide-B`, `B`, `Thin-C`, ... ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "B" | "WIDEB" => Ok(ReflectorId::WideB),
            "C" | "WIDEC" => Ok(ReflectorId::WideC),
            "THINB" | "BTHIN" => Ok(ReflectorId::ThinB),
            "THINC" | "CTHIN" => Ok(ReflectorId::ThinC),
            _ => Err(ConfigurationError::UnknownReflector(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rotors_are_permutations() {
        for id in RotorId::ALL {
            let rotor = id.build().unwrap();
            assert_eq!(rotor.alphabet(), id.wiring());
            assert_eq!(rotor.label(), id.name());
        }
    }

    #[test]
    fn test_catalog_reflectors_are_involutions() {
        for id in ReflectorId::ALL {
            let reflector = id.build().unwrap();
            for code in 0..26u8 {
                let out = reflector.encode(code);
                assert_ne!(out, code, "{} has a fixed point", id);
                assert_eq!(reflector.encode(out), code);
            }
        }
    }

    #[test]
    fn test_notches() {
        let notches: Vec<Option<char>> = RotorId::ALL.iter().map(|id| id.notch()).collect();
        assert_eq!(
            notches,
            vec![
                Some('Q'),
                Some('E'),
                Some('V'),
                Some('J'),
                Some('Z'),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_rotor_id_parsing() {
        assert_eq!("I".parse::<RotorId>(), Ok(RotorId::I));
        assert_eq!("iv".parse::<RotorId>(), Ok(RotorId::IV));
        assert_eq!("3".parse::<RotorId>(), Ok(RotorId::III));
        assert_eq!("gamma".parse::<RotorId>(), Ok(RotorId::Gamma));
        assert_eq!(
            "VI".parse::<RotorId>(),
            Err(ConfigurationError::UnknownRotor("VI".to_string()))
        );
        for id in RotorId::ALL {
            assert_eq!(id.to_string().parse::<RotorId>(), Ok(id));
        }
    }

    #[test]
    fn test_reflector_id_parsing() {
        assert_eq!("B".parse::<ReflectorId>(), Ok(ReflectorId::WideB));
        assert_eq!("wide-c".parse::<ReflectorId>(), Ok(ReflectorId::WideC));
        assert_eq!("Thin_B".parse::<ReflectorId>(), Ok(ReflectorId::ThinB));
        assert!("A".parse::<ReflectorId>().is_err());
        for id in ReflectorId::ALL {
            assert_eq!(id.to_string().parse::<ReflectorId>(), Ok(id));
        }
        assert_eq!(ReflectorId::default(), ReflectorId::WideB);
    }

    #[test]
    fn test_fourth_rotor_and_thin_flags() {
        assert!(RotorId::Beta.is_fourth_rotor());
        assert!(!RotorId::V.is_fourth_rotor());
        assert!(ReflectorId::ThinC.is_thin());
        assert!(!ReflectorId::WideB.is_thin());
    }
}
