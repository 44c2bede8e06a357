//! Plugboard: symmetric letter swaps at both ends of the signal path.

use crate::error::ConfigurationError;
use crate::utils::alphabet;
use crate::utils::permutation::{self, Table};

/// Pairwise letter-swap table, always an involution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    table: Table,
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugboard {
    /// An empty plugboard (identity table).
    pub fn new() -> Self {
        Plugboard {
            table: permutation::identity(),
        }
    }

    /// Builds a plugboard from letter pairs such as `["AN", "PF"]`.
    ///
    /// # Errors
    /// See [`configure`](Self::configure).
    pub fn with_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, ConfigurationError> {
        let mut plugboard = Self::new();
        plugboard.configure(pairs)?;
        Ok(plugboard)
    }

    /// Substitutes a contact code. Codes are read modulo 26.
    pub fn apply(&self, code: u8) -> u8 {
        self.table[usize::from(code) % alphabet::ALPHABET_SIZE]
    }

    /// Replaces the whole table: identity, then one swap per pair.
    ///
    /// The table is only replaced if every pair is valid, so a failed call
    /// leaves the previous wiring in place.
    ///
    /// # Parameters
    /// - `pairs`: Disjoint two-letter strings.
    ///
    /// # Errors
    /// - [`ConfigurationError::MalformedPlugPair`] if a pair is not two
    ///   distinct letters `A..=Z`.
    /// - [`ConfigurationError::OverlappingPlugPair`] if a letter is already
    ///   plugged by an earlier pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::plugboard::Plugboard;
    ///
    /// let mut plugboard = Plugboard::new();
    /// plugboard.configure(&["AN", "PF"]).unwrap();
    /// assert_eq!(plugboard.apply(0), 13);
    /// assert!(plugboard.configure(&["AB", "BC"]).is_err());
    /// assert_eq!(plugboard.pairs(), vec!["AN", "FP"]);
    /// ```
    pub fn configure<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<(), ConfigurationError> {
        let mut table = permutation::identity();
        for pair in pairs {
            let (a, b) = parse_pair(pair.as_ref())?;
            for code in [a, b] {
                if table[usize::from(code)] != code {
                    return Err(ConfigurationError::OverlappingPlugPair(
                        alphabet::code_to_letter(code),
                    ));
                }
            }
            table[usize::from(a)] = b;
            table[usize::from(b)] = a;
        }
        self.table = table;
        Ok(())
    }

    /// Current swaps as sorted two-letter strings, lower letter first.
    pub fn pairs(&self) -> Vec<String> {
        self.table
            .iter()
            .enumerate()
            .filter(|&(i, &code)| usize::from(code) > i)
            .map(|(i, &code)| alphabet::codes_to_string([i as u8, code]))
            .collect()
    }

    /// Whether no letters are swapped.
    pub fn is_empty(&self) -> bool {
        self.table == permutation::identity()
    }
}

fn parse_pair(pair: &str) -> Result<(u8, u8), ConfigurationError> {
    let malformed = || ConfigurationError::MalformedPlugPair(pair.to_string());
    let mut letters = pair.chars();
    match (letters.next(), letters.next(), letters.next()) {
        (Some(a), Some(b), None) => {
            let a = alphabet::letter_to_code(a).ok_or_else(malformed)?;
            let b = alphabet::letter_to_code(b).ok_or_else(malformed)?;
            if a == b {
                return Err(malformed());
            }
            Ok((a, b))
        }
        _ => Err(malformed()),
    }
}
