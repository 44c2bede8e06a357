//! Letter/code conversion over the 26-letter Latin alphabet.
//!
//! Every internal value is a code in `0..26`, bijective with an uppercase
//! letter `A..=Z`. All rotor arithmetic happens on the integers modulo 26.

use crate::error::ConfigurationError;

/// Number of letters, and the modulus of all rotor arithmetic.
pub(crate) const ALPHABET_SIZE: usize = 26;

const MODULUS: u8 = ALPHABET_SIZE as u8;

/// Converts an uppercase letter to its code, or `None` outside `A..=Z`.
pub(crate) fn letter_to_code(letter: char) -> Option<u8> {
    if letter.is_ascii_uppercase() {
        Some(letter as u8 - b'A')
    } else {
        None
    }
}

/// Converts a code in `0..26` back to its letter.
///
/// Codes are reduced modulo 26 first, so this never produces a
/// non-letter.
pub(crate) fn code_to_letter(code: u8) -> char {
    char::from(b'A' + code % MODULUS)
}

/// `(a + b) mod 26`.
pub(crate) fn add(a: u8, b: u8) -> u8 {
    (a % MODULUS + b % MODULUS) % MODULUS
}

/// `(a - b) mod 26`, always non-negative.
pub(crate) fn sub(a: u8, b: u8) -> u8 {
    (a % MODULUS + MODULUS - b % MODULUS) % MODULUS
}

/// Parses a per-rotor letter string such as a ring setting or an indicator.
///
/// # Parameters
/// - `text`: The letters, left to right.
/// - `expected`: Required number of letters (one per rotor).
/// - `field`: Field name used in the error.
///
/// # Errors
/// Returns [`ConfigurationError::WrongLength`] or
/// [`ConfigurationError::InvalidLetter`].
pub(crate) fn parse_letters(
    text: &str,
    expected: usize,
    field: &'static str,
) -> Result<Vec<u8>, ConfigurationError> {
    let actual = text.chars().count();
    if actual != expected {
        return Err(ConfigurationError::WrongLength {
            field,
            expected,
            actual,
        });
    }
    text.chars()
        .map(|letter| {
            letter_to_code(letter).ok_or(ConfigurationError::InvalidLetter { field, letter })
        })
        .collect()
}

/// Renders a sequence of codes as letters.
pub(crate) fn codes_to_string(codes: impl IntoIterator<Item = u8>) -> String {
    codes.into_iter().map(code_to_letter).collect()
}
