//! Permutation checks and inversion over `0..26`.
//!
//! Wiring tables come from static catalog data; these helpers are the only
//! place that data is checked against the bijection and involution
//! invariants.

use super::alphabet::ALPHABET_SIZE;

/// A wiring table: entry `i` is the output code for input code `i`.
pub(crate) type Table = [u8; ALPHABET_SIZE];

/// The identity table `[0, 1, ..., 25]`.
pub(crate) fn identity() -> Table {
    let mut table = [0u8; ALPHABET_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = i as u8;
    }
    table
}

/// Returns the first code that is out of range or hit twice, if any.
///
/// `None` means `table` is a bijection of `0..26`.
pub(crate) fn find_collision(table: &Table) -> Option<u8> {
    let mut seen = [false; ALPHABET_SIZE];
    for &code in table {
        match seen.get_mut(usize::from(code)) {
            Some(slot) if !*slot => *slot = true,
            _ => return Some(code),
        }
    }
    None
}

/// Whether applying `table` twice is the identity.
///
/// Only meaningful for tables that are already permutations.
pub(crate) fn is_involution(table: &Table) -> bool {
    table
        .iter()
        .enumerate()
        .all(|(i, &code)| usize::from(table[usize::from(code)]) == i)
}

/// Computes the inverse of a permutation.
///
/// The result satisfies `inverse[table[i]] == i` for every `i`.
pub(crate) fn invert(table: &Table) -> Table {
    let mut inverse = [0u8; ALPHABET_SIZE];
    for (i, &code) in table.iter().enumerate() {
        inverse[usize::from(code)] = i as u8;
    }
    inverse
}
