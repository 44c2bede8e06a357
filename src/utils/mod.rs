//! Alphabet arithmetic and permutation helpers shared by the cipher
//! components.

pub(crate) mod alphabet;
pub(crate) mod permutation;
