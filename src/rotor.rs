//! Rotor and Reflector: the wired disks of the machine.
//!
//! A [`Rotor`] owns an immutable base wiring plus two pieces of mutable
//! state, its rotational `position` and its `ring_setting`. The ring setting
//! rotates the effective wiring table and shifts every output by the same
//! offset; the letter shown in the window is `position + ring_setting`.
//!
//! A [`Reflector`] is a rotor whose wiring is an involution and whose
//! position and ring setting stay at zero.

use crate::error::EnigmaError;
use crate::utils::alphabet::{self, ALPHABET_SIZE};
use crate::utils::permutation::{self, Table};

/// A wired rotor with position and ring-setting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    label: String,
    base: Table,
    forward: Table,
    backward: Table,
    notch: Option<u8>,
    position: u8,
    ring_setting: u8,
}

impl Rotor {
    /// Builds a rotor from its wiring letters and optional turnover notch.
    ///
    /// The rotor starts at position 0 with ring setting 0.
    ///
    /// # Parameters
    /// - `label`: Human-readable identity, e.g. `"I"`.
    /// - `wiring`: The 26 output letters for inputs `A..=Z`.
    /// - `notch`: Window letter at which the rotor to the left is carried,
    ///   or `None` for rotors that never carry.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvariantViolation`] if the wiring is not a
    /// permutation of `A..=Z` or the notch is not a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::rotor::Rotor;
    ///
    /// let rotor = Rotor::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", Some('Q')).unwrap();
    /// assert_eq!(rotor.encode_forward(0), 4);
    /// assert!(Rotor::new("bad", "AAAA", None).is_err());
    /// ```
    pub fn new(label: &str, wiring: &str, notch: Option<char>) -> Result<Self, EnigmaError> {
        let base = parse_wiring(label, wiring)?;
        let notch = match notch {
            Some(letter) => Some(alphabet::letter_to_code(letter).ok_or_else(|| {
                EnigmaError::invariant(label, format!("notch {:?} is not a letter A-Z", letter))
            })?),
            None => None,
        };
        Ok(Rotor {
            label: label.to_string(),
            base,
            forward: base,
            backward: permutation::invert(&base),
            notch,
            position: 0,
            ring_setting: 0,
        })
    }

    /// Rotor identity, e.g. `"III"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Substitution on the way in, toward the reflector.
    ///
    /// # Parameters
    /// - `code`: Contact code. Codes are read modulo 26, so `26` is contact
    ///   `A` again.
    pub fn encode_forward(&self, code: u8) -> u8 {
        self.forward[contact(code)]
    }

    /// Substitution on the way back from the reflector; the exact inverse of
    /// [`encode_forward`](Self::encode_forward). Codes are read modulo 26.
    pub fn encode_backward(&self, code: u8) -> u8 {
        self.backward[contact(code)]
    }

    /// Rotates the wiring core against the alphabet ring by `offset` steps.
    ///
    /// The effective table becomes `forward[i] = base[i - offset] + offset`
    /// (mod 26): the indexing and the output value shift together. The
    /// inverse table is recomputed.
    ///
    /// The offset wraps around the ring: `26` is setting A, `27` setting B.
    /// Letter input goes through [`MachineConfig`](crate::config::MachineConfig),
    /// which rejects anything outside `A..=Z` before it gets here.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::rotor::Rotor;
    ///
    /// let mut rotor = Rotor::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", Some('Q')).unwrap();
    /// rotor.set_ring_setting(2);
    /// assert_eq!(rotor.alphabet(), "ELGMOHNIFSXBPVQYAJZWURCKDT");
    /// ```
    pub fn set_ring_setting(&mut self, offset: u8) {
        let offset = offset % ALPHABET_SIZE as u8;
        for (i, entry) in self.forward.iter_mut().enumerate() {
            let source = alphabet::sub(i as u8, offset);
            *entry = alphabet::add(self.base[usize::from(source)], offset);
        }
        self.backward = permutation::invert(&self.forward);
        self.ring_setting = offset;
    }

    /// Current ring setting in `0..26`.
    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Current ring setting as a letter.
    pub fn ring_letter(&self) -> char {
        alphabet::code_to_letter(self.ring_setting)
    }

    /// Internal rotational offset in `0..26`.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Internal position as a letter.
    pub fn position_letter(&self) -> char {
        alphabet::code_to_letter(self.position)
    }

    /// Sets the internal position directly.
    ///
    /// The position wraps around the ring like
    /// [`set_ring_setting`](Self::set_ring_setting): `27` is position 1.
    pub fn set_position(&mut self, position: u8) {
        self.position = position % ALPHABET_SIZE as u8;
    }

    /// Sets the position so that `window_value` shows in the window.
    ///
    /// The window shows `position + ring_setting`, so the ring offset is
    /// subtracted back out.
    pub fn set_window_value(&mut self, window_value: u8) {
        self.position = alphabet::sub(window_value, self.ring_setting);
    }

    /// Sets the position from the letter an operator sees in the window.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] if `letter` is not `A..=Z`.
    pub fn set_position_from_window_letter(&mut self, letter: char) -> Result<(), EnigmaError> {
        let value = alphabet::letter_to_code(letter)
            .ok_or_else(|| EnigmaError::invalid_input(letter.to_string()))?;
        self.set_window_value(value);
        Ok(())
    }

    /// Advances one step. Turnover is decided by the assembly, not here.
    pub fn increment_position(&mut self) {
        self.position = alphabet::add(self.position, 1);
    }

    /// `(position + ring_setting) mod 26`, the value visible in the window.
    pub fn window_value(&self) -> u8 {
        alphabet::add(self.position, self.ring_setting)
    }

    /// The letter visible in the window.
    pub fn window_letter(&self) -> char {
        alphabet::code_to_letter(self.window_value())
    }

    /// Turnover notch, if the rotor has one.
    pub fn notch(&self) -> Option<u8> {
        self.notch
    }

    /// Whether the window currently shows the notch letter.
    ///
    /// Compared against the window value, not the raw position: the ring
    /// carries the notch with it.
    pub fn at_notch(&self) -> bool {
        self.notch == Some(self.window_value())
    }

    /// Effective forward wiring as a string of letters.
    pub fn alphabet(&self) -> String {
        alphabet::codes_to_string(self.forward)
    }
}

/// A fixed, non-stepping disk wired as an involution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    rotor: Rotor,
}

impl Reflector {
    /// Builds a reflector from its wiring letters.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvariantViolation`] if the wiring is not a
    /// permutation or not its own inverse.
    pub fn new(label: &str, wiring: &str) -> Result<Self, EnigmaError> {
        let rotor = Rotor::new(label, wiring, None)?;
        if !permutation::is_involution(&rotor.base) {
            return Err(EnigmaError::invariant(
                label,
                "reflector wiring is not an involution",
            ));
        }
        Ok(Reflector { rotor })
    }

    /// Reflector identity, e.g. `"Wide-B"`.
    pub fn label(&self) -> &str {
        self.rotor.label()
    }

    /// Reflects a contact code. Forward and backward coincide.
    pub fn encode(&self, code: u8) -> u8 {
        self.rotor.encode_forward(code)
    }

    /// Wiring as a string of letters.
    pub fn alphabet(&self) -> String {
        self.rotor.alphabet()
    }
}

fn contact(code: u8) -> usize {
    usize::from(code) % ALPHABET_SIZE
}

fn parse_wiring(label: &str, wiring: &str) -> Result<Table, EnigmaError> {
    let count = wiring.chars().count();
    if count != ALPHABET_SIZE {
        return Err(EnigmaError::invariant(
            label,
            format!("wiring has {} letters, expected {}", count, ALPHABET_SIZE),
        ));
    }
    let mut table = permutation::identity();
    for (entry, letter) in table.iter_mut().zip(wiring.chars()) {
        *entry = alphabet::letter_to_code(letter).ok_or_else(|| {
            EnigmaError::invariant(label, format!("wiring contains {:?}", letter))
        })?;
    }
    if let Some(code) = permutation::find_collision(&table) {
        return Err(EnigmaError::invariant(
            label,
            format!(
                "wiring is not a permutation: {} appears twice",
                alphabet::code_to_letter(code)
            ),
        ));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
    const WIDE_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

    fn rotor_i() -> Rotor {
        Rotor::new("I", ROTOR_I, Some('Q')).unwrap()
    }

    #[test]
    fn test_new_rotor_defaults() {
        let rotor = rotor_i();
        assert_eq!(rotor.label(), "I");
        assert_eq!(rotor.position(), 0);
        assert_eq!(rotor.ring_setting(), 0);
        assert_eq!(rotor.notch(), Some(16));
        assert_eq!(rotor.alphabet(), ROTOR_I);
        assert_eq!(rotor.window_letter(), 'A');
    }

    #[test]
    fn test_forward_backward_inverse() {
        let rotor = rotor_i();
        for code in 0..26u8 {
            assert_eq!(rotor.encode_backward(rotor.encode_forward(code)), code);
        }
        assert_eq!(rotor.encode_forward(0), 4);
        assert_eq!(rotor.encode_backward(4), 0);
    }

    #[test]
    fn test_ring_setting_c_rotates_alphabet() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(2);
        assert_eq!(rotor.alphabet(), "ELGMOHNIFSXBPVQYAJZWURCKDT");
        assert_eq!(rotor.ring_letter(), 'C');
    }

    #[test]
    fn test_ring_setting_back_to_a_restores_base() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(7);
        rotor.set_ring_setting(0);
        assert_eq!(rotor.alphabet(), ROTOR_I);
    }

    #[test]
    fn test_inverse_tracks_ring_setting() {
        let mut rotor = rotor_i();
        for offset in 0..26u8 {
            rotor.set_ring_setting(offset);
            for code in 0..26u8 {
                assert_eq!(rotor.encode_backward(rotor.encode_forward(code)), code);
                assert_eq!(rotor.encode_forward(rotor.encode_backward(code)), code);
            }
        }
    }

    #[test]
    fn test_out_of_range_codes_wrap() {
        let rotor = rotor_i();
        assert_eq!(rotor.encode_forward(26), rotor.encode_forward(0));
        assert_eq!(rotor.encode_backward(30), rotor.encode_backward(4));
        assert_eq!(rotor.encode_forward(u8::MAX), rotor.encode_forward(255 % 26));

        let reflector = Reflector::new("Wide-B", WIDE_B).unwrap();
        assert_eq!(reflector.encode(200), reflector.encode(200 % 26));
    }

    #[test]
    fn test_ring_setting_and_position_wrap() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(28);
        assert_eq!(rotor.ring_setting(), 2);
        assert_eq!(rotor.alphabet(), "ELGMOHNIFSXBPVQYAJZWURCKDT");

        rotor.set_position(27);
        assert_eq!(rotor.position(), 1);
        rotor.set_position(u8::MAX);
        assert_eq!(rotor.position(), 255 % 26);
    }

    #[test]
    fn test_window_includes_ring_offset() {
        let mut rotor = rotor_i();
        rotor.set_ring_setting(3);
        rotor.set_position_from_window_letter('B').unwrap();
        // B - D wraps to Y
        assert_eq!(rotor.position_letter(), 'Y');
        assert_eq!(rotor.window_letter(), 'B');
        assert_eq!(rotor.window_value(), 1);
    }

    #[test]
    fn test_set_position_from_invalid_letter() {
        let mut rotor = rotor_i();
        rotor.set_position(5);
        assert!(rotor.set_position_from_window_letter('b').is_err());
        assert_eq!(rotor.position(), 5);
    }

    #[test]
    fn test_increment_wraps() {
        let mut rotor = rotor_i();
        rotor.set_position(25);
        rotor.increment_position();
        assert_eq!(rotor.position(), 0);
    }

    #[test]
    fn test_at_notch_uses_window_value() {
        let mut rotor = rotor_i();
        rotor.set_position(16);
        assert!(rotor.at_notch());

        rotor.set_ring_setting(1);
        assert!(!rotor.at_notch());
        rotor.set_window_value(16);
        assert!(rotor.at_notch());
        assert_eq!(rotor.position(), 15);
    }

    #[test]
    fn test_rotor_without_notch_never_at_notch() {
        let mut rotor = Rotor::new("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", None).unwrap();
        for _ in 0..26 {
            assert!(!rotor.at_notch());
            rotor.increment_position();
        }
    }

    #[test]
    fn test_rejects_bad_wiring() {
        assert!(matches!(
            Rotor::new("short", "ABC", None),
            Err(EnigmaError::InvariantViolation { .. })
        ));
        assert!(matches!(
            Rotor::new("dup", "AKMFLGDQVZNTOWYHXUSPAIBRCJ", None),
            Err(EnigmaError::InvariantViolation { .. })
        ));
        assert!(matches!(
            Rotor::new("lower", "eKMFLGDQVZNTOWYHXUSPAIBRCJ", None),
            Err(EnigmaError::InvariantViolation { .. })
        ));
        assert!(matches!(
            Rotor::new("notch", ROTOR_I, Some('?')),
            Err(EnigmaError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_reflector_is_involution() {
        let reflector = Reflector::new("Wide-B", WIDE_B).unwrap();
        for code in 0..26u8 {
            assert_eq!(reflector.encode(reflector.encode(code)), code);
        }
        assert_eq!(reflector.label(), "Wide-B");
        assert_eq!(reflector.alphabet(), WIDE_B);
    }

    #[test]
    fn test_reflector_rejects_non_involution() {
        let err = Reflector::new("fake", ROTOR_I).unwrap_err();
        assert_eq!(
            err,
            EnigmaError::invariant("fake", "reflector wiring is not an involution")
        );
    }
}
