//! RotorAssembly: the cipher engine.
//!
//! Owns the rotor slots, the reflector and the plugboard, runs the stepping
//! state machine and carries each letter through the signal path:
//!
//! ```text
//! plugboard → step right rotor → right → middle → left (→ fourth)
//!           → reflector
//!           → (fourth →) left → middle → right → plugboard
//! ```
//!
//! Rotors live in a single slot array indexed from the right (`0` = right,
//! `1` = middle, `2` = left, `3` = fourth). Neighbours are resolved by
//! index; one past the leftmost slot is the reflector, which sits at
//! position zero.

use std::fmt;

use tracing::debug;

use crate::catalog::ReflectorId;
use crate::config::{MachineConfig, STEPPING_ROTORS};
use crate::error::EnigmaError;
use crate::observer::{MachineEvent, MachineObserver};
use crate::plugboard::Plugboard;
use crate::rotor::{Reflector, Rotor};
use crate::utils::alphabet;

const RIGHT: usize = 0;
const MIDDLE: usize = 1;

/// One of the three stepping rotor slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Right,
    Middle,
    Left,
}

impl Slot {
    const BY_INDEX: [Slot; STEPPING_ROTORS] = [Slot::Right, Slot::Middle, Slot::Left];

    fn index(self) -> usize {
        match self {
            Slot::Right => 0,
            Slot::Middle => 1,
            Slot::Left => 2,
        }
    }
}

/// Rotor cipher machine: 3 stepping rotors, an optional fourth rotor, a
/// reflector and a plugboard.
///
/// # Examples
///
/// ```
/// use enigma::{MachineConfig, RotorAssembly};
///
/// let config = MachineConfig::default().with_plugboard_pairs(["AN", "PF"]);
/// let mut machine = RotorAssembly::from_config(&config).unwrap();
/// let ciphertext = machine.encipher_text("HELLOWORLD").unwrap();
///
/// machine.reset();
/// assert_eq!(machine.encipher_text(&ciphertext).unwrap(), "HELLOWORLD");
/// ```
pub struct RotorAssembly {
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
    config: MachineConfig,
    stepping: bool,
    observer: Option<Box<dyn MachineObserver>>,
}

impl fmt::Debug for RotorAssembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotorAssembly")
            .field("config", &self.config)
            .field("window", &self.window())
            .field("stepping", &self.stepping)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl RotorAssembly {
    /// Builds a machine from a configuration record.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidConfiguration`] if the record is rejected.
    /// - [`EnigmaError::InvariantViolation`] if a catalog wiring is broken.
    pub fn from_config(config: &MachineConfig) -> Result<Self, EnigmaError> {
        let (rotors, reflector, plugboard) = Self::assemble(config)?;
        let machine = RotorAssembly {
            rotors,
            reflector,
            plugboard,
            config: config.clone(),
            stepping: true,
            observer: None,
        };
        debug!(
            rotors = %machine.rotor_labels(),
            reflector = %config.reflector,
            window = %machine.window(),
            "Rotor assembly built"
        );
        Ok(machine)
    }

    /// Reconfigures the machine for a new message key.
    ///
    /// Binds the rotor slots, applies the ring settings, wires the plugboard
    /// and sets the rotor positions from the indicator, in that order. The
    /// switch is atomic: on error the previous configuration and rotor
    /// positions are kept. Stepping mode and the observer are preserved.
    ///
    /// # Errors
    /// Same as [`from_config`](Self::from_config).
    pub fn configure(&mut self, config: &MachineConfig) -> Result<(), EnigmaError> {
        let (rotors, reflector, plugboard) = Self::assemble(config)?;
        self.rotors = rotors;
        self.reflector = reflector;
        self.plugboard = plugboard;
        self.config = config.clone();
        debug!(
            rotors = %self.rotor_labels(),
            reflector = %config.reflector,
            window = %self.window(),
            "Rotor assembly configured"
        );
        self.notify(|machine| MachineEvent::Configured {
            rotors: machine.rotor_labels(),
            reflector: machine.config.reflector,
            window: machine.window(),
        });
        Ok(())
    }

    fn assemble(config: &MachineConfig) -> Result<(Vec<Rotor>, Reflector, Plugboard), EnigmaError> {
        config.validate()?;
        let count = config.rotor_count();
        let rings = alphabet::parse_letters(&config.ring_settings, count, "ring_settings")?;
        let indicator = alphabet::parse_letters(&config.indicator, count, "indicator")?;

        // Slot 0 is the rightmost rotor
        let mut rotors = Vec::with_capacity(count);
        for id in config.rotor_selection.iter().rev() {
            rotors.push(id.build()?);
        }
        for (rotor, &ring) in rotors.iter_mut().zip(rings.iter().rev()) {
            rotor.set_ring_setting(ring);
        }
        let plugboard = Plugboard::with_pairs(&config.plugboard_pairs)?;
        for (rotor, &window) in rotors.iter_mut().zip(indicator.iter().rev()) {
            rotor.set_window_value(window);
        }

        Ok((rotors, config.reflector.build()?, plugboard))
    }

    /// Installs an observer for step, turnover and encipher events.
    pub fn set_observer(&mut self, observer: Box<dyn MachineObserver>) {
        self.observer = Some(observer);
    }

    /// Removes and returns the current observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn MachineObserver>> {
        self.observer.take()
    }

    /// Enables or disables rotor stepping. With stepping disabled the
    /// machine is a fixed monoalphabetic substitution.
    pub fn set_stepping(&mut self, enabled: bool) {
        self.stepping = enabled;
    }

    /// Whether rotors step before each letter.
    pub fn is_stepping(&self) -> bool {
        self.stepping
    }

    /// Sets the rotor start positions from window letters, left to right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidConfiguration`] if `indicator` does not
    /// carry exactly one letter A-Z per rotor. Positions are unchanged on
    /// error.
    pub fn set_indicator(&mut self, indicator: &str) -> Result<(), EnigmaError> {
        let windows = alphabet::parse_letters(indicator, self.rotors.len(), "indicator")?;
        for (rotor, &window) in self.rotors.iter_mut().zip(windows.iter().rev()) {
            rotor.set_window_value(window);
        }
        self.config.indicator = indicator.to_string();
        debug!(%indicator, "Indicator set");
        Ok(())
    }

    /// Returns the rotors to the indicator of the current configuration.
    pub fn reset(&mut self) {
        let indicator = self.config.indicator.clone();
        // The stored indicator was validated when it was accepted
        if self.set_indicator(&indicator).is_err() {
            debug!(%indicator, "Stored indicator rejected on reset");
        }
    }

    /// Steps the rotor in `slot`, with turnover and, for the right rotor,
    /// the double-step of the middle rotor.
    ///
    /// The carry is read from the window before anything moves. When the
    /// right rotor is stepped without a carry while the middle rotor sits on
    /// its notch, the middle rotor steps as well (and carries the left
    /// rotor). The stepped rotor then advances, and a carry walks left
    /// through the stepping rotors. The fourth rotor and the reflector never
    /// step.
    pub fn step(&mut self, slot: Slot) {
        let index = slot.index();
        let carry = self.rotors[index].at_notch();
        if index == RIGHT && !carry && self.rotors[MIDDLE].at_notch() {
            self.notify(|machine| MachineEvent::DoubleStep {
                window: machine.window(),
            });
            self.advance(MIDDLE);
        }
        self.advance(index);
    }

    /// Advances `start` and carries left while the rotor leaving its notch
    /// has a stepping neighbour.
    fn advance(&mut self, start: usize) {
        let mut index = start;
        loop {
            let carry = self.rotors[index].at_notch();
            self.rotors[index].increment_position();
            self.notify(|machine| MachineEvent::Stepped {
                slot: Slot::BY_INDEX[index],
                window: machine.window(),
            });

            let next = index + 1;
            if !carry || next >= STEPPING_ROTORS {
                break;
            }
            self.notify(|_| MachineEvent::Turnover {
                from: Slot::BY_INDEX[index],
                to: Slot::BY_INDEX[next],
            });
            index = next;
        }
    }

    /// Enciphers one letter `A..=Z`.
    ///
    /// Steps the right rotor first (unless stepping is disabled), then
    /// sends the letter through plugboard, rotors, reflector, rotors and
    /// plugboard again. Deciphering is the same operation from the same
    /// start state.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] for anything but an uppercase
    /// ASCII letter. Rotor state is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{MachineConfig, RotorAssembly};
    ///
    /// let mut machine = RotorAssembly::from_config(&MachineConfig::default()).unwrap();
    /// assert_eq!(machine.encipher('A').unwrap(), 'B');
    /// assert_eq!(machine.window(), "AAB");
    /// assert!(machine.encipher('a').is_err());
    /// assert_eq!(machine.window(), "AAB");
    /// ```
    pub fn encipher(&mut self, letter: char) -> Result<char, EnigmaError> {
        let code = alphabet::letter_to_code(letter)
            .ok_or_else(|| EnigmaError::invalid_input(letter.to_string()))?;
        let output = alphabet::code_to_letter(self.encipher_code(code));
        self.notify(|machine| MachineEvent::Enciphered {
            input: letter,
            output,
            window: machine.window(),
        });
        Ok(output)
    }

    /// Enciphers a string holding exactly one letter `A..=Z`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] for an empty string, more than
    /// one character, or a non-letter.
    pub fn encipher_letter(&mut self, letter: &str) -> Result<char, EnigmaError> {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(single), None) => self
                .encipher(single)
                .map_err(|_| EnigmaError::invalid_input(letter)),
            _ => Err(EnigmaError::invalid_input(letter)),
        }
    }

    /// Enciphers a run of letters `A..=Z`.
    ///
    /// Every character is checked before the first step, so on error the
    /// rotors have not moved.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidInput`] naming the first offending
    /// character.
    pub fn encipher_text(&mut self, text: &str) -> Result<String, EnigmaError> {
        if let Some(bad) = text.chars().find(|c| alphabet::letter_to_code(*c).is_none()) {
            return Err(EnigmaError::invalid_input(bad.to_string()));
        }
        text.chars().map(|letter| self.encipher(letter)).collect()
    }

    fn encipher_code(&mut self, input: u8) -> u8 {
        let entry = self.plugboard.apply(input);
        if self.stepping {
            self.step(Slot::Right);
        }
        let exit = self.scramble(entry);
        self.plugboard.apply(exit)
    }

    /// Signal path between the two plugboard passes.
    ///
    /// Each rotor works in its own rotated frame; after every lookup the
    /// code is moved into the frame of the next disk by subtracting the
    /// current rotor's position and adding the neighbour's.
    fn scramble(&self, input: u8) -> u8 {
        let count = self.rotors.len();
        let mut code = input;

        for (index, rotor) in self.rotors.iter().enumerate() {
            let entry = if index == RIGHT {
                alphabet::add(code, rotor.position())
            } else {
                code
            };
            let exit = rotor.encode_forward(entry);
            code = alphabet::add(
                alphabet::sub(exit, rotor.position()),
                self.left_position(index),
            );
        }

        let exit = self.reflector.encode(code);
        code = alphabet::add(exit, self.rotors[count - 1].position());

        for (index, rotor) in self.rotors.iter().enumerate().rev() {
            let exit = rotor.encode_backward(code);
            code = alphabet::sub(exit, rotor.position());
            if index != RIGHT {
                code = alphabet::add(code, self.rotors[index - 1].position());
            }
        }
        code
    }

    /// Position of the disk left of slot `index`; the reflector is fixed at
    /// zero.
    fn left_position(&self, index: usize) -> u8 {
        self.rotors.get(index + 1).map_or(0, Rotor::position)
    }

    /// Window letters, left to right.
    pub fn window(&self) -> String {
        self.rotors.iter().rev().map(Rotor::window_letter).collect()
    }

    /// Internal rotor positions (window minus ring), left to right.
    pub fn internal_positions(&self) -> String {
        self.rotors.iter().rev().map(Rotor::position_letter).collect()
    }

    /// Ring settings, left to right.
    pub fn ring_settings(&self) -> String {
        self.rotors.iter().rev().map(Rotor::ring_letter).collect()
    }

    /// The stepping rotor in `slot`.
    pub fn rotor(&self, slot: Slot) -> &Rotor {
        &self.rotors[slot.index()]
    }

    /// The non-stepping fourth rotor, if this is a 4-rotor machine.
    pub fn fourth_rotor(&self) -> Option<&Rotor> {
        self.rotors.get(STEPPING_ROTORS)
    }

    /// The reflector in place.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Catalog id of the reflector in place.
    pub fn reflector_id(&self) -> ReflectorId {
        self.config.reflector
    }

    /// The plugboard wiring.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// The configuration record last applied, with the indicator updated by
    /// [`set_indicator`](Self::set_indicator).
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn rotor_labels(&self) -> String {
        self.rotors
            .iter()
            .rev()
            .map(Rotor::label)
            .collect::<Vec<_>>()
            .join("-")
    }

    fn notify(&mut self, event: impl FnOnce(&Self) -> MachineEvent) {
        if self.observer.is_none() {
            return;
        }
        let event = event(self);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }
}
