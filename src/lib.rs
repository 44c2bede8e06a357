//! Rotor cipher machine engine.
//!
//! A stack of wired rotors, a reflector and a plugboard combine into a
//! reciprocal letter substitution whose alphabet changes after every
//! character. The same machine, reset to the same key, turns ciphertext back
//! into plaintext.
//!
//! # Architecture
//!
//! ```text
//! Rotor / Reflector  (wiring permutation, ring setting, position)
//!     ↕ addressed by slot index (right = 0 ... left, reflector past the end)
//! RotorAssembly      (stepping state machine + signal path)
//!     ↕ plugboard at both ends
//! Plugboard          (symmetric letter swaps)
//! ```
//!
//! Stepping happens before each letter is enciphered. The right rotor always
//! steps; a rotor leaving its notch carries the rotor to its left; and the
//! middle rotor steps again on its own notch (the double-step).
//!
//! # Examples
//!
//! Encipher and decipher with the default key (rotors I-II-III, reflector
//! Wide-B, rings AAA, indicator AAA):
//!
//! ```
//! use enigma::{MachineConfig, RotorAssembly};
//!
//! let mut sender = RotorAssembly::from_config(&MachineConfig::default()).unwrap();
//! assert_eq!(sender.encipher_text("AAAAA").unwrap(), "BDZGO");
//!
//! let mut receiver = RotorAssembly::from_config(&MachineConfig::default()).unwrap();
//! assert_eq!(receiver.encipher_text("BDZGO").unwrap(), "AAAAA");
//! ```
//!
//! Watch the double-step of the middle rotor:
//!
//! ```
//! use enigma::{MachineConfig, RotorAssembly, Slot};
//!
//! let config = MachineConfig::default().with_indicator("ADU");
//! let mut machine = RotorAssembly::from_config(&config).unwrap();
//! let mut windows = Vec::new();
//! for _ in 0..3 {
//!     machine.step(Slot::Right);
//!     windows.push(machine.window());
//! }
//! assert_eq!(windows, ["ADV", "AEW", "BFX"]);
//! ```

#![deny(clippy::all)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod observer;
pub mod plugboard;
pub mod rotor;

mod assembly;
pub(crate) mod utils;

pub use assembly::{RotorAssembly, Slot};
pub use catalog::{ReflectorId, RotorId};
pub use config::MachineConfig;
pub use error::{ConfigurationError, EnigmaError};
