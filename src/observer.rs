//! Observation hooks for rotor assembly transitions.
//!
//! The engine reports what it does to an optional [`MachineObserver`].
//! Observers only watch: whatever they do, cipher output is unchanged, and a
//! machine without an observer behaves identically.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::assembly::Slot;
use crate::catalog::ReflectorId;

/// A transition of the rotor assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineEvent {
    /// A configuration was applied.
    Configured {
        /// Rotor labels, left to right, e.g. `"I-II-III"`.
        rotors: String,
        reflector: ReflectorId,
        window: String,
    },
    /// One rotor advanced one position.
    Stepped { slot: Slot, window: String },
    /// A rotor at its notch carried its left neighbour.
    Turnover { from: Slot, to: Slot },
    /// The middle rotor stepped on its own notch without a carry.
    DoubleStep { window: String },
    /// A letter went through the full signal path.
    Enciphered {
        input: char,
        output: char,
        window: String,
    },
}

/// Receiver of [`MachineEvent`]s.
pub trait MachineObserver {
    /// Called synchronously, in order, for every transition.
    fn on_event(&mut self, event: &MachineEvent);
}

/// Forwards rotor events to `tracing`.
///
/// Steps and enciphered letters are logged at `trace`, turnovers and
/// double-steps at `debug`. Configuration is already logged by the assembly
/// and is skipped here.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MachineObserver for TracingObserver {
    fn on_event(&mut self, event: &MachineEvent) {
        match event {
            MachineEvent::Configured { .. } => {}
            MachineEvent::Stepped { slot, window } => {
                trace!(?slot, %window, "Rotor stepped")
            }
            MachineEvent::Turnover { from, to } => {
                debug!(?from, ?to, "Turnover")
            }
            MachineEvent::DoubleStep { window } => {
                debug!(%window, "Middle rotor double-step")
            }
            MachineEvent::Enciphered {
                input,
                output,
                window,
            } => trace!(%input, %output, %window, "Enciphered"),
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<MachineEvent>,
}

impl RecordingObserver {
    /// An observer with no events yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen so far.
    pub fn events(&self) -> &[MachineEvent] {
        &self.events
    }
}

impl MachineObserver for RecordingObserver {
    fn on_event(&mut self, event: &MachineEvent) {
        self.events.push(event.clone());
    }
}

/// Lets a caller keep a handle on an observer the assembly owns.
///
/// A poisoned lock is recovered, so events keep arriving after a holder
/// panicked.
impl<O: MachineObserver> MachineObserver for Arc<Mutex<O>> {
    fn on_event(&mut self, event: &MachineEvent) {
        let mut observer = self.lock().unwrap_or_else(PoisonError::into_inner);
        observer.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let mut observer = RecordingObserver::new();
        observer.on_event(&MachineEvent::DoubleStep {
            window: "AEW".to_string(),
        });
        observer.on_event(&MachineEvent::Turnover {
            from: Slot::Middle,
            to: Slot::Left,
        });
        assert_eq!(observer.events().len(), 2);
        assert_eq!(
            observer.events()[1],
            MachineEvent::Turnover {
                from: Slot::Middle,
                to: Slot::Left
            }
        );
    }

    #[test]
    fn test_tracing_observer_accepts_every_event() {
        let mut observer = TracingObserver;
        observer.on_event(&MachineEvent::Stepped {
            slot: Slot::Right,
            window: "AAB".to_string(),
        });
        observer.on_event(&MachineEvent::Enciphered {
            input: 'A',
            output: 'B',
            window: "AAB".to_string(),
        });
    }

    #[test]
    fn test_shared_observer_through_mutex() {
        let shared = Arc::new(Mutex::new(RecordingObserver::new()));
        let mut handle = shared.clone();
        handle.on_event(&MachineEvent::DoubleStep {
            window: "ADV".to_string(),
        });
        assert_eq!(shared.lock().unwrap().events().len(), 1);
    }

    #[test]
    fn test_shared_observer_survives_poisoned_lock() {
        let shared = Arc::new(Mutex::new(RecordingObserver::new()));
        let poisoner = shared.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("holder panics");
        })
        .join();
        assert!(result.is_err());
        assert!(shared.is_poisoned());

        let mut handle = shared.clone();
        handle.on_event(&MachineEvent::DoubleStep {
            window: "AEW".to_string(),
        });
        let events = shared.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(
            events.events(),
            &[MachineEvent::DoubleStep {
                window: "AEW".to_string()
            }]
        );
    }

    #[test]
    fn test_tracing_observer_skips_configured() {
        let mut observer = TracingObserver;
        observer.on_event(&MachineEvent::Configured {
            rotors: "I-II-III".to_string(),
            reflector: ReflectorId::WideB,
            window: "AAA".to_string(),
        });
    }
}
