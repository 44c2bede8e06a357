//! Property tests for the cipher invariants: reciprocity, determinism,
//! permutation closure of every rotor under every ring setting, plugboard
//! involution and stepping monotonicity.

use enigma::catalog::RotorId;
use enigma::config::MachineConfig;
use enigma::plugboard::Plugboard;
use enigma::{RotorAssembly, Slot};
use proptest::prelude::*;

const STEPPING: [RotorId; 5] = [RotorId::I, RotorId::II, RotorId::III, RotorId::IV, RotorId::V];

fn arb_letters(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..26, len)
        .prop_map(|codes| codes.into_iter().map(|c| char::from(b'A' + c)).collect::<String>())
}

fn arb_plugs() -> impl Strategy<Value = Vec<String>> {
    (Just((0u8..26).collect::<Vec<u8>>()).prop_shuffle(), 0usize..=10).prop_map(
        |(letters, count)| {
            letters
                .chunks(2)
                .take(count)
                .map(|pair| pair.iter().map(|c| char::from(b'A' + c)).collect::<String>())
                .collect::<Vec<String>>()
        },
    )
}

fn arb_config() -> impl Strategy<Value = MachineConfig> {
    (
        Just(STEPPING.to_vec()).prop_shuffle(),
        arb_letters(3),
        arb_plugs(),
        arb_letters(3),
    )
        .prop_map(|(rotors, rings, plugs, indicator)| {
            MachineConfig::default()
                .with_rotors(rotors[..3].to_vec())
                .with_ring_settings(&rings)
                .with_plugboard_pairs(plugs)
                .with_indicator(&indicator)
        })
}

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Z]{0,200}"
}

proptest! {
    #[test]
    fn prop_reciprocity(config in arb_config(), text in arb_text()) {
        let mut sender = RotorAssembly::from_config(&config).unwrap();
        let ciphertext = sender.encipher_text(&text).unwrap();
        let mut receiver = RotorAssembly::from_config(&config).unwrap();
        prop_assert_eq!(receiver.encipher_text(&ciphertext).unwrap(), text);
    }

    #[test]
    fn prop_determinism(config in arb_config(), text in arb_text()) {
        let mut machine = RotorAssembly::from_config(&config).unwrap();
        let first = machine.encipher_text(&text).unwrap();
        machine.reset();
        prop_assert_eq!(machine.encipher_text(&text).unwrap(), first);
    }

    #[test]
    fn prop_static_path_is_involution(config in arb_config()) {
        // In static mode the whole path is an involution of the alphabet
        let mut machine = RotorAssembly::from_config(&config).unwrap();
        machine.set_stepping(false);
        for letter in 'A'..='Z' {
            let out = machine.encipher(letter).unwrap();
            prop_assert_eq!(machine.encipher(out).unwrap(), letter);
        }
    }

    #[test]
    fn prop_permutation_closure(index in 0usize..7, ring in 0u8..26) {
        let mut rotor = RotorId::ALL[index].build().unwrap();
        rotor.set_ring_setting(ring);
        for code in 0..26u8 {
            prop_assert_eq!(rotor.encode_backward(rotor.encode_forward(code)), code);
        }
    }

    #[test]
    fn prop_plugboard_involution(pairs in arb_plugs()) {
        let plugboard = Plugboard::with_pairs(&pairs).unwrap();
        for code in 0..26u8 {
            prop_assert_eq!(plugboard.apply(plugboard.apply(code)), code);
        }
        prop_assert_eq!(plugboard.pairs().len(), pairs.len());
    }

    #[test]
    fn prop_right_rotor_advances_by_one(config in arb_config(), presses in 1usize..60) {
        let mut machine = RotorAssembly::from_config(&config).unwrap();
        for _ in 0..presses {
            let before = machine.rotor(Slot::Right).position();
            machine.encipher('A').unwrap();
            let after = machine.rotor(Slot::Right).position();
            prop_assert_eq!(after, (before + 1) % 26);
        }
    }
}
