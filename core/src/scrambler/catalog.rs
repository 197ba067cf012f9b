//! Historical Enigma rotor and reflector wirings
//!
//! Wiring strings are written against [`Alphabet::latin`] but can be parsed
//! against any 26-symbol alphabet.

use super::{Scrambler, ScramblerError, ScramblerResult};
use crate::alphabet::Alphabet;

pub const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
pub const ROTOR_II: &str = "AJDKSIRUXBLHWTMCQGZNPYFVOE";
pub const ROTOR_III: &str = "BDFHJLCPRTXVZNYEIWGAKMUSQO";
pub const ROTOR_IV: &str = "ESOVPZJAYQUIRHXLNFTGKDCMWB";
pub const ROTOR_V: &str = "VZBRGITYUPSDNHLXAWMJQOFECK";
pub const ROTOR_VI: &str = "JPGVOUMFYQBENHZRDKASXLICTW";
pub const ROTOR_VII: &str = "NZJHGRCXMYSWBOUFAIVLPEKQDT";
pub const ROTOR_VIII: &str = "FKQHTLXOCBJSPDZRAMEWNIUYGV";

pub const REFLECTOR_A: &str = "EJMZALYXVBWFCRQUONTSPIKHGD";
pub const REFLECTOR_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";
pub const REFLECTOR_C: &str = "FVPJIAOYEDRZXWGCTKUQSBNMHL";
pub const REFLECTOR_B_THIN: &str = "ENKQAUYWJICOPBLMDXZVFTHRGS";
pub const REFLECTOR_C_THIN: &str = "RDOBJNTKVEHMLFCWZAXGYIPSUQ";

/// Named rotors in catalog order
pub const ROTORS: [(&str, &str); 8] = [
    ("I", ROTOR_I),
    ("II", ROTOR_II),
    ("III", ROTOR_III),
    ("IV", ROTOR_IV),
    ("V", ROTOR_V),
    ("VI", ROTOR_VI),
    ("VII", ROTOR_VII),
    ("VIII", ROTOR_VIII),
];

/// Named reflectors in catalog order
pub const REFLECTORS: [(&str, &str); 5] = [
    ("A", REFLECTOR_A),
    ("B", REFLECTOR_B),
    ("C", REFLECTOR_C),
    ("B_THIN", REFLECTOR_B_THIN),
    ("C_THIN", REFLECTOR_C_THIN),
];

fn lookup(table: &[(&str, &'static str)], name: &str) -> ScramblerResult<&'static str> {
    table
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, wiring)| *wiring)
        .ok_or_else(|| ScramblerError::UnknownCatalogEntry(name.to_string()))
}

/// Build rotor `name` ("I" to "VIII")
pub fn rotor(name: &str, alphabet: &Alphabet) -> ScramblerResult<Scrambler> {
    Scrambler::from_wiring_str(lookup(&ROTORS, name)?, alphabet)
}

/// Build reflector `name` ("A", "B", "C", "B_THIN", "C_THIN")
pub fn reflector(name: &str, alphabet: &Alphabet) -> ScramblerResult<Scrambler> {
    Scrambler::reflector_from_wiring_str(lookup(&REFLECTORS, name)?, alphabet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rotors_parse() {
        let latin = Alphabet::latin();
        for (name, _) in ROTORS {
            let r = rotor(name, &latin).unwrap();
            assert_eq!(r.domain(), 26);
        }
    }

    #[test]
    fn test_all_reflectors_are_involutions() {
        let latin = Alphabet::latin();
        for (name, _) in REFLECTORS {
            assert!(reflector(name, &latin).unwrap().is_reflector(), "{}", name);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let latin = Alphabet::latin();
        assert_eq!(rotor("iii", &latin).unwrap().encode(0), 1);
        assert_eq!(
            rotor("IX", &latin),
            Err(ScramblerError::UnknownCatalogEntry("IX".to_string()))
        );
        // rotors are not reflectors
        assert!(reflector("I", &latin).is_err());
    }
}
