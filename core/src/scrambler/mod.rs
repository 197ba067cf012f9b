//! Rotor model
//!
//! Scramblers are keyed permutations with a rotation offset. Three rotors and
//! a reflector compose into a [`ScramblerCasing`], the substitution a Bombe
//! drum reproduces electrically.

pub mod rotor;   // Single keyed permutation with rotation
pub mod casing;  // Three rotors plus reflector
pub mod catalog; // Historical rotor and reflector tables

pub use casing::ScramblerCasing;
pub use rotor::Scrambler;

use crate::alphabet::AlphabetError;
use num_integer::Integer;
use thiserror::Error;

/// Errors raised while building or driving scramblers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScramblerError {
    #[error("invalid wiring: wiring is empty")]
    EmptyWiring,

    #[error("invalid wiring: value {value} at position {position} is outside 0..{size}")]
    WiringOutOfRange {
        position: usize,
        value: usize,
        size: usize,
    },

    #[error("invalid wiring: value {0} appears more than once")]
    DuplicateWiring(usize),

    #[error("invalid reflector: domain size {0} is odd")]
    OddReflector(usize),

    #[error("invalid reflector: {position} maps to {image} but {image} maps to {back}")]
    NotInvolution {
        position: usize,
        image: usize,
        back: usize,
    },

    #[error("invalid reflector: {0} maps to itself")]
    ReflectorFixedPoint(usize),

    #[error("casing needs exactly 4 scramblers, got {0}")]
    ScramblerCount(usize),

    #[error("scrambler domains differ: expected {expected}, got {actual}")]
    DomainMismatch { expected: usize, actual: usize },

    #[error("invalid steckering: {0}")]
    InvalidSteckering(String),

    #[error("unknown catalog entry '{0}'")]
    UnknownCatalogEntry(String),

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}

pub type ScramblerResult<T> = Result<T, ScramblerError>;

/// Modulus that always lands in `0..modulus`, also for negative values
pub fn non_negative_mod(value: i64, modulus: usize) -> usize {
    value.mod_floor(&(modulus as i64)) as usize
}

/// Validate that `wiring` is a permutation of `0..wiring.len()`
pub(crate) fn check_permutation(wiring: &[usize]) -> ScramblerResult<()> {
    let size = wiring.len();
    if size == 0 {
        return Err(ScramblerError::EmptyWiring);
    }

    let mut seen = vec![false; size];
    for (position, &value) in wiring.iter().enumerate() {
        if value >= size {
            return Err(ScramblerError::WiringOutOfRange {
                position,
                value,
                size,
            });
        }
        if seen[value] {
            return Err(ScramblerError::DuplicateWiring(value));
        }
        seen[value] = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_mod() {
        assert_eq!(non_negative_mod(-1, 8), 7);
        assert_eq!(non_negative_mod(-17, 8), 7);
        assert_eq!(non_negative_mod(9, 8), 1);
        assert_eq!(non_negative_mod(0, 8), 0);
    }

    #[test]
    fn test_check_permutation() {
        assert!(check_permutation(&[2, 0, 1]).is_ok());
        assert_eq!(check_permutation(&[]), Err(ScramblerError::EmptyWiring));
        assert_eq!(
            check_permutation(&[0, 3, 1]),
            Err(ScramblerError::WiringOutOfRange {
                position: 1,
                value: 3,
                size: 3
            })
        );
        assert_eq!(
            check_permutation(&[1, 1, 0]),
            Err(ScramblerError::DuplicateWiring(1))
        );
    }
}
