//! Single rotor: a keyed permutation with a rotation offset

use super::{check_permutation, non_negative_mod, ScramblerError, ScramblerResult};
use crate::alphabet::Alphabet;
use rand::seq::SliceRandom;
use rand::Rng;

/// Keyed permutation of `0..N` with a rotation offset
///
/// The wiring never changes after construction; only the rotation moves.
/// Scramblers have value semantics: a casing clones the ones it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrambler {
    wiring: Vec<usize>,
    inverse: Vec<usize>,
    rotation: usize,
}

impl Scrambler {
    /// Build a scrambler from a permutation of `0..wiring.len()`
    pub fn new(wiring: Vec<usize>) -> ScramblerResult<Self> {
        check_permutation(&wiring)?;

        let mut inverse = vec![0; wiring.len()];
        for (i, &w) in wiring.iter().enumerate() {
            inverse[w] = i;
        }

        Ok(Self {
            wiring,
            inverse,
            rotation: 0,
        })
    }

    /// Build a reflector: an even-sized, fixed-point-free involution
    pub fn reflector(wiring: Vec<usize>) -> ScramblerResult<Self> {
        let scrambler = Self::new(wiring)?;
        scrambler.check_reflector()?;
        Ok(scrambler)
    }

    /// Identity permutation of the given size
    pub fn identity(size: usize) -> ScramblerResult<Self> {
        Self::new((0..size).collect())
    }

    /// Uniformly random permutation (Fisher-Yates)
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> ScramblerResult<Self> {
        let mut wiring: Vec<usize> = (0..size).collect();
        wiring.shuffle(rng);
        Self::new(wiring)
    }

    /// Random reflector built by pairing shuffled positions
    pub fn random_reflector<R: Rng + ?Sized>(size: usize, rng: &mut R) -> ScramblerResult<Self> {
        if size % 2 != 0 {
            return Err(ScramblerError::OddReflector(size));
        }

        let mut order: Vec<usize> = (0..size).collect();
        order.shuffle(rng);

        let mut wiring = vec![0; size];
        for pair in order.chunks(2) {
            wiring[pair[0]] = pair[1];
            wiring[pair[1]] = pair[0];
        }

        Self::reflector(wiring)
    }

    /// Parse a wiring string such as `"EKMFLGDQVZNTOWYHXUSPAIBRCJ"` against an alphabet
    pub fn from_wiring_str(wiring: &str, alphabet: &Alphabet) -> ScramblerResult<Self> {
        Self::new(Self::parse_wiring(wiring, alphabet)?)
    }

    /// Parse a reflector wiring string against an alphabet
    pub fn reflector_from_wiring_str(wiring: &str, alphabet: &Alphabet) -> ScramblerResult<Self> {
        Self::reflector(Self::parse_wiring(wiring, alphabet)?)
    }

    fn parse_wiring(wiring: &str, alphabet: &Alphabet) -> ScramblerResult<Vec<usize>> {
        let indices = alphabet.indices(wiring)?;
        if indices.len() != alphabet.len() {
            return Err(ScramblerError::DomainMismatch {
                expected: alphabet.len(),
                actual: indices.len(),
            });
        }
        Ok(indices)
    }

    /// Render the wiring as symbols of `alphabet`
    pub fn wiring_string(&self, alphabet: &Alphabet) -> ScramblerResult<String> {
        Ok(alphabet.text(&self.wiring)?)
    }

    /// Check the reflector property without consuming the scrambler
    pub fn check_reflector(&self) -> ScramblerResult<()> {
        let size = self.domain();
        if size % 2 != 0 {
            return Err(ScramblerError::OddReflector(size));
        }

        for (position, &image) in self.wiring.iter().enumerate() {
            if image == position {
                return Err(ScramblerError::ReflectorFixedPoint(position));
            }
            let back = self.wiring[image];
            if back != position {
                return Err(ScramblerError::NotInvolution {
                    position,
                    image,
                    back,
                });
            }
        }

        Ok(())
    }

    pub fn is_reflector(&self) -> bool {
        self.check_reflector().is_ok()
    }

    /// Size N of the permuted domain
    pub fn domain(&self) -> usize {
        self.wiring.len()
    }

    pub fn wiring(&self) -> &[usize] {
        &self.wiring
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Set the rotation, reduced into `0..N`
    pub fn set_rotation(&mut self, rotation: i64) {
        self.rotation = non_negative_mod(rotation, self.domain());
    }

    pub fn rotate_by(&mut self, delta: i64) {
        self.set_rotation(self.rotation as i64 + delta);
    }

    /// Forward substitution at the current rotation
    pub fn encode(&self, index: usize) -> usize {
        Self::substitute(&self.wiring, self.rotation, index)
    }

    /// Reverse substitution at the current rotation
    pub fn decode(&self, index: usize) -> usize {
        Self::substitute(&self.inverse, self.rotation, index)
    }

    fn substitute(table: &[usize], rotation: usize, index: usize) -> usize {
        let n = table.len();
        let shifted = (index % n + rotation) % n;
        non_negative_mod(table[shifted] as i64 - rotation as i64, n)
    }

    /// Same wiring, regardless of rotation
    pub fn same_mapping(&self, other: &Scrambler) -> bool {
        self.wiring == other.wiring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn example_alphabet() -> Alphabet {
        Alphabet::new("abcdefgh").unwrap()
    }

    #[test]
    fn test_encode_with_rotation() {
        let alphabet = example_alphabet();
        let mut s = Scrambler::from_wiring_str("egcdabfh", &alphabet).unwrap();

        assert_eq!(s.encode(0), 4);
        assert_eq!(s.encode(1), 6);

        // wiring[(0+1)%8] - 1 = 6 - 1
        s.set_rotation(1);
        assert_eq!(s.encode(0), 5);
        assert_eq!(s.decode(5), 0);

        s.set_rotation(-1);
        assert_eq!(s.rotation(), 7);
    }

    #[test]
    fn test_reflector_validation() {
        let alphabet = example_alphabet();
        assert!(Scrambler::reflector_from_wiring_str("cgahfebd", &alphabet).is_ok());

        assert_eq!(
            Scrambler::reflector(vec![1, 2, 0]),
            Err(ScramblerError::OddReflector(3))
        );
        assert!(matches!(
            Scrambler::reflector(vec![1, 2, 3, 0]),
            Err(ScramblerError::NotInvolution { position: 0, .. })
        ));
        assert_eq!(
            Scrambler::reflector(vec![0, 1, 3, 2]),
            Err(ScramblerError::ReflectorFixedPoint(0))
        );
    }

    #[test]
    fn test_wiring_string_round_trip() {
        let alphabet = Alphabet::latin();
        let s = Scrambler::from_wiring_str("EKMFLGDQVZNTOWYHXUSPAIBRCJ", &alphabet).unwrap();
        assert_eq!(
            s.wiring_string(&alphabet).unwrap(),
            "EKMFLGDQVZNTOWYHXUSPAIBRCJ"
        );

        assert!(Scrambler::from_wiring_str("EKM", &alphabet).is_err());
        assert!(Scrambler::from_wiring_str("abcdefgh", &alphabet).is_err());
    }

    #[test]
    fn test_random_factories() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = Scrambler::random(26, &mut rng).unwrap();
        assert_eq!(s.domain(), 26);

        let r = Scrambler::random_reflector(26, &mut rng).unwrap();
        assert!(r.is_reflector());

        assert_eq!(
            Scrambler::random_reflector(5, &mut rng),
            Err(ScramblerError::OddReflector(5))
        );
    }

    #[test]
    fn test_same_mapping_ignores_rotation() {
        let a = Scrambler::new(vec![1, 0, 2]).unwrap();
        let mut b = a.clone();
        b.set_rotation(2);
        assert!(a.same_mapping(&b));
        assert_ne!(a, b);
        assert!(!a.same_mapping(&Scrambler::identity(3).unwrap()));
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

        #[test]
        fn prop_encode_decode_round_trip(seed in any::<u64>(), size in 2usize..30, rotation in -100i64..100) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Scrambler::random(size, &mut rng).unwrap();
            s.set_rotation(rotation);
            for i in 0..size {
                prop_assert_eq!(s.decode(s.encode(i)), i);
                prop_assert_eq!(s.encode(s.decode(i)), i);
            }
        }

        #[test]
        fn prop_random_reflector_is_involution(seed in any::<u64>(), half in 1usize..15, rotation in 0i64..30) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut r = Scrambler::random_reflector(half * 2, &mut rng).unwrap();
            r.set_rotation(rotation);
            for i in 0..half * 2 {
                prop_assert_eq!(r.encode(r.encode(i)), i);
                prop_assert_ne!(r.encode(i), i);
            }
        }
    }
}
