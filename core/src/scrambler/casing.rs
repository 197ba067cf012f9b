//! Scrambler casing: three rotors and a reflector composed into one
//! involutive substitution
//!
//! Positions are `[slow, mid, fast, reflector]`. The combined rotation is a
//! three digit base-N number. `rotation` reads the fast rotor as the least
//! significant digit, `inverse_rotation` reads the slow rotor as the least
//! significant digit. Incrementing `inverse_rotation` therefore carries
//! slow -> mid -> fast and wraps after N³ steps.

use super::{check_permutation, Scrambler, ScramblerError, ScramblerResult};
use crate::alphabet::Alphabet;

pub const SLOW: usize = 0;
pub const MID: usize = 1;
pub const FAST: usize = 2;
pub const REFLECTOR: usize = 3;

/// Four scramblers sharing one domain, the last one a reflector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScramblerCasing {
    scramblers: [Scrambler; 4],
}

impl ScramblerCasing {
    /// Compose `[slow, mid, fast, reflector]`
    pub fn new(scramblers: [Scrambler; 4]) -> ScramblerResult<Self> {
        let expected = scramblers[0].domain();
        for s in &scramblers[1..] {
            if s.domain() != expected {
                return Err(ScramblerError::DomainMismatch {
                    expected,
                    actual: s.domain(),
                });
            }
        }
        scramblers[REFLECTOR].check_reflector()?;

        Ok(Self { scramblers })
    }

    /// Compose from a slice, cloning each scrambler
    pub fn from_slice(scramblers: &[Scrambler]) -> ScramblerResult<Self> {
        match scramblers {
            [slow, mid, fast, reflector] => Self::new([
                slow.clone(),
                mid.clone(),
                fast.clone(),
                reflector.clone(),
            ]),
            _ => Err(ScramblerError::ScramblerCount(scramblers.len())),
        }
    }

    /// Parse three rotor wirings and a reflector wiring against an alphabet
    pub fn from_wiring_strs(wirings: &[&str], alphabet: &Alphabet) -> ScramblerResult<Self> {
        if wirings.len() != 4 {
            return Err(ScramblerError::ScramblerCount(wirings.len()));
        }
        Self::new([
            Scrambler::from_wiring_str(wirings[SLOW], alphabet)?,
            Scrambler::from_wiring_str(wirings[MID], alphabet)?,
            Scrambler::from_wiring_str(wirings[FAST], alphabet)?,
            Scrambler::reflector_from_wiring_str(wirings[REFLECTOR], alphabet)?,
        ])
    }

    pub fn domain(&self) -> usize {
        self.scramblers[0].domain()
    }

    pub fn scramblers(&self) -> &[Scrambler; 4] {
        &self.scramblers
    }

    /// Number of distinct combined positions, N³
    pub fn positions(&self) -> u64 {
        (self.domain() as u64).pow(3)
    }

    pub fn rotation(&self) -> usize {
        let n = self.domain();
        let [slow, mid, fast] = self.rotations();
        fast + mid * n + slow * n * n
    }

    pub fn set_rotation(&mut self, rotation: i64) {
        let n = self.domain() as i64;
        self.scramblers[FAST].set_rotation(rotation);
        self.scramblers[MID].set_rotation(rotation.div_euclid(n));
        self.scramblers[SLOW].set_rotation(rotation.div_euclid(n * n));
    }

    pub fn inverse_rotation(&self) -> usize {
        let n = self.domain();
        let [slow, mid, fast] = self.rotations();
        slow + mid * n + fast * n * n
    }

    pub fn set_inverse_rotation(&mut self, rotation: i64) {
        let n = self.domain() as i64;
        self.scramblers[SLOW].set_rotation(rotation);
        self.scramblers[MID].set_rotation(rotation.div_euclid(n));
        self.scramblers[FAST].set_rotation(rotation.div_euclid(n * n));
    }

    /// Individual rotor rotations as `[slow, mid, fast]`
    pub fn rotations(&self) -> [usize; 3] {
        [
            self.scramblers[SLOW].rotation(),
            self.scramblers[MID].rotation(),
            self.scramblers[FAST].rotation(),
        ]
    }

    pub fn set_rotations(&mut self, rotations: [i64; 3]) {
        for (position, rotation) in rotations.into_iter().enumerate() {
            self.scramblers[position].set_rotation(rotation);
        }
    }

    /// Substitute through fast, mid, slow, reflector and back out again
    pub fn encode(&self, index: usize) -> usize {
        let s = &self.scramblers;
        let forward = s[SLOW].encode(s[MID].encode(s[FAST].encode(index)));
        let reflected = s[REFLECTOR].encode(forward);
        s[FAST].decode(s[MID].decode(s[SLOW].decode(reflected)))
    }

    /// Full substitution table at the current rotation
    pub fn encoding(&self) -> Vec<usize> {
        (0..self.domain()).map(|i| self.encode(i)).collect()
    }

    /// Encipher a crib
    ///
    /// Before each character the fast rotor alone steps by one (no carry).
    /// `steckerings` is applied before and after the casing. The casing's
    /// own rotation is left untouched.
    pub fn encode_crib(
        &self,
        alphabet: &Alphabet,
        plaintext: &str,
        steckerings: &[usize],
    ) -> ScramblerResult<String> {
        let n = self.domain();
        if alphabet.len() != n {
            return Err(ScramblerError::DomainMismatch {
                expected: n,
                actual: alphabet.len(),
            });
        }
        if steckerings.len() != n {
            return Err(ScramblerError::InvalidSteckering(format!(
                "expected {} entries, got {}",
                n,
                steckerings.len()
            )));
        }
        check_permutation(steckerings)
            .map_err(|e| ScramblerError::InvalidSteckering(e.to_string()))?;

        let plain = alphabet.indices(plaintext)?;

        let mut working = self.clone();
        let mut cipher = Vec::with_capacity(plain.len());
        for p in plain {
            working.scramblers[FAST].rotate_by(1);
            cipher.push(steckerings[working.encode(steckerings[p])]);
        }

        Ok(alphabet.text(&cipher)?)
    }
}

/// Identity steckering of size `n`
pub fn no_steckers(n: usize) -> Vec<usize> {
    (0..n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EXAMPLE: [&str; 4] = ["egcdabfh", "aebhdgcf", "cdfghbae", "cgahfebd"];

    fn example_casing() -> (Alphabet, ScramblerCasing) {
        let alphabet = Alphabet::new("abcdefgh").unwrap();
        let casing = ScramblerCasing::from_wiring_strs(&EXAMPLE, &alphabet).unwrap();
        (alphabet, casing)
    }

    #[test]
    fn test_encode_known_tables() {
        let (_, mut casing) = example_casing();
        assert_eq!(casing.encoding(), vec![4, 7, 6, 5, 0, 3, 2, 1]);

        casing.set_rotation(5);
        assert_eq!(casing.rotations(), [0, 0, 5]);
        assert_eq!(casing.encoding(), vec![1, 0, 7, 5, 6, 3, 4, 2]);
    }

    #[test]
    fn test_rotation_digits() {
        let (_, mut casing) = example_casing();

        casing.set_rotation(1);
        assert_eq!(casing.rotations(), [0, 0, 1]);
        assert_eq!(casing.inverse_rotation(), 64);

        casing.set_inverse_rotation(casing.inverse_rotation() as i64 + 1);
        assert_eq!(casing.rotations(), [1, 0, 1]);
        assert_eq!(casing.rotation(), 65);

        // wraps after N³
        casing.set_inverse_rotation(511);
        casing.set_inverse_rotation(casing.inverse_rotation() as i64 + 1);
        assert_eq!(casing.rotations(), [0, 0, 0]);

        casing.set_rotation(-1);
        assert_eq!(casing.rotations(), [7, 7, 7]);
    }

    #[test]
    fn test_encode_crib() {
        let (alphabet, casing) = example_casing();
        let plain = no_steckers(8);

        assert_eq!(
            casing.encode_crib(&alphabet, "babbage", &plain).unwrap(),
            "gbadbbg"
        );
        assert_eq!(casing.encode_crib(&alphabet, "aaaa", &plain).unwrap(), "fbbc");

        // rotation is restored
        assert_eq!(casing.rotation(), 0);
    }

    #[test]
    fn test_encode_crib_rejects_bad_input() {
        let (alphabet, casing) = example_casing();

        assert!(matches!(
            casing.encode_crib(&alphabet, "abc", &[0, 1, 2]),
            Err(ScramblerError::InvalidSteckering(_))
        ));
        assert!(matches!(
            casing.encode_crib(&alphabet, "abc", &[0, 0, 2, 3, 4, 5, 6, 7]),
            Err(ScramblerError::InvalidSteckering(_))
        ));
        assert!(matches!(
            casing.encode_crib(&alphabet, "xyz", &no_steckers(8)),
            Err(ScramblerError::Alphabet(_))
        ));
    }

    #[test]
    fn test_casing_validation() {
        let alphabet = Alphabet::new("abcdefgh").unwrap();

        // fourth scrambler must reflect
        let not_reflector = ["egcdabfh", "aebhdgcf", "cdfghbae", "egcdabfh"];
        assert!(ScramblerCasing::from_wiring_strs(&not_reflector, &alphabet).is_err());

        let short = Scrambler::identity(4).unwrap();
        let (_, casing) = example_casing();
        let mut parts = casing.scramblers().to_vec();
        parts[1] = short;
        assert_eq!(
            ScramblerCasing::from_slice(&parts),
            Err(ScramblerError::DomainMismatch {
                expected: 8,
                actual: 4
            })
        );
        assert_eq!(
            ScramblerCasing::from_slice(&parts[..3]),
            Err(ScramblerError::ScramblerCount(3))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

        #[test]
        fn prop_casing_is_fixed_point_free_involution(seed in any::<u64>(), rotation in 0i64..4096) {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = 16;
            let mut casing = ScramblerCasing::new([
                Scrambler::random(n, &mut rng).unwrap(),
                Scrambler::random(n, &mut rng).unwrap(),
                Scrambler::random(n, &mut rng).unwrap(),
                Scrambler::random_reflector(n, &mut rng).unwrap(),
            ]).unwrap();
            casing.set_rotation(rotation);

            let first = casing.encoding();
            prop_assert_eq!(&first, &casing.encoding());
            for i in 0..n {
                prop_assert_eq!(casing.encode(first[i]), i);
                prop_assert_ne!(first[i], i);
            }
        }

        #[test]
        fn prop_rotation_round_trips(half in 1usize..6, rotation in -5000i64..5000) {
            let n = half * 2;
            let mut casing = ScramblerCasing::new([
                Scrambler::identity(n).unwrap(),
                Scrambler::identity(n).unwrap(),
                Scrambler::identity(n).unwrap(),
                Scrambler::reflector((0..n).map(|i| i ^ 1).collect()).unwrap(),
            ]).unwrap();
            let positions = (n * n * n) as i64;
            let wrapped = rotation.rem_euclid(positions) as usize;

            casing.set_inverse_rotation(rotation);
            prop_assert_eq!(casing.inverse_rotation(), wrapped);
            let [slow, mid, fast] = casing.rotations();
            prop_assert_eq!(slow + mid * n + fast * n * n, wrapped);

            casing.set_rotation(rotation);
            prop_assert_eq!(casing.rotation(), wrapped);

            // the two orders name the same position
            let inverse = casing.inverse_rotation();
            casing.set_inverse_rotation(inverse as i64);
            prop_assert_eq!(casing.rotation(), wrapped);
        }
    }
}
