//! Burst ciphering keystream

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gsm_core::Ubit;

/// Keystream bits per burst, one per data bit of a normal burst
pub const KEYSTREAM_BITS: usize = 114;

/// Source of the per-frame keystream of an A5 algorithm
pub trait Keystream: Send {
    /// Generates the keystream for one burst. `algo` is the A5 algorithm number, at least 1.
    fn generate(&self, algo: u8, key: &[u8; 8], fn_num: u32) -> [Ubit; KEYSTREAM_BITS];
}

/// Deterministic pseudo keystream seeded from key, algorithm and frame number.
/// Uplink and downlink use the same stream so looped back bursts decipher.
#[derive(Debug, Default, Clone, Copy)]
pub struct PseudoKeystream;

impl Keystream for PseudoKeystream {
    fn generate(&self, algo: u8, key: &[u8; 8], fn_num: u32) -> [Ubit; KEYSTREAM_BITS] {
        let seed = u64::from_be_bytes(*key) ^ (fn_num as u64) ^ ((algo as u64) << 56);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ks = [0; KEYSTREAM_BITS];
        for bit in ks.iter_mut() {
            *bit = rng.random::<u8>() & 1;
        }
        ks
    }
}

/// Cipher parameters of one direction of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CipherState {
    /// A5 algorithm number, 0 for no ciphering
    pub algo: u8,
    pub key: [u8; 8],
}

impl CipherState {
    pub fn is_active(&self) -> bool {
        self.algo != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keystream_deterministic() {
        let ks = PseudoKeystream;
        let key = [1, 2, 3, 4, 5, 6, 7, 8];
        let a = ks.generate(1, &key, 100);
        assert_eq!(a, ks.generate(1, &key, 100));
        assert_ne!(a, ks.generate(1, &key, 101));
        assert_ne!(a, ks.generate(3, &key, 100));
        assert!(a.iter().all(|b| *b <= 1));
    }
}
