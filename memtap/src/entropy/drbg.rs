//! ChaCha-based deterministic random bit generator.
//!
//! The production [`crate::entropy::EntropySource`] implementation. A
//! [`crate::entropy::Drbg`] is allocated against one of the registered
//! [`crate::entropy::Algorithm`] identifiers and must be explicitly seeded
//! once before its first draw. Seeding pulls 32 bytes from the operating
//! system and folds any caller-supplied material into them, so an empty seed
//! is valid and still yields an unpredictable stream.

use rand::rngs::OsRng;
use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
use rand_core::{RngCore, SeedableRng};

use super::{Algorithm, EntropySource};
use crate::{Error, Result};

/// A seedable cryptographically secure generator selected by algorithm name.
///
/// The generator is created unseeded and refuses to produce bytes until
/// [`Drbg::reseed`] has run at least once. Reseeding later is allowed and
/// replaces the stream wholesale.
///
/// # Examples
///
/// ```rust
/// use memtap::{Algorithm, Drbg, EntropySource};
///
/// let mut drbg = Drbg::open(Algorithm::Chacha20);
///
/// // Draws before the first reseed are refused.
/// assert!(drbg.next_u32().is_err());
///
/// drbg.reseed(&[])?;
/// let mut buf = [0u8; 16];
/// drbg.fill_bytes(&mut buf)?;
/// # Ok::<(), memtap::Error>(())
/// ```
pub struct Drbg {
    algorithm: Algorithm,
    inner: Option<Inner>,
}

enum Inner {
    ChaCha8(ChaCha8Rng),
    ChaCha12(ChaCha12Rng),
    ChaCha20(ChaCha20Rng),
}

impl Drbg {
    /// Allocate an unseeded generator for the given algorithm.
    ///
    /// The generator cannot produce bytes until [`Drbg::reseed`] has been
    /// called.
    pub fn open(algorithm: Algorithm) -> Drbg {
        Drbg {
            algorithm,
            inner: None,
        }
    }

    /// Allocate an unseeded generator by algorithm identifier string.
    ///
    /// # Arguments
    /// * `name` - One of the registered identifiers, e.g. `"chacha20"`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropyUnavailable`] if no generator is
    /// registered under `name`.
    pub fn open_named(name: &str) -> Result<Drbg> {
        let algorithm = name
            .parse::<Algorithm>()
            .map_err(|_| Error::EntropyUnavailable(format!("unknown algorithm '{name}'")))?;

        Ok(Drbg::open(algorithm))
    }

    /// The algorithm this generator was allocated against.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Seed or reseed the generator.
    ///
    /// A fresh 32-byte seed is drawn from the operating system and every byte
    /// of `material` is folded into it, so callers without seed material of
    /// their own simply pass an empty slice. The previous stream, if any, is
    /// discarded.
    ///
    /// # Arguments
    /// * `material` - Additional host-supplied seed bytes, may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropyUnavailable`] if the operating system
    /// entropy source fails.
    pub fn reseed(&mut self, material: &[u8]) -> Result<()> {
        let mut seed = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|error| Error::EntropyUnavailable(error.to_string()))?;

        for (index, byte) in material.iter().enumerate() {
            seed[index % seed.len()] ^= byte;
        }

        self.inner = Some(match self.algorithm {
            Algorithm::Chacha8 => Inner::ChaCha8(ChaCha8Rng::from_seed(seed)),
            Algorithm::Chacha12 => Inner::ChaCha12(ChaCha12Rng::from_seed(seed)),
            Algorithm::Chacha20 => Inner::ChaCha20(ChaCha20Rng::from_seed(seed)),
        });

        Ok(())
    }
}

impl EntropySource for Drbg {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        match &mut self.inner {
            Some(Inner::ChaCha8(rng)) => rng.fill_bytes(buf),
            Some(Inner::ChaCha12(rng)) => rng.fill_bytes(buf),
            Some(Inner::ChaCha20(rng)) => rng.fill_bytes(buf),
            None => {
                return Err(Error::EntropyUnavailable(
                    "generator has not been seeded".to_string(),
                ))
            }
        }

        Ok(())
    }
}
