//! Entropy acquisition for the sampling engine.
//!
//! This module wraps a cryptographically secure generator behind the small
//! [`crate::entropy::EntropySource`] trait so that the engine never talks to a
//! concrete generator directly. Production code uses the deterministic
//! random bit generator in [`crate::entropy::Drbg`]; tests substitute scripted
//! streams to make every draw reproducible.
//!
//! # Architecture
//!
//! - [`crate::entropy::EntropySource`] - The draw interface. One fallible
//!   primitive, [`EntropySource::fill_bytes`], plus fixed-width helpers built
//!   on top of it.
//! - [`crate::entropy::Algorithm`] - The generator registry. Generators are
//!   selected by a short identifier string at initialization time.
//! - [`crate::entropy::Drbg`] - The production implementation, a ChaCha
//!   stream generator seeded from operating system entropy mixed with any
//!   caller-supplied material.
//!
//! # Draw Ordering
//!
//! All draws made while processing a single enumeration entry happen in a
//! fixed sequential order: the 32-bit acceptance draw, then the 8-bit run
//! length draw, then the 32-bit offset draw. Multi-byte draws are packed
//! little-endian. Given a fixed entropy stream and fixed enumeration content,
//! the whole sampling run is reproducible.
//!
//! # Examples
//!
//! ```rust
//! use memtap::{Algorithm, Drbg, EntropySource};
//!
//! let mut drbg = Drbg::open_named("chacha20")?;
//! drbg.reseed(b"host supplied material")?;
//!
//! let word = drbg.next_u32()?;
//! let byte = drbg.next_byte()?;
//! let _ = (word, byte);
//! # Ok::<(), memtap::Error>(())
//! ```

mod drbg;

pub use drbg::Drbg;

use strum::{Display, EnumString};

use crate::Result;

/// Supplies fixed-size draws of cryptographically random bytes.
///
/// The engine performs three kinds of draws per visited entry and nothing
/// else: a 32-bit acceptance draw, an 8-bit run length draw, and a 32-bit
/// offset draw. All of them bottom out in [`EntropySource::fill_bytes`], so an
/// implementation only has to provide that one method.
///
/// Implementations must be [`Send`]; the sampler serializes draws behind a
/// mutex and may hand the source to another thread.
pub trait EntropySource: Send {
    /// Fill `buf` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntropyUnavailable`] if the underlying
    /// generator cannot produce bytes, for example because it was never
    /// seeded.
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Draw four bytes and pack them as a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`EntropySource::fill_bytes`].
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Draw a single byte.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`EntropySource::fill_bytes`].
    fn next_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill_bytes(&mut buf)?;
        Ok(buf[0])
    }
}

/// Identifies the generator backing a [`Drbg`].
///
/// Algorithms are selected by name at initialization, mirroring how hosts
/// hand out generators by identifier string. The string forms are the
/// lowercase variant names.
///
/// # Examples
///
/// ```rust
/// use memtap::Algorithm;
///
/// let algorithm: Algorithm = "chacha12".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::Chacha12);
/// assert_eq!(algorithm.to_string(), "chacha12");
/// assert!("sha256".parse::<Algorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    /// ChaCha stream generator with 8 rounds, the fastest of the family.
    Chacha8,
    /// ChaCha stream generator with 12 rounds.
    Chacha12,
    /// ChaCha stream generator with 20 rounds, the conservative default.
    Chacha20,
}
