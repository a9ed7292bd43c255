//! Virtual-file front-end for triggering samples.
//!
//! Hosts usually expose the sampler as a special file: reading it produces a
//! fresh sample, writing it reconfigures the target length. This module
//! implements that contract over plain buffers so any registration mechanism
//! - a character device, a FUSE node, an RPC endpoint - can delegate its
//! read and write handlers here. Registration and lifecycle themselves stay
//! outside the library.
//!
//! # Read Contract
//!
//! A read at stream position zero produces `target + 1` bytes: the sample
//! followed by one terminating NUL. Reads at any other position return zero
//! bytes (end of stream), and the position is force-advanced past the
//! produced length after a successful read, so the next read at position
//! zero starts a brand-new sampling session rather than continuing the old
//! one.
//!
//! # Write Contract
//!
//! A write carries the new target length as base-10 text, at most ten
//! digits. Zero is rejected and malformed text fails to parse, both leaving
//! the configuration unchanged; on success the number of consumed input
//! bytes is echoed back.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use memtap::{host::Image, Sampler, SamplerConfig, TargetLength, TriggerFile};
//! use memtap::{Algorithm, Drbg};
//!
//! let host = Arc::new(Image::new(vec![0x42; 1 << 14], 128)?);
//! let mut entropy = Drbg::open(Algorithm::Chacha20);
//! entropy.reseed(&[])?;
//!
//! let config = SamplerConfig {
//!     population_hint: 128,
//!     page_size: 128,
//!     ..SamplerConfig::default()
//! };
//! let sampler = Sampler::with_config(Box::new(entropy), host.clone(), host, config)?;
//! let trigger = TriggerFile::new(sampler, TargetLength::default());
//!
//! // Reconfigure to 8 bytes, then trigger a sample.
//! trigger.write(b"8")?;
//!
//! let mut offset = 0;
//! let mut buf = [0u8; 64];
//! let produced = trigger.read(&mut offset, &mut buf)?;
//! assert_eq!(produced, 9);
//! assert_eq!(buf[8], 0);
//! assert_eq!(offset, 9);
//! # Ok::<(), memtap::Error>(())
//! ```

use crate::{config::TargetLength, sampler::Sampler, Error, Result};

/// The read/write surface a host wires its virtual file to.
///
/// Owns the [`crate::Sampler`] and a [`crate::TargetLength`] handle. The
/// stream position is caller-owned, passed by reference into every read the
/// way file offsets are, so one `TriggerFile` can back any number of
/// concurrently open descriptors.
pub struct TriggerFile {
    sampler: Sampler,
    target: TargetLength,
}

impl TriggerFile {
    /// Bind a trigger file to its sampler and configuration handle.
    pub fn new(sampler: Sampler, target: TargetLength) -> TriggerFile {
        TriggerFile { sampler, target }
    }

    /// The configuration handle this trigger reads and writes.
    pub fn target(&self) -> &TargetLength {
        &self.target
    }

    /// Produce a sample into `buf`.
    ///
    /// Runs a full sampling session at the currently configured target
    /// length and writes the sample plus one terminating NUL byte into
    /// `buf`. On success `offset` is advanced past the produced length.
    /// The internal staging copy is wiped before release.
    ///
    /// # Arguments
    /// * `offset` - Caller-owned stream position; must be 0 to trigger.
    /// * `buf` - Destination, needs capacity for `target + 1` bytes.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidArgument`] if `buf` cannot hold the sample
    ///   and its terminator.
    /// - Any session failure from [`crate::Sampler::sample`].
    pub fn read(&self, offset: &mut u64, buf: &mut [u8]) -> Result<usize> {
        let target = self.target.get();

        // Reads anywhere past the start report end of stream; without this
        // a streaming reader would trigger sessions forever.
        if *offset > 0 {
            return Ok(0);
        }
        if buf.len() < target + 1 {
            return Err(Error::InvalidArgument);
        }

        let mut staging = self.sampler.sample(target)?;
        buf[..target].copy_from_slice(&staging);
        buf[target] = 0;
        staging.fill(0);

        let produced = target + 1;
        *offset = produced as u64;
        Ok(produced)
    }

    /// Apply a textual configuration write.
    ///
    /// # Errors
    /// See [`crate::TargetLength::set_from_text`].
    pub fn write(&self, input: &[u8]) -> Result<usize> {
        self.target.set_from_text(input)
    }
}
