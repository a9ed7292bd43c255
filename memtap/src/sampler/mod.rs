//! The sampling and extraction engine.
//!
//! This module is the algorithmic core of the crate. It turns an enumerable
//! address space into a short stream of unpredictable bytes by thinning the
//! enumeration down to a few randomly accepted entries and pulling a small,
//! randomly placed run of bytes out of each one.
//!
//! # Architecture
//!
//! The engine is a pipeline of four small components plus a facade:
//!
//! - [`crate::sampler::SelectionFilter`] - Accept/reject decision per
//!   enumerated entry at a fixed probability calibrated against the
//!   estimated population size.
//! - [`crate::sampler::ByteExtractor`] - Safety-window derivation, run and
//!   offset draws, the bounds-respecting read, and zero-byte filtering.
//! - [`crate::sampler::OutputAccumulator`] - The fixed-capacity output
//!   buffer tracking fill progress and completion.
//! - [`crate::sampler::SamplingSession`] - One-shot orchestration: repeated
//!   enumeration passes with bounded pass and fault budgets.
//! - [`crate::sampler::Sampler`] - Owns the injected collaborators and
//!   serializes sessions, one sample at a time.
//!
//! # Probability Calibration
//!
//! With population estimate `P` and target length `N`, an entry is accepted
//! with probability `1 / ((P / N) << 3)`. An accepted entry yields about 8
//! bytes on average before zero-filtering, so a full pass over the
//! population is expected to produce roughly `N` bytes regardless of `P`'s
//! absolute magnitude. `P` is a tunable order-of-magnitude estimate, not a
//! live count; see [`crate::sampler::SamplerConfig::population_hint`].
//!
//! # Concurrency
//!
//! A [`Sampler`] allows exactly one session at a time. Concurrent calls to
//! [`Sampler::sample`] serialize behind an internal mutex rather than
//! interleaving draws or accumulator writes. Entropy draws within a session
//! follow a fixed per-entry order, so a fixed entropy stream and fixed
//! enumeration content reproduce the same output.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use memtap::{host::Image, Algorithm, Drbg, Sampler, SamplerConfig};
//!
//! let host = Arc::new(Image::new(vec![0x42; 1 << 16], 256)?);
//!
//! let mut entropy = Drbg::open(Algorithm::Chacha20);
//! entropy.reseed(&[])?;
//!
//! let config = SamplerConfig {
//!     population_hint: 256,
//!     page_size: 256,
//!     ..SamplerConfig::default()
//! };
//! let sampler = Sampler::with_config(Box::new(entropy), host.clone(), host, config)?;
//!
//! let bytes = sampler.sample(16)?;
//! assert_eq!(bytes.len(), 16);
//! assert!(bytes.iter().all(|&b| b != 0));
//! # Ok::<(), memtap::Error>(())
//! ```

mod accumulator;
mod extractor;
mod filter;
mod session;

pub use accumulator::OutputAccumulator;
pub use extractor::{ByteExtractor, Progress};
pub use filter::SelectionFilter;
pub use session::SamplingSession;

use std::sync::{Arc, Mutex};

use crate::{
    entropy::EntropySource,
    host::{MemoryAccess, SymbolSource},
    Error, Result,
};

/// Default estimated number of enumerable entries, about `2^18`.
///
/// Quicker than counting the population on every run; the calibration only
/// needs the order of magnitude.
pub const DEFAULT_POPULATION_HINT: u64 = 1 << 18;

/// Default distance between safety boundaries in bytes.
pub const DEFAULT_PAGE_SIZE: u64 = 4096;

/// Tuning constants for the sampling engine.
///
/// All fields have sensible defaults; construct with struct update syntax to
/// override individual values:
///
/// ```rust
/// use memtap::SamplerConfig;
///
/// let config = SamplerConfig {
///     population_hint: 1 << 12,
///     ..SamplerConfig::default()
/// };
/// assert_eq!(config.page_size, 4096);
/// ```
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Estimated number of enumerable entries in the host address space.
    ///
    /// Calibrates the acceptance probability. A rough order-of-magnitude
    /// estimate is sufficient; estimates far above the real population make
    /// sessions need more passes, estimates below the target length put the
    /// filter into all-accept mode.
    pub population_hint: u64,

    /// Distance between safety boundaries in bytes.
    ///
    /// An extraction never reads past the next boundary following its
    /// entry's address.
    pub page_size: u64,

    /// Maximum enumeration passes per session before giving up.
    ///
    /// A session that cannot fill its buffer within this many passes fails
    /// with [`crate::Error::Underfilled`] instead of looping forever.
    pub max_passes: u32,

    /// Maximum faulted passes per session before the fault is surfaced.
    pub max_faults: u32,
}

impl Default for SamplerConfig {
    fn default() -> SamplerConfig {
        SamplerConfig {
            population_hint: DEFAULT_POPULATION_HINT,
            page_size: DEFAULT_PAGE_SIZE,
            max_passes: 64,
            max_faults: 8,
        }
    }
}

/// Entry point for sampling: owns the collaborators and serializes sessions.
///
/// A `Sampler` binds an entropy source, a symbol enumeration capability and
/// a raw memory read capability together. Each call to [`Sampler::sample`]
/// runs one complete [`SamplingSession`] against them. Collaborators are
/// injected at construction, so a production host and a deterministic test
/// double are interchangeable.
pub struct Sampler {
    entropy: Mutex<Box<dyn EntropySource>>,
    symbols: Arc<dyn SymbolSource>,
    memory: Arc<dyn MemoryAccess>,
    config: SamplerConfig,
}

impl Sampler {
    /// Build a sampler with default tuning.
    ///
    /// # Arguments
    /// * `entropy` - A seeded entropy source; all draws go through it.
    /// * `symbols` - The enumeration capability.
    /// * `memory` - The raw read capability.
    pub fn new(
        entropy: Box<dyn EntropySource>,
        symbols: Arc<dyn SymbolSource>,
        memory: Arc<dyn MemoryAccess>,
    ) -> Sampler {
        Sampler {
            entropy: Mutex::new(entropy),
            symbols,
            memory,
            config: SamplerConfig::default(),
        }
    }

    /// Build a sampler with explicit tuning.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `config.page_size` or
    /// `config.max_passes` is zero.
    pub fn with_config(
        entropy: Box<dyn EntropySource>,
        symbols: Arc<dyn SymbolSource>,
        memory: Arc<dyn MemoryAccess>,
        config: SamplerConfig,
    ) -> Result<Sampler> {
        if config.page_size == 0 || config.max_passes == 0 {
            return Err(Error::InvalidConfig);
        }

        Ok(Sampler {
            entropy: Mutex::new(entropy),
            symbols,
            memory,
            config,
        })
    }

    /// The tuning this sampler runs with.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Produce exactly `target_len` non-zero bytes.
    ///
    /// Runs one complete session. Concurrent callers are serialized; each
    /// gets its own fresh accumulator and a contiguous slice of the entropy
    /// stream.
    ///
    /// # Errors
    /// See [`SamplingSession::start`] for the failure modes; additionally
    /// returns [`crate::Error::LockError`] if the entropy mutex was
    /// poisoned.
    pub fn sample(&self, target_len: usize) -> Result<Vec<u8>> {
        let mut entropy = self.entropy.lock().map_err(|_| Error::LockError)?;

        let session = SamplingSession::new(
            &self.config,
            &mut **entropy,
            self.symbols.as_ref(),
            self.memory.as_ref(),
        );
        session.start(target_len)
    }
}
