use log::{debug, warn};

use super::{ByteExtractor, OutputAccumulator, Progress, SamplerConfig, SelectionFilter};
use crate::{
    entropy::EntropySource,
    host::{IterFlow, MemoryAccess, SymbolSource},
    Error, Result,
};

/// One-shot orchestration of a complete sampling run.
///
/// A session owns the lifecycle of a single sample: it allocates a fresh
/// accumulator for the requested length, then requests enumeration passes
/// from the symbol source, routing every entry through the selection filter
/// and - when accepted - the byte extractor, until the accumulator
/// completes. A pass may end early once the buffer is full; a pass that ends
/// without filling the buffer is followed by another, up to the configured
/// pass budget.
///
/// Read faults abandon the current pass. The pass's partial contribution is
/// rolled back so a denied access can never leave half-trusted bytes in the
/// output, and the session retries with a fresh pass up to its fault budget
/// before surfacing the fault to the caller.
///
/// Sessions are one-shot by construction: [`SamplingSession::start`]
/// consumes the session and a completed session cannot be restarted.
/// Serialization of concurrent runs is the responsibility of the owning
/// [`crate::Sampler`].
///
/// # Examples
///
/// ```rust
/// use memtap::{host::Image, Algorithm, Drbg, SamplerConfig, SamplingSession};
///
/// let host = Image::new(vec![0x42; 1 << 14], 128)?;
/// let mut entropy = Drbg::open(Algorithm::Chacha8);
/// entropy.reseed(&[])?;
///
/// let config = SamplerConfig {
///     population_hint: 128,
///     page_size: 128,
///     ..SamplerConfig::default()
/// };
///
/// let session = SamplingSession::new(&config, &mut entropy, &host, &host);
/// let bytes = session.start(16)?;
/// assert_eq!(bytes.len(), 16);
/// # Ok::<(), memtap::Error>(())
/// ```
pub struct SamplingSession<'a> {
    population_hint: u64,
    page_size: u64,
    max_passes: u32,
    max_faults: u32,
    entropy: &'a mut dyn EntropySource,
    symbols: &'a dyn SymbolSource,
    memory: &'a dyn MemoryAccess,
}

impl<'a> SamplingSession<'a> {
    /// Bind a session to its collaborators.
    ///
    /// # Arguments
    /// * `config` - Tuning constants; see [`crate::SamplerConfig`].
    /// * `entropy` - The generator all draws are taken from.
    /// * `symbols` - The enumeration capability.
    /// * `memory` - The raw read capability.
    pub fn new(
        config: &SamplerConfig,
        entropy: &'a mut dyn EntropySource,
        symbols: &'a dyn SymbolSource,
        memory: &'a dyn MemoryAccess,
    ) -> SamplingSession<'a> {
        SamplingSession {
            population_hint: config.population_hint,
            page_size: config.page_size,
            max_passes: config.max_passes,
            max_faults: config.max_faults,
            entropy,
            symbols,
            memory,
        }
    }

    /// Run the session to completion and return exactly `target_len` bytes.
    ///
    /// Consumes the session; a new one must be constructed for the next
    /// sample. The returned bytes never contain zero.
    ///
    /// # Arguments
    /// * `target_len` - The number of bytes to accumulate, at least 1.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidConfig`] if `target_len` or the configured
    ///   page size is zero.
    /// - [`crate::Error::Underfilled`] if the pass budget ran out first.
    /// - [`crate::Error::ReadFault`] if host reads kept failing past the
    ///   fault budget.
    /// - [`crate::Error::EntropyUnavailable`] if the generator failed.
    pub fn start(mut self, target_len: usize) -> Result<Vec<u8>> {
        if target_len == 0 || self.page_size == 0 {
            return Err(Error::InvalidConfig);
        }

        let filter = SelectionFilter::new(self.population_hint, target_len);
        let extractor = ByteExtractor::new(self.page_size);
        let mut acc = OutputAccumulator::new(target_len);

        let mut passes = 0u32;
        let mut faults = 0u32;
        while !acc.is_complete() {
            if passes == self.max_passes {
                return Err(Error::Underfilled {
                    filled: acc.filled(),
                    target: target_len,
                    passes,
                });
            }
            passes += 1;

            let mark = acc.checkpoint();
            match self.run_pass(&filter, &extractor, &mut acc) {
                Ok(()) => {
                    if !acc.is_complete() {
                        debug!(
                            "pass {passes} ended with {}/{} bytes",
                            acc.filled(),
                            target_len
                        );
                    }
                }
                Err(fault @ Error::ReadFault { .. }) => {
                    acc.rollback(mark);
                    faults += 1;
                    if faults > self.max_faults {
                        return Err(fault);
                    }
                    warn!("pass {passes} abandoned after read fault: {fault}");
                }
                Err(error) => return Err(error),
            }
        }

        Ok(acc.into_contents())
    }

    /// One full enumeration pass, stopping early once the buffer completes.
    fn run_pass(
        &mut self,
        filter: &SelectionFilter,
        extractor: &ByteExtractor,
        acc: &mut OutputAccumulator,
    ) -> Result<()> {
        let symbols = self.symbols;
        let memory = self.memory;
        let entropy = &mut *self.entropy;

        symbols.for_each_symbol(&mut |entry| {
            if !filter.accept(&mut *entropy)? {
                return Ok(IterFlow::Continue);
            }

            match extractor.extract(entry, &mut *entropy, memory, &mut *acc)? {
                Progress::Complete => Ok(IterFlow::Stop),
                Progress::Continue => Ok(IterFlow::Continue),
            }
        })
    }
}
