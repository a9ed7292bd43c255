//! Deterministic test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    entropy::EntropySource,
    host::{Image, MemoryAccess},
    Error, Result,
};

/// Entropy source that replays a fixed byte script.
///
/// Finite scripts fail with [`Error::EntropyUnavailable`] once exhausted;
/// cycling scripts wrap around forever. Either way every draw is fully
/// deterministic.
pub(crate) struct ScriptedEntropy {
    script: Vec<u8>,
    consumed: usize,
    cycle: bool,
}

impl ScriptedEntropy {
    /// A finite script; draws past the end fail.
    pub(crate) fn new(script: &[u8]) -> ScriptedEntropy {
        assert!(!script.is_empty());
        ScriptedEntropy {
            script: script.to_vec(),
            consumed: 0,
            cycle: false,
        }
    }

    /// An endlessly repeating script.
    pub(crate) fn cycle(script: &[u8]) -> ScriptedEntropy {
        assert!(!script.is_empty());
        ScriptedEntropy {
            script: script.to_vec(),
            consumed: 0,
            cycle: true,
        }
    }

    /// Total bytes drawn so far.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            if !self.cycle && self.consumed >= self.script.len() {
                return Err(Error::EntropyUnavailable("script exhausted".to_string()));
            }

            *slot = self.script[self.consumed % self.script.len()];
            self.consumed += 1;
        }

        Ok(())
    }
}

/// The per-entry draw sequence for an always-accepting filter: a zero
/// acceptance word, then the run byte, then the offset word.
pub(crate) fn accept_entry_script(run: u8, offset: u32) -> Vec<u8> {
    let mut script = vec![0, 0, 0, 0, run];
    script.extend_from_slice(&offset.to_le_bytes());
    script
}

/// Memory capability that denies every read.
pub(crate) struct FaultyMemory;

impl MemoryAccess for FaultyMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<&[u8]> {
        Err(Error::ReadFault {
            address,
            length: len,
        })
    }
}

/// Memory capability that denies a window of reads, then recovers.
pub(crate) struct FlakyMemory {
    inner: Image,
    allow_first: usize,
    deny_next: usize,
    reads: AtomicUsize,
}

impl FlakyMemory {
    /// Allow `allow_first` reads, deny the following `deny_next`, then
    /// serve everything from `inner`.
    pub(crate) fn denying(inner: Image, allow_first: usize, deny_next: usize) -> FlakyMemory {
        FlakyMemory {
            inner,
            allow_first,
            deny_next,
            reads: AtomicUsize::new(0),
        }
    }
}

impl MemoryAccess for FlakyMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<&[u8]> {
        let index = self.reads.fetch_add(1, Ordering::Relaxed);

        if index >= self.allow_first && index < self.allow_first + self.deny_next {
            return Err(Error::ReadFault {
                address,
                length: len,
            });
        }

        self.inner.read_bytes(address, len)
    }
}
