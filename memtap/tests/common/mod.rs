//! Deterministic doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use memtap::{
    host::{Image, MemoryAccess},
    EntropySource, Error, Result,
};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

/// Entropy source replaying a fixed byte script, wrapping around forever.
pub struct ScriptedEntropy {
    script: Vec<u8>,
    consumed: usize,
}

impl ScriptedEntropy {
    pub fn cycle(script: &[u8]) -> ScriptedEntropy {
        assert!(!script.is_empty());
        ScriptedEntropy {
            script: script.to_vec(),
            consumed: 0,
        }
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.script[self.consumed % self.script.len()];
            self.consumed += 1;
        }

        Ok(())
    }
}

/// Uniform, reproducible entropy from a fixed ChaCha seed.
pub struct SeededEntropy {
    rng: ChaCha8Rng,
}

impl SeededEntropy {
    pub fn from_seed(seed: [u8; 32]) -> SeededEntropy {
        SeededEntropy {
            rng: ChaCha8Rng::from_seed(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}

/// The per-entry draw sequence for an always-accepting filter: a zero
/// acceptance word, then the run byte, then the offset word.
pub fn accept_entry_script(run: u8, offset: u32) -> Vec<u8> {
    let mut script = vec![0, 0, 0, 0, run];
    script.extend_from_slice(&offset.to_le_bytes());
    script
}

/// Memory capability that records every read it serves.
pub struct RecordingMemory {
    inner: Image,
    reads: Mutex<Vec<(u64, usize)>>,
}

impl RecordingMemory {
    pub fn new(inner: Image) -> RecordingMemory {
        RecordingMemory {
            inner,
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> Vec<(u64, usize)> {
        self.reads.lock().unwrap().clone()
    }
}

impl MemoryAccess for RecordingMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<&[u8]> {
        self.reads
            .lock()
            .map_err(|_| Error::LockError)?
            .push((address, len));
        self.inner.read_bytes(address, len)
    }
}
