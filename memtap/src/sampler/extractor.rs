use super::OutputAccumulator;
use crate::{
    entropy::EntropySource,
    host::{MemoryAccess, SymbolEntry},
    Error, Result,
};

/// Progress signal returned by an extraction, driving early pass termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The accumulator is full; the current pass can stop.
    Complete,
    /// More bytes are needed; keep visiting entries.
    Continue,
}

/// Randomized, bounded-length, zero-skipping extraction from an accepted entry.
///
/// For an accepted entry at address `A`, the extractor derives the safety
/// window `A .. A + page_remaining` where `page_remaining` is the distance
/// from `A` to the next page boundary, draws a run length uniform over
/// `0..16`, clamps it to the window and the accumulator's remaining
/// capacity, then draws a start offset such that the run can never cross the
/// boundary. Zero bytes read from the run are dropped without effect;
/// everything else is appended to the accumulator in read order.
///
/// Draws happen in a fixed order per entry - run length, then offset - and
/// the offset draw is made even for an empty run, keeping the entropy stream
/// aligned for reproducible sessions.
#[derive(Debug, Clone)]
pub struct ByteExtractor {
    page_size: u64,
}

impl ByteExtractor {
    /// Build an extractor with the given safety boundary interval.
    ///
    /// # Arguments
    /// * `page_size` - Distance between safety boundaries, must be non-zero.
    pub fn new(page_size: u64) -> ByteExtractor {
        debug_assert!(page_size > 0);
        ByteExtractor { page_size }
    }

    /// Extract a run from `entry` into `acc`.
    ///
    /// # Arguments
    /// * `entry` - The accepted enumeration entry.
    /// * `entropy` - Source for the run length and offset draws.
    /// * `memory` - The host read capability.
    /// * `acc` - The shared accumulator to append non-zero bytes to.
    ///
    /// # Errors
    /// Returns [`crate::Error::ReadFault`] if the host denies the read. The
    /// caller abandons the pass in that case; nothing is appended for a
    /// denied read.
    pub fn extract(
        &self,
        entry: &SymbolEntry<'_>,
        entropy: &mut dyn EntropySource,
        memory: &dyn MemoryAccess,
        acc: &mut OutputAccumulator,
    ) -> Result<Progress> {
        let page_remaining = self.page_size - (entry.address % self.page_size);

        let run = u64::from(entropy.next_byte()? % 16);
        let wanted = (acc.remaining() as u64).min(run).min(page_remaining) % 16;

        // A window no larger than the run would leave no room to place it.
        if page_remaining <= wanted {
            return Ok(Progress::Continue);
        }

        let span = page_remaining - wanted;
        let start = u64::from(entropy.next_u32()?) % span;
        let length = wanted as usize;

        let address = entry.address.checked_add(start).ok_or(Error::ReadFault {
            address: entry.address,
            length,
        })?;

        for &byte in memory.read_bytes(address, length)? {
            if byte != 0 {
                acc.append(byte)?;
            }
        }

        Ok(if acc.is_complete() {
            Progress::Complete
        } else {
            Progress::Continue
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        host::Image,
        test::{FaultyMemory, ScriptedEntropy},
    };

    fn entry(address: u64) -> SymbolEntry<'static> {
        SymbolEntry {
            name: "sym_test",
            address,
        }
    }

    fn script(run: u8, offset: u32) -> ScriptedEntropy {
        let mut bytes = vec![run];
        bytes.extend_from_slice(&offset.to_le_bytes());
        ScriptedEntropy::cycle(&bytes)
    }

    #[test]
    fn extracts_non_zero_bytes_at_the_drawn_offset() {
        let data = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x11, 0x22, 0, 0x33, 0, 0];
        let image = Image::new(data, 16).unwrap();
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = script(5, 10);

        let progress = extractor
            .extract(&entry(0), &mut entropy, &image, &mut acc)
            .unwrap();

        assert_eq!(progress, Progress::Continue);
        assert_eq!(acc.filled(), 3);
        assert_eq!(acc.checkpoint(), 3);
    }

    #[test]
    fn run_is_clamped_to_remaining_capacity() {
        let image = Image::new(vec![0xAB; 64], 64).unwrap();
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(2);
        let mut entropy = script(15, 0);

        let progress = extractor
            .extract(&entry(0), &mut entropy, &image, &mut acc)
            .unwrap();

        assert_eq!(progress, Progress::Complete);
        assert_eq!(acc.filled(), 2);
    }

    #[test]
    fn window_too_small_for_run_skips_the_entry() {
        // Six bytes to the boundary, run drawn as 15, clamp gives 6 which
        // cannot be placed inside a six byte window.
        let image = Image::new(vec![0xAB; 4096], 4096).unwrap();
        let extractor = ByteExtractor::new(4096);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = ScriptedEntropy::new(&[15]);

        let progress = extractor
            .extract(&entry(4090), &mut entropy, &image, &mut acc)
            .unwrap();

        assert_eq!(progress, Progress::Continue);
        assert_eq!(acc.filled(), 0);
        // The offset draw was never made.
        assert_eq!(entropy.consumed(), 1);
    }

    #[test]
    fn offset_never_pushes_the_run_past_the_boundary() {
        // The image is exactly one window; a wild offset draw must still
        // land the whole run inside it.
        let image = Image::new(vec![0x5A; 64], 64).unwrap();
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = script(9, u32::MAX);

        extractor
            .extract(&entry(0), &mut entropy, &image, &mut acc)
            .unwrap();
        assert_eq!(acc.filled(), 9);
    }

    #[test]
    fn zero_bytes_are_dropped_without_effect() {
        let image = Image::new(vec![0u8; 64], 64).unwrap();
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = script(15, 0);

        let progress = extractor
            .extract(&entry(0), &mut entropy, &image, &mut acc)
            .unwrap();

        assert_eq!(progress, Progress::Continue);
        assert_eq!(acc.filled(), 0);
    }

    #[test]
    fn empty_run_still_consumes_the_offset_draw() {
        let image = Image::new(vec![0xAB; 64], 64).unwrap();
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = ScriptedEntropy::new(&[16, 0, 0, 0, 0]);

        // Run byte 16 reduces to zero, the offset draw happens anyway.
        extractor
            .extract(&entry(0), &mut entropy, &image, &mut acc)
            .unwrap();
        assert_eq!(acc.filled(), 0);
        assert_eq!(entropy.consumed(), 5);
    }

    #[test]
    fn denied_reads_surface_as_faults() {
        let extractor = ByteExtractor::new(64);
        let mut acc = OutputAccumulator::new(16);
        let mut entropy = script(5, 0);

        let result = extractor.extract(&entry(0), &mut entropy, &FaultyMemory, &mut acc);
        assert!(matches!(result, Err(Error::ReadFault { .. })));
        assert_eq!(acc.filled(), 0);
    }
}
