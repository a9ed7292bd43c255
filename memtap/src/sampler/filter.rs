use crate::{entropy::EntropySource, Result};

/// Per-entry accept/reject decision with a fixed, calibrated probability.
///
/// Every visited entry costs one 32-bit draw and is kept iff the draw is a
/// multiple of the threshold `(population / target) << 3`. An accepted entry
/// later yields a run length uniform over `0..16`, expected value about 8
/// bytes, so scaling the acceptance probability by `population / (8 * target)`
/// keeps the expected number of accepted entries per filled buffer
/// independent of the population's absolute size. The population only needs
/// to be a rough order-of-magnitude estimate.
#[derive(Debug, Clone)]
pub struct SelectionFilter {
    threshold: u64,
}

impl SelectionFilter {
    /// Build a filter for the given population estimate and target length.
    ///
    /// # Arguments
    /// * `population_hint` - Estimated number of enumerable entries.
    /// * `target_len` - The sample length the session wants to fill.
    pub fn new(population_hint: u64, target_len: usize) -> SelectionFilter {
        let per_entry = population_hint / (target_len.max(1) as u64);
        let threshold = per_entry.checked_mul(8).unwrap_or(u64::MAX);

        SelectionFilter { threshold }
    }

    /// The computed acceptance threshold. Zero means every entry is accepted.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Decide whether the current entry is kept.
    ///
    /// Always consumes exactly one 32-bit draw, including in the
    /// degenerate all-accept case, so the entropy stream stays aligned for
    /// reproducible runs. A threshold of zero - the population estimate was
    /// smaller than the target length - accepts unconditionally instead of
    /// reducing modulo zero.
    ///
    /// # Errors
    /// Propagates entropy failures from the draw.
    pub fn accept(&self, entropy: &mut dyn EntropySource) -> Result<bool> {
        let draw = entropy.next_u32()?;

        if self.threshold == 0 {
            return Ok(true);
        }

        Ok(u64::from(draw) % self.threshold == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ScriptedEntropy;

    #[test]
    fn threshold_scales_population_over_target() {
        let filter = SelectionFilter::new(1 << 18, 16);
        assert_eq!(filter.threshold(), ((1u64 << 18) / 16) << 3);
    }

    #[test]
    fn multiples_of_threshold_are_accepted() {
        let filter = SelectionFilter::new(64, 8);
        assert_eq!(filter.threshold(), 64);

        let mut hit = ScriptedEntropy::cycle(&128u32.to_le_bytes());
        assert!(filter.accept(&mut hit).unwrap());

        let mut miss = ScriptedEntropy::cycle(&127u32.to_le_bytes());
        assert!(!filter.accept(&mut miss).unwrap());
    }

    #[test]
    fn degenerate_population_accepts_everything() {
        // Population below the target drives the threshold to zero.
        let filter = SelectionFilter::new(8, 16);
        assert_eq!(filter.threshold(), 0);

        let mut entropy = ScriptedEntropy::cycle(&0xDEAD_BEEFu32.to_le_bytes());
        for _ in 0..32 {
            assert!(filter.accept(&mut entropy).unwrap());
        }
    }

    #[test]
    fn each_decision_consumes_one_draw() {
        let filter = SelectionFilter::new(1 << 18, 16);
        let mut entropy = ScriptedEntropy::new(&[0u8; 8]);

        filter.accept(&mut entropy).unwrap();
        filter.accept(&mut entropy).unwrap();
        assert_eq!(entropy.consumed(), 8);
    }
}
