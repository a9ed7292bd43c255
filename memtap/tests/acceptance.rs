//! Acceptance-rate calibration of the selection filter.

mod common;

use common::{ScriptedEntropy, SeededEntropy};
use memtap::sampler::SelectionFilter;

/// A cycling stream of the 32-bit values `0, 1, .., 799` hits the threshold
/// of 800 exactly once per cycle, so the acceptance count over a synthetic
/// population is exact, not merely statistical.
#[test]
fn acceptance_count_matches_the_calibration_exactly() {
    let population = 100_000u64;
    let target = 1_000usize;
    let filter = SelectionFilter::new(population, target);
    assert_eq!(filter.threshold(), 800);

    let mut script = Vec::with_capacity(800 * 4);
    for value in 0..800u32 {
        script.extend_from_slice(&value.to_le_bytes());
    }
    let mut entropy = ScriptedEntropy::cycle(&script);

    let mut accepted = 0usize;
    for _ in 0..population {
        if filter.accept(&mut entropy).unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, (population / 800) as usize);
}

/// With uniform draws the count over one full pass approximates
/// `population / threshold` within statistical tolerance.
#[test]
fn acceptance_count_is_calibrated_under_uniform_draws() {
    let population = 100_000u64;
    let target = 1_000usize;
    let filter = SelectionFilter::new(population, target);

    let mut entropy = SeededEntropy::from_seed([7; 32]);

    let mut accepted = 0usize;
    for _ in 0..population {
        if filter.accept(&mut entropy).unwrap() {
            accepted += 1;
        }
    }

    // Expected 125, standard deviation about 11; allow a very wide band so
    // only a genuine calibration defect can fail this.
    assert!(
        (60..=190).contains(&accepted),
        "acceptance count {accepted} outside the calibrated band"
    );
}
