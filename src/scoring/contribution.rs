//! Percentage contributions of each dampened metric to a party score.
//!
//! Every percentage is rounded to two decimals. The rounding residue
//! (`100.00 − Σ rounded`) is added to a single designated metric, the last
//! slot (invalid vote), so the stored set always sums to exactly 100.00.
//! Arithmetic runs in integer hundredths to keep the residue exact.

use crate::core::numeric::{from_hundredths, to_hundredths};

/// Slot that absorbs the rounding residue (invalid vote)
pub const RESIDUE_SLOT: usize = 8;

const FULL_SHARE_HUNDREDTHS: i64 = 100 * 100;

/// Share of each score in `base`, in percent. A zero base gives every share 0.0
/// before residue correction, so the residue slot then carries the full 100.00.
pub fn contribution_percentages<const N: usize>(scores: [f64; N], base: f64) -> [f64; N] {
    let mut hundredths = [0i64; N];
    if base != 0.0 {
        for (slot, score) in hundredths.iter_mut().zip(scores.iter()) {
            *slot = to_hundredths(score / base * 100.0);
        }
    }

    let residue = FULL_SHARE_HUNDREDTHS - hundredths.iter().sum::<i64>();
    let absorber = RESIDUE_SLOT.min(N.saturating_sub(1));
    if N > 0 {
        hundredths[absorber] += residue;
    }

    hundredths.map(from_hundredths)
}
