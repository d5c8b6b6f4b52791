//! The per-item transition applied on every tick
//!
//! Kept free of scheduling and notification so it can be driven with fixed
//! increments in tests.

use crate::{Digest, TransferItem, TransferStatus, MAX_INCREMENT, PROGRESS_COMPLETE};

/// What one call to [`advance`] did to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Terminal item, or a zero gain
    Idle,
    Progressed,
    /// Crossed 100 on this call; the digest was minted
    Completed,
}

/// Fold an arbitrary value into `[0, MAX_INCREMENT]`. NaN counts as no gain.
pub fn sanitize_increment(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_INCREMENT)
}

/// Apply one tick's gain to `item`.
///
/// Progress never decreases and never passes 100. Reaching 100 completes
/// the item and calls `mint` exactly once; terminal items are left as-is.
pub fn advance<F>(item: &mut TransferItem, increment: f64, mint: F) -> Advance
where
    F: FnOnce() -> Digest,
{
    if item.status.is_terminal() {
        return Advance::Idle;
    }
    item.begin();

    let step = sanitize_increment(increment);
    item.progress = (item.progress + step).min(PROGRESS_COMPLETE);

    if item.progress >= PROGRESS_COMPLETE {
        item.progress = PROGRESS_COMPLETE;
        item.status = TransferStatus::Completed;
        item.digest = Some(mint());
        Advance::Completed
    } else if step > 0.0 {
        Advance::Progressed
    } else {
        Advance::Idle
    }
}
