//! Same-timestamp tick deduplication.

use tickbar_types::Tick;

/// Collapses adjacent ticks that share a timestamp, keeping the larger size.
///
/// The sequence is scanned from the last tick toward the first, and each tick
/// is compared only with its immediate predecessor. When the two share a
/// timestamp, the one with the smaller size is removed; on equal sizes the
/// later tick is removed. The scan always moves one position left after a
/// comparison, so the survivor of a pair is what gets compared next.
///
/// This is done as a single reverse pass: the last kept tick stands in for
/// the current position of the back-to-front scan, which yields the same
/// survivors as deleting in place.
///
/// The input is expected to be sorted by timestamp and is not re-sorted.
#[must_use]
pub fn dedup(ticks: Vec<Tick>) -> Vec<Tick> {
    let mut survivors: Vec<Tick> = Vec::with_capacity(ticks.len());

    for tick in ticks.into_iter().rev() {
        match survivors.last_mut() {
            Some(later) if later.timestamp == tick.timestamp => {
                if later.size <= tick.size {
                    *later = tick;
                }
            }
            _ => survivors.push(tick),
        }
    }

    survivors.reverse();
    survivors
}
