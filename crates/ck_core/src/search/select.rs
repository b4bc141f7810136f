//! Diversified selection of the best candidates
//!
//! Adjacent grid cells around one optimum produce near-identical scores;
//! returning three of those is useless. Selection greedily walks the sorted
//! candidate list and only accepts a candidate whose score is at least
//! `min_separation` away from everything already picked. When that starves
//! the result below the requested count, the constraint is dropped and the
//! plain top-k fills in.

use crate::kick::Candidate;

/// Pick up to `count` candidates from a score-ascending slice.
///
/// The best candidate is always included. Panics are impossible on an empty
/// slice: it just returns empty.
pub fn select_diverse(candidates: &[Candidate], min_separation: f64, count: usize) -> Vec<Candidate> {
    let mut selected: Vec<Candidate> = Vec::with_capacity(count);

    for candidate in candidates {
        if selected.len() >= count {
            break;
        }
        let distinct = selected
            .iter()
            .all(|picked| (candidate.score - picked.score).abs() >= min_separation);
        if selected.is_empty() || distinct {
            selected.push(*candidate);
        }
    }

    if selected.len() < count {
        log::debug!(
            "only {} of {} candidates satisfied the {}s separation; relaxing",
            selected.len(),
            count,
            min_separation
        );
        selected = candidates.iter().take(count).copied().collect();
    }

    selected
}
