//! Selection Ranking
//!
//! Picks the item the player most likely meant from ambiguous pointer
//! input. Each candidate is scored by the dot product between the pointer
//! ray direction and the normalized direction from the viewpoint to the
//! candidate: a narrow-cone approximation of a 3D pick that needs no
//! collider geometry. With thresholds near 1 this is precise enough for
//! scenes of small overlapping objects, and degrades to "no selection"
//! rather than a wrong one.

use glam::Vec3;

use super::item::{ItemId, ItemStore, MergeItem};

/// Alignment of `item_position` with `reference_direction` as seen from
/// `view_origin`, in [-1, 1].
pub fn alignment_score(view_origin: Vec3, reference_direction: Vec3, item_position: Vec3) -> f32 {
    let to_item = (item_position - view_origin).normalize_or_zero();
    reference_direction.dot(to_item)
}

/// Best-aligned interactable candidate at or above `threshold`.
///
/// Candidates missing from the store or flagged non-interactable are
/// skipped. Among equal maximum scores the first candidate in input order
/// wins, so ranking is deterministic.
pub fn select_best<I: MergeItem>(
    view_origin: Vec3,
    reference_direction: Vec3,
    candidates: &[ItemId],
    store: &ItemStore<I>,
    threshold: f32,
) -> Option<(ItemId, f32)> {
    let mut best: Option<(ItemId, f32)> = None;

    for &id in candidates {
        let Some(item) = store.get(id) else { continue };
        if !item.can_merge() {
            continue;
        }

        let score = alignment_score(view_origin, reference_direction, item.position());
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((id, score)),
        }
    }

    best.filter(|&(_, score)| score >= threshold)
}
