//! Bounding-rect aggregation over a selection.
//!
//! A selection of elements is partitioned into clusters that must move as
//! rigid units: a selected group carries every element overlapping its
//! rectangle, overlapping selected groups coalesce, and any remaining
//! selected element stands alone. The passes are written as pure
//! functions over immutable snapshots; each returns fresh values instead
//! of accumulating through shared mutable state.

use std::collections::HashSet;

use log::debug;

use lodestar_core::geometry::Rect;
use lodestar_core::scene::{Element, ElementId, Scene};

/// A minimal enclosing rectangle for elements that move together.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingRect {
    rect: Rect,
    elements: Vec<ElementId>,
}

impl BoundingRect {
    fn new(rect: Rect, elements: Vec<ElementId>) -> Self {
        Self { rect, elements }
    }

    /// Returns the enclosing rectangle
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns the elements belonging to this cluster, in claim order
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }
}

/// Computes the rigid move-clusters of a selection.
///
/// The selection is taken in order; unknown, non-movable, and wire
/// elements are skipped. Selected groups are processed first (absorbing
/// overlapping selected groups and claiming overlapping elements from the
/// whole scene), then unclaimed selected elements become singletons, and
/// finally any overlapping clusters are merged transitively.
///
/// An empty selection yields an empty result; the function never fails.
pub fn compute_bounding_rects(scene: &Scene, selection: &[ElementId]) -> Vec<BoundingRect> {
    let selected = resolve_selection(scene, selection);
    if selected.is_empty() {
        return Vec::new();
    }
    let selected_ids: HashSet<ElementId> = selected.iter().map(|e| e.id()).collect();

    let groups: Vec<&Element> = selected
        .iter()
        .copied()
        .filter(|e| e.is_group_container())
        .collect();

    // Everything a group may claim: movable, non-wire elements of the
    // whole scene, in registration order, minus the selected groups
    // themselves. Claimed entries leave the pool, so nothing is counted
    // twice.
    let mut pool: Vec<(ElementId, Rect)> = scene
        .elements()
        .filter(|e| e.is_movable() && !e.is_wire())
        .filter(|e| !(e.is_group_container() && selected_ids.contains(&e.id())))
        .map(|e| (e.id(), e.rect()))
        .collect();

    let mut clusters = Vec::new();
    let mut absorbed: HashSet<ElementId> = HashSet::new();

    for group in &groups {
        if absorbed.contains(&group.id()) {
            continue;
        }
        let (cluster, remaining_pool, absorbed_now) = grow_group(group, &groups, &absorbed, pool);
        pool = remaining_pool;
        absorbed.extend(absorbed_now);
        clusters.push(cluster);
    }

    // Selected non-groups that no group claimed stand alone.
    let claimed: HashSet<ElementId> = clusters
        .iter()
        .flat_map(|c| c.elements.iter().copied())
        .collect();
    for element in selected
        .iter()
        .filter(|e| !e.is_group_container() && !claimed.contains(&e.id()))
    {
        clusters.push(BoundingRect::new(element.rect(), vec![element.id()]));
    }

    let clusters = merge_overlapping(clusters);
    debug!(
        selection_len = selection.len(),
        clusters_len = clusters.len();
        "Aggregated bounding rects"
    );
    clusters
}

/// Resolves selection ids to elements, deduplicated, keeping order and
/// dropping stale, non-movable, and wire entries.
fn resolve_selection<'a>(scene: &'a Scene, selection: &[ElementId]) -> Vec<&'a Element> {
    let mut seen = HashSet::new();
    selection
        .iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| scene.element(*id))
        .filter(|e| e.is_movable() && !e.is_wire())
        .collect()
}

/// Grows one selected group to its fixpoint: overlapping selected groups
/// are absorbed and overlapping pool elements claimed until the rect
/// stops changing. Returns the grown cluster, the reduced pool, and the
/// set of group ids absorbed along the way.
fn grow_group(
    group: &Element,
    groups: &[&Element],
    already_absorbed: &HashSet<ElementId>,
    pool: Vec<(ElementId, Rect)>,
) -> (BoundingRect, Vec<(ElementId, Rect)>, HashSet<ElementId>) {
    let mut rect = group.rect();
    let mut members = vec![group.id()];
    let mut absorbed = HashSet::new();
    let mut pool = pool;

    loop {
        let mut changed = false;

        for other in groups {
            if other.id() == group.id()
                || already_absorbed.contains(&other.id())
                || absorbed.contains(&other.id())
            {
                continue;
            }
            if other.rect().overlaps(rect) {
                rect = rect.union(other.rect());
                members.push(other.id());
                absorbed.insert(other.id());
                changed = true;
            }
        }

        let (claimed, rest): (Vec<_>, Vec<_>) = pool
            .into_iter()
            .partition(|(_, candidate)| candidate.overlaps(rect));
        pool = rest;
        for (id, candidate) in claimed {
            rect = rect.union(candidate);
            members.push(id);
            changed = true;
        }

        if !changed {
            return (BoundingRect::new(rect, members), pool, absorbed);
        }
    }
}

/// Merges clusters whose rectangles overlap, transitively, until none do.
fn merge_overlapping(mut clusters: Vec<BoundingRect>) -> Vec<BoundingRect> {
    loop {
        let pair = clusters.iter().enumerate().find_map(|(i, a)| {
            clusters
                .iter()
                .enumerate()
                .skip(i + 1)
                .find(|(_, b)| a.rect.overlaps(b.rect))
                .map(|(j, _)| (i, j))
        });
        let Some((i, j)) = pair else {
            return clusters;
        };
        let other = clusters.remove(j);
        clusters[i].rect = clusters[i].rect.union(other.rect);
        clusters[i].elements.extend(other.elements);
    }
}
