//! Equal-gap distribution along an axis.

use std::cmp::Ordering;

use indexmap::IndexMap;
use log::debug;

use lodestar_core::geometry::{Axis, Point};
use lodestar_core::scene::{ElementId, Orientation, Scene};

use crate::aggregate::compute_bounding_rects;

/// Computes per-element deltas distributing the selection's clusters
/// evenly along the given orientation.
///
/// The cluster with the minimum leading edge and the one with the maximum
/// trailing edge anchor the distribution and never move; the clusters
/// between them are re-spaced so every consecutive gap equals
/// `(span - occupied) / (count - 1)`. Anchors are absent from the result.
///
/// Fewer than two clusters, or a single cluster spanning the whole
/// selection, is a no-op and yields an empty map.
pub fn distribute(
    scene: &Scene,
    selection: &[ElementId],
    orientation: Orientation,
) -> IndexMap<ElementId, Point> {
    let axis = match orientation {
        Orientation::Horizontal => Axis::X,
        Orientation::Vertical => Axis::Y,
    };

    let clusters = compute_bounding_rects(scene, selection);
    let count = clusters.len();
    if count <= 1 {
        return IndexMap::new();
    }

    // First attaining the extreme wins on ties, keeping the choice stable
    // in cluster order.
    let first = clusters
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.rect()
                .leading(axis)
                .partial_cmp(&b.rect().leading(axis))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .expect("clusters is non-empty");
    let last = clusters
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            b.rect()
                .trailing(axis)
                .partial_cmp(&a.rect().trailing(axis))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .expect("clusters is non-empty");

    if first == last {
        return IndexMap::new();
    }

    let occupied: f32 = clusters.iter().map(|c| c.rect().extent(axis)).sum();
    let span = clusters[last].rect().trailing(axis) - clusters[first].rect().leading(axis);
    let margin = (span - occupied) / (count as f32 - 1.0);

    let mut interior: Vec<usize> = (0..count).filter(|&i| i != first && i != last).collect();
    interior.sort_by(|&a, &b| {
        clusters[a]
            .rect()
            .leading(axis)
            .partial_cmp(&clusters[b].rect().leading(axis))
            .unwrap_or(Ordering::Equal)
    });

    let mut cursor = clusters[first].rect().trailing(axis) + margin;
    let mut deltas = IndexMap::new();
    for index in interior {
        let rect = clusters[index].rect();
        let delta = Point::default().with_along(axis, cursor - rect.leading(axis));
        for &id in clusters[index].elements() {
            deltas.insert(id, delta);
        }
        cursor += rect.extent(axis) + margin;
    }

    debug!(
        orientation:? = orientation,
        clusters_len = count,
        margin = margin;
        "Computed distribution deltas"
    );
    deltas
}
