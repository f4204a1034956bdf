//! Edge and center alignment over bounding-rect clusters.

use indexmap::IndexMap;
use log::debug;

use lodestar_core::geometry::{Point, RectReference};
use lodestar_core::scene::{ElementId, Scene};

use crate::aggregate::compute_bounding_rects;

/// Computes per-element deltas aligning the selection's clusters on the
/// given reference line.
///
/// The alignment target is the minimum reference position for `Left` and
/// `Top`, the maximum for `Right` and `Bottom`, and the arithmetic mean
/// for the two center references. Every cluster converges onto the target
/// line; clusters already on it receive a zero delta and are still
/// present in the result.
///
/// The returned map preserves cluster order. An empty or fully filtered
/// selection yields an empty map.
pub fn align(
    scene: &Scene,
    selection: &[ElementId],
    reference: RectReference,
) -> IndexMap<ElementId, Point> {
    let clusters = compute_bounding_rects(scene, selection);
    if clusters.is_empty() {
        return IndexMap::new();
    }

    let positions: Vec<f32> = clusters
        .iter()
        .map(|cluster| cluster.rect().reference_position(reference))
        .collect();

    let target = match reference {
        RectReference::Left | RectReference::Top => {
            positions.iter().copied().fold(f32::INFINITY, f32::min)
        }
        RectReference::Right | RectReference::Bottom => {
            positions.iter().copied().fold(f32::NEG_INFINITY, f32::max)
        }
        RectReference::HorizontalCenter | RectReference::VerticalCenter => {
            positions.iter().sum::<f32>() / positions.len() as f32
        }
    };

    let axis = reference.axis();
    let mut deltas = IndexMap::new();
    for (cluster, position) in clusters.iter().zip(positions) {
        let delta = Point::default().with_along(axis, target - position);
        for &id in cluster.elements() {
            deltas.insert(id, delta);
        }
    }

    debug!(
        reference:? = reference,
        clusters_len = clusters.len(),
        target = target;
        "Computed alignment deltas"
    );
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use lodestar_core::geometry::Rect;
    use lodestar_core::scene::{Element, ElementKind};

    fn node(id: u64, x: f32, y: f32, w: f32, h: f32) -> Element {
        Element::new(ElementId::new(id), ElementKind::Node, Rect::new(x, y, w, h))
    }

    fn three_row_scene() -> (Scene, Vec<ElementId>) {
        let mut scene = Scene::new();
        scene.insert(node(1, 0.0, 0.0, 5.0, 5.0));
        scene.insert(node(2, 10.0, 20.0, 5.0, 5.0));
        scene.insert(node(3, 25.0, 40.0, 5.0, 5.0));
        let selection = [1, 2, 3].map(ElementId::new).to_vec();
        (scene, selection)
    }

    #[test]
    fn align_left_converges_on_minimum() {
        let (scene, selection) = three_row_scene();
        let deltas = align(&scene, &selection, RectReference::Left);

        assert_eq!(deltas[&ElementId::new(1)], Point::new(0.0, 0.0));
        assert_eq!(deltas[&ElementId::new(2)], Point::new(-10.0, 0.0));
        assert_eq!(deltas[&ElementId::new(3)], Point::new(-25.0, 0.0));
    }

    #[test]
    fn align_right_converges_on_maximum() {
        let (scene, selection) = three_row_scene();
        let deltas = align(&scene, &selection, RectReference::Right);

        // Right edges are 5, 15, 30 — everything moves right to 30
        assert_eq!(deltas[&ElementId::new(1)], Point::new(25.0, 0.0));
        assert_eq!(deltas[&ElementId::new(2)], Point::new(15.0, 0.0));
        assert_eq!(deltas[&ElementId::new(3)], Point::new(0.0, 0.0));
    }

    #[test]
    fn align_horizontal_center_converges_on_mean() {
        let (scene, selection) = three_row_scene();
        let deltas = align(&scene, &selection, RectReference::HorizontalCenter);

        // Centers are 2.5, 12.5, 27.5; mean is 14.1666…
        let target = (2.5 + 12.5 + 27.5) / 3.0;
        let d1 = deltas[&ElementId::new(1)].x();
        let d3 = deltas[&ElementId::new(3)].x();
        assert!(approx_eq!(f32, d1, target - 2.5, epsilon = 1e-4));
        assert!(approx_eq!(f32, d3, target - 27.5, epsilon = 1e-4));
        // Elements left of the mean move right, right of it move left
        assert!(d1 > 0.0);
        assert!(d3 < 0.0);
    }

    #[test]
    fn align_top_and_bottom_use_vertical_axis() {
        let (scene, selection) = three_row_scene();

        let top = align(&scene, &selection, RectReference::Top);
        assert_eq!(top[&ElementId::new(3)], Point::new(0.0, -40.0));
        assert_eq!(top[&ElementId::new(3)].x(), 0.0);

        let bottom = align(&scene, &selection, RectReference::Bottom);
        // Bottom edges are 5, 25, 45
        assert_eq!(bottom[&ElementId::new(1)], Point::new(0.0, 40.0));
    }

    #[test]
    fn group_members_share_the_cluster_delta() {
        let mut scene = Scene::new();
        scene.insert(Element::new(
            ElementId::new(10),
            ElementKind::Group,
            Rect::new(100.0, 0.0, 60.0, 60.0),
        ));
        scene.insert(node(1, 110.0, 10.0, 10.0, 10.0));
        scene.insert(node(2, 0.0, 100.0, 20.0, 20.0));

        let selection = [10, 2].map(ElementId::new).to_vec();
        let deltas = align(&scene, &selection, RectReference::Left);

        // The group cluster (group + carried node) shares one delta
        assert_eq!(deltas[&ElementId::new(10)], deltas[&ElementId::new(1)]);
        assert_eq!(deltas[&ElementId::new(10)], Point::new(-100.0, 0.0));
        assert_eq!(deltas[&ElementId::new(2)], Point::new(0.0, 0.0));
    }

    #[test]
    fn empty_selection_yields_empty_map() {
        let scene = Scene::new();
        assert!(align(&scene, &[], RectReference::Left).is_empty());
    }

    #[test]
    fn single_element_gets_zero_delta() {
        let mut scene = Scene::new();
        scene.insert(node(1, 7.0, 9.0, 5.0, 5.0));
        let deltas = align(&scene, &[ElementId::new(1)], RectReference::Left);
        assert_eq!(deltas[&ElementId::new(1)], Point::new(0.0, 0.0));
    }
}
