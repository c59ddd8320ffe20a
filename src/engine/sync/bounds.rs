// Bounds extraction and viewport <-> physics coordinate conversion
//
// Viewport space has its origin at the top-left with y growing downward.
// Physics space has its origin at the bottom-left with y growing upward.

use crate::document::{Document, ElementId, PositionMode, Rect};
use crate::engine::EngineError;
use glam::Vec2;

/// Read an element's current rectangle in viewport space
pub fn measure<D: Document + ?Sized>(doc: &D, id: ElementId) -> Result<Rect, EngineError> {
    doc.bounding_rect(id).ok_or(EngineError::Detached(id))
}

/// Take an element out of flow, then measure it.
///
/// Detaching first matters: a measurement taken while the element is still
/// in flow goes stale as soon as it is switched to absolute positioning.
pub fn detach_and_measure<D: Document + ?Sized>(
    doc: &mut D,
    id: ElementId,
) -> Result<Rect, EngineError> {
    doc.set_position_mode(id, PositionMode::Absolute);
    measure(doc, id)
}

/// Descendants of `root` without child elements, in document order
pub fn leaf_elements<D: Document + ?Sized>(doc: &D, root: ElementId) -> Vec<ElementId> {
    doc.descendants(root)
        .into_iter()
        .filter(|id| doc.children(*id).is_empty())
        .collect()
}

/// Centre of a rectangle in physics space
pub fn physics_center(rect: &Rect, viewport_height: f32) -> Vec2 {
    let (x, y) = rect.center();
    Vec2::new(x, viewport_height - y)
}

/// Convert a viewport point (e.g. a pointer position) to physics space
pub fn to_physics(point: Vec2, viewport_height: f32) -> Vec2 {
    Vec2::new(point.x, viewport_height - point.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, NodeSpec, Viewport};

    #[test]
    fn test_physics_center_flips_y() {
        let rect = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert_eq!(physics_center(&rect, 600.0), Vec2::new(60.0, 580.0));
    }

    #[test]
    fn test_to_physics() {
        assert_eq!(to_physics(Vec2::new(5.0, 0.0), 600.0), Vec2::new(5.0, 600.0));
        assert_eq!(to_physics(Vec2::new(5.0, 600.0), 600.0), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_leaf_elements_skip_containers() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let list = doc.append(root, NodeSpec::container()).unwrap();
        let first = doc.append(list, NodeSpec::leaf(50.0, 10.0)).unwrap();
        let second = doc.append(list, NodeSpec::leaf(50.0, 10.0)).unwrap();
        let heading = doc.append(root, NodeSpec::leaf(200.0, 30.0)).unwrap();

        assert_eq!(leaf_elements(&doc, root), vec![first, second, heading]);
        assert_eq!(leaf_elements(&doc, list), vec![first, second]);
    }

    #[test]
    fn test_detach_and_measure_sets_absolute() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let leaf = doc
            .append(root, NodeSpec::leaf(40.0, 10.0).margin(5.0, 5.0))
            .unwrap();

        let rect = detach_and_measure(&mut doc, leaf).unwrap();
        assert_eq!(rect, Rect::new(5.0, 5.0, 40.0, 10.0));
        assert_eq!(doc.position_mode(leaf), Some(PositionMode::Absolute));
    }

    #[test]
    fn test_measure_missing_element() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let leaf = doc.append(root, NodeSpec::leaf(40.0, 10.0)).unwrap();
        doc.remove(leaf);

        assert!(matches!(
            measure(&doc, leaf),
            Err(EngineError::Detached(id)) if id == leaf
        ));
    }
}
