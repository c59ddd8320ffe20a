// Document tree abstraction
//
// The engine never owns document nodes. It reads their layout and writes
// transforms through the `Document` trait, so any rendered tree (a browser
// DOM behind wasm bindings, a native layout engine, or the in-memory
// `MemoryDocument` used by tests and the demo) can be driven.
//
// ## Coordinate system
//
// All rectangles and transforms are in viewport space: origin at the
// top-left corner, x to the right, y downward.

mod memory;

pub use memory::{MemoryDocument, NodeSpec};

use glam::Vec3;
use std::fmt;

/// Opaque handle to a node of a document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an element participates in layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// In normal flow
    #[default]
    Static,
    /// In normal flow, containing block for absolute descendants
    Relative,
    /// Out of flow, kept at its static position
    Absolute,
}

/// Screen-space rectangle of an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre of the rectangle in viewport coordinates
    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Size of the visible area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Transform written onto an element each simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    /// Translation in viewport space (pixels, y downward)
    pub translate: Vec3,
    /// Rotation about the axis perpendicular to the screen, in radians
    pub rotate_z: f32,
}

impl VisualTransform {
    pub fn new(translate: Vec3, rotate_z: f32) -> Self {
        Self {
            translate,
            rotate_z,
        }
    }

    /// Render as a CSS `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, {}px) rotateZ({}rad)",
            self.translate.x, self.translate.y, self.translate.z, self.rotate_z
        )
    }
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

/// A rendered document tree the engine can measure and move
pub trait Document {
    /// Root node of the tree
    fn root(&self) -> ElementId;

    /// Direct children of a node, in document order
    fn children(&self, id: ElementId) -> Vec<ElementId>;

    /// All descendants of a node in document order (pre-order), excluding the node itself
    fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// First node carrying `class`, in document order
    fn find_by_class(&self, class: &str) -> Option<ElementId>;

    /// Change how a node participates in layout
    fn set_position_mode(&mut self, id: ElementId, mode: PositionMode);

    /// Current rectangle of a node in viewport space, `None` if it is not in the tree
    fn bounding_rect(&self, id: ElementId) -> Option<Rect>;

    /// Replace the visual transform of a node
    fn set_transform(&mut self, id: ElementId, transform: VisualTransform);

    /// Current viewport dimensions
    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rendering() {
        let transform = VisualTransform::new(Vec3::new(10.0, 20.5, 0.0), -0.25);
        assert_eq!(
            transform.to_css(),
            "translate3d(10px, 20.5px, 0px) rotateZ(-0.25rad)"
        );
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 40.0, 100.0, 20.0);
        assert_eq!(rect.center(), (60.0, 50.0));
    }

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId(7).to_string(), "#7");
    }
}
