// In-memory document tree with a minimal block-flow layout

use super::{Document, ElementId, PositionMode, Rect, Viewport, VisualTransform};
use glam::Vec2;
use std::collections::HashMap;

/// Description of a node to append to a `MemoryDocument`
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    class: Option<String>,
    size: Option<Vec2>,
    margin: Vec2,
}

impl NodeSpec {
    /// A container sized by its in-flow children, as wide as its parent
    pub fn container() -> Self {
        Self::default()
    }

    /// A content node with a fixed rendered size
    pub fn leaf(width: f32, height: f32) -> Self {
        Self {
            size: Some(Vec2::new(width, height)),
            ..Self::default()
        }
    }

    /// Attach a class name
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Offset from the parent's left edge and from the previous in-flow sibling
    pub fn margin(mut self, left: f32, top: f32) -> Self {
        self.margin = Vec2::new(left, top);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    spec: NodeSpec,
    mode: PositionMode,
    transform: Option<VisualTransform>,
}

/// Document tree kept entirely in memory.
///
/// Children are stacked top to bottom inside their parent. An `Absolute`
/// node stops taking up flow space, so every later sibling moves up by its
/// height. Until it gets a transform it stays at its static position; after
/// that it sits at its containing block's corner offset by the translation.
/// Other nodes are shifted by their own and their ancestors' translations.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Option<Node>>,
    viewport: Viewport,
    transform_writes: u64,
}

impl MemoryDocument {
    /// Create a document holding only a root container
    pub fn new(viewport: Viewport) -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            spec: NodeSpec::container(),
            mode: PositionMode::Static,
            transform: None,
        };
        Self {
            nodes: vec![Some(root)],
            viewport,
            transform_writes: 0,
        }
    }

    /// Append a node as the last child of `parent`
    ///
    /// Returns `None` if `parent` is not part of the tree.
    pub fn append(&mut self, parent: ElementId, spec: NodeSpec) -> Option<ElementId> {
        self.node(parent)?;
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Some(Node {
            parent: Some(parent),
            children: Vec::new(),
            spec,
            mode: PositionMode::Static,
            transform: None,
        }));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Detach a node and its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(next.0 as usize).and_then(Option::take) {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Whether the node is still attached
    pub fn contains(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// Layout mode of a node
    pub fn position_mode(&self, id: ElementId) -> Option<PositionMode> {
        self.node(id).map(|n| n.mode)
    }

    /// Last transform written to a node
    pub fn transform(&self, id: ElementId) -> Option<VisualTransform> {
        self.node(id).and_then(|n| n.transform)
    }

    /// Total number of `set_transform` calls received
    pub fn transform_writes(&self) -> u64 {
        self.transform_writes
    }

    /// Replace the class of a node
    pub fn set_class(&mut self, id: ElementId, class: Option<String>) {
        if let Some(node) = self.node_mut(id) {
            node.spec.class = class;
        }
    }

    /// Resize the viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    fn layout(&self) -> HashMap<ElementId, Rect> {
        let mut rects = HashMap::new();
        self.layout_node(
            self.root(),
            Vec2::ZERO,
            self.viewport.width,
            Vec2::ZERO,
            &mut rects,
        );
        rects
    }

    /// Lay out `id` whose static top-left corner is `origin`; returns its flow height.
    ///
    /// `containing` is the corner of the nearest positioned ancestor. A
    /// transformed `Absolute` node is placed there plus its translation,
    /// any other node at its static position plus its translation.
    fn layout_node(
        &self,
        id: ElementId,
        origin: Vec2,
        available_width: f32,
        containing: Vec2,
        rects: &mut HashMap<ElementId, Rect>,
    ) -> f32 {
        let Some(node) = self.node(id) else {
            return 0.0;
        };

        let translate = node.transform.map(|t| t.translate.truncate());
        let placed = match (node.mode, translate) {
            (PositionMode::Absolute, Some(translate)) => containing + translate,
            (_, translate) => origin + translate.unwrap_or_default(),
        };
        let containing = match node.mode {
            PositionMode::Static => containing,
            _ => placed,
        };
        let width = node.spec.size.map(|s| s.x).unwrap_or(available_width);

        let mut cursor = 0.0;
        for child_id in &node.children {
            let Some(child) = self.node(*child_id) else {
                continue;
            };
            let top = cursor + child.spec.margin.y;
            let child_height = self.layout_node(
                *child_id,
                placed + Vec2::new(child.spec.margin.x, top),
                width - child.spec.margin.x,
                containing,
                rects,
            );
            if child.mode != PositionMode::Absolute {
                cursor = top + child_height;
            }
        }

        let height = node.spec.size.map(|s| s.y).unwrap_or(cursor);
        rects.insert(id, Rect::new(placed.x, placed.y, width, height));
        height
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.node(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn find_by_class(&self, class: &str) -> Option<ElementId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|id| {
                self.node(*id)
                    .and_then(|n| n.spec.class.as_deref())
                    .is_some_and(|c| c.split_whitespace().any(|c| c == class))
            })
    }

    fn set_position_mode(&mut self, id: ElementId, mode: PositionMode) {
        if let Some(node) = self.node_mut(id) {
            node.mode = mode;
        }
    }

    fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        self.node(id)?;
        self.layout().get(&id).copied()
    }

    fn set_transform(&mut self, id: ElementId, transform: VisualTransform) {
        if let Some(node) = self.node_mut(id) {
            node.transform = Some(transform);
            self.transform_writes += 1;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
