// State of one activation: the world, its walls and the body <-> element table

use super::interaction::ClickRouter;
use crate::document::{ElementId, Viewport};
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};
use glam::{Quat, Vec3};
use std::collections::HashMap;

/// A dynamic body and the leaf element it stands in for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBody {
    pub handle: RigidBodyHandle,
    pub element: ElementId,
    /// Half width, half height and half depth of the box
    pub half_extents: Vec3,
}

/// Association table between dynamic bodies and document elements.
///
/// Bodies hold no reference to their element; every lookup in either
/// direction goes through this table.
#[derive(Debug, Default)]
pub struct BodyBindings {
    bodies: Vec<BoundBody>,
    by_element: HashMap<ElementId, usize>,
    by_handle: HashMap<RigidBodyHandle, usize>,
}

impl BodyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pairing. Returns `false` if the element was already bound.
    pub fn insert(&mut self, bound: BoundBody) -> bool {
        if self.by_element.contains_key(&bound.element) {
            return false;
        }
        let index = self.bodies.len();
        self.by_element.insert(bound.element, index);
        self.by_handle.insert(bound.handle, index);
        self.bodies.push(bound);
        true
    }

    /// Binding for an element
    pub fn by_element(&self, element: ElementId) -> Option<&BoundBody> {
        self.by_element.get(&element).map(|i| &self.bodies[*i])
    }

    /// Binding for a body
    pub fn by_handle(&self, handle: RigidBodyHandle) -> Option<&BoundBody> {
        self.by_handle.get(&handle).map(|i| &self.bodies[*i])
    }

    /// Bindings in creation order
    pub fn iter(&self) -> impl Iterator<Item = &BoundBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// The four fixed walls enclosing the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub top: RigidBodyHandle,
    pub bottom: RigidBodyHandle,
    pub left: RigidBodyHandle,
    pub right: RigidBodyHandle,
}

impl Boundaries {
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        [self.top, self.bottom, self.left, self.right].contains(&handle)
    }
}

/// Everything one running simulation owns.
///
/// A context is built fresh on every activation and dropped when the loop
/// stops; nothing is carried over between activations.
pub struct SimulationContext {
    pub(crate) world: PhysicsWorld,
    pub(crate) bindings: BodyBindings,
    pub(crate) boundaries: Boundaries,
    pub(crate) router: ClickRouter,
    pub(crate) viewport: Viewport,
}

impl SimulationContext {
    /// Advance the world by one fixed step; returns the number of new wall contacts
    pub fn step(&mut self) -> u64 {
        self.world.step();

        let mut wall_hits = 0;
        for event in self.world.get_collision_events() {
            if !event.is_started() {
                continue;
            }
            let (a, b) = event.colliders();
            let parents = (
                self.world.collider_parent(a),
                self.world.collider_parent(b),
            );
            if let (Some(a), Some(b)) = parents {
                if self.boundaries.contains(a) != self.boundaries.contains(b) {
                    wall_hits += 1;
                }
            }
        }
        wall_hits
    }

    /// Position (z is always 0) and rotation of a body as a quaternion about Z
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        let body = self.world.get_rigid_body(handle)?;
        let translation = body.translation();
        Some((
            Vec3::new(translation.x, translation.y, 0.0),
            crate::core::math::planar_quat(body.rotation().angle()),
        ))
    }

    /// Current physics-space pose of the body bound to `element`
    pub fn element_pose(&self, element: ElementId) -> Option<(Vec3, Quat)> {
        let bound = self.bindings.by_element(element)?;
        self.body_pose(bound.handle)
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn bindings(&self) -> &BodyBindings {
        &self.bindings
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Viewport size captured at activation
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
