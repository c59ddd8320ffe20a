// Pointer clicks -> impulses on element bodies

use super::bounds::to_physics;
use super::context::BodyBindings;
use crate::document::ElementId;
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};
use crate::engine::{EngineConfig, EngineError};
use glam::Vec2;
use log::debug;
use rapier2d::prelude::Vector;
use std::collections::HashMap;

/// A pointer click in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl ClickEvent {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// What the host should do with a click after the engine handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventDisposition {
    /// Skip the default action (following links, toggling checkboxes, ...)
    pub default_prevented: bool,
    /// Don't deliver the click to ancestors
    pub propagation_stopped: bool,
}

impl EventDisposition {
    /// Disposition of a click that was turned into an impulse
    pub fn consumed() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }
}

/// Impulse pushing a body at `body_center` away from `pointer` (both in physics space)
pub fn click_impulse(body_center: Vec2, pointer: Vec2, config: &EngineConfig) -> Vec2 {
    Vec2::new(
        (body_center.x - pointer.x) * config.impulse_scale,
        (body_center.y - pointer.y - config.impulse_vertical_offset) * config.impulse_scale,
    )
}

/// Click handlers for one activation, one per bound element
#[derive(Debug, Default)]
pub struct ClickRouter {
    targets: HashMap<ElementId, RigidBodyHandle>,
}

impl ClickRouter {
    /// Attach a handler to every bound element
    pub fn bind(bindings: &BodyBindings) -> Self {
        Self {
            targets: bindings.iter().map(|b| (b.element, b.handle)).collect(),
        }
    }

    /// Whether `element` has a handler
    pub fn is_bound(&self, element: ElementId) -> bool {
        self.targets.contains_key(&element)
    }

    /// Apply the impulse for one click on `element`.
    ///
    /// The impulse lands on the body immediately and takes effect at the
    /// next step; clicks are never queued.
    pub fn dispatch(
        &self,
        world: &mut PhysicsWorld,
        element: ElementId,
        event: ClickEvent,
        viewport_height: f32,
        config: &EngineConfig,
    ) -> Result<EventDisposition, EngineError> {
        let handle = *self
            .targets
            .get(&element)
            .ok_or(EngineError::UnknownElement(element))?;
        let body = world
            .get_rigid_body(handle)
            .ok_or(EngineError::UnknownElement(element))?;

        let center = Vec2::new(body.translation().x, body.translation().y);
        let pointer = to_physics(Vec2::new(event.client_x, event.client_y), viewport_height);
        let impulse = click_impulse(center, pointer, config);

        debug!(
            "Click on {} at ({}, {}): impulse ({}, {})",
            element, event.client_x, event.client_y, impulse.x, impulse.y
        );
        world.apply_impulse(handle, Vector::new(impulse.x, impulse.y));

        Ok(EventDisposition::consumed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{presets, PhysicsWorld};
    use crate::engine::sync::context::BoundBody;
    use glam::Vec3;

    fn single_body() -> (PhysicsWorld, ClickRouter, RigidBodyHandle) {
        let config = EngineConfig::default();
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::element_body(60.0, 580.0, 50.0, 10.0, &config));
        world.add_collider(presets::element_collider(50.0, 10.0, &config), handle);

        let mut bindings = BodyBindings::new();
        bindings.insert(BoundBody {
            handle,
            element: ElementId(1),
            half_extents: Vec3::new(50.0, 10.0, 10.0),
        });
        (world, ClickRouter::bind(&bindings), handle)
    }

    #[test]
    fn test_click_impulse_formula() {
        let config = EngineConfig::default();
        let impulse = click_impulse(Vec2::new(60.0, 580.0), Vec2::new(20.0, 590.0), &config);
        assert_eq!(impulse, Vec2::new(80.0, -100.0));
    }

    #[test]
    fn test_click_on_center_pushes_down_by_offset() {
        let config = EngineConfig::default();
        let impulse = click_impulse(Vec2::new(60.0, 580.0), Vec2::new(60.0, 580.0), &config);
        assert_eq!(impulse, Vec2::new(0.0, -80.0));
    }

    #[test]
    fn test_click_impulse_uses_configured_scale() {
        let config = EngineConfig::default().impulse(1.0, 0.0);
        let impulse = click_impulse(Vec2::new(60.0, 580.0), Vec2::new(20.0, 590.0), &config);
        assert_eq!(impulse, Vec2::new(40.0, -10.0));
    }

    #[test]
    fn test_dispatch_consumes_click() {
        let (mut world, router, handle) = single_body();
        let config = EngineConfig::default();

        // Pointer left of the body centre: the body is pushed to the right
        let disposition = router
            .dispatch(&mut world, ElementId(1), ClickEvent::new(20.0, 20.0), 600.0, &config)
            .unwrap();
        assert_eq!(disposition, EventDisposition::consumed());

        world.step();
        let body = world.get_rigid_body(handle).unwrap();
        assert!(body.linvel().x > 0.0);
        assert!(body.translation().x > 60.0);
    }

    #[test]
    fn test_each_click_applies_once() {
        let (mut world, router, handle) = single_body();
        let config = EngineConfig::default();
        let click = ClickEvent::new(20.0, 20.0);

        router
            .dispatch(&mut world, ElementId(1), click, 600.0, &config)
            .unwrap();
        let after_one = world.get_rigid_body(handle).unwrap().linvel().x;

        router
            .dispatch(&mut world, ElementId(1), click, 600.0, &config)
            .unwrap();
        let after_two = world.get_rigid_body(handle).unwrap().linvel().x;

        assert!((after_two - 2.0 * after_one).abs() < 1.0e-3);
    }

    #[test]
    fn test_unbound_element_is_rejected() {
        let (mut world, router, _) = single_body();
        let result = router.dispatch(
            &mut world,
            ElementId(42),
            ClickEvent::new(0.0, 0.0),
            600.0,
            &EngineConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::UnknownElement(ElementId(42)))));
        assert!(!router.is_bound(ElementId(42)));
        assert!(router.is_bound(ElementId(1)));
    }
}
