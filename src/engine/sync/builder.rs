// World construction for one activation

use super::bounds::{detach_and_measure, leaf_elements, physics_center};
use super::context::{BodyBindings, Boundaries, BoundBody, SimulationContext};
use super::interaction::ClickRouter;
use crate::document::{Document, ElementId, PositionMode, Viewport};
use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle};
use crate::engine::{EngineConfig, EngineError};
use glam::Vec3;
use log::{debug, trace};

/// Build a fresh world for the preview element rooted at `preview`.
///
/// Every leaf below `preview` is taken out of flow, measured and paired
/// with one dynamic body. Leaves are processed in reverse document order so
/// detaching a leaf never shifts one that has not been measured yet.
pub fn build_world<D: Document + ?Sized>(
    doc: &mut D,
    preview: ElementId,
    config: &EngineConfig,
) -> Result<SimulationContext, EngineError> {
    doc.set_position_mode(preview, PositionMode::Relative);

    let viewport = doc.viewport();
    let mut world = PhysicsWorld::new();
    world.set_timestep(config.timestep);

    let boundaries = add_boundaries(&mut world, viewport, config.wall_thickness);

    let mut bindings = BodyBindings::new();
    for element in leaf_elements(doc, preview).into_iter().rev() {
        let rect = detach_and_measure(doc, element)?;
        let half_width = (rect.width / 2.0).max(0.0);
        let half_height = (rect.height / 2.0).max(0.0);
        let center = physics_center(&rect, viewport.height);

        let handle = world.add_rigid_body(presets::element_body(
            center.x,
            center.y,
            half_width,
            half_height,
            config,
        ));
        world.add_collider(
            presets::element_collider(half_width, half_height, config),
            handle,
        );

        trace!(
            "Bound element {} at ({}, {}) with half-extents {}x{}",
            element,
            center.x,
            center.y,
            half_width,
            half_height
        );

        bindings.insert(BoundBody {
            handle,
            element,
            half_extents: Vec3::new(half_width, half_height, config.body_half_depth),
        });
    }

    for bound in bindings.iter() {
        doc.set_position_mode(bound.element, PositionMode::Absolute);
    }

    let router = ClickRouter::bind(&bindings);

    debug!(
        "Built world for {}x{} viewport: {} element bodies",
        viewport.width,
        viewport.height,
        bindings.len()
    );

    Ok(SimulationContext {
        world,
        bindings,
        boundaries,
        router,
        viewport,
    })
}

/// Enclose the viewport with four fixed walls
fn add_boundaries(world: &mut PhysicsWorld, viewport: Viewport, thickness: f32) -> Boundaries {
    let (width, height) = (viewport.width, viewport.height);

    let mut wall = |x: f32, y: f32, half_width: f32, half_height: f32| -> RigidBodyHandle {
        let handle = world.add_rigid_body(presets::boundary_body(x, y));
        world.add_collider(presets::boundary_collider(half_width, half_height), handle);
        handle
    };

    Boundaries {
        top: wall(0.0, height + thickness, width, thickness),
        bottom: wall(0.0, thickness / 2.0, width, thickness),
        left: wall(-thickness, 0.0, thickness, height),
        right: wall(width + thickness / 2.0, 0.0, thickness, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, NodeSpec, Rect};
    use approx::assert_relative_eq;

    fn scenario() -> (MemoryDocument, ElementId, ElementId, ElementId) {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let preview = doc
            .append(root, NodeSpec::container().class("euiMarkdownFormat"))
            .unwrap();
        let first = doc
            .append(preview, NodeSpec::leaf(100.0, 20.0).margin(10.0, 10.0))
            .unwrap();
        let second = doc
            .append(preview, NodeSpec::leaf(100.0, 20.0).margin(10.0, 10.0))
            .unwrap();
        (doc, preview, first, second)
    }

    #[test]
    fn test_scenario_body_counts() {
        let (mut doc, preview, _, _) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();

        assert_eq!(ctx.world().dynamic_body_count(), 2);
        assert_eq!(ctx.world().fixed_body_count(), 4);
        assert_eq!(ctx.bindings().len(), 2);
    }

    #[test]
    fn test_scenario_positions() {
        let (mut doc, preview, first, second) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();

        let (pos, rot) = ctx.element_pose(first).unwrap();
        assert_relative_eq!(pos.x, 60.0);
        assert_relative_eq!(pos.y, 580.0);
        assert_relative_eq!(pos.z, 0.0);
        assert_relative_eq!(rot.w, 1.0);

        let (pos, _) = ctx.element_pose(second).unwrap();
        assert_relative_eq!(pos.x, 60.0);
        assert_relative_eq!(pos.y, 550.0);
    }

    #[test]
    fn test_half_extents_match_measured_size() {
        let (mut doc, preview, first, _) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();

        let bound = ctx.bindings().by_element(first).unwrap();
        assert_eq!(bound.half_extents, Vec3::new(50.0, 10.0, 10.0));

        let collider = ctx
            .world()
            .get_rigid_body(bound.handle)
            .and_then(|b| b.colliders().first().copied())
            .unwrap();
        assert_eq!(ctx.world().collider_parent(collider), Some(bound.handle));
    }

    #[test]
    fn test_reverse_order_measures_before_shift() {
        // Detaching in document order moves the second line up before it is measured
        let (mut forward, _, first, second) = scenario();
        detach_and_measure(&mut forward, first).unwrap();
        assert_eq!(
            detach_and_measure(&mut forward, second).unwrap(),
            Rect::new(10.0, 10.0, 100.0, 20.0)
        );

        let (mut doc, preview, first, second) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        let (pos, _) = ctx.element_pose(second).unwrap();
        assert_relative_eq!(pos.y, 600.0 - 50.0);

        assert_eq!(doc.position_mode(first), Some(PositionMode::Absolute));
        assert_eq!(doc.position_mode(second), Some(PositionMode::Absolute));
        assert_eq!(doc.position_mode(preview), Some(PositionMode::Relative));
    }

    #[test]
    fn test_bodies_created_in_reverse_document_order() {
        let (mut doc, preview, first, second) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();

        let order: Vec<ElementId> = ctx.bindings().iter().map(|b| b.element).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn test_nested_containers_bind_only_leaves() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let preview = doc.append(root, NodeSpec::container()).unwrap();
        let list = doc.append(preview, NodeSpec::container()).unwrap();
        for _ in 0..3 {
            doc.append(list, NodeSpec::leaf(80.0, 16.0).margin(20.0, 4.0))
                .unwrap();
        }
        let paragraph = doc.append(preview, NodeSpec::leaf(300.0, 18.0)).unwrap();

        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        assert_eq!(ctx.bindings().len(), 4);
        assert!(ctx.bindings().by_element(list).is_none());
        assert!(ctx.bindings().by_element(paragraph).is_some());
        assert_eq!(doc.position_mode(list), Some(PositionMode::Static));
    }

    #[test]
    fn test_zero_size_leaf_gets_degenerate_body() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let preview = doc.append(root, NodeSpec::container()).unwrap();
        let empty = doc
            .append(preview, NodeSpec::leaf(0.0, 0.0).margin(300.0, 200.0))
            .unwrap();

        let mut ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        let bound = *ctx.bindings().by_element(empty).unwrap();
        assert_eq!(bound.half_extents.truncate(), glam::Vec2::ZERO);

        for _ in 0..10 {
            ctx.step();
        }
        let (pos, rot) = ctx.body_pose(bound.handle).unwrap();
        assert!(pos.is_finite());
        assert!(rot.is_finite());
    }

    #[test]
    fn test_walls_enclose_viewport() {
        let (mut doc, preview, _, _) = scenario();
        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        let walls = ctx.boundaries();

        let position = |h| {
            let t = ctx.world().get_rigid_body(h).unwrap().translation();
            (t.x, t.y)
        };
        assert_eq!(position(walls.top), (0.0, 650.0));
        assert_eq!(position(walls.bottom), (0.0, 25.0));
        assert_eq!(position(walls.left), (-50.0, 0.0));
        assert_eq!(position(walls.right), (825.0, 0.0));
    }

    #[test]
    fn test_walls_follow_configured_thickness() {
        let (mut doc, preview, _, _) = scenario();
        let config = EngineConfig::default().wall_thickness(20.0);
        let ctx = build_world(&mut doc, preview, &config).unwrap();
        let walls = ctx.boundaries();

        let top = ctx.world().get_rigid_body(walls.top).unwrap().translation();
        assert_eq!((top.x, top.y), (0.0, 620.0));
        let right = ctx.world().get_rigid_body(walls.right).unwrap().translation();
        assert_eq!((right.x, right.y), (810.0, 0.0));
    }

    #[test]
    fn test_detached_preview_has_no_bodies() {
        let (mut doc, preview, _, _) = scenario();
        doc.remove(preview);

        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        assert!(ctx.bindings().is_empty());
        assert_eq!(ctx.world().body_count(), 4);
    }
}
