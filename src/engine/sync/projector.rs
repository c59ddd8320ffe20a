// Physics pose -> visual transform

use super::context::SimulationContext;
use crate::core::math::axis_angle;
use crate::document::{Document, VisualTransform};
use glam::{Quat, Vec3};

/// Map a body pose to the transform of its element.
///
/// `position` is the body centre in physics space (y up, origin bottom-left),
/// `rotation` a unit quaternion about Z. The result places the element's
/// top-left corner in viewport space (y down, origin top-left); the
/// rotation is mirrored because the vertical axis is flipped.
pub fn project(
    position: Vec3,
    rotation: Quat,
    half_extents: Vec3,
    viewport_height: f32,
) -> VisualTransform {
    let (angle, axis) = axis_angle(rotation);

    VisualTransform::new(
        Vec3::new(
            position.x - half_extents.x,
            viewport_height - position.y - half_extents.y,
            position.z,
        ),
        angle * -axis.z,
    )
}

/// Write the current pose of every bound body onto its element; returns the number of writes
pub fn project_all<D: Document + ?Sized>(ctx: &SimulationContext, doc: &mut D) -> usize {
    let viewport_height = ctx.viewport().height;
    let mut writes = 0;

    for bound in ctx.bindings().iter() {
        let Some((position, rotation)) = ctx.body_pose(bound.handle) else {
            continue;
        };
        doc.set_transform(
            bound.element,
            project(position, rotation, bound.half_extents, viewport_height),
        );
        writes += 1;
    }
    writes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::planar_quat;
    use crate::document::{MemoryDocument, NodeSpec, Viewport};
    use crate::engine::sync::builder::build_world;
    use crate::engine::EngineConfig;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_unrotated_body_maps_back_to_rect() {
        let transform = project(
            Vec3::new(60.0, 580.0, 0.0),
            Quat::IDENTITY,
            Vec3::new(50.0, 10.0, 10.0),
            600.0,
        );
        assert_eq!(transform.translate, Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(transform.rotate_z, 0.0);
    }

    #[test]
    fn test_rotation_is_mirrored() {
        for angle in [FRAC_PI_4, -FRAC_PI_4, 2.0, -2.5, PI - 0.01] {
            let transform = project(Vec3::ZERO, planar_quat(angle), Vec3::ZERO, 600.0);
            assert_relative_eq!(transform.rotate_z, -angle, epsilon = 1.0e-4);
        }
    }

    #[test]
    fn test_identity_rotation_is_finite() {
        let transform = project(Vec3::ZERO, Quat::IDENTITY, Vec3::ZERO, 600.0);
        assert!(transform.rotate_z.is_finite());
        assert_eq!(transform.rotate_z, 0.0);
    }

    #[test]
    fn test_projection_follows_spinning_body() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let preview = doc.append(root, NodeSpec::container()).unwrap();
        let leaf = doc
            .append(preview, NodeSpec::leaf(100.0, 20.0).margin(300.0, 250.0))
            .unwrap();

        let mut ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        let handle = ctx.bindings().by_element(leaf).unwrap().handle;
        ctx.world_mut()
            .get_rigid_body_mut(handle)
            .unwrap()
            .set_angvel(1.5, true);

        for _ in 0..20 {
            ctx.step();
            project_all(&ctx, &mut doc);

            let actual = ctx.world().get_rigid_body(handle).unwrap().rotation().angle();
            let written = doc.transform(leaf).unwrap();
            assert_relative_eq!(written.rotate_z, -actual, epsilon = 1.0e-4);
        }
        assert!(doc.transform(leaf).unwrap().rotate_z < 0.0);
    }

    #[test]
    fn test_project_all_writes_every_element() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let preview = doc.append(root, NodeSpec::container()).unwrap();
        for _ in 0..5 {
            doc.append(preview, NodeSpec::leaf(40.0, 12.0).margin(100.0, 30.0))
                .unwrap();
        }

        let ctx = build_world(&mut doc, preview, &EngineConfig::default()).unwrap();
        assert_eq!(project_all(&ctx, &mut doc), 5);
        assert_eq!(doc.transform_writes(), 5);
    }
}
