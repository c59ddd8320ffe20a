use super::collision::CollisionGroups;
use rapier2d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linear_damping: Real,
    angular_damping: Real,
    can_sleep: bool,
    ccd: bool,
    mass: Option<(Real, Real)>,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by impulses and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: true,
            ccd: false,
            mass: None,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: false,
            ccd: false,
            mass: None,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set linear and angular velocity damping
    pub fn damping(mut self, linear: Real, angular: Real) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Enable continuous collision detection so fast bodies can't tunnel through walls
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Give the body a fixed mass with the inertia of a `half_width` x `half_height` box.
    ///
    /// The mass lives on the body rather than being derived from collider
    /// density, so degenerate (zero-area) shapes still get the requested mass.
    pub fn box_mass(mut self, mass: Real, half_width: Real, half_height: Real) -> Self {
        let (w, h) = (half_width * 2.0, half_height * 2.0);
        let inertia = mass * (w * w + h * h) / 12.0;
        self.mass = Some((mass, inertia));
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        let mut builder = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd);

        if let Some((mass, inertia)) = self.mass {
            builder = builder
                .additional_mass_properties(MassProperties::new(point![0.0, 0.0], mass, inertia));
        }

        builder.build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape area)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(self.active_events)
            .build()
    }
}

/// Body configurations for document worlds
pub mod presets {
    use super::*;
    use crate::engine::config::EngineConfig;

    /// Create a wall body (fixed, never moves)
    pub fn boundary_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a wall collider from its half-extents
    pub fn boundary_collider(half_width: Real, half_height: Real) -> Collider {
        ColliderBuilder2D::box_shape(half_width, half_height)
            .collision_groups(CollisionGroups::Boundary)
            .friction(0.3)
            .build()
    }

    /// Create the body standing in for one leaf element.
    ///
    /// Negative half-extents are clamped to zero.
    pub fn element_body(
        x: Real,
        y: Real,
        half_width: Real,
        half_height: Real,
        config: &EngineConfig,
    ) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .damping(config.linear_damping, config.angular_damping)
            .box_mass(config.body_mass, half_width.max(0.0), half_height.max(0.0))
            .ccd(true)
            .build()
    }

    /// Create the collider of a leaf element body; its mass comes from the body
    pub fn element_collider(half_width: Real, half_height: Real, config: &EngineConfig) -> Collider {
        ColliderBuilder2D::box_shape(half_width.max(0.0), half_height.max(0.0))
            .collision_groups(CollisionGroups::Element)
            .restitution(config.restitution)
            .density(0.0)
            .build()
    }
}
