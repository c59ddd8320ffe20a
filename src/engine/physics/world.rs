use rapier2d::prelude::*;

use super::collision::{CollisionEvent as WorldCollisionEvent, CollisionEventQueue};
use crate::engine::config::FIXED_TIMESTEP;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that owns every body of one activation
pub struct PhysicsWorld {
    /// Ambient force, zero for document worlds
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a world without gravity; bodies only move from impulses
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, 0.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one fixed timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        let handle =
            self.collider_set
                .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set);

        // Impulses may arrive before the first step; make the mass usable now
        if let Some(body) = self.rigid_body_set.get_mut(parent_handle) {
            body.recompute_mass_properties_from_colliders(&self.collider_set);
        }
        handle
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Body a collider is attached to
    pub fn collider_parent(&self, handle: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(handle).and_then(|c| c.parent())
    }

    /// Apply an instantaneous impulse to a body, waking it up
    ///
    /// Returns `false` if the handle does not belong to this world.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vector<Real>) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.apply_impulse(impulse, true);
                true
            }
            None => false,
        }
    }

    /// Number of bodies of any type
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Number of fixed (immovable) bodies
    pub fn fixed_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_fixed())
            .count()
    }

    /// Number of dynamic bodies
    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count()
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<WorldCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
