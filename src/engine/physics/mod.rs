// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};
