use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Viewport walls
    Boundary = 0b0000_0010,

    /// Bodies standing in for document elements
    Element = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Walls only stop elements; overlapping walls never interact
            CollisionGroups::Boundary => Group::from_bits_truncate(
                CollisionGroups::Element as u32 | CollisionGroups::Default as u32,
            ),

            // Elements bump into walls and into each other
            CollisionGroups::Element => Group::from_bits_truncate(
                CollisionGroups::Boundary as u32
                    | CollisionGroups::Element as u32
                    | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Contact event reported by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// Both colliders involved in the event
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
            } => (collider1, collider2),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, CollisionEvent::Started { .. })
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// rapier calls this from inside the pipeline step
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
