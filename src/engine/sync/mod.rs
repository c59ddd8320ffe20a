// Document <-> physics synchronisation
//
// ## Architecture
//
// - `bounds`: element measurement and coordinate conversion
// - `builder`: one fresh world per activation (walls + one body per leaf)
// - `context`: the world of one activation and its body/element table
// - `interaction`: clicks -> impulses
// - `projector`: body poses -> element transforms
// - `gate`: the activity flag
// - `sim_loop`: fixed-step loop driven by display refreshes
// - `engine`: the host-facing entry point
//
// ## Usage Example
//
// ```rust
// use knockabout::{EngineConfig, ManualScheduler, SyncEngine};
//
// let mut engine = SyncEngine::new(EngineConfig::default())?;
// let mut scheduler = ManualScheduler::new();
//
// // Whenever the watched container's subtree changes
// engine.handle_mutation(&mut document, &mut scheduler)?;
//
// // Whenever a requested refresh arrives
// if scheduler.take() {
//     engine.on_frame(&mut document, &mut scheduler);
// }
// ```

pub mod bounds;
pub mod builder;
pub mod context;
mod engine;
mod gate;
pub mod interaction;
pub mod projector;
mod sim_loop;

pub use context::{BodyBindings, Boundaries, BoundBody, SimulationContext};
pub use engine::SyncEngine;
pub use gate::{ActivityGate, GateTransition};
pub use interaction::{ClickEvent, EventDisposition};
pub use sim_loop::{FrameOutcome, FrameScheduler, LoopState, LoopStats, ManualScheduler, SimulationLoop};
