//! Real-time coupling between a 2D rigid-body simulation and the layout of a
//! rendered document tree.
//!
//! When the watched preview element appears, every leaf element below it is
//! detached from flow and given a box body inside a walled-off viewport.
//! Each display refresh steps the world and writes the bodies' poses back as
//! element transforms; clicking an element knocks its body away from the
//! pointer. The loop winds down once the preview disappears.

pub mod core;
pub mod document;
pub mod engine;

pub use document::{
    Document, ElementId, MemoryDocument, NodeSpec, PositionMode, Rect, Viewport, VisualTransform,
};
pub use engine::{
    ClickEvent, EngineConfig, EngineError, EventDisposition, FrameOutcome, FrameScheduler,
    LoopState, LoopStats, ManualScheduler, SyncEngine,
};
