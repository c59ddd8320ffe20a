// Engine modules: physics, document synchronisation, configuration

pub mod config;
pub mod physics;
pub mod sync;

pub use config::EngineConfig;
pub use sync::{
    ActivityGate, ClickEvent, EventDisposition, FrameOutcome, FrameScheduler, LoopState,
    LoopStats, ManualScheduler, SimulationContext, SimulationLoop, SyncEngine,
};

use crate::document::ElementId;

/// Engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Element {0} left the document while the world was being built")]
    Detached(ElementId),

    #[error("Element {0} is not bound to a body")]
    UnknownElement(ElementId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Detached(ElementId(3));
        assert_eq!(
            err.to_string(),
            "Element #3 left the document while the world was being built"
        );
        let err = EngineError::InvalidConfig("mass must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: mass must be positive");
    }
}
