// Entry point for hosts: structural-change notifications, frames and clicks

use super::context::SimulationContext;
use super::interaction::{ClickEvent, EventDisposition};
use super::sim_loop::{FrameOutcome, FrameScheduler, LoopState, LoopStats, SimulationLoop};
use crate::document::{Document, ElementId};
use crate::engine::{EngineConfig, EngineError};
use log::{debug, warn};

/// Couples a document tree to a physics world.
///
/// The host forwards three things: structural-change notifications for the
/// watched container (`handle_mutation`), display-refresh callbacks it was
/// asked for (`on_frame`), and clicks on elements (`click`).
pub struct SyncEngine {
    sim: SimulationLoop,
}

impl SyncEngine {
    /// Create an idle engine
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            sim: SimulationLoop::new(config),
        })
    }

    /// React to a change in the watched subtree.
    ///
    /// Presence of the preview element is treated as a level: the engine
    /// activates when it appears and deactivates when it disappears, and a
    /// notification reporting the current level again changes nothing.
    pub fn handle_mutation<D, S>(&mut self, doc: &mut D, scheduler: &mut S) -> Result<(), EngineError>
    where
        D: Document + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let preview = doc.find_by_class(&self.sim.config().preview_class);
        match preview {
            Some(preview) => {
                if !self.sim.activate(doc, preview, scheduler)? {
                    debug!("Preview still present, nothing to do");
                }
            }
            None => {
                self.sim.deactivate();
            }
        }
        Ok(())
    }

    /// Display-refresh callback requested through the scheduler
    pub fn on_frame<D, S>(&mut self, doc: &mut D, scheduler: &mut S) -> FrameOutcome
    where
        D: Document + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.sim.on_frame(doc, scheduler)
    }

    /// Deliver a click on `element`.
    ///
    /// Returns `None` when the engine isn't simulating the element, in which
    /// case the host handles the click as usual.
    pub fn click(&mut self, element: ElementId, event: ClickEvent) -> Option<EventDisposition> {
        match self.sim.click(element, event)? {
            Ok(disposition) => Some(disposition),
            Err(e) => {
                warn!("Dropping click on {}: {}", element, e);
                None
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.sim.state()
    }

    pub fn is_active(&self) -> bool {
        self.sim.is_active()
    }

    pub fn stats(&self) -> LoopStats {
        self.sim.stats()
    }

    /// World of the current activation, if any
    pub fn context(&self) -> Option<&SimulationContext> {
        self.sim.context()
    }

    pub fn context_mut(&mut self) -> Option<&mut SimulationContext> {
        self.sim.context_mut()
    }

    pub fn config(&self) -> &EngineConfig {
        self.sim.config()
    }
}
