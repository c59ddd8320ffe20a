/// Simulation loop control
///
/// Steps the active world once per display refresh with a fixed timestep,
/// then projects every body onto its element. The loop is cooperative:
/// nothing runs between refreshes, and closing the gate only stops the
/// *next* frame from being scheduled.
use super::builder::build_world;
use super::context::SimulationContext;
use super::gate::{ActivityGate, GateTransition};
use super::interaction::{ClickEvent, EventDisposition};
use super::projector::project_all;
use crate::document::{Document, ElementId};
use crate::engine::{EngineConfig, EngineError};
use log::{debug, info, trace};

/// Log loop statistics every this many frames
const STATS_LOG_INTERVAL: u64 = 600;

/// Source of display-refresh callbacks
pub trait FrameScheduler {
    /// Ask for one frame callback at the next refresh opportunity
    fn request_frame(&mut self);
}

/// Scheduler for headless drivers: records requests, the caller delivers frames
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of requests received
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Observable state of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No world
    Idle,
    /// Gate open, frames keep being scheduled
    Running,
    /// Gate closed, the last frame has not run yet
    Stopping,
}

/// What a frame decided about the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A step ran and another frame was requested
    Continue,
    /// A step ran and it was the last one
    Stopped,
    /// No world to step
    Idle,
}

/// Counters across the lifetime of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Worlds built
    pub activations: u64,
    /// Frames that stepped a world
    pub frames: u64,
    /// Transforms written to elements
    pub transform_writes: u64,
    /// Contacts started between an element and a wall
    pub wall_hits: u64,
}

/// Owns the activity gate and the world of the current activation
pub struct SimulationLoop {
    config: EngineConfig,
    gate: ActivityGate,
    context: Option<SimulationContext>,
    frame_pending: bool,
    stats: LoopStats,
}

impl SimulationLoop {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            gate: ActivityGate::new(),
            context: None,
            frame_pending: false,
            stats: LoopStats::default(),
        }
    }

    /// Build a fresh world for `preview` and start stepping it.
    ///
    /// Returns `Ok(false)` without touching anything if already running.
    /// A world left over from a pending stop is dropped and replaced. The
    /// first frame runs immediately.
    pub fn activate<D, S>(
        &mut self,
        doc: &mut D,
        preview: ElementId,
        scheduler: &mut S,
    ) -> Result<bool, EngineError>
    where
        D: Document + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.gate.is_open() {
            return Ok(false);
        }

        let context = build_world(doc, preview, &self.config)?;
        if self.context.replace(context).is_some() {
            debug!("Discarding world of the previous activation");
        }
        self.gate.open();
        self.stats.activations += 1;

        if let Some(ctx) = &self.context {
            info!(
                "Simulation started: {} bodies in a {}x{} viewport",
                ctx.bindings().len(),
                ctx.viewport().width,
                ctx.viewport().height
            );
        }

        self.run_frame(doc, scheduler);
        Ok(true)
    }

    /// Stop scheduling frames. The frame already requested still runs.
    ///
    /// Returns `false` if the loop was not running.
    pub fn deactivate(&mut self) -> bool {
        match self.gate.close() {
            GateTransition::Closed => {
                info!("Simulation stopping after the pending frame");
                true
            }
            _ => false,
        }
    }

    /// Display-refresh callback
    pub fn on_frame<D, S>(&mut self, doc: &mut D, scheduler: &mut S) -> FrameOutcome
    where
        D: Document + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.frame_pending = false;
        self.run_frame(doc, scheduler)
    }

    /// Step, project, then decide whether another frame follows
    fn run_frame<D, S>(&mut self, doc: &mut D, scheduler: &mut S) -> FrameOutcome
    where
        D: Document + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let Some(ctx) = self.context.as_mut() else {
            return FrameOutcome::Idle;
        };

        let wall_hits = ctx.step();
        let writes = project_all(ctx, doc);

        self.stats.frames += 1;
        self.stats.wall_hits += wall_hits;
        self.stats.transform_writes += writes as u64;
        trace!("Frame {}: {} transforms, {} wall hits", self.stats.frames, writes, wall_hits);
        if self.stats.frames % STATS_LOG_INTERVAL == 0 {
            debug!("Loop stats: {:?}", self.stats);
        }

        if self.gate.is_open() {
            if !self.frame_pending {
                self.frame_pending = true;
                scheduler.request_frame();
            }
            FrameOutcome::Continue
        } else {
            self.context = None;
            info!("Simulation stopped after {} frames", self.stats.frames);
            FrameOutcome::Stopped
        }
    }

    /// Turn a click into an impulse on the element's body.
    ///
    /// `None` if there is no world or the element has no handler.
    pub fn click(
        &mut self,
        element: ElementId,
        event: ClickEvent,
    ) -> Option<Result<EventDisposition, EngineError>> {
        let ctx = self.context.as_mut()?;
        if !ctx.router.is_bound(element) {
            return None;
        }

        let viewport_height = ctx.viewport.height;
        Some(
            ctx.router
                .dispatch(&mut ctx.world, element, event, viewport_height, &self.config),
        )
    }

    pub fn state(&self) -> LoopState {
        match (self.gate.is_open(), self.context.is_some()) {
            (true, _) => LoopState::Running,
            (false, true) => LoopState::Stopping,
            (false, false) => LoopState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_open()
    }

    /// World of the current activation
    pub fn context(&self) -> Option<&SimulationContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SimulationContext> {
        self.context.as_mut()
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
