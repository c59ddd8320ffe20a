// Activity gate: the single flag deciding whether another frame is scheduled

/// Result of asking the gate to change state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    Opened,
    Closed,
    Unchanged,
}

/// Level-triggered on/off switch owned by the simulation loop.
///
/// Opening an open gate or closing a closed one is a no-op, so repeated
/// notifications reporting the same presence never rebuild or restop
/// anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityGate {
    open: bool,
}

impl ActivityGate {
    /// A closed gate
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> GateTransition {
        self.set(true)
    }

    pub fn close(&mut self) -> GateTransition {
        self.set(false)
    }

    /// Drive the gate from a presence level
    pub fn set(&mut self, open: bool) -> GateTransition {
        if self.open == open {
            return GateTransition::Unchanged;
        }
        self.open = open;
        if open {
            GateTransition::Opened
        } else {
            GateTransition::Closed
        }
    }
}
