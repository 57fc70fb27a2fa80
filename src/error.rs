use std::fmt::Display;

use crate::simulator::{NodeHandle, StickHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// A stick may not connect a node with itself
    SelfLink(NodeHandle),
    /// The two nodes are already connected
    DuplicateStick(StickHandle),
    MissingNode(NodeHandle),
    MissingStick(StickHandle),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::SelfLink(n) => {
                write!(f, "cannot link node {} with itself", n.index())
            }
            SimulationError::DuplicateStick(s) => {
                write!(f, "nodes are already linked by stick {}", s.index())
            }
            SimulationError::MissingNode(n) => write!(f, "node {} does not exist", n.index()),
            SimulationError::MissingStick(s) => write!(f, "stick {} does not exist", s.index()),
        }
    }
}

impl std::error::Error for SimulationError {}
