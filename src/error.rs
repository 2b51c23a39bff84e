//! The error type shared by every fallible operation in the crate.
//!
//! Grammar-editing failures carry the hierarchy level and the component they
//! relate to, plus the offending value rendered as text, so callers can
//! classify them without parsing display strings. Invalid arguments (unknown
//! names, bad coordinates, missing transitions) form a second family that
//! carries no hierarchy coding.

use crate::types::{Chomsky, Component};
use thiserror::Error;

/// Broad classification of an [`AutomatonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A read from an empty container, or a failed symbol lookup.
    Read,
    /// An insertion that collided with an existing symbol.
    Add,
    /// A removal of a symbol or rule that is not present.
    Remove,
    /// A modification whose remove half found nothing to replace.
    Modify,
    /// A withdrawal of an already-empty rules container.
    Withdraw,
    /// A malformed argument: unknown names, bad coordinates, overlapping
    /// containers, or a missing transition.
    InvalidArgument,
}

impl ErrorKind {
    /// Returns the numeric action code used in error codes, or `None` for
    /// invalid arguments, which carry no hierarchy coding.
    pub fn action_code(&self) -> Option<u16> {
        match self {
            ErrorKind::Read => Some(1),
            ErrorKind::Add => Some(2),
            ErrorKind::Remove => Some(3),
            ErrorKind::Modify => Some(4),
            ErrorKind::Withdraw => Some(19),
            ErrorKind::InvalidArgument => None,
        }
    }
}

/// Represents the failures raised by grammar editing and machine execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// Indicates a failed read: the component is empty, or a symbol was
    /// looked up that the component does not contain.
    #[error("{}", read_description(.level, .component, .symbol))]
    Read {
        level: Chomsky,
        component: Component,
        symbol: Option<String>,
    },
    /// Indicates an insertion that collided with a symbol already defined
    /// in the alphabet or the states.
    #[error("Cannot add {symbol} to the {component} of this {level} automaton: already defined")]
    Add {
        level: Chomsky,
        component: Component,
        symbol: String,
    },
    /// Indicates a removal of a symbol or rule that is not present.
    #[error("Cannot remove {symbol}: not found in the {component} of this {level} automaton")]
    Remove {
        level: Chomsky,
        component: Component,
        symbol: String,
    },
    /// Indicates a modification whose remove half found nothing to replace.
    #[error("Cannot modify {symbol}: not found in the {component} of this {level} automaton")]
    Modify {
        level: Chomsky,
        component: Component,
        symbol: String,
    },
    /// Indicates a withdrawal of an already-empty rules container.
    #[error("Cannot withdraw the {component} of this {level} automaton: already empty")]
    Withdraw { level: Chomsky, component: Component },
    /// Indicates a hierarchy level name outside the Chomsky table.
    #[error("Unknown Chomsky hierarchy level '{name}'")]
    UnknownHierarchy { name: String },
    /// Indicates a movement name missing from the machine's movement table.
    #[error("Unknown movement direction '{direction}'")]
    UnknownDirection { direction: String },
    /// Indicates a tape constructed with no axes.
    #[error("A tape requires at least one axis (got {axes})")]
    InvalidAxes { axes: usize },
    /// Indicates a coordinate vector whose arity does not match the tape.
    #[error("Expected {expected} axis coordinates, got {found}")]
    AxisMismatch { expected: usize, found: usize },
    /// Indicates a head position outside the tape on the given axis.
    #[error("Head position {head:?} is out of bounds on axis {axis}")]
    OutOfBounds { head: Vec<i64>, axis: usize },
    /// Indicates that no rule matches the current register and symbol.
    #[error("No valid transition for state {state} and symbol {symbol}")]
    NoTransition { state: String, symbol: String },
    /// Indicates deserialized input whose alphabet and states intersect.
    #[error("Alphabet and states both contain {symbol}")]
    Overlap { symbol: String },
}

impl AutomatonError {
    /// Returns the broad kind of the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AutomatonError::Read { .. } => ErrorKind::Read,
            AutomatonError::Add { .. } => ErrorKind::Add,
            AutomatonError::Remove { .. } => ErrorKind::Remove,
            AutomatonError::Modify { .. } => ErrorKind::Modify,
            AutomatonError::Withdraw { .. } => ErrorKind::Withdraw,
            AutomatonError::UnknownHierarchy { .. }
            | AutomatonError::UnknownDirection { .. }
            | AutomatonError::InvalidAxes { .. }
            | AutomatonError::AxisMismatch { .. }
            | AutomatonError::OutOfBounds { .. }
            | AutomatonError::NoTransition { .. }
            | AutomatonError::Overlap { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Returns the hierarchy level the failure relates to, for the
    /// grammar-editing kinds.
    pub fn level(&self) -> Option<Chomsky> {
        match self {
            AutomatonError::Read { level, .. }
            | AutomatonError::Add { level, .. }
            | AutomatonError::Remove { level, .. }
            | AutomatonError::Modify { level, .. }
            | AutomatonError::Withdraw { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the grammar component the failure relates to, for the
    /// grammar-editing kinds.
    pub fn component(&self) -> Option<Component> {
        match self {
            AutomatonError::Read { component, .. }
            | AutomatonError::Add { component, .. }
            | AutomatonError::Remove { component, .. }
            | AutomatonError::Modify { component, .. }
            | AutomatonError::Withdraw { component, .. } => Some(*component),
            _ => None,
        }
    }

    /// Returns the numeric error code, combining the hierarchy rank, the
    /// component code and the action code as
    /// `1000 * rank + 100 * component + action`. Invalid arguments have no
    /// code.
    pub fn code(&self) -> Option<u16> {
        let action = self.kind().action_code()?;
        let level = self.level()?;
        let component = self.component()?;
        Some(1000 * u16::from(level.rank()) + 100 * u16::from(component.code()) + action)
    }
}

fn read_description(level: &Chomsky, component: &Component, symbol: &Option<String>) -> String {
    match symbol {
        Some(symbol) => {
            format!("Cannot read {symbol}: not part of the {component} of this {level} automaton")
        }
        None => format!("Nothing to read: the {component} of this {level} automaton is empty"),
    }
}
