//! This crate models automata across the Chomsky grammar hierarchy.
//! It includes a grammar container with uniform editing operations, a base
//! automaton bound to one of the four hierarchy levels, and a Turing machine
//! with an n-dimensional tape and a single-step transition engine.

pub mod automaton;
pub mod error;
pub mod grammar;
pub mod machine;
pub mod tape;
pub mod types;

/// Re-exports the `Automaton` struct and the `GrammarOps` editing trait from the automaton module.
pub use automaton::{Automaton, GrammarOps};
/// Re-exports the `AutomatonError` enum and its `ErrorKind` classification from the error module.
pub use error::{AutomatonError, ErrorKind};
/// Re-exports the `Grammar` container from the grammar module.
pub use grammar::Grammar;
/// Re-exports the `TuringMachine` struct and the default movement table from the machine module.
pub use machine::{default_moves, TuringMachine};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the hierarchy, component, rule, and marker types from the types module.
pub use types::{
    Chomsky, Component, Moves, Production, Symbol, Transition, Validation, BACKWARD_MOVE,
    FORWARD_MOVE,
};
