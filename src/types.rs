//! This module defines the core data types shared across the crate: the
//! Chomsky hierarchy levels, the grammar components, transition rules, and
//! the trait bounds for symbol and rule values.

use crate::error::AutomatonError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Name of the default movement that advances the head along the first axis.
pub const FORWARD_MOVE: &str = "F";
/// Name of the default movement that retreats the head along the first axis.
pub const BACKWARD_MOVE: &str = "B";

/// Table of named head movements. Each entry maps a direction name onto a
/// displacement vector that is added component-wise to the head.
pub type Moves = HashMap<String, Vec<i64>>;

/// Marker trait for values usable as terminal or non-terminal symbols.
///
/// Blanket-implemented for every type with equality, hashing and debug
/// formatting; never implemented by hand.
pub trait Symbol: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Symbol for T {}

/// Marker trait for values usable as production rules.
///
/// Rules live in an ordered container and are matched by linear scan, so
/// equality is the only requirement beyond cloning and debug formatting.
pub trait Production: Clone + PartialEq + fmt::Debug {}

impl<R: Clone + PartialEq + fmt::Debug> Production for R {}

/// Represents the four levels of the Chomsky grammar hierarchy.
///
/// Levels are ranked 4 (Regular) down to 1 (Recursively Enumerable) in the
/// hierarchy table; the classic grammar type ordinal is the rank minus one,
/// so regular grammars are type 3 and recursively enumerable grammars are
/// type 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chomsky {
    /// Type-3 languages, recognized by finite automata.
    Regular,
    /// Type-2 languages, recognized by pushdown automata.
    #[serde(rename = "Context-Free")]
    ContextFree,
    /// Type-1 languages, recognized by linear bounded automata.
    #[serde(rename = "Context-Sensitive")]
    ContextSensitive,
    /// Type-0 languages, recognized by Turing machines.
    #[serde(rename = "Recursively Enumerable")]
    RecursivelyEnumerable,
}

impl Chomsky {
    /// Returns the canonical spelling of the level name.
    pub fn name(&self) -> &'static str {
        match self {
            Chomsky::Regular => "Regular",
            Chomsky::ContextFree => "Context-Free",
            Chomsky::ContextSensitive => "Context-Sensitive",
            Chomsky::RecursivelyEnumerable => "Recursively Enumerable",
        }
    }

    /// Returns the rank in the hierarchy table, from 4 (Regular) down to
    /// 1 (Recursively Enumerable).
    pub fn rank(&self) -> u8 {
        match self {
            Chomsky::Regular => 4,
            Chomsky::ContextFree => 3,
            Chomsky::ContextSensitive => 2,
            Chomsky::RecursivelyEnumerable => 1,
        }
    }

    /// Returns the grammar type ordinal, from 3 (Regular) down to 0
    /// (Recursively Enumerable).
    pub fn ordinal(&self) -> u8 {
        self.rank() - 1
    }
}

impl fmt::Display for Chomsky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chomsky {
    type Err = AutomatonError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Regular" => Ok(Chomsky::Regular),
            "Context-Free" => Ok(Chomsky::ContextFree),
            "Context-Sensitive" => Ok(Chomsky::ContextSensitive),
            "Recursively Enumerable" => Ok(Chomsky::RecursivelyEnumerable),
            _ => Err(AutomatonError::UnknownHierarchy {
                name: name.to_string(),
            }),
        }
    }
}

/// The three editable components of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Terminal symbols.
    Alphabet,
    /// Non-terminal symbols.
    States,
    /// Production rules.
    Rules,
}

impl Component {
    /// Returns the lowercase component name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Alphabet => "alphabet",
            Component::States => "states",
            Component::Rules => "rules",
        }
    }

    /// Returns the numeric component code used in error codes. Rules keep
    /// the code of the historical transitions slot.
    pub fn code(&self) -> u8 {
        match self {
            Component::Alphabet => 1,
            Component::Rules => 2,
            Component::States => 3,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a single transition rule of a Turing machine.
///
/// Rules are matched in insertion order: the first rule whose `state` and
/// `read` equal the machine's register and the symbol under the head wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<T> {
    /// The state the machine must be in for the rule to apply.
    pub state: T,
    /// The symbol that must sit under the head.
    pub read: T,
    /// The state entered after the rule fires.
    pub next_state: T,
    /// The symbol written over the current cell.
    pub write: T,
    /// Name of the head movement to apply, resolved against the machine's
    /// movement table.
    pub direction: String,
}

impl<T> Transition<T> {
    /// Builds a rule from its five parts: source state, read symbol, target
    /// state, write symbol, movement name.
    pub fn new(state: T, read: T, next_state: T, write: T, direction: impl Into<String>) -> Self {
        Transition {
            state,
            read,
            next_state,
            write,
            direction: direction.into(),
        }
    }
}

/// The designated halting markers of a machine.
///
/// Reaching a marker never stops execution by itself; callers compare the
/// register against these after each step and decide when to stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation<T> {
    /// State signalling acceptance.
    pub accept: T,
    /// State signalling rejection.
    pub reject: T,
}
