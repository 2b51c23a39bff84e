//! The grammar container: terminal symbols, non-terminal symbols and
//! production rules, plus a back-reference to the hierarchy level of the
//! owning automaton.
//!
//! A grammar on its own only exposes read access and resets. Mutation with
//! collision and membership checks goes through
//! [`GrammarOps`](crate::automaton::GrammarOps), so the invariant that the
//! alphabet and the states stay disjoint cannot be broken from outside.

use crate::error::AutomatonError;
use crate::types::{Chomsky, Production, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Represents the grammar of one automaton.
///
/// The alphabet and the states are unordered sets; the rules keep their
/// insertion order because rule matching is first-match-wins.
/// Deserialization re-checks that the alphabet and the states are disjoint,
/// so serialized input cannot smuggle in an overlap the editing operations
/// would have refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrammar<T, R>")]
pub struct Grammar<T: Symbol, R: Production> {
    level: Option<Chomsky>,
    alphabet: HashSet<T>,
    states: HashSet<T>,
    rules: Vec<R>,
}

impl<T: Symbol, R: Production> Grammar<T, R> {
    /// Creates a detached grammar with every container empty.
    pub fn new() -> Self {
        Grammar {
            level: None,
            alphabet: HashSet::new(),
            states: HashSet::new(),
            rules: Vec::new(),
        }
    }

    /// Creates the grammar of an automaton at the given hierarchy level.
    pub fn with_level(level: Chomsky) -> Self {
        Grammar {
            level: Some(level),
            ..Grammar::new()
        }
    }

    /// Returns the hierarchy level of the owning automaton, or `None` for a
    /// detached grammar.
    pub fn level(&self) -> Option<Chomsky> {
        self.level
    }

    /// Returns the grammar type ordinal (3 for Regular down to 0 for
    /// Recursively Enumerable), or `None` for a detached grammar.
    pub fn type_ordinal(&self) -> Option<u8> {
        self.level.map(|level| level.ordinal())
    }

    /// Returns the terminal symbols.
    pub fn alphabet(&self) -> &HashSet<T> {
        &self.alphabet
    }

    /// Returns the non-terminal symbols.
    pub fn states(&self) -> &HashSet<T> {
        &self.states
    }

    /// Returns the production rules in insertion order.
    pub fn rules(&self) -> &[R] {
        &self.rules
    }

    /// Clears the alphabet. Idempotent, never fails.
    pub fn reset_alphabet(&mut self) {
        self.alphabet.clear();
    }

    /// Clears the states. Idempotent, never fails.
    pub fn reset_states(&mut self) {
        self.states.clear();
    }

    /// Clears the rules. Idempotent, never fails.
    pub fn reset_rules(&mut self) {
        self.rules.clear();
    }

    /// Clears all three containers.
    pub fn reset(&mut self) {
        self.reset_alphabet();
        self.reset_states();
        self.reset_rules();
    }

    pub(crate) fn alphabet_mut(&mut self) -> &mut HashSet<T> {
        &mut self.alphabet
    }

    pub(crate) fn states_mut(&mut self) -> &mut HashSet<T> {
        &mut self.states
    }

    pub(crate) fn rules_mut(&mut self) -> &mut Vec<R> {
        &mut self.rules
    }
}

impl<T: Symbol, R: Production> Default for Grammar<T, R> {
    fn default() -> Self {
        Grammar::new()
    }
}

/// Unvalidated mirror of [`Grammar`], the deserialization entry point.
#[derive(Deserialize)]
struct RawGrammar<T: Symbol, R: Production> {
    level: Option<Chomsky>,
    alphabet: HashSet<T>,
    states: HashSet<T>,
    rules: Vec<R>,
}

impl<T: Symbol, R: Production> TryFrom<RawGrammar<T, R>> for Grammar<T, R> {
    type Error = AutomatonError;

    fn try_from(raw: RawGrammar<T, R>) -> Result<Self, Self::Error> {
        if let Some(symbol) = raw.alphabet.intersection(&raw.states).next() {
            return Err(AutomatonError::Overlap {
                symbol: format!("{symbol:?}"),
            });
        }
        Ok(Grammar {
            level: raw.level,
            alphabet: raw.alphabet,
            states: raw.states,
            rules: raw.rules,
        })
    }
}
