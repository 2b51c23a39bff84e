//! This module defines the `TuringMachine` struct: an automaton at the
//! recursively enumerable level, specialized with an n-dimensional tape, a
//! named movement table, and a single-step transition engine.

use crate::automaton::{Automaton, GrammarOps};
use crate::error::AutomatonError;
use crate::grammar::Grammar;
use crate::tape::Tape;
use crate::types::{
    Chomsky, Component, Moves, Symbol, Transition, Validation, BACKWARD_MOVE, FORWARD_MOVE,
};
use std::collections::HashMap;

/// Builds the movement table installed on new machines: [`FORWARD_MOVE`]
/// advances and [`BACKWARD_MOVE`] retreats along the first axis, leaving the
/// remaining axes untouched. Every machine receives its own fresh table.
pub fn default_moves(axes: usize) -> Moves {
    let mut forward = vec![0; axes];
    let mut backward = vec![0; axes];
    if axes > 0 {
        forward[0] = 1;
        backward[0] = -1;
    }
    HashMap::from([
        (FORWARD_MOVE.to_string(), forward),
        (BACKWARD_MOVE.to_string(), backward),
    ])
}

/// Represents a Turing machine.
///
/// The machine couples an automaton at the recursively enumerable level with
/// an n-dimensional tape, a head position vector, a state register, and a
/// table of named head movements. Execution is strictly single-step:
/// [`step`](TuringMachine::step) applies the first matching rule or fails,
/// and reaching an accept or reject marker never stops the engine by itself.
#[derive(Debug, Clone)]
pub struct TuringMachine<T: Symbol> {
    automaton: Automaton<T, Transition<T>>,
    axes: usize,
    tape: Tape<T>,
    head: Vec<i64>,
    register: T,
    blank: T,
    moves: Moves,
    validation: Validation<T>,
    step_count: usize,
}

impl<T: Symbol> TuringMachine<T> {
    /// Creates a one-axis machine.
    ///
    /// The blank symbol seeds the alphabet; the initial register and the two
    /// validation markers seed the states. Collisions among those values
    /// fail with the usual add error.
    pub fn new(
        name: impl Into<String>,
        blank: T,
        register: T,
        accept: T,
        reject: T,
    ) -> Result<Self, AutomatonError> {
        Self::with_axes(name, 1, blank, register, accept, reject)
    }

    /// Creates a machine with the given number of tape axes.
    ///
    /// Fails when `axes` is zero. The tape starts as a single blank region
    /// with the head on the origin.
    pub fn with_axes(
        name: impl Into<String>,
        axes: usize,
        blank: T,
        register: T,
        accept: T,
        reject: T,
    ) -> Result<Self, AutomatonError> {
        let tape = Tape::new(axes)?;
        let mut machine = TuringMachine {
            automaton: Automaton::with_level(name, Chomsky::RecursivelyEnumerable),
            axes,
            tape,
            head: vec![0; axes],
            register: register.clone(),
            blank: blank.clone(),
            moves: default_moves(axes),
            validation: Validation {
                accept: accept.clone(),
                reject: reject.clone(),
            },
            step_count: 0,
        };
        machine.add_terminals([blank])?;
        machine.add_non_terminals([register, accept, reject])?;
        Ok(machine)
    }

    /// Returns the machine's name.
    pub fn name(&self) -> &str {
        self.automaton.name()
    }

    /// Returns the number of tape axes.
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Returns the tape.
    pub fn tape(&self) -> &Tape<T> {
        &self.tape
    }

    /// Returns the head position, one coordinate per axis.
    pub fn head(&self) -> &[i64] {
        &self.head
    }

    /// Returns the state register.
    pub fn register(&self) -> &T {
        &self.register
    }

    /// Returns the blank symbol.
    pub fn blank(&self) -> &T {
        &self.blank
    }

    /// Returns the movement table.
    pub fn moves(&self) -> &Moves {
        &self.moves
    }

    /// Returns the accept and reject markers.
    pub fn validation(&self) -> &Validation<T> {
        &self.validation
    }

    /// Returns the number of successfully executed steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks whether the register sits on the accept marker.
    pub fn is_accepted(&self) -> bool {
        self.register == self.validation.accept
    }

    /// Checks whether the register sits on the reject marker.
    pub fn is_rejected(&self) -> bool {
        self.register == self.validation.reject
    }

    /// Checks whether the register sits on either halting marker.
    ///
    /// A pure query: the engine itself never stops on a marker, and stepping
    /// past one is legal whenever a matching rule exists.
    pub fn is_halted(&self) -> bool {
        self.is_accepted() || self.is_rejected()
    }

    /// Replaces the tape wholesale and repositions the head.
    ///
    /// The content must have the machine's number of axes, and every symbol
    /// on it must already be in the alphabet (an empty alphabet fails the
    /// same way an empty read does). The head moves to `location`, or to the
    /// origin when none is given.
    pub fn set_tape(
        &mut self,
        content: Tape<T>,
        location: Option<Vec<i64>>,
    ) -> Result<(), AutomatonError> {
        if content.axes() != self.axes {
            return Err(AutomatonError::AxisMismatch {
                expected: self.axes,
                found: content.axes(),
            });
        }
        let alphabet = self.get_terminals()?;
        for symbol in content.symbols() {
            if !alphabet.contains(symbol) {
                return Err(AutomatonError::Read {
                    level: self.chomsky(),
                    component: Component::Alphabet,
                    symbol: Some(format!("{symbol:?}")),
                });
            }
        }
        let location = location.unwrap_or_else(|| vec![0; self.axes]);
        if location.len() != self.axes {
            return Err(AutomatonError::AxisMismatch {
                expected: self.axes,
                found: location.len(),
            });
        }
        self.tape = content;
        self.head = location;
        Ok(())
    }

    /// Overwrites the state register, with no membership check.
    pub fn set_register(&mut self, state: T) {
        self.register = state;
    }

    /// Replaces the whole movement table, with no restrictions.
    pub fn set_moves(&mut self, moves: Moves) {
        self.moves = moves;
    }

    /// Reads the symbol under the head.
    ///
    /// Unmaterialized cells read as the blank symbol. Fails when the head is
    /// outside the tape.
    pub fn read(&self) -> Result<&T, AutomatonError> {
        Ok(self.tape.cell(&self.head)?.unwrap_or(&self.blank))
    }

    /// Writes a symbol into the cell under the head, materializing it and
    /// growing the tape extent.
    ///
    /// A symbol not yet in the alphabet is added to it first, so writing can
    /// fail with an add error when the symbol is already a state.
    pub fn write(&mut self, symbol: T) -> Result<(), AutomatonError> {
        if !self.grammar().alphabet().contains(&symbol) {
            self.add_terminals([symbol.clone()])?;
        }
        self.tape.set(&self.head, symbol)
    }

    /// Moves the head by the named displacement, component-wise.
    ///
    /// Fails when the name is not in the movement table. Displacements
    /// shorter than the head leave the remaining axes unchanged; extra
    /// components are ignored. Movement itself is unbounded; bounds are
    /// checked when the head is next read from or written to.
    pub fn move_head(&mut self, direction: &str) -> Result<(), AutomatonError> {
        let Some(displacement) = self.moves.get(direction) else {
            return Err(AutomatonError::UnknownDirection {
                direction: direction.to_string(),
            });
        };
        for (position, delta) in self.head.iter_mut().zip(displacement) {
            *position += *delta;
        }
        Ok(())
    }

    /// Appends a transition rule from its five parts: source state, read
    /// symbol, target state, write symbol, movement name.
    ///
    /// The read symbol must already be in the alphabet and the movement name
    /// in the movement table. Duplicate rules are silently skipped. The
    /// target state and the write symbol are not validated here; they join
    /// the grammar when a step first uses them.
    pub fn add_transition(
        &mut self,
        state: T,
        symbol: T,
        next_state: T,
        write: T,
        direction: &str,
    ) -> Result<(), AutomatonError> {
        if !self.get_terminals()?.contains(&symbol) {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::Alphabet,
                symbol: Some(format!("{symbol:?}")),
            });
        }
        if !self.moves.contains_key(direction) {
            return Err(AutomatonError::UnknownDirection {
                direction: direction.to_string(),
            });
        }
        self.add_rules([Transition::new(state, symbol, next_state, write, direction)]);
        Ok(())
    }

    /// Executes a single step.
    ///
    /// Reads the symbol under the head and scans the rules in insertion
    /// order; the first rule whose state and read symbol match the register
    /// and the symbol wins. The rule's write symbol goes into the current
    /// cell, the named movement is applied, the register becomes the target
    /// state, and the target state is registered as a non-terminal if new.
    ///
    /// Fails with a no-transition error when no rule matches, leaving the
    /// machine untouched.
    pub fn step(&mut self) -> Result<(), AutomatonError> {
        let current = self.read()?.clone();
        let matched = self
            .grammar()
            .rules()
            .iter()
            .find(|rule| rule.state == self.register && rule.read == current)
            .cloned();
        let Some(rule) = matched else {
            return Err(AutomatonError::NoTransition {
                state: format!("{:?}", self.register),
                symbol: format!("{current:?}"),
            });
        };

        let Transition {
            next_state,
            write,
            direction,
            ..
        } = rule;
        self.write(write)?;
        self.move_head(&direction)?;
        self.register = next_state.clone();
        if !self.grammar().states().contains(&next_state) {
            self.add_non_terminals([next_state])?;
        }
        self.step_count += 1;
        Ok(())
    }
}

impl<T: Symbol> GrammarOps<T, Transition<T>> for TuringMachine<T> {
    fn grammar(&self) -> &Grammar<T, Transition<T>> {
        self.automaton.grammar()
    }

    fn grammar_mut(&mut self) -> &mut Grammar<T, Transition<T>> {
        self.automaton.grammar_mut()
    }

    fn chomsky(&self) -> Chomsky {
        self.automaton.chomsky()
    }
}
