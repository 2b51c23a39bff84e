//! The automaton base: a name and a Chomsky hierarchy level bound to a
//! grammar, plus the uniform editing contract over the grammar's containers.
//!
//! Every automaton class edits its grammar the same way, whatever its
//! hierarchy level: the [`GrammarOps`] trait implements the contract once,
//! and errors carry the level so a Regular automaton and a Turing machine
//! report the same misuse differently.

use crate::error::AutomatonError;
use crate::grammar::Grammar;
use crate::types::{Chomsky, Component, Production, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Uniform editing operations over the containers of a [`Grammar`].
///
/// Implementors provide access to their grammar and their hierarchy level;
/// the editing contract comes as default methods:
///
/// - reads of empty containers fail,
/// - insertions collide when the symbol already exists in *either* the
///   alphabet or the states, keeping the two sets disjoint,
/// - removals of absent symbols fail,
/// - modifications are remove-then-add with no rollback,
/// - withdrawals clear one container, or the whole grammar.
pub trait GrammarOps<T: Symbol, R: Production> {
    /// The grammar being edited.
    fn grammar(&self) -> &Grammar<T, R>;

    /// Mutable access to the grammar being edited.
    fn grammar_mut(&mut self) -> &mut Grammar<T, R>;

    /// The hierarchy level reported in editing errors.
    fn chomsky(&self) -> Chomsky;

    /// Returns the grammar type ordinal, from 3 (Regular) down to 0
    /// (Recursively Enumerable).
    fn type_ordinal(&self) -> u8 {
        self.chomsky().ordinal()
    }

    /// Returns the terminal symbols. Fails with a read error when the
    /// alphabet is empty.
    fn get_terminals<'a>(&'a self) -> Result<&'a HashSet<T>, AutomatonError>
    where
        T: 'a,
        R: 'a,
    {
        if self.grammar().alphabet().is_empty() {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::Alphabet,
                symbol: None,
            });
        }
        Ok(self.grammar().alphabet())
    }

    /// Inserts terminal symbols in order. Fails with an add error on the
    /// first symbol already present in the alphabet or the states; symbols
    /// inserted before the failure stay in place.
    fn add_terminals<I>(&mut self, terminals: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in terminals {
            if self.grammar().alphabet().contains(&symbol)
                || self.grammar().states().contains(&symbol)
            {
                return Err(AutomatonError::Add {
                    level: self.chomsky(),
                    component: Component::Alphabet,
                    symbol: format!("{symbol:?}"),
                });
            }
            self.grammar_mut().alphabet_mut().insert(symbol);
        }
        Ok(())
    }

    /// Removes terminal symbols in order. Fails with a remove error on the
    /// first symbol that is not in the alphabet.
    fn remove_terminals<I>(&mut self, terminals: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in terminals {
            if !self.grammar_mut().alphabet_mut().remove(&symbol) {
                return Err(AutomatonError::Remove {
                    level: self.chomsky(),
                    component: Component::Alphabet,
                    symbol: format!("{symbol:?}"),
                });
            }
        }
        Ok(())
    }

    /// Replaces one terminal with another, as a removal followed by an
    /// insertion. A failed removal becomes a modify error; a collision on
    /// the insertion propagates as the add error, with the removal left in
    /// place.
    fn modify_terminal(&mut self, existing: T, replacement: T) -> Result<(), AutomatonError> {
        match self.remove_terminals([existing.clone()]) {
            Ok(()) => self.add_terminals([replacement]),
            Err(AutomatonError::Remove { .. }) => Err(AutomatonError::Modify {
                level: self.chomsky(),
                component: Component::Alphabet,
                symbol: format!("{existing:?}"),
            }),
            Err(other) => Err(other),
        }
    }

    /// Clears the alphabet. Fails with a read error when it is already
    /// empty.
    fn withdraw_terminals(&mut self) -> Result<(), AutomatonError> {
        if self.grammar().alphabet().is_empty() {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::Alphabet,
                symbol: None,
            });
        }
        self.grammar_mut().reset_alphabet();
        Ok(())
    }

    /// Returns the non-terminal symbols. Fails with a read error when the
    /// states set is empty.
    fn get_states<'a>(&'a self) -> Result<&'a HashSet<T>, AutomatonError>
    where
        T: 'a,
        R: 'a,
    {
        if self.grammar().states().is_empty() {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::States,
                symbol: None,
            });
        }
        Ok(self.grammar().states())
    }

    /// Inserts non-terminal symbols in order. Fails with an add error on
    /// the first symbol already present in the alphabet or the states.
    fn add_non_terminals<I>(&mut self, states: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in states {
            if self.grammar().alphabet().contains(&symbol)
                || self.grammar().states().contains(&symbol)
            {
                return Err(AutomatonError::Add {
                    level: self.chomsky(),
                    component: Component::States,
                    symbol: format!("{symbol:?}"),
                });
            }
            self.grammar_mut().states_mut().insert(symbol);
        }
        Ok(())
    }

    /// Removes non-terminal symbols in order. Fails with a remove error on
    /// the first symbol that is not in the states set.
    fn remove_non_terminals<I>(&mut self, states: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in states {
            if !self.grammar_mut().states_mut().remove(&symbol) {
                return Err(AutomatonError::Remove {
                    level: self.chomsky(),
                    component: Component::States,
                    symbol: format!("{symbol:?}"),
                });
            }
        }
        Ok(())
    }

    /// Replaces one non-terminal with another, as a removal followed by an
    /// insertion. Same failure contract as [`modify_terminal`].
    ///
    /// [`modify_terminal`]: GrammarOps::modify_terminal
    fn modify_non_terminal(&mut self, existing: T, replacement: T) -> Result<(), AutomatonError> {
        match self.remove_non_terminals([existing.clone()]) {
            Ok(()) => self.add_non_terminals([replacement]),
            Err(AutomatonError::Remove { .. }) => Err(AutomatonError::Modify {
                level: self.chomsky(),
                component: Component::States,
                symbol: format!("{existing:?}"),
            }),
            Err(other) => Err(other),
        }
    }

    /// Clears the states. Fails with a read error when the set is already
    /// empty.
    fn withdraw_non_terminals(&mut self) -> Result<(), AutomatonError> {
        if self.grammar().states().is_empty() {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::States,
                symbol: None,
            });
        }
        self.grammar_mut().reset_states();
        Ok(())
    }

    /// Returns the production rules in insertion order. Fails with a read
    /// error when there are none.
    fn get_rules<'a>(&'a self) -> Result<&'a [R], AutomatonError>
    where
        T: 'a,
        R: 'a,
    {
        if self.grammar().rules().is_empty() {
            return Err(AutomatonError::Read {
                level: self.chomsky(),
                component: Component::Rules,
                symbol: None,
            });
        }
        Ok(self.grammar().rules())
    }

    /// Appends rules in order, silently skipping rules already present.
    fn add_rules<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = R>,
    {
        for rule in rules {
            if !self.grammar().rules().contains(&rule) {
                self.grammar_mut().rules_mut().push(rule);
            }
        }
    }

    /// Removes the first occurrence of each given rule, preserving the
    /// order of the rest. Fails with a remove error on the first rule that
    /// is not present.
    fn remove_rules<I>(&mut self, rules: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = R>,
    {
        for rule in rules {
            let found = self.grammar().rules().iter().position(|known| known == &rule);
            match found {
                Some(index) => {
                    self.grammar_mut().rules_mut().remove(index);
                }
                None => {
                    return Err(AutomatonError::Remove {
                        level: self.chomsky(),
                        component: Component::Rules,
                        symbol: format!("{rule:?}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Clears the rules. Fails with a withdraw error when there are none.
    fn withdraw_rules(&mut self) -> Result<(), AutomatonError> {
        if self.grammar().rules().is_empty() {
            return Err(AutomatonError::Withdraw {
                level: self.chomsky(),
                component: Component::Rules,
            });
        }
        self.grammar_mut().reset_rules();
        Ok(())
    }

    /// Clears the whole grammar. Idempotent, never fails.
    fn withdraw_grammar(&mut self) {
        self.grammar_mut().reset();
    }
}

/// Represents an automaton: a named machine at one level of the Chomsky
/// hierarchy, owning the grammar it recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automaton<T: Symbol, R: Production> {
    name: String,
    chomsky: Chomsky,
    grammar: Grammar<T, R>,
}

impl<T: Symbol, R: Production> Automaton<T, R> {
    /// Creates an automaton from a hierarchy level name.
    ///
    /// Fails when the name is not one of the four Chomsky levels.
    pub fn new(name: impl Into<String>, level_name: &str) -> Result<Self, AutomatonError> {
        Ok(Automaton::with_level(name, level_name.parse()?))
    }

    /// Creates an automaton at the given hierarchy level.
    pub fn with_level(name: impl Into<String>, level: Chomsky) -> Self {
        Automaton {
            name: name.into(),
            chomsky: level,
            grammar: Grammar::with_level(level),
        }
    }

    /// Returns the automaton's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Symbol, R: Production> GrammarOps<T, R> for Automaton<T, R> {
    fn grammar(&self) -> &Grammar<T, R> {
        &self.grammar
    }

    fn grammar_mut(&mut self) -> &mut Grammar<T, R> {
        &mut self.grammar
    }

    fn chomsky(&self) -> Chomsky {
        self.chomsky
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn automaton() -> Automaton<&'static str, &'static str> {
        Automaton::new("TestAutomaton", "Regular").unwrap()
    }

    fn grammar_views<'a, T, R, G>(ops: &'a G) -> Result<(&'a HashSet<T>, &'a [R]), AutomatonError>
    where
        T: Symbol + 'a,
        R: Production + 'a,
        G: GrammarOps<T, R>,
    {
        Ok((ops.get_terminals()?, ops.get_rules()?))
    }

    #[test]
    fn test_initialization() {
        let automaton = automaton();

        assert_eq!(automaton.name(), "TestAutomaton");
        assert_eq!(automaton.chomsky(), Chomsky::Regular);
        assert_eq!(automaton.type_ordinal(), 3);
        assert_eq!(automaton.grammar().level(), Some(Chomsky::Regular));
        assert!(automaton.grammar().alphabet().is_empty());
        assert!(automaton.grammar().states().is_empty());
        assert!(automaton.grammar().rules().is_empty());
    }

    #[test]
    fn test_unknown_hierarchy_name_fails_construction() {
        let result = Automaton::<&str, &str>::new("TestAutomaton", "Nonsense");

        let err = result.unwrap_err();
        assert!(matches!(err, AutomatonError::UnknownHierarchy { ref name } if name == "Nonsense"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_type_ordinal_spans_the_hierarchy() {
        let regular = automaton();
        assert_eq!(regular.type_ordinal(), 3);

        let unrestricted =
            Automaton::<&str, &str>::new("TestAutomaton", "Recursively Enumerable").unwrap();
        assert_eq!(unrestricted.type_ordinal(), 0);
    }

    #[test]
    fn test_get_terminals_fails_on_empty_alphabet() {
        let automaton = automaton();

        let err = automaton.get_terminals().unwrap_err();
        assert_eq!(
            err,
            AutomatonError::Read {
                level: Chomsky::Regular,
                component: Component::Alphabet,
                symbol: None,
            }
        );
        assert_eq!(err.code(), Some(4101));
    }

    #[test]
    fn test_add_and_get_terminals() {
        let mut automaton = automaton();

        automaton.add_terminals(["a", "b"]).unwrap();

        let terminals = automaton.get_terminals().unwrap();
        assert_eq!(terminals.len(), 2);
        assert!(terminals.contains("a"));
        assert!(terminals.contains("b"));
    }

    #[test]
    fn test_add_duplicate_terminal_fails() {
        let mut automaton = automaton();
        automaton.add_terminals(["a"]).unwrap();

        let err = automaton.add_terminals(["a"]).unwrap_err();
        assert!(matches!(
            err,
            AutomatonError::Add {
                component: Component::Alphabet,
                ..
            }
        ));
        assert_eq!(automaton.get_terminals().unwrap().len(), 1);
    }

    #[test]
    fn test_alphabet_and_states_stay_disjoint() {
        let mut automaton = automaton();
        automaton.add_terminals(["a"]).unwrap();
        automaton.add_non_terminals(["S"]).unwrap();

        // A state may not reuse a terminal, and vice versa.
        assert!(automaton.add_non_terminals(["a"]).is_err());
        assert!(automaton.add_terminals(["S"]).is_err());

        assert_eq!(automaton.get_terminals().unwrap().len(), 1);
        assert_eq!(automaton.get_states().unwrap().len(), 1);
    }

    #[test]
    fn test_partial_add_keeps_earlier_symbols() {
        let mut automaton = automaton();

        let result = automaton.add_terminals(["a", "b", "a"]);

        assert!(result.is_err());
        let terminals = automaton.get_terminals().unwrap();
        assert!(terminals.contains("a"));
        assert!(terminals.contains("b"));
    }

    #[test]
    fn test_remove_terminals_round_trip() {
        let mut automaton = automaton();
        automaton.add_terminals(["a", "b"]).unwrap();

        automaton.remove_terminals(["a"]).unwrap();
        assert!(!automaton.get_terminals().unwrap().contains("a"));

        let err = automaton.remove_terminals(["a"]).unwrap_err();
        assert!(matches!(err, AutomatonError::Remove { .. }));
    }

    #[test]
    fn test_modify_terminal_replaces_the_symbol() {
        let mut automaton = automaton();
        automaton.add_terminals(["a"]).unwrap();

        automaton.modify_terminal("a", "b").unwrap();

        let terminals = automaton.get_terminals().unwrap();
        assert!(!terminals.contains("a"));
        assert!(terminals.contains("b"));
    }

    #[test]
    fn test_modify_missing_terminal_fails_and_changes_nothing() {
        let mut automaton = automaton();
        automaton.add_terminals(["a"]).unwrap();

        let err = automaton.modify_terminal("c", "d").unwrap_err();

        assert!(matches!(
            err,
            AutomatonError::Modify {
                component: Component::Alphabet,
                ..
            }
        ));
        let terminals = automaton.get_terminals().unwrap();
        assert_eq!(terminals.len(), 1);
        assert!(terminals.contains("a"));
    }

    #[test]
    fn test_modify_collision_propagates_the_add_error() {
        let mut automaton = automaton();
        automaton.add_terminals(["a", "b"]).unwrap();

        let err = automaton.modify_terminal("a", "b").unwrap_err();

        // The removal half is not rolled back.
        assert!(matches!(err, AutomatonError::Add { .. }));
        let terminals = automaton.get_terminals().unwrap();
        assert_eq!(terminals.len(), 1);
        assert!(terminals.contains("b"));
    }

    #[test]
    fn test_withdraw_terminals() {
        let mut automaton = automaton();

        let err = automaton.withdraw_terminals().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);

        automaton.add_terminals(["a", "b"]).unwrap();
        automaton.withdraw_terminals().unwrap();
        assert!(automaton.get_terminals().is_err());
    }

    #[test]
    fn test_non_terminal_operations_mirror_terminals() {
        let mut automaton = automaton();

        assert!(automaton.get_states().is_err());

        automaton.add_non_terminals(["S", "A"]).unwrap();
        assert_eq!(automaton.get_states().unwrap().len(), 2);

        automaton.modify_non_terminal("A", "B").unwrap();
        assert!(automaton.get_states().unwrap().contains("B"));

        automaton.remove_non_terminals(["B"]).unwrap();
        assert!(automaton.remove_non_terminals(["B"]).is_err());

        automaton.withdraw_non_terminals().unwrap();
        assert!(automaton.withdraw_non_terminals().is_err());
    }

    #[test]
    fn test_get_rules_fails_when_empty() {
        let automaton = automaton();

        let err = automaton.get_rules().unwrap_err();
        assert_eq!(
            err,
            AutomatonError::Read {
                level: Chomsky::Regular,
                component: Component::Rules,
                symbol: None,
            }
        );
    }

    #[test]
    fn test_add_rules_skips_duplicates_silently() {
        let mut automaton = automaton();

        automaton.add_rules(["S -> aA", "A -> b", "S -> aA"]);
        assert_eq!(automaton.get_rules().unwrap(), &["S -> aA", "A -> b"]);

        automaton.add_rules(["A -> b"]);
        assert_eq!(automaton.get_rules().unwrap().len(), 2);
    }

    #[test]
    fn test_remove_rules_preserves_order() {
        let mut automaton = automaton();
        automaton.add_rules(["one", "two", "three"]);

        automaton.remove_rules(["two"]).unwrap();
        assert_eq!(automaton.get_rules().unwrap(), &["one", "three"]);

        let err = automaton.remove_rules(["two"]).unwrap_err();
        assert!(matches!(
            err,
            AutomatonError::Remove {
                component: Component::Rules,
                ..
            }
        ));
    }

    #[test]
    fn test_withdraw_rules() {
        let mut automaton = automaton();

        let err = automaton.withdraw_rules().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Withdraw);
        assert_eq!(err.code(), Some(4219));

        automaton.add_rules(["S -> a"]);
        automaton.withdraw_rules().unwrap();
        assert!(automaton.get_rules().is_err());
    }

    #[test]
    fn test_withdraw_grammar_never_fails() {
        let mut automaton = automaton();
        automaton.add_terminals(["a"]).unwrap();
        automaton.add_non_terminals(["S"]).unwrap();
        automaton.add_rules(["S -> a"]);

        automaton.withdraw_grammar();
        assert!(automaton.grammar().alphabet().is_empty());
        assert!(automaton.grammar().states().is_empty());
        assert!(automaton.grammar().rules().is_empty());

        // Withdrawing an already-empty grammar is a no-op.
        automaton.withdraw_grammar();
        assert!(automaton.grammar().alphabet().is_empty());
    }

    #[test]
    fn test_string_symbols_work_unchanged() {
        let mut automaton: Automaton<String, String> =
            Automaton::new("TestAutomaton", "Context-Free").unwrap();

        automaton.add_terminals(["a".to_string()]).unwrap();
        automaton.add_non_terminals(["S".to_string()]).unwrap();
        automaton.add_rules(["S -> a".to_string()]);

        assert_eq!(automaton.type_ordinal(), 2);
        assert!(automaton.get_terminals().unwrap().contains("a"));
    }

    #[test]
    fn test_views_borrow_through_generic_callers() {
        let mut automaton = automaton();
        automaton.add_terminals(["a", "b"]).unwrap();
        automaton.add_rules(["S -> a"]);

        let (terminals, rules) = grammar_views(&automaton).unwrap();
        assert!(terminals.contains("a"));
        assert_eq!(rules, &["S -> a"]);
    }

    #[test]
    fn test_deserialized_grammars_stay_disjoint() {
        let json = r#"{
            "name": "TestAutomaton",
            "chomsky": "Regular",
            "grammar": {
                "level": "Regular",
                "alphabet": ["a"],
                "states": ["a"],
                "rules": []
            }
        }"#;

        let result: Result<Automaton<String, String>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
