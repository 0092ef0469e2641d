//! Nondeterministic finite automaton with any number of initial states (MISNFA).

use crate::error::{Error, Result};
use crate::state::{StateId, Subset};
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// A nondeterministic finite automaton whose initial-state set may be empty
/// or contain several states.
///
/// A word is accepted when some computation starting in some initial state
/// ends in a final state. The transition relation is partial: a missing
/// `(state, symbol)` entry means no successor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Misnfa {
    /// Declared states
    states: Subset,
    /// Declared symbols
    alphabet: BTreeSet<Symbol>,
    /// Transitions: (source, symbol) -> set of destination states
    transitions: BTreeMap<(StateId, Symbol), Subset>,
    /// Initial states
    initial_states: Subset,
    /// Final (accepting) states
    final_states: Subset,
}

impl Misnfa {
    /// Create a new empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an automaton from its five components as given.
    ///
    /// Nothing is declared implicitly: a transition may mention a state or
    /// symbol missing from `states` or `alphabet`. Use [`Misnfa::validate`] to
    /// detect that. Transitions sharing a `(source, symbol)` key are merged.
    pub fn from_parts<T, D>(
        states: impl IntoIterator<Item = StateId>,
        alphabet: impl IntoIterator<Item = Symbol>,
        transitions: T,
        initial_states: impl IntoIterator<Item = StateId>,
        final_states: impl IntoIterator<Item = StateId>,
    ) -> Self
    where
        T: IntoIterator<Item = (StateId, Symbol, D)>,
        D: IntoIterator<Item = StateId>,
    {
        let mut map: BTreeMap<(StateId, Symbol), Subset> = BTreeMap::new();
        for (source, symbol, destinations) in transitions {
            map.entry((source, symbol)).or_default().extend(destinations);
        }

        Self {
            states: states.into_iter().collect(),
            alphabet: alphabet.into_iter().collect(),
            transitions: map,
            initial_states: initial_states.into_iter().collect(),
            final_states: final_states.into_iter().collect(),
        }
    }

    /// Declare a state.
    pub fn add_state(&mut self, state: StateId) {
        self.states.insert(state);
    }

    /// Declare a symbol.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Add a transition from source to destination on the given symbol,
    /// declaring both states and the symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.add_state(source);
        self.add_state(destination);
        self.add_symbol(symbol);

        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    /// Add an initial state.
    pub fn add_initial_state(&mut self, state: StateId) {
        self.add_state(state);
        self.initial_states.insert(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.add_state(state);
        self.final_states.insert(state);
    }

    /// Get the declared states.
    pub fn states(&self) -> &Subset {
        &self.states
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Get the initial states.
    pub fn initial_states(&self) -> &Subset {
        &self.initial_states
    }

    /// Get the final states.
    pub fn final_states(&self) -> &Subset {
        &self.final_states
    }

    /// Get the successors of a state on a symbol, if any are defined.
    pub fn successors(&self, state: StateId, symbol: Symbol) -> Option<&Subset> {
        self.transitions.get(&(state, symbol))
    }

    /// Get all transitions as `(source, symbol, destination)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |&dst| (src, sym, dst)))
    }

    /// Get the states reachable from a set of states on a given symbol.
    pub fn move_on_symbol(&self, states: &Subset, symbol: Symbol) -> Subset {
        let mut reached = Subset::new();

        for &state in states {
            if let Some(destinations) = self.successors(state, symbol) {
                reached.extend(destinations);
            }
        }

        reached
    }

    /// Check whether some computation from some initial state accepts `word`.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let mut current = self.initial_states.clone();

        for &symbol in word {
            current = self.move_on_symbol(&current, symbol);
            if current.is_empty() {
                return false;
            }
        }

        !current.is_disjoint(&self.final_states)
    }

    /// Check that every transition, initial state and final state refers only
    /// to declared states and symbols.
    ///
    /// Transitions are checked in ascending `(source, symbol)` order, then the
    /// initial states, then the final states. The first violation is reported.
    pub fn validate(&self) -> Result<()> {
        for (&(from, symbol), destinations) in &self.transitions {
            if !self.states.contains(&from) {
                return Err(Error::UndeclaredTransitionState {
                    from,
                    symbol,
                    state: from,
                });
            }
            if !self.alphabet.contains(&symbol) {
                return Err(Error::UndeclaredSymbol { from, symbol });
            }
            if let Some(&state) = destinations.difference(&self.states).next() {
                return Err(Error::UndeclaredTransitionState {
                    from,
                    symbol,
                    state,
                });
            }
        }

        if let Some(&state) = self.initial_states.difference(&self.states).next() {
            return Err(Error::UndeclaredInitialState(state));
        }
        if let Some(&state) = self.final_states.difference(&self.states).next() {
            return Err(Error::UndeclaredFinalState(state));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_transitions() -> Vec<(StateId, Symbol, Vec<StateId>)> {
        Vec::new()
    }

    fn sample() -> Misnfa {
        // 0 -a-> {1, 2}, 1 -b-> 3, 2 -b-> 2, initial {0, 2}, final {3}
        let mut nfa = Misnfa::new();
        nfa.add_transition(0, b'a', 1);
        nfa.add_transition(0, b'a', 2);
        nfa.add_transition(1, b'b', 3);
        nfa.add_transition(2, b'b', 2);
        nfa.add_initial_state(0);
        nfa.add_initial_state(2);
        nfa.add_final_state(3);
        nfa
    }

    #[test]
    fn test_builder_declares_states_and_symbols() {
        let nfa = sample();

        assert_eq!(nfa.states().iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), b"ab");
        assert_eq!(nfa.transitions().count(), 4);
        assert_eq!(nfa.validate(), Ok(()));
    }

    #[test]
    fn test_move_on_symbol() {
        let nfa = sample();

        let reached = nfa.move_on_symbol(nfa.initial_states(), b'a');
        assert_eq!(reached, Subset::from([1, 2]));

        let reached = nfa.move_on_symbol(&reached, b'b');
        assert_eq!(reached, Subset::from([2, 3]));

        assert!(nfa.move_on_symbol(&reached, b'a').is_empty());
    }

    #[test]
    fn test_accepts_from_any_initial_state() {
        let nfa = sample();

        assert!(nfa.accepts(b"ab"));
        assert!(!nfa.accepts(b"abbb"));
        assert!(!nfa.accepts(b""));
        assert!(!nfa.accepts(b"b"));
        assert!(!nfa.accepts(b"aq"));
    }

    #[test]
    fn test_no_initial_states_accepts_nothing() {
        let mut nfa = Misnfa::new();
        nfa.add_transition(0, b'x', 0);
        nfa.add_final_state(0);

        assert!(!nfa.accepts(b""));
        assert!(!nfa.accepts(b"xx"));
    }

    #[test]
    fn test_from_parts_merges_duplicate_keys() {
        let nfa = Misnfa::from_parts(
            [0, 1, 2],
            [b'a'],
            [(0, b'a', vec![1]), (0, b'a', vec![2])],
            [0],
            [2],
        );

        assert_eq!(nfa.successors(0, b'a'), Some(&Subset::from([1, 2])));
        assert_eq!(nfa.successors(1, b'a'), None);
    }

    #[test]
    fn test_validate_reports_undeclared_parts() {
        let nfa = Misnfa::from_parts([0], [b'a'], [(0, b'a', vec![5])], [0], [0]);
        assert_eq!(
            nfa.validate(),
            Err(Error::UndeclaredTransitionState {
                from: 0,
                symbol: b'a',
                state: 5
            })
        );

        let nfa = Misnfa::from_parts([0], [b'a'], [(3, b'a', vec![0])], [0], [0]);
        assert_eq!(
            nfa.validate(),
            Err(Error::UndeclaredTransitionState {
                from: 3,
                symbol: b'a',
                state: 3
            })
        );

        let nfa = Misnfa::from_parts([0], [b'a'], [(0, b'q', vec![0])], [0], [0]);
        assert_eq!(
            nfa.validate(),
            Err(Error::UndeclaredSymbol {
                from: 0,
                symbol: b'q'
            })
        );

        let nfa = Misnfa::from_parts([0], [b'a'], no_transitions(), [0, 4], [0]);
        assert_eq!(nfa.validate(), Err(Error::UndeclaredInitialState(4)));

        let nfa = Misnfa::from_parts([0], [b'a'], no_transitions(), [0], [7]);
        assert_eq!(nfa.validate(), Err(Error::UndeclaredFinalState(7)));
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UndeclaredSymbol {
            from: 2,
            symbol: b'q',
        };
        assert_eq!(
            err.to_string(),
            "transition from state 2 uses symbol 0x71 which is not in the alphabet"
        );
        assert_eq!(
            Error::UndeclaredInitialState(4).to_string(),
            "initial state 4 is not a declared state"
        );
    }
}
