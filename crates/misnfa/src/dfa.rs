//! Deterministic Finite Automaton (DFA) with completion, complementation and
//! useless-state pruning.

use crate::state::{StateId, StateSet};
use crate::symbol::{DisplaySymbol, Symbol};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A Deterministic Finite Automaton.
///
/// Two DFAs are equal when their states, alphabets, transitions, initial
/// state and final states are equal. State numbering matters: language
/// equivalent automata with different ids are not equal.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// Declared states
    states: StateSet,
    /// Declared symbols
    alphabet: BTreeSet<Symbol>,
    /// Transitions: (source, symbol) -> destination
    transitions: BTreeMap<(StateId, Symbol), StateId>,
    /// Initial state, always a member of `states`
    initial_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Reverse transitions: destination -> set of sources
    predecessors: BTreeMap<StateId, StateSet>,
    /// Next fresh state id
    next_state: StateId,
}

impl Dfa {
    /// Create a DFA over `alphabet` with a single, non-final initial state 0
    /// and no transitions.
    pub fn new(alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            states: StateSet::singleton(0),
            alphabet: alphabet.into_iter().collect(),
            transitions: BTreeMap::new(),
            initial_state: 0,
            final_states: StateSet::new(),
            predecessors: BTreeMap::new(),
            next_state: 1,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        self.states.insert(id);
        id
    }

    /// Add a final (accepting) state. The state must be declared.
    pub fn add_final_state(&mut self, state: StateId) {
        debug_assert!(self.states.contains(state));
        self.final_states.insert(state);
    }

    /// Add a transition, replacing any previous one for `(source, symbol)`.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        debug_assert!(self.states.contains(source) && self.states.contains(destination));
        debug_assert!(self.alphabet.contains(&symbol));

        if let Some(previous) = self.transitions.insert((source, symbol), destination) {
            if previous != destination {
                self.unlink(source, previous);
            }
        }
        self.predecessors.entry(destination).or_default().insert(source);
    }

    // Drop `source` from the predecessors of `destination` unless another
    // symbol still links them.
    fn unlink(&mut self, source: StateId, destination: StateId) {
        let still_linked = self
            .alphabet
            .iter()
            .any(|&a| self.transition(source, a) == Some(destination));
        if !still_linked {
            if let Some(sources) = self.predecessors.get_mut(&destination) {
                sources.remove(source);
            }
        }
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get all transitions as `(source, symbol, destination)` triples, in
    /// ascending `(source, symbol)` order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Get the states with a transition into `state`.
    pub fn predecessors(&self, state: StateId) -> Option<&StateSet> {
        self.predecessors.get(&state)
    }

    /// Get the declared states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Get the initial state.
    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check whether a state is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Run the automaton on `word`.
    ///
    /// A missing transition rejects immediately, which includes any symbol
    /// outside the alphabet.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let mut current = self.initial_state;

        for &symbol in word {
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_final(current)
    }

    /// Check whether every declared state has a transition on every symbol.
    pub fn is_total(&self) -> bool {
        self.missing_transitions().next().is_none()
    }

    fn missing_transitions(&self) -> impl Iterator<Item = (StateId, Symbol)> + '_ {
        self.states.iter().flat_map(move |state| {
            self.alphabet
                .iter()
                .filter(move |&&symbol| self.transition(state, symbol).is_none())
                .map(move |&symbol| (state, symbol))
        })
    }

    /// Make the transition function total.
    ///
    /// If some `(state, symbol)` pair has no transition, a fresh non-final
    /// sink state is added, every missing transition is routed to it and it
    /// loops to itself on every symbol. Returns the sink, or `None` when the
    /// DFA was already total, in which case nothing changes.
    pub fn complete(&mut self) -> Option<StateId> {
        let missing: Vec<(StateId, Symbol)> = self.missing_transitions().collect();
        if missing.is_empty() {
            return None;
        }

        let sink = self.add_state();
        let alphabet: Vec<Symbol> = self.alphabet.iter().copied().collect();
        for symbol in alphabet {
            self.add_transition(sink, symbol, sink);
        }
        for (state, symbol) in missing {
            trace!("{state} --{}--> sink {sink}", DisplaySymbol(symbol));
            self.add_transition(state, symbol, sink);
        }

        debug!("completed DFA with sink state {sink}");
        Some(sink)
    }

    /// Swap final and non-final states.
    ///
    /// This complements the recognized language only when the DFA is total;
    /// call [`Dfa::complete`] first.
    pub fn invert_final_states(&mut self) {
        self.final_states = self.states.difference(&self.final_states);
    }

    /// Find all states reachable from the initial state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.next_state as usize);
        let mut queue = VecDeque::new();
        queue.push_back(self.initial_state);

        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Find all states from which some final state is reachable, final states
    /// included.
    pub fn co_reachable_states(&self) -> StateSet {
        let mut co_reachable = StateSet::with_capacity(self.next_state as usize);
        let mut queue: VecDeque<StateId> = self.final_states.iter().collect();

        while let Some(state) = queue.pop_front() {
            if !co_reachable.insert(state) {
                continue;
            }

            if let Some(sources) = self.predecessors.get(&state) {
                queue.extend(sources.iter().filter(|&s| !co_reachable.contains(s)));
            }
        }

        co_reachable
    }

    /// Remove states that cannot influence acceptance from the initial state,
    /// together with every transition touching them. Returns the removed
    /// states.
    ///
    /// A state is useless when it is unreachable from the initial state, or
    /// when it is neither final nor able to reach a final state. If every state
    /// is useless, the initial state is kept alone with a self-loop on every
    /// symbol, recognizing the empty language.
    ///
    /// Transitions into removed states are dropped rather than redirected, so
    /// a total DFA may come out partial. The language does not change: the
    /// dropped transitions only led to rejection, and [`Dfa::accepts`] rejects
    /// on a missing transition. Use [`Dfa::is_total`] to check.
    pub fn remove_useless_states(&mut self) -> StateSet {
        let reachable = self.reachable_states();
        let co_reachable = self.co_reachable_states();

        let useless: StateSet = self
            .states
            .iter()
            .filter(|&s| {
                !reachable.contains(s) || (!co_reachable.contains(s) && !self.is_final(s))
            })
            .collect();

        if useless.is_empty() {
            return useless;
        }

        self.states = self.states.difference(&useless);
        self.final_states = self.final_states.difference(&useless);
        self.transitions
            .retain(|&(src, _), dst| !useless.contains(src) && !useless.contains(*dst));

        if self.states.is_empty() {
            debug!("every state is useless, keeping initial state {}", self.initial_state);
            self.states.insert(self.initial_state);
            for &symbol in &self.alphabet {
                self.transitions
                    .insert((self.initial_state, symbol), self.initial_state);
            }
        }

        self.rebuild_predecessors();
        debug!(
            "removed {} useless states, {} left",
            useless.len(),
            self.states.len()
        );

        let mut removed = useless;
        removed.remove(self.initial_state);
        removed
    }

    fn rebuild_predecessors(&mut self) {
        let mut predecessors: BTreeMap<StateId, StateSet> = BTreeMap::new();
        for (&(src, _), &dst) in &self.transitions {
            predecessors.entry(dst).or_default().insert(src);
        }
        self.predecessors = predecessors;
    }

    /// Check if the DFA accepts no word at all.
    pub fn is_empty(&self) -> bool {
        !self.reachable_states().intersects(&self.final_states)
    }
}

impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.alphabet == other.alphabet
            && self.transitions == other.transitions
            && self.initial_state == other.initial_state
            && self.final_states == other.final_states
    }
}

impl Eq for Dfa {}
