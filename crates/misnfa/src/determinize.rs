//! Subset construction for MISNFAs, and complementation of the resulting DFA.
//!
//! The pipeline runs in a fixed order:
//! 1. subset construction from the whole initial-state set,
//! 2. marking DFA states whose subset meets the NFA final states,
//! 3. completion with a sink state, then inversion of the final states,
//! 4. removal of unreachable and dead states.
//!
//! Steps 1-2 give a DFA for the same language ([`determinize`]); all four give
//! a DFA for the complement ([`complement`]).

use crate::config::Config;
use crate::dfa::Dfa;
use crate::error::Result;
use crate::misnfa::Misnfa;
use crate::state::{StateId, Subset};
use crate::symbol::DisplaySymbol;
use indexmap::IndexSet;
use log::{debug, trace};

/// Converts one MISNFA into a DFA.
///
/// A determinizer is consumed by [`convert`](Determinizer::convert) or
/// [`complement`](Determinizer::complement); build a new one per construction.
#[derive(Debug)]
pub struct Determinizer<'a> {
    nfa: &'a Misnfa,
    config: Config,
}

impl<'a> Determinizer<'a> {
    /// Create a determinizer that trusts its input.
    pub fn new(nfa: &'a Misnfa) -> Self {
        Self {
            nfa,
            config: Config::unchecked(),
        }
    }

    /// Create a determinizer with the given options, validating the input
    /// first when `config.validate_input` is set.
    pub fn with_config(nfa: &'a Misnfa, config: Config) -> Result<Self> {
        if config.validate_input {
            nfa.validate()?;
        }
        Ok(Self { nfa, config })
    }

    /// Determinize the automaton. The result recognizes the same language.
    pub fn convert(self) -> Determinization {
        let mut determinization = self.subset_construction();
        self.set_final_states(&mut determinization);
        determinization
    }

    /// Build a DFA recognizing the complement of the automaton's language.
    pub fn complement(self) -> Dfa {
        let config = self.config;
        self.convert().complement_with(config)
    }

    fn subset_construction(&self) -> Determinization {
        let nfa = self.nfa;
        let mut dfa = Dfa::new(nfa.alphabet().iter().copied());
        let mut subsets: IndexSet<Subset> = IndexSet::new();

        // Dfa::new already declared state 0 as the initial state
        subsets.insert(nfa.initial_states().clone());

        // A subset's index is its DFA state id, and subsets are explored in
        // registration order, so the tail past `next` is the work-list.
        let mut next = 0;
        while next < subsets.len() {
            let current = next as StateId;
            let subset = subsets[next].clone();
            next += 1;
            trace!("exploring state {current} = {subset:?}");

            for &symbol in nfa.alphabet() {
                let merged_states = nfa.move_on_symbol(&subset, symbol);
                if merged_states.is_empty() {
                    continue;
                }

                let (index, inserted) = subsets.insert_full(merged_states);
                let target = index as StateId;
                if inserted {
                    let state = dfa.add_state();
                    debug_assert_eq!(state, target);
                    trace!("new state {target} = {:?}", subsets[index]);
                }

                trace!("{current} --{}--> {target}", DisplaySymbol(symbol));
                dfa.add_transition(current, symbol, target);
            }
        }

        debug!(
            "subset construction produced {} states from {} NFA states",
            subsets.len(),
            nfa.states().len()
        );
        Determinization { dfa, subsets }
    }

    fn set_final_states(&self, determinization: &mut Determinization) {
        let Determinization { dfa, subsets } = determinization;
        for (index, subset) in subsets.iter().enumerate() {
            if !subset.is_disjoint(self.nfa.final_states()) {
                dfa.add_final_state(index as StateId);
            }
        }
    }
}

/// The DFA produced by subset construction, together with the subset of NFA
/// states behind each DFA state.
#[derive(Debug, Clone)]
pub struct Determinization {
    dfa: Dfa,
    subsets: IndexSet<Subset>,
}

impl Determinization {
    /// Get the determinized automaton.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Take the determinized automaton.
    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Get the NFA states a DFA state stands for.
    pub fn subset(&self, state: StateId) -> Option<&Subset> {
        self.subsets.get_index(state as usize)
    }

    /// Get the DFA state standing for a set of NFA states, if it was reached.
    pub fn state_of(&self, subset: &Subset) -> Option<StateId> {
        self.subsets.get_index_of(subset).map(|i| i as StateId)
    }

    /// Iterate over `(DFA state, NFA subset)` pairs in state order.
    pub fn subsets(&self) -> impl Iterator<Item = (StateId, &Subset)> + '_ {
        self.subsets
            .iter()
            .enumerate()
            .map(|(i, subset)| (i as StateId, subset))
    }

    /// Finish the complement pipeline: complete, invert, prune.
    pub fn complement(self) -> Dfa {
        self.complement_with(Config::unchecked())
    }

    fn complement_with(self, config: Config) -> Dfa {
        let mut dfa = self.dfa;
        swap_states(&mut dfa);
        if config.remove_useless_states {
            dfa.remove_useless_states();
        }
        dfa
    }
}

// Inversion is only a complement on a total DFA, so completion goes first.
fn swap_states(dfa: &mut Dfa) {
    dfa.complete();
    dfa.invert_final_states();
}

/// Build a DFA recognizing the same language as `nfa`.
pub fn determinize(nfa: &Misnfa) -> Dfa {
    Determinizer::new(nfa).convert().into_dfa()
}

/// Build a DFA recognizing every word `nfa` rejects.
///
/// The input is not validated; see [`try_complement`].
pub fn complement(nfa: &Misnfa) -> Dfa {
    Determinizer::new(nfa).complement()
}

/// Like [`complement`], but checks first that the automaton only refers to
/// declared states and symbols.
pub fn try_complement(nfa: &Misnfa) -> Result<Dfa> {
    Ok(Determinizer::with_config(nfa, Config::default())?.complement())
}
