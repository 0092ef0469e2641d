//! Determinization and complementation of finite automata with multiple
//! initial states.
//!
//! This crate provides:
//! - [`Misnfa`], a nondeterministic automaton with any number of initial states
//! - [`Dfa`], a deterministic automaton with completion and useless-state pruning
//! - Subset construction ([`determinize`]) and complementation ([`complement`])
//!
//! ```
//! use misnfa::{Misnfa, complement};
//!
//! let mut nfa = Misnfa::new();
//! nfa.add_transition(0, b'a', 1);
//! nfa.add_initial_state(0);
//! nfa.add_final_state(1);
//!
//! let dfa = complement(&nfa);
//! assert!(dfa.accepts(b""));
//! assert!(!dfa.accepts(b"a"));
//! assert!(dfa.accepts(b"aa"));
//! ```

mod config;
mod determinize;
mod dfa;
mod error;
mod misnfa;
mod state;
mod symbol;

pub use config::Config;
pub use determinize::{Determinization, Determinizer, complement, determinize, try_complement};
pub use dfa::Dfa;
pub use error::{Error, Result};
pub use misnfa::Misnfa;
pub use state::{StateId, StateSet, Subset};
pub use symbol::{DisplaySymbol, Symbol, Word};
