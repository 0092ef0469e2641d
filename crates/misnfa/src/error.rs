//! Errors reported when validating an input automaton.

use crate::state::StateId;
use crate::symbol::Symbol;
use thiserror::Error;

/// A malformed MISNFA.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("transition from state {from} on symbol {symbol:#04x} references undeclared state {state}")]
    UndeclaredTransitionState {
        from: StateId,
        symbol: Symbol,
        state: StateId,
    },
    #[error("transition from state {from} uses symbol {symbol:#04x} which is not in the alphabet")]
    UndeclaredSymbol { from: StateId, symbol: Symbol },
    #[error("initial state {0} is not a declared state")]
    UndeclaredInitialState(StateId),
    #[error("final state {0} is not a declared state")]
    UndeclaredFinalState(StateId),
}

pub type Result<T> = std::result::Result<T, Error>;
