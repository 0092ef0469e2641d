/// Options for the [`Determinizer`](crate::Determinizer) pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Check the input automaton with [`Misnfa::validate`](crate::Misnfa::validate)
    /// before construction.
    pub validate_input: bool,
    /// Prune unreachable and dead states from the complement.
    pub remove_useless_states: bool,
}

impl Config {
    /// No input validation, full pipeline.
    pub const fn unchecked() -> Self {
        Self {
            validate_input: false,
            remove_useless_states: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_input: true,
            remove_useless_states: true,
        }
    }
}
