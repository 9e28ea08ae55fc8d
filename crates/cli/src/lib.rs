//! Public library modules for the CLI crate
pub mod repl;
pub mod terminal;
