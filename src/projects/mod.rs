//! # Everything around the lowering core that a user touches:
//! the config file, lowering fixtures and the command line.

// The basic CLI for lowering fixtures
pub(crate) mod cli;
pub mod fixture;
pub mod settings;

#[cfg(test)]
mod tests;
