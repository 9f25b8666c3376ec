//! # CLI Module
//!
//! Command-line tools for working with path patterns.
//!
//! ## Commands
//!
//! ### `compile`
//!
//! Show how a pattern compiles:
//!
//! ```bash
//! routewerk compile '/users/:id(\d+)/posts/*'
//! ```
//!
//! ### `match`
//!
//! Test a path against a pattern and print the extracted parameters. Exits
//! with status 1 when the path does not match:
//!
//! ```bash
//! routewerk match '/users/:id' /users/42
//! ```
//!
//! ### `config`
//!
//! Print the effective router configuration, from a TOML file or from the
//! environment:
//!
//! ```bash
//! routewerk config --file routewerk.toml
//! ```
//!
//! Both `compile` and `match` accept `--strict` (distinguish trailing
//! slashes), `--prefix` (prefix-only matching, as used for mounts) and
//! `--format json`.

mod commands;

pub use commands::{run_cli, Cli, Commands, OutputFormat, PatternArgs};

#[cfg(test)]
mod tests;
