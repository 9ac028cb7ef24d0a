//! # CLI Module
//!
//! Command-line front end for the generator.
//!
//! ## Commands
//!
//! ### `all`
//!
//! Generate every API the discovery directory lists, skipping ids named in the
//! ignore file, then rebuild the per-API packaging files and both indexes:
//!
//! ```bash
//! apigen all --ignore ignore.json
//! ```
//!
//! ### `api`
//!
//! Generate specific APIs from discovery URLs or local files:
//!
//! ```bash
//! apigen api https://www.googleapis.com/discovery/v1/apis/drive/v3/rest ./vision.json
//! ```
//!
//! ### `index`
//!
//! Rebuild the packaging files and indexes from what is already on disk:
//!
//! ```bash
//! apigen index
//! ```
//!
//! ## Global Options
//!
//! - `--output <DIR>` - output root (env `APIGEN_OUTPUT_DIR`, default `src/apis`)
//! - `--root-index <FILE>` - repository-root index file
//! - `--debug` - debug logging
//! - `--request-concurrency <N>` / `--api-concurrency <N>` - concurrency ceilings
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use apigen::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse()).await?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
