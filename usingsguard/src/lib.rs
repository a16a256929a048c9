//! Core library for the usingsguard analyzer.
//!
//! This library checks that C# `using` directives live only in one designated
//! file per project (`Usings.cs` unless configured otherwise) and relocates
//! misplaced directives there as `global using` directives.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Cooperative cancellation shared by parsing, checking and fixing.
pub mod cancel;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling check and fix mode output and exit codes.
pub mod commands;

/// Module for loading configuration.
/// This includes the project TOML file and designated file resolution.
pub mod config;

/// Module containing shared constants.
pub mod constants;

/// Tree-sitter front end turning C# text into unit snapshots.
pub mod cst;

/// `.editorconfig` discovery and section matching.
pub mod editorconfig;

/// Module defining the entry point logic.
pub mod entry_point;

/// Auto-remediation: relocation patches and the byte-range rewriter.
pub mod fix;

/// Stderr logger for the command-line front end.
pub mod logger;

/// Unit snapshots and `using` directive records.
pub mod model;

/// Module for CLI output formatting with colored text and tables.
pub mod output;

/// Module containing the placement rule.
pub mod rules;

/// Module containing path utilities.
pub mod utils;

/// Loading, checking and fixing a set of files on disk.
pub mod workspace;
