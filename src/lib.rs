//! # incmake - Makefiles from `#include` graphs
//!
//! incmake discovers the C/C++ sources of a small project, reads their
//! `#include` directives, orders the translation units so that every file
//! follows the project files it includes, and writes a Makefile for the
//! native toolchain to execute.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a new project
//! incmake new myapp --lang c
//!
//! # Generate the Makefile and build
//! cd myapp && incmake build
//! ```
//!
//! ## Module Organization
//!
//! - [`headers`] - Standard library header tables
//! - [`scan`] - `#include` extraction
//! - [`graph`] - Source discovery and the dependency graph
//! - [`order`] - Build ordering
//! - [`project`] - One analysis pass over a project
//! - [`makefile`] - Makefile generation
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Configuration file parsing (`incmake.toml`).
pub mod config;

/// Source discovery and the include dependency graph.
pub mod graph;

/// Standard C and C++ header tables.
pub mod headers;

/// Makefile generation.
pub mod makefile;

/// Topological build ordering.
pub mod order;

/// Project analysis (discover, scan, order).
pub mod project;

/// New project scaffolding.
pub mod scaffold;

/// `#include` directive extraction.
pub mod scan;

/// Starter source templates.
pub mod templates;

/// Compiler selection and standard flags.
pub mod toolchain;

/// Terminal UI utilities (tables).
pub mod ui;
