// Copyright 2026 Jakub J. Guzek
// SPDX-License-Identifier: MIT

//! IUPred3 client library: submit protein sequences to the IUPred3 web
//! service and turn its per-residue scores into disorder masks.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fasta;
pub mod render;
pub mod types;

pub use error::{WrapperError, WrapperResult};
