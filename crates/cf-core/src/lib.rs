//! # cf-core
//!
//! Shared building blocks for countfit: the error taxonomy and the
//! write-once result types exchanged between the fitting engine and the
//! model-selection orchestrator.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::FitResult;
