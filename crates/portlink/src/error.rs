//! Error types for Portlink operations.
//!
//! This module provides the main error type [`PortlinkError`] which wraps the
//! error conditions of each layer: reference parsing and link editing,
//! persistence, and diagram export.

use std::io;

use thiserror::Error;

use crate::{codec, editor::EditError, export};

/// The main error type for Portlink operations.
///
/// # Diagnostic Variants
///
/// [`EditError::Reference`] carries structured parse diagnostics together
/// with the offending token, which can be used for rich error reporting.
#[derive(Debug, Error)]
pub enum PortlinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Store error: {0}")]
    Codec(#[from] codec::Error),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}
