// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolwerk.

use thiserror::Error;

use crate::types::{ClientId, DeviceKind};

/// Top-level error type for all Spoolwerk operations.
///
/// Every variant is raised synchronously to the caller of the violating
/// operation and is never retried.  A rejected operation leaves device state
/// exactly as it was.
#[derive(Debug, Error)]
pub enum SpoolError {
    // -- Connection state (USB exclusive link) --
    #[error("USB printer is already connected to client {holder}")]
    AlreadyConnected { holder: ClientId },

    #[error("USB printer is not connected to any client")]
    NotConnected,

    #[error("attempting to disconnect client {requested}, but the printer is held by {holder}")]
    WrongClient { holder: ClientId, requested: ClientId },

    // -- Factory / registry --
    #[error("unsupported printer type: {0}")]
    UnsupportedType(String),

    #[error("printer not found: {0}")]
    PrinterNotFound(DeviceKind),

    // -- Runtime / configuration --
    #[error("async runtime unavailable: {0}")]
    Runtime(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolError>;
