// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deferred device operations.
//
// A command captures an operation and its arguments so that sequences of
// operations can be built up front and run (and logged) uniformly.  Running
// a command is exactly the underlying call: no retry, no caching.

use tracing::{debug, instrument};

use spoolwerk_core::error::Result;
use spoolwerk_core::types::{ClientId, Operation};

use crate::device::Device;
use crate::dispatch::{Dispatcher, Submission};

/// An operation waiting to be run against a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Connect { client: ClientId },
    Disconnect { client: Option<ClientId> },
    Submit { document: String },
}

/// Result of running a [`DeviceCommand`].
#[derive(Debug)]
pub enum CommandOutcome {
    Connected,
    Disconnected,
    Submitted(Submission),
}

impl DeviceCommand {
    pub fn connect(client: impl Into<ClientId>) -> Self {
        Self::Connect {
            client: client.into(),
        }
    }

    pub fn disconnect(client: Option<ClientId>) -> Self {
        Self::Disconnect { client }
    }

    pub fn submit(document: impl Into<String>) -> Self {
        Self::Submit {
            document: document.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Connect { .. } => Operation::Connect,
            Self::Disconnect { .. } => Operation::Disconnect,
            Self::Submit { .. } => Operation::Print,
        }
    }

    /// Run the command against `device`, consuming it.
    #[instrument(skip_all, fields(device = %device.kind(), operation = %self.operation()))]
    pub fn execute(self, device: &mut Device) -> Result<CommandOutcome> {
        debug!("executing command");
        match self {
            Self::Connect { client } => device.connect(client).map(|()| CommandOutcome::Connected),
            Self::Disconnect { client } => device
                .disconnect(client.as_ref())
                .map(|()| CommandOutcome::Disconnected),
            Self::Submit { document } => {
                Dispatcher::submit(device, document).map(CommandOutcome::Submitted)
            }
        }
    }
}
