// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connection slots for print devices.
//
// A network printer accepts any number of clients.  A USB printer is an
// exclusive link: one holder at a time, and only the holder may detach it.

use std::collections::BTreeSet;

use tracing::debug;

use spoolwerk_core::error::{Result, SpoolError};
use spoolwerk_core::types::ClientId;

/// Set of clients attached to a shared network printer.
#[derive(Debug, Clone, Default)]
pub struct NetworkConnections {
    clients: BTreeSet<ClientId>,
}

impl NetworkConnections {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a client.  Returns `false` if it was already attached.
    pub fn connect(&mut self, client: ClientId) -> bool {
        let added = self.clients.insert(client);
        if !added {
            debug!("client already connected, nothing to do");
        }
        added
    }

    /// Detach a client.  Returns `false` if it was not attached.
    pub fn disconnect(&mut self, client: &ClientId) -> bool {
        let removed = self.clients.remove(client);
        if !removed {
            debug!(client = %client, "client was not connected, nothing to do");
        }
        removed
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.clients.contains(client)
    }

    /// Attached clients in sorted order.
    pub fn clients(&self) -> impl Iterator<Item = &ClientId> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// State machine for an exclusive USB link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UsbConnection {
    #[default]
    Unconnected,
    Connected(ClientId),
}

impl UsbConnection {
    /// `Unconnected` -> `Connected(client)`.  Never replaces an existing
    /// holder.
    pub fn connect(&mut self, client: ClientId) -> Result<()> {
        match self {
            Self::Unconnected => {
                *self = Self::Connected(client);
                Ok(())
            }
            Self::Connected(holder) => Err(SpoolError::AlreadyConnected {
                holder: holder.clone(),
            }),
        }
    }

    /// `Connected(x)` -> `Unconnected` when `client` is absent or equal to
    /// `x`.  Returns the released holder.  State is untouched on error.
    pub fn disconnect(&mut self, client: Option<&ClientId>) -> Result<ClientId> {
        match (&*self, client) {
            (Self::Unconnected, _) => return Err(SpoolError::NotConnected),
            (Self::Connected(holder), Some(requested)) if requested != holder => {
                return Err(SpoolError::WrongClient {
                    holder: holder.clone(),
                    requested: requested.clone(),
                });
            }
            (Self::Connected(_), _) => {}
        }

        match std::mem::take(self) {
            Self::Connected(released) => Ok(released),
            Self::Unconnected => Err(SpoolError::NotConnected),
        }
    }

    /// The client holding the link, if any.
    pub fn holder(&self) -> Option<&ClientId> {
        match self {
            Self::Unconnected => None,
            Self::Connected(holder) => Some(holder),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}
