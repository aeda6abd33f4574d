// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print device variants.
//
// `NetworkPrinter` pairs a shared client set with an asynchronous job queue.
// `UsbPrinter` pairs an exclusive link with synchronous, unbuffered printing.
// `Device` is the tagged union callers hold; its variant is the only thing
// dispatch ever branches on.

use std::time::Duration;

use chrono::Utc;
use tracing::instrument;

use spoolwerk_core::config::SpoolConfig;
use spoolwerk_core::error::{Result, SpoolError};
use spoolwerk_core::types::{ClientId, DeviceEvent, DeviceKind, Job, JobReceipt, Operation};

use crate::connection::{NetworkConnections, UsbConnection};
use crate::events::EventBus;
use crate::queue::{JobHandle, JobQueue};

/// Shared network printer.  Connection operations never fail.
pub struct NetworkPrinter {
    connections: NetworkConnections,
    queue: JobQueue,
    events: EventBus,
}

impl NetworkPrinter {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &SpoolConfig, events: EventBus) -> Result<Self> {
        let queue = JobQueue::new(config.print_delay(), events.clone())?;
        Ok(Self {
            connections: NetworkConnections::new(),
            queue,
            events,
        })
    }

    /// Attach `client`.  Reconnecting an attached client is a no-op.
    #[instrument(skip(self), fields(device = "NETWORK"))]
    pub fn connect(&mut self, client: ClientId) -> Result<()> {
        self.connections.connect(client.clone());
        self.events.emit(DeviceEvent::Connected {
            device: DeviceKind::Network,
            client,
        });
        Ok(())
    }

    /// Detach `client` if attached.  With no id there is nothing to detach
    /// and the call is a successful no-op.
    #[instrument(skip(self), fields(device = "NETWORK"))]
    pub fn disconnect(&mut self, client: Option<&ClientId>) -> Result<()> {
        if let Some(client) = client {
            self.connections.disconnect(client);
        }
        self.events.emit(DeviceEvent::Disconnected {
            device: DeviceKind::Network,
            client: client.cloned(),
        });
        Ok(())
    }

    /// Queue a document.  Returns immediately.
    pub fn submit(&self, document: impl Into<String>) -> JobHandle {
        self.queue.submit(document)
    }

    /// Clients currently attached.
    pub fn connections(&self) -> &NetworkConnections {
        &self.connections
    }

    /// The backing job queue.
    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }
}

/// Exclusive point-to-point USB printer.
pub struct UsbPrinter {
    link: UsbConnection,
    print_delay: Duration,
    events: EventBus,
}

impl UsbPrinter {
    /// A USB printer with no client attached.
    pub fn new(config: &SpoolConfig, events: EventBus) -> Self {
        Self {
            link: UsbConnection::default(),
            print_delay: config.usb_print_delay(),
            events,
        }
    }

    /// Take the link for `client`.  Fails with `AlreadyConnected` while
    /// another client holds it.
    #[instrument(skip(self), fields(device = "USB"))]
    pub fn connect(&mut self, client: ClientId) -> Result<()> {
        match self.link.connect(client.clone()) {
            Ok(()) => {
                self.events.emit(DeviceEvent::Connected {
                    device: DeviceKind::Usb,
                    client,
                });
                Ok(())
            }
            Err(e) => Err(self.reject(Operation::Connect, e)),
        }
    }

    /// Release the link.  Passing a client other than the holder fails with
    /// `WrongClient`; passing none releases whoever holds it.
    #[instrument(skip(self), fields(device = "USB"))]
    pub fn disconnect(&mut self, client: Option<&ClientId>) -> Result<()> {
        match self.link.disconnect(client) {
            Ok(released) => {
                self.events.emit(DeviceEvent::Disconnected {
                    device: DeviceKind::Usb,
                    client: Some(released),
                });
                Ok(())
            }
            Err(e) => Err(self.reject(Operation::Disconnect, e)),
        }
    }

    /// Print a document on the held link, returning once it has finished.
    ///
    /// Blocks the calling thread for the configured USB print delay.
    #[instrument(skip(self, document), fields(device = "USB"))]
    pub fn print(&self, document: impl Into<String>) -> Result<JobReceipt> {
        let Some(holder) = self.link.holder().cloned() else {
            return Err(self.reject(Operation::Print, SpoolError::NotConnected));
        };

        let job = Job::new(document);
        let started_at = Utc::now();
        self.events.emit(DeviceEvent::PrintStarted {
            device: DeviceKind::Usb,
            job_id: job.id,
            document: job.document.clone(),
            document_hash: job.document_hash.clone(),
            client: Some(holder.clone()),
        });

        if !self.print_delay.is_zero() {
            std::thread::sleep(self.print_delay);
        }

        self.events.emit(DeviceEvent::PrintFinished {
            device: DeviceKind::Usb,
            job_id: job.id,
            document: job.document.clone(),
            document_hash: job.document_hash.clone(),
            client: Some(holder.clone()),
        });

        Ok(job.into_receipt(DeviceKind::Usb, Some(holder), started_at))
    }

    /// Current state of the exclusive link.
    pub fn connection(&self) -> &UsbConnection {
        &self.link
    }

    fn reject(&self, operation: Operation, err: SpoolError) -> SpoolError {
        self.events.emit(DeviceEvent::Rejected {
            device: DeviceKind::Usb,
            operation,
            reason: err.to_string(),
        });
        err
    }
}

/// A print device of either variant.
pub enum Device {
    Network(NetworkPrinter),
    Usb(UsbPrinter),
}

impl Device {
    /// The declared variant tag.
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Network(_) => DeviceKind::Network,
            Self::Usb(_) => DeviceKind::Usb,
        }
    }

    /// Attach `client` with the variant's connection rules.
    pub fn connect(&mut self, client: ClientId) -> Result<()> {
        match self {
            Self::Network(printer) => printer.connect(client),
            Self::Usb(printer) => printer.connect(client),
        }
    }

    /// Detach `client` (or the USB holder when `None`).
    pub fn disconnect(&mut self, client: Option<&ClientId>) -> Result<()> {
        match self {
            Self::Network(printer) => printer.disconnect(client),
            Self::Usb(printer) => printer.disconnect(client),
        }
    }

    /// The network printer, if this is one.
    pub fn as_network(&self) -> Option<&NetworkPrinter> {
        match self {
            Self::Network(printer) => Some(printer),
            Self::Usb(_) => None,
        }
    }

    /// The USB printer, if this is one.
    pub fn as_usb(&self) -> Option<&UsbPrinter> {
        match self {
            Self::Usb(printer) => Some(printer),
            Self::Network(_) => None,
        }
    }
}
