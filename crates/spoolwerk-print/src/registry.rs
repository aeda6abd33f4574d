// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer registry: one device per kind, looked up by type.
//
// The registry is an ordinary value: construct one at startup and pass it to
// whatever needs to drive printers.  There is no process-wide instance.

use std::collections::HashMap;

use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use spoolwerk_core::config::SpoolConfig;
use spoolwerk_core::error::{Result, SpoolError};
use spoolwerk_core::types::{ClientId, DeviceEvent, DeviceKind};

use crate::command::{CommandOutcome, DeviceCommand};
use crate::device::Device;
use crate::dispatch::{Dispatcher, Submission};
use crate::events::EventBus;
use crate::factory::DeviceFactory;

/// Owns the registered devices and the event bus they share.
pub struct PrinterRegistry {
    devices: HashMap<DeviceKind, Device>,
    factory: DeviceFactory,
    events: EventBus,
}

impl PrinterRegistry {
    /// Validate `config` and build an empty registry.
    pub fn new(config: SpoolConfig) -> Result<Self> {
        config.validate()?;
        let events = EventBus::new(config.event_capacity);
        let factory = DeviceFactory::new(config, events.clone());
        Ok(Self {
            devices: HashMap::new(),
            factory,
            events,
        })
    }

    /// Create and register a device.  An existing device of the same kind is
    /// replaced, together with its connections and queue.
    #[instrument(skip(self))]
    pub fn add_printer(&mut self, kind: DeviceKind) -> Result<()> {
        let device = self.factory.create(kind)?;
        if self.devices.insert(kind, device).is_some() {
            warn!(device = %kind, "replaced existing printer");
        } else {
            info!(device = %kind, "printer registered");
        }
        Ok(())
    }

    /// Register a device from its type tag.
    pub fn add_printer_by_tag(&mut self, tag: &str) -> Result<DeviceKind> {
        let kind: DeviceKind = tag.parse()?;
        self.add_printer(kind)?;
        Ok(kind)
    }

    /// Attach `client` to the device registered for `kind`.
    pub fn connect(&mut self, kind: DeviceKind, client: impl Into<ClientId>) -> Result<()> {
        self.device_mut(kind)?.connect(client.into())
    }

    /// Detach `client` from the device registered for `kind`.
    pub fn disconnect(&mut self, kind: DeviceKind, client: Option<ClientId>) -> Result<()> {
        self.device_mut(kind)?.disconnect(client.as_ref())
    }

    /// Send a document to the device registered for `kind`: queued on a
    /// network printer, printed at once on a USB printer.
    pub fn submit_document(
        &mut self,
        kind: DeviceKind,
        document: impl Into<String>,
    ) -> Result<Submission> {
        Dispatcher::submit(self.device_mut(kind)?, document)
    }

    /// Run a prepared command against the device registered for `kind`.
    #[instrument(skip(self, command), fields(operation = %command.operation()))]
    pub fn execute(&mut self, kind: DeviceKind, command: DeviceCommand) -> Result<CommandOutcome> {
        command.execute(self.device_mut(kind)?)
    }

    /// Receive every device event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }

    /// The device registered for `kind`, if any.
    pub fn device(&self, kind: DeviceKind) -> Option<&Device> {
        self.devices.get(&kind)
    }

    /// Kinds with a registered device, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = DeviceKind> + '_ {
        self.devices.keys().copied()
    }

    pub fn config(&self) -> &SpoolConfig {
        self.factory.config()
    }

    fn device_mut(&mut self, kind: DeviceKind) -> Result<&mut Device> {
        self.devices.get_mut(&kind).ok_or_else(|| {
            warn!(device = %kind, "printer not found");
            SpoolError::PrinterNotFound(kind)
        })
    }
}
