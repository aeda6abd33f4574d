// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device construction from a type tag.

use tracing::info;

use spoolwerk_core::config::SpoolConfig;
use spoolwerk_core::error::Result;
use spoolwerk_core::types::DeviceKind;

use crate::device::{Device, NetworkPrinter, UsbPrinter};
use crate::events::EventBus;

/// Builds devices that share one configuration and one event bus.
#[derive(Debug, Clone)]
pub struct DeviceFactory {
    config: SpoolConfig,
    events: EventBus,
}

impl DeviceFactory {
    /// Every device created shares `config` and emits on `events`.
    pub fn new(config: SpoolConfig, events: EventBus) -> Self {
        Self { config, events }
    }

    /// Network devices need a running tokio runtime.
    pub fn create(&self, kind: DeviceKind) -> Result<Device> {
        let device = match kind {
            DeviceKind::Network => {
                Device::Network(NetworkPrinter::new(&self.config, self.events.clone())?)
            }
            DeviceKind::Usb => Device::Usb(UsbPrinter::new(&self.config, self.events.clone())),
        };
        info!(device = %kind, "printer created");
        Ok(device)
    }

    /// Parse `tag` (`NETWORK` or `USB`) and create the device.
    pub fn create_from_tag(&self, tag: &str) -> Result<Device> {
        self.create(tag.parse()?)
    }

    pub fn config(&self) -> &SpoolConfig {
        &self.config
    }
}
