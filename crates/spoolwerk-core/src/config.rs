// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device simulation settings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpoolError};

/// Largest accepted `event_capacity`.
pub const MAX_EVENT_CAPACITY: usize = 65_536;

/// Settings shared by every device created from one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoolConfig {
    /// Fixed simulated print time for network jobs, in milliseconds.
    pub print_delay_ms: u64,
    /// Blocking simulated print time for USB jobs, in milliseconds.
    pub usb_print_delay_ms: u64,
    /// Buffer size of the device event channel.
    pub event_capacity: usize,
}

impl Default for SpoolConfig {
    fn default() -> Self {
        Self {
            print_delay_ms: 1000,
            usb_print_delay_ms: 0,
            event_capacity: 256,
        }
    }
}

impl SpoolConfig {
    /// Load settings from a JSON file.  Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write settings to a JSON file.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject settings that cannot build an event channel.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(SpoolError::Config("event_capacity must be at least 1".into()));
        }
        if self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(SpoolError::Config(format!(
                "event_capacity must be at most {MAX_EVENT_CAPACITY}, got {}",
                self.event_capacity
            )));
        }
        Ok(())
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }

    pub fn usb_print_delay(&self) -> Duration {
        Duration::from_millis(self.usb_print_delay_ms)
    }
}
