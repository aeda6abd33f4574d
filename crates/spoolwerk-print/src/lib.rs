// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk Print: simulated network and USB print devices.  This crate
// holds the connection state machines, the serialized job queue, the
// variant-aware dispatch layer and the registry that callers drive devices
// through.

pub mod command;
pub mod connection;
pub mod device;
pub mod dispatch;
pub mod events;
pub mod factory;
pub mod queue;
pub mod registry;

pub use command::{CommandOutcome, DeviceCommand};
pub use device::{Device, NetworkPrinter, UsbPrinter};
pub use dispatch::{Dispatcher, Submission};
pub use events::EventBus;
pub use factory::DeviceFactory;
pub use queue::{JobHandle, JobQueue};
pub use registry::PrinterRegistry;
