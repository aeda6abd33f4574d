// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Variant-aware job submission.
//
// Callers submit documents without knowing which kind of device they hold.
// Network devices enqueue and drain in the background; USB devices print
// before returning.

use tracing::debug;

use spoolwerk_core::error::Result;
use spoolwerk_core::types::{JobId, JobReceipt};

use crate::device::Device;
use crate::queue::JobHandle;

/// What a submission produced.
#[derive(Debug)]
pub enum Submission {
    /// Accepted by a network queue; completes later.
    Queued(JobHandle),
    /// Already printed on a USB link.
    Printed(JobReceipt),
}

impl Submission {
    /// Id of the submitted job, known before it completes.
    pub fn job_id(&self) -> JobId {
        match self {
            Self::Queued(handle) => handle.job_id(),
            Self::Printed(receipt) => receipt.job_id,
        }
    }

    /// The receipt, waiting for it if the job is still queued.
    pub async fn completed(self) -> Result<JobReceipt> {
        match self {
            Self::Queued(handle) => handle.wait().await,
            Self::Printed(receipt) => Ok(receipt),
        }
    }
}

/// Stateless router from a generic submit to the device's execution mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Queue on a network printer; print synchronously on a USB printer.
    /// USB failures are returned as-is.
    pub fn submit(device: &Device, document: impl Into<String>) -> Result<Submission> {
        let document = document.into();
        debug!(device = %device.kind(), "dispatching document");
        match device {
            Device::Network(printer) => Ok(Submission::Queued(printer.submit(document))),
            Device::Usb(printer) => printer.print(document).map(Submission::Printed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolwerk_core::config::SpoolConfig;
    use spoolwerk_core::error::SpoolError;
    use spoolwerk_core::types::{ClientId, DeviceKind};

    use crate::device::{NetworkPrinter, UsbPrinter};
    use crate::events::EventBus;

    #[tokio::test(start_paused = true)]
    async fn network_submission_is_queued() {
        let device = Device::Network(
            NetworkPrinter::new(&SpoolConfig::default(), EventBus::new(16)).expect("printer"),
        );

        let submission = Dispatcher::submit(&device, "Doc1").expect("submit");
        assert!(matches!(submission, Submission::Queued(_)));

        let receipt = submission.completed().await.expect("completed");
        assert_eq!(receipt.device, DeviceKind::Network);
    }

    #[test]
    fn usb_submission_prints_immediately() {
        let mut printer = UsbPrinter::new(&SpoolConfig::default(), EventBus::new(16));
        printer.connect(ClientId::from("C1")).expect("connect");
        let device = Device::Usb(printer);

        let submission = Dispatcher::submit(&device, "X").expect("submit");
        match submission {
            Submission::Printed(receipt) => assert_eq!(receipt.document, "X"),
            Submission::Queued(_) => panic!("USB jobs are never queued"),
        }
    }

    #[test]
    fn usb_submission_surfaces_not_connected() {
        let device = Device::Usb(UsbPrinter::new(&SpoolConfig::default(), EventBus::new(16)));
        assert!(matches!(
            Dispatcher::submit(&device, "X"),
            Err(SpoolError::NotConnected)
        ));
    }
}
