// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device event fan-out.
//
// Every connection transition and job lifecycle step is published on a
// broadcast channel and mirrored to `tracing`.  Subscribers only see events
// emitted after they subscribed.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use spoolwerk_core::config::MAX_EVENT_CAPACITY;
use spoolwerk_core::types::DeviceEvent;

/// Cloneable handle to the shared event channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Channel holding up to `capacity` unread events per subscriber,
    /// clamped to `1..=MAX_EVENT_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_CAPACITY));
        Self { tx }
    }

    /// Receive events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.tx.subscribe()
    }

    /// Log the event and publish it.  Publishing with no subscribers is not
    /// an error.
    pub fn emit(&self, event: DeviceEvent) {
        log_event(&event);
        if self.tx.send(event).is_err() {
            debug!("device event dropped, no subscribers");
        }
    }
}

fn log_event(event: &DeviceEvent) {
    match event {
        DeviceEvent::Connected { device, client } => {
            info!(device = %device, client = %client, "printer connected");
        }
        DeviceEvent::Disconnected { device, client } => match client {
            Some(client) => info!(device = %device, client = %client, "printer disconnected"),
            None => info!(device = %device, "printer disconnected"),
        },
        DeviceEvent::Queued {
            device,
            job_id,
            document,
            document_hash,
            depth,
        } => {
            info!(device = %device, job_id = %job_id, document = %document, document_hash = %document_hash, depth, "document queued");
        }
        DeviceEvent::PrintStarted {
            device,
            job_id,
            document,
            document_hash,
            client,
        } => {
            info!(device = %device, job_id = %job_id, document = %document, document_hash = %document_hash, client = ?client, "printing document");
        }
        DeviceEvent::PrintFinished {
            device,
            job_id,
            document,
            document_hash,
            client,
        } => {
            info!(device = %device, job_id = %job_id, document = %document, document_hash = %document_hash, client = ?client, "finished printing document");
        }
        DeviceEvent::Rejected {
            device,
            operation,
            reason,
        } => {
            warn!(device = %device, operation = %operation, reason = %reason, "operation rejected");
        }
    }
}
